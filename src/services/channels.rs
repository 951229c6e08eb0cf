use crate::models::{BookingRequest, ChannelLinks, ConfirmationResult, DriverProfile};

/// Strip everything but digits, including a leading `+`. WhatsApp deep
/// links require the bare international number.
pub fn digits_only(phone: &str) -> String {
    phone.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn notes_or_none(notes: &str) -> &str {
    if notes.trim().is_empty() {
        "None"
    } else {
        notes
    }
}

/// WhatsApp message body: the full emoji-tagged trip summary.
pub fn whatsapp_summary(result: &ConfirmationResult, booking: &BookingRequest) -> String {
    format!(
        "🚀 NEW PRIVATE BOOKING {}\n\n👤 Client: {}\n📞 Phone: {}\n📍 From: {}\n🏁 To: {}\n📅 When: {} @ {}\n👥 Pax: {}\n📝 Notes: {}",
        result.booking_ref,
        booking.full_name,
        booking.phone,
        booking.pickup_location,
        booking.dropoff_location,
        booking.date,
        booking.time,
        booking.passengers,
        notes_or_none(&booking.notes),
    )
}

/// SMS body: same content, plainer and shorter.
pub fn sms_summary(result: &ConfirmationResult, booking: &BookingRequest) -> String {
    format!(
        "NEW BOOKING {}\nClient: {}\nPhone: {}\nFrom: {}\nTo: {}\nWhen: {} @ {}\nPax: {}\nNotes: {}",
        result.booking_ref,
        booking.full_name,
        booking.phone,
        booking.pickup_location,
        booking.dropoff_location,
        booking.date,
        booking.time,
        booking.passengers,
        notes_or_none(&booking.notes),
    )
}

/// Build the three deep links. The WhatsApp target is digits-only; the
/// SMS target keeps the phone exactly as entered in the roster, which is
/// what platform `sms:` URI handlers expect.
pub fn format_channels(
    result: &ConfirmationResult,
    booking: &BookingRequest,
    driver: &DriverProfile,
) -> ChannelLinks {
    let whatsapp_text = whatsapp_summary(result, booking);
    let sms_text = sms_summary(result, booking);

    ChannelLinks {
        whatsapp_url: format!(
            "https://wa.me/{}?text={}",
            digits_only(&driver.phone),
            urlencoding::encode(&whatsapp_text),
        ),
        sms_url: format!(
            "sms:{}?body={}",
            driver.phone,
            urlencoding::encode(&sms_text),
        ),
        email_url: format!(
            "mailto:{}?subject={}&body={}",
            driver.email,
            urlencoding::encode(&result.email_subject),
            urlencoding::encode(&result.email_body),
        ),
    }
}
