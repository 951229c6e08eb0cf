use rand::Rng;
use serde_json::{json, Value};

use crate::models::{BookingRequest, ConfirmationResult, DriverProfile};

/// Short human-shareable reference: `#<ID>-<NNNN>` with NNNN uniform in
/// [1000, 9999]. Collisions across submissions are accepted; the
/// reference only needs to be distinct within one conversation thread.
pub fn generate_reference(driver_id: &str) -> String {
    let number: u32 = rand::thread_rng().gen_range(1000..=9999);
    format!("#{}-{}", driver_id.to_uppercase(), number)
}

/// Natural-language instruction payload for the generation service.
/// Pure: embeds the driver profile, every booking field, and the output
/// directives. The paired structured-output contract is
/// [`response_schema`].
pub fn build_prompt(booking: &BookingRequest, driver: &DriverProfile, reference: &str) -> String {
    let display_name = driver.display_name();

    let mut profile = format!(
        "Driver: {display_name}\nVehicle: {}\nService area: {}",
        driver.vehicle_type, driver.location
    );
    if let Some(years) = driver.experience_years {
        profile.push_str(&format!("\nExperience: {years} years"));
    }
    if let Some(specialties) = driver.specialties.as_ref().filter(|s| !s.is_empty()) {
        profile.push_str(&format!("\nSpecialties: {}", specialties.join(", ")));
    }

    let notes = if booking.notes.trim().is_empty() {
        "None"
    } else {
        booking.notes.as_str()
    };

    format!(
        "You write booking correspondence for \"{business}\", a professional private driver service.\n\
         {profile}\n\n\
         A customer ({customer}) has submitted a booking request (Ref: {reference}):\n\
         - Pickup: {pickup}\n\
         - Destination: {dropoff}\n\
         - Date: {date}\n\
         - Time: {time}\n\
         - Passengers: {passengers}\n\
         - Notes: {notes}\n\n\
         Generate a JSON response with:\n\
         1. 'confirmationMessage': a warm, trust-building success message addressed to {customer}, \
         written in {display_name}'s own voice, at most two sentences. Never mention an assistant, \
         automation, or that this message was generated.\n\
         2. 'estimatedDuration': a realistic estimate of travel time between the two locations.\n\
         3. 'travelTips': one professional tip based on the {vehicle} or the specific trip.\n\
         4. 'emailSubject': a high-end email subject line including Ref {reference}.\n\
         5. 'emailBody': a formal, well-written email confirmation. Sign it as {display_name}.",
        business = driver.business_name,
        customer = booking.full_name,
        pickup = booking.pickup_location,
        dropoff = booking.dropoff_location,
        date = booking.date,
        time = booking.time,
        passengers = booking.passengers,
        vehicle = driver.vehicle_type,
    )
}

/// Structured-output contract sent alongside the prompt. The five text
/// fields are mandatory; `bookingRef` is accepted but ignored — the
/// caller-supplied reference is authoritative (see [`normalize`]).
pub fn response_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "confirmationMessage": { "type": "string" },
            "estimatedDuration": { "type": "string" },
            "travelTips": { "type": "string" },
            "emailSubject": { "type": "string" },
            "emailBody": { "type": "string" },
            "bookingRef": { "type": "string" },
        },
        "required": [
            "confirmationMessage",
            "estimatedDuration",
            "travelTips",
            "emailSubject",
            "emailBody",
        ],
    })
}

/// Deterministic stand-in used when the generation service is down or
/// replies with garbage. Shape-identical to a successful result: every
/// field non-empty.
pub fn fallback_result(
    booking: &BookingRequest,
    driver: &DriverProfile,
    reference: &str,
) -> ConfirmationResult {
    let display_name = driver.display_name();

    ConfirmationResult {
        confirmation_message: format!(
            "Request received! {display_name} will review your trip to {} and contact you shortly.",
            booking.dropoff_location
        ),
        estimated_duration: "Estimated upon confirmation".to_string(),
        travel_tips: "Keep your phone handy for arrival updates.".to_string(),
        email_subject: format!("Booking Request {reference} - {}", driver.business_name),
        email_body: format!(
            "Hi {},\n\nThanks for choosing {}. I've received your request for a ride from {} on {}. \
             I will confirm availability shortly.\n\nBest regards,\n{display_name}",
            booking.full_name, driver.business_name, booking.pickup_location, booking.date
        ),
        booking_ref: reference.to_string(),
    }
}

/// Absorbs every generation-layer failure into a complete result. Policy
/// is field-level fallback: a parseable payload contributes whatever
/// non-empty fields it has, the rest come from the fallback template.
/// `bookingRef` is always the caller's reference, even if the payload
/// echoed a different one.
pub fn normalize(
    raw: anyhow::Result<String>,
    booking: &BookingRequest,
    driver: &DriverProfile,
    reference: &str,
) -> ConfirmationResult {
    let fallback = fallback_result(booking, driver, reference);

    let text = match raw {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, reference, "generation call failed, using fallback");
            return fallback;
        }
    };

    let parsed = match parse_payload(&text) {
        Some(value) => value,
        None => {
            tracing::warn!(reference, "generation reply was not a JSON object, using fallback");
            return fallback;
        }
    };

    ConfirmationResult {
        confirmation_message: field_or(
            &parsed,
            "confirmationMessage",
            fallback.confirmation_message,
        ),
        estimated_duration: field_or(&parsed, "estimatedDuration", fallback.estimated_duration),
        travel_tips: field_or(&parsed, "travelTips", fallback.travel_tips),
        email_subject: field_or(&parsed, "emailSubject", fallback.email_subject),
        email_body: field_or(&parsed, "emailBody", fallback.email_body),
        booking_ref: reference.to_string(),
    }
}

fn field_or(payload: &Value, key: &str, fallback: String) -> String {
    payload[key]
        .as_str()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .unwrap_or(fallback)
}

/// Lenient JSON extraction: direct parse, then with markdown code fences
/// stripped, then the outermost `{..}` slice. Generation output carries
/// fences often enough that schema enforcement alone can't be trusted.
fn parse_payload(text: &str) -> Option<Value> {
    if let Ok(value) = serde_json::from_str::<Value>(text) {
        if value.is_object() {
            return Some(value);
        }
    }

    let cleaned = text
        .trim()
        .strip_prefix("```json")
        .or_else(|| text.trim().strip_prefix("```"))
        .unwrap_or(text.trim());
    let cleaned = cleaned.strip_suffix("```").unwrap_or(cleaned).trim();

    if let Ok(value) = serde_json::from_str::<Value>(cleaned) {
        if value.is_object() {
            return Some(value);
        }
    }

    if let Some(start) = cleaned.find('{') {
        if let Some(end) = cleaned.rfind('}') {
            if let Ok(value) = serde_json::from_str::<Value>(&cleaned[start..=end]) {
                if value.is_object() {
                    return Some(value);
                }
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn driver() -> DriverProfile {
        DriverProfile {
            id: "harry".to_string(),
            business_name: "Harry's PrivateRide".to_string(),
            driver_name: "Harry".to_string(),
            surname: Some("Singh".to_string()),
            surname_initial: None,
            phone: "+61413948080".to_string(),
            email: "harry@example.com".to_string(),
            location: "Melbourne Metro & Airport".to_string(),
            theme_color: "teal".to_string(),
            tagline: "Professional. Punctual. Private.".to_string(),
            hero_image: String::new(),
            vehicle_type: "Luxury Sedan".to_string(),
            experience_years: Some(12),
            specialties: Some(vec!["Airport transfers".to_string()]),
        }
    }

    fn booking() -> BookingRequest {
        BookingRequest {
            full_name: "John Smith".to_string(),
            email: "john@example.com".to_string(),
            phone: "0400111222".to_string(),
            pickup_location: "Melbourne Airport".to_string(),
            dropoff_location: "Sydney CBD".to_string(),
            date: "2024-06-01".to_string(),
            time: "05:30".to_string(),
            passengers: 1,
            notes: String::new(),
        }
    }

    #[test]
    fn test_reference_shape() {
        for _ in 0..50 {
            let reference = generate_reference("harry");
            let digits = reference.strip_prefix("#HARRY-").expect("prefix");
            assert_eq!(digits.len(), 4);
            let n: u32 = digits.parse().expect("numeric suffix");
            assert!((1000..=9999).contains(&n), "out of range: {n}");
        }
    }

    #[test]
    fn test_prompt_embeds_profile_and_booking() {
        let prompt = build_prompt(&booking(), &driver(), "#HARRY-1234");
        assert!(prompt.contains("Harry Singh"));
        assert!(prompt.contains("Harry's PrivateRide"));
        assert!(prompt.contains("Luxury Sedan"));
        assert!(prompt.contains("Experience: 12 years"));
        assert!(prompt.contains("Airport transfers"));
        assert!(prompt.contains("Sydney CBD"));
        assert!(prompt.contains("#HARRY-1234"));
        assert!(prompt.contains("Notes: None"));
        assert!(prompt.contains("at most two sentences"));
    }

    #[test]
    fn test_prompt_omits_absent_enrichment() {
        let mut d = driver();
        d.experience_years = None;
        d.specialties = None;
        let prompt = build_prompt(&booking(), &d, "#HARRY-1234");
        assert!(!prompt.contains("Experience:"));
        assert!(!prompt.contains("Specialties:"));
    }

    #[test]
    fn test_normalize_failure_is_complete_fallback() {
        let result = normalize(
            Err(anyhow::anyhow!("connection refused")),
            &booking(),
            &driver(),
            "#HARRY-1234",
        );
        assert_eq!(result.booking_ref, "#HARRY-1234");
        assert!(!result.confirmation_message.is_empty());
        assert!(!result.estimated_duration.is_empty());
        assert!(!result.travel_tips.is_empty());
        assert!(!result.email_subject.is_empty());
        assert!(!result.email_body.is_empty());
        assert!(result.confirmation_message.contains("Harry Singh"));
        assert!(result.confirmation_message.contains("Sydney CBD"));
        assert!(result.email_subject.contains("#HARRY-1234"));
    }

    #[test]
    fn test_normalize_keeps_payload_verbatim() {
        let reply = r##"{
            "confirmationMessage": "Thanks John, see you at 5:30.",
            "estimatedDuration": "About 9 hours by road",
            "travelTips": "Arrive 10 minutes early.",
            "emailSubject": "Your ride with Harry",
            "emailBody": "Dear John, ...",
            "bookingRef": "#HARRY-0000"
        }"##;
        let result = normalize(Ok(reply.to_string()), &booking(), &driver(), "#HARRY-4242");
        assert_eq!(result.confirmation_message, "Thanks John, see you at 5:30.");
        assert_eq!(result.estimated_duration, "About 9 hours by road");
        assert_eq!(result.travel_tips, "Arrive 10 minutes early.");
        assert_eq!(result.email_subject, "Your ride with Harry");
        assert_eq!(result.email_body, "Dear John, ...");
        // echoed ref is ignored
        assert_eq!(result.booking_ref, "#HARRY-4242");
    }

    #[test]
    fn test_normalize_fills_missing_fields_only() {
        let reply = r#"{"confirmationMessage": "Got it, John.", "travelTips": ""}"#;
        let result = normalize(Ok(reply.to_string()), &booking(), &driver(), "#HARRY-4242");
        assert_eq!(result.confirmation_message, "Got it, John.");
        // empty and absent fields come from the fallback template
        assert_eq!(result.estimated_duration, "Estimated upon confirmation");
        assert_eq!(result.travel_tips, "Keep your phone handy for arrival updates.");
        assert!(result.email_subject.contains("#HARRY-4242"));
    }

    #[test]
    fn test_normalize_accepts_fenced_json() {
        let reply = "```json\n{\"confirmationMessage\":\"Fenced but fine.\",\"estimatedDuration\":\"1h\",\"travelTips\":\"t\",\"emailSubject\":\"s\",\"emailBody\":\"b\"}\n```";
        let result = normalize(Ok(reply.to_string()), &booking(), &driver(), "#HARRY-4242");
        assert_eq!(result.confirmation_message, "Fenced but fine.");
        assert_eq!(result.booking_ref, "#HARRY-4242");
    }

    #[test]
    fn test_normalize_garbage_is_fallback() {
        let result = normalize(
            Ok("I'm sorry, I can't help with that.".to_string()),
            &booking(),
            &driver(),
            "#HARRY-4242",
        );
        assert_eq!(result.estimated_duration, "Estimated upon confirmation");
        assert_eq!(result.booking_ref, "#HARRY-4242");
    }

    #[test]
    fn test_schema_requires_five_text_fields() {
        let schema = response_schema();
        let required = schema["required"].as_array().unwrap();
        assert_eq!(required.len(), 5);
        assert!(!required.iter().any(|f| f == "bookingRef"));
    }
}
