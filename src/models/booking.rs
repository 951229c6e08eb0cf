use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// Trip details for a single prospective ride. Transient: lives for one
/// submission and is never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub pickup_location: String,
    pub dropoff_location: String,
    pub date: String,
    pub time: String,
    pub passengers: u32,
    #[serde(default)]
    pub notes: String,
}

impl BookingRequest {
    /// Server-side mirror of the form's required-field rule: everything
    /// except `notes` must be non-empty and `passengers` >= 1.
    pub fn validate(&self) -> Result<(), AppError> {
        let required = [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("pickupLocation", &self.pickup_location),
            ("dropoffLocation", &self.dropoff_location),
            ("date", &self.date),
            ("time", &self.time),
        ];

        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(AppError::Validation(format!("{name} is required")));
            }
        }

        if self.passengers < 1 {
            return Err(AppError::Validation(
                "passengers must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Normalized output of the generation step. Every field is guaranteed
/// non-empty: absent or failed generation output is filled from the
/// fallback template before this struct is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationResult {
    pub confirmation_message: String,
    pub estimated_duration: String,
    pub travel_tips: String,
    pub email_subject: String,
    pub email_body: String,
    pub booking_ref: String,
}

/// Pre-built deep links the visitor taps to hand the request to the
/// driver. Constructing these has no side effects; the external app
/// opens only on user action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelLinks {
    pub whatsapp_url: String,
    pub sms_url: String,
    pub email_url: String,
}
