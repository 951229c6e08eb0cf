use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::{BookingRequest, ChannelLinks, ConfirmationResult};
use crate::services::{channels, confirmation};
use crate::state::AppState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    #[serde(flatten)]
    pub result: ConfirmationResult,
    pub channels: ChannelLinks,
}

// POST /api/bookings/:driver_id
//
// The whole submission pipeline: validate, derive a reference, build the
// generation request, normalize the reply (fallback on any failure), and
// format the three channel deep links. Generation failures never reach
// the visitor; the worst case is the generic fallback text.
pub async fn submit_booking(
    State(state): State<Arc<AppState>>,
    Path(driver_id): Path<String>,
    Json(booking): Json<BookingRequest>,
) -> Result<Json<BookingResponse>, AppError> {
    let driver = state
        .directory
        .find_by_id(&driver_id)
        .ok_or_else(|| AppError::UnknownDriver(driver_id.clone()))?;

    booking.validate()?;

    let reference = confirmation::generate_reference(&driver.id);
    tracing::info!(
        driver = %driver.id,
        reference = %reference,
        customer = %booking.full_name,
        dropoff = %booking.dropoff_location,
        "processing booking request"
    );

    let prompt = confirmation::build_prompt(&booking, driver, &reference);
    let schema = confirmation::response_schema();
    let raw = state.generation.generate(&prompt, &schema).await;

    let result = confirmation::normalize(raw, &booking, driver, &reference);
    let channels = channels::format_channels(&result, &booking, driver);

    Ok(Json(BookingResponse { result, channels }))
}
