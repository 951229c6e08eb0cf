use std::sync::Arc;

use axum::extract::{Path, State};
use axum::Json;

use crate::errors::AppError;
use crate::models::DriverProfile;
use crate::state::AppState;

// GET /api/drivers
pub async fn list_drivers(State(state): State<Arc<AppState>>) -> Json<Vec<DriverProfile>> {
    Json(state.directory.all().to_vec())
}

// GET /api/drivers/:id
pub async fn get_driver(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DriverProfile>, AppError> {
    state
        .directory
        .find_by_id(&id)
        .cloned()
        .map(Json)
        .ok_or(AppError::UnknownDriver(id))
}
