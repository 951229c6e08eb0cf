use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::Html;
use serde::Deserialize;

use crate::models::DriverProfile;
use crate::state::AppState;

static LANDING_HTML: &str = include_str!("../web/landing.html");
static DRIVER_HTML: &str = include_str!("../web/driver.html");

#[derive(Deserialize)]
pub struct PageQuery {
    pub driver: Option<String>,
}

// GET /?driver=<id>
//
// The driver slug is the sole routing parameter. Absent or unknown slugs
// serve the landing page; a stale link is not an error.
pub async fn index(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> Html<String> {
    if let Some(slug) = query.driver.as_deref() {
        match state.directory.find_by_id(slug) {
            Some(driver) => return Html(render_driver_page(driver)),
            None => tracing::info!(slug, "unknown driver slug, serving landing page"),
        }
    }
    Html(render_landing_page(state.directory.all()))
}

fn render_driver_page(driver: &DriverProfile) -> String {
    let experience = driver
        .experience_years
        .map(|years| format!("a {years}+ year professional service"))
        .unwrap_or_else(|| "a professional service".to_string());

    DRIVER_HTML
        .replace("{{businessName}}", &driver.business_name)
        .replace("{{displayName}}", &driver.display_name())
        .replace("{{driverName}}", &driver.driver_name)
        .replace("{{driverId}}", &driver.id)
        .replace("{{tagline}}", &driver.tagline)
        .replace("{{location}}", &driver.location)
        .replace("{{vehicleType}}", &driver.vehicle_type)
        .replace("{{phone}}", &driver.phone)
        .replace("{{email}}", &driver.email)
        .replace("{{heroImage}}", &driver.hero_image)
        .replace("{{experienceBlurb}}", &experience)
}

fn render_landing_page(drivers: &[DriverProfile]) -> String {
    let items: String = drivers
        .iter()
        .map(|d| {
            format!(
                "<li><a href=\"/?driver={}\">{}</a> <span class=\"area\">{}</span></li>\n",
                d.id, d.business_name, d.location
            )
        })
        .collect();

    LANDING_HTML.replace("{{driverList}}", &items)
}
