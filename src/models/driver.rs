use serde::{Deserialize, Serialize};

/// One driver's business identity, as loaded from the roster at startup.
/// The `id` slug doubles as the routing key (`?driver=<id>`) and is
/// embedded uppercased into booking references.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverProfile {
    pub id: String,
    pub business_name: String,
    pub driver_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub surname_initial: Option<String>,
    pub phone: String,
    pub email: String,
    pub location: String,
    #[serde(default)]
    pub theme_color: String,
    #[serde(default)]
    pub tagline: String,
    #[serde(default)]
    pub hero_image: String,
    pub vehicle_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub experience_years: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialties: Option<Vec<String>>,
}

impl DriverProfile {
    /// Human-readable driver name. A full surname wins over an initial;
    /// empty strings count as absent.
    pub fn display_name(&self) -> String {
        if let Some(surname) = self.surname.as_deref().filter(|s| !s.is_empty()) {
            return format!("{} {}", self.driver_name, surname);
        }
        if let Some(initial) = self.surname_initial.as_deref().filter(|s| !s.is_empty()) {
            return format!("{} {}.", self.driver_name, initial);
        }
        self.driver_name.clone()
    }
}
