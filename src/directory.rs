use std::collections::HashSet;
use std::fs;

use anyhow::Context;

use crate::models::DriverProfile;

static DEFAULT_ROSTER: &str = include_str!("drivers.json");

/// Static driver roster, loaded once at startup and read-only for the
/// process lifetime.
#[derive(Debug)]
pub struct DriverDirectory {
    drivers: Vec<DriverProfile>,
}

impl DriverDirectory {
    /// Load the roster from `path` if given, otherwise the embedded
    /// default. Fails on unreadable files, malformed JSON, or duplicate
    /// driver ids.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let raw = match path {
            Some(p) => fs::read_to_string(p)
                .with_context(|| format!("failed to read driver roster {p}"))?,
            None => DEFAULT_ROSTER.to_string(),
        };
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        let drivers: Vec<DriverProfile> =
            serde_json::from_str(raw).context("failed to parse driver roster")?;

        let mut seen = HashSet::new();
        for driver in &drivers {
            if !seen.insert(driver.id.as_str()) {
                anyhow::bail!("duplicate driver id in roster: {}", driver.id);
            }
        }

        Ok(Self { drivers })
    }

    /// Not-found is a normal outcome (stale or mistyped link); callers
    /// fall back to the landing view.
    pub fn find_by_id(&self, id: &str) -> Option<&DriverProfile> {
        self.drivers.iter().find(|d| d.id == id)
    }

    pub fn all(&self) -> &[DriverProfile] {
        &self.drivers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster_loads() {
        let directory = DriverDirectory::load(None).unwrap();
        assert!(!directory.all().is_empty());
        assert!(directory.find_by_id("harry").is_some());
    }

    #[test]
    fn test_unknown_id_is_none() {
        let directory = DriverDirectory::load(None).unwrap();
        assert!(directory.find_by_id("nobody").is_none());
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let directory = DriverDirectory::load(None).unwrap();
        assert!(directory.find_by_id("HARRY").is_none());
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let raw = r#"[
            {"id":"x","businessName":"A","driverName":"A","phone":"1","email":"a@a","location":"L","vehicleType":"Sedan"},
            {"id":"x","businessName":"B","driverName":"B","phone":"2","email":"b@b","location":"L","vehicleType":"Van"}
        ]"#;
        let err = DriverDirectory::from_json(raw).unwrap_err();
        assert!(err.to_string().contains("duplicate driver id"));
    }
}
