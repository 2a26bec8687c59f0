use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::chart::service::HouseSystem;

/// Observer and chart display settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub house_system: HouseSystem,
    pub sidereal: bool,
    pub show_minor_aspects: bool,
    pub show_harmonics: bool,
    /// Degrees, north positive.
    pub latitude: f64,
    /// Degrees, east positive.
    pub longitude: f64,
}

impl Default for AppSettings {
    /// Whole-sign houses, tropical, major aspects only, observer in New York.
    fn default() -> Self {
        Self {
            house_system: HouseSystem::WholeSign,
            sidereal: false,
            show_minor_aspects: false,
            show_harmonics: false,
            latitude: 40.7128,
            longitude: -74.006,
        }
    }
}

impl AppSettings {
    pub fn apply(&mut self, patch: &SettingsPatch) {
        if let Some(v) = patch.house_system {
            self.house_system = v;
        }
        if let Some(v) = patch.sidereal {
            self.sidereal = v;
        }
        if let Some(v) = patch.show_minor_aspects {
            self.show_minor_aspects = v;
        }
        if let Some(v) = patch.show_harmonics {
            self.show_harmonics = v;
        }
        if let Some(v) = patch.latitude {
            self.latitude = v.clamp(-90.0, 90.0);
        }
        if let Some(v) = patch.longitude {
            self.longitude = v;
        }
    }
}

/// A partial settings update. Absent fields keep their value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub house_system: Option<HouseSystem>,
    pub sidereal: Option<bool>,
    pub show_minor_aspects: Option<bool>,
    pub show_harmonics: Option<bool>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl SettingsPatch {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn location(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
            ..Default::default()
        }
    }
}

/// The saved birth chart. Stored by the host; the orrery only reads and writes it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BirthChartRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// ISO-8601, UTC.
    pub date: DateTime<Utc>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub location_name: String,
}

impl BirthChartRecord {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
