//! Static registry entries: supply facilities and regional sales officers

use serde::{Deserialize, Serialize};

/// Geographic coordinates in decimal degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Both components within their valid ranges
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Supply depot, terminal or refinery
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Facility {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Facility {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Regional sales officer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Officer {
    /// Officer name
    pub name: String,
    /// Region label, e.g. "Nagpur, MH". The first comma token is the city key.
    pub region: String,
    /// Regional hub the officer reports into
    #[serde(default)]
    pub hub: String,
    /// Contact channel (phone / WhatsApp number)
    #[serde(default = "default_contact")]
    pub phone: String,
}

fn default_contact() -> String {
    "N/A".to_string()
}

impl Officer {
    /// City key this officer covers
    pub fn city_key(&self) -> &str {
        city_key(&self.region)
    }

    /// Non-owning reference stored on a lead
    pub fn to_ref(&self) -> OfficerRef {
        OfficerRef {
            name: self.name.clone(),
            region: self.region.clone(),
            hub: self.hub.clone(),
        }
    }
}

/// Officer reference carried by a lead (name + region, looked up on demand)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficerRef {
    pub name: String,
    pub region: String,
    #[serde(default)]
    pub hub: String,
}

/// First comma-delimited token of a location string, trimmed
pub fn city_key(location: &str) -> &str {
    location.split(',').next().unwrap_or_default().trim()
}
