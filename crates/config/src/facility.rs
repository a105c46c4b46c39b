//! Supply facility registry and volume estimation table

use lead_pulse_core::Facility;
use serde::{Deserialize, Serialize};

/// Built-in depot/terminal registry
pub fn default_facilities() -> Vec<Facility> {
    vec![
        Facility::new("Visakh Terminal", 17.6868, 83.2185),
        Facility::new("Mumbai Refinery", 19.0760, 72.8777),
        Facility::new("Kolkata Terminal", 22.5726, 88.3639),
        Facility::new("Ahmedabad Depot", 23.0225, 72.5714),
        Facility::new("Ennore Terminal", 13.2300, 80.3200),
    ]
}

/// One row of the sector -> volume table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeTier {
    /// Sector keywords, matched case-insensitively as substrings
    pub sector_contains: Vec<String>,
    /// Estimated shipment volume in metric tonnes
    pub tonnes: u32,
}

/// Sector -> bulk volume heuristic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeTable {
    /// Checked in order; first match wins
    #[serde(default = "default_tiers")]
    pub tiers: Vec<VolumeTier>,
    /// Volume for sectors no tier matches
    #[serde(default = "default_tonnes")]
    pub default_tonnes: u32,
}

fn default_tiers() -> Vec<VolumeTier> {
    vec![VolumeTier {
        sector_contains: vec![
            "road".to_string(),
            "highway".to_string(),
            "infrastructure".to_string(),
        ],
        tonnes: 800,
    }]
}

fn default_tonnes() -> u32 {
    300
}

impl Default for VolumeTable {
    fn default() -> Self {
        Self {
            tiers: default_tiers(),
            default_tonnes: default_tonnes(),
        }
    }
}

impl VolumeTable {
    /// Tonnage for an industry sector label
    pub fn tonnes_for(&self, sector: &str) -> u32 {
        let sector = sector.to_lowercase();
        self.tiers
            .iter()
            .find(|tier| {
                tier.sector_contains
                    .iter()
                    .any(|k| !k.is_empty() && sector.contains(&k.to_lowercase()))
            })
            .map(|tier| tier.tonnes)
            .unwrap_or(self.default_tonnes)
    }
}
