//! Lead record and lifecycle types
//!
//! A lead is created once by intake in status `New` and afterwards only
//! changes through a feedback transition. It is never deleted by the core.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::feedback::FeedbackDetails;
use crate::registry::OfficerRef;

/// Lowest priority score a lead can hold
pub const MIN_PRIORITY: f64 = 0.0;
/// Highest priority score a lead can hold
pub const MAX_PRIORITY: f64 = 10.0;

/// Clamp a priority score into `[MIN_PRIORITY, MAX_PRIORITY]`
pub fn clamp_priority(score: f64) -> f64 {
    if score.is_nan() {
        return MIN_PRIORITY;
    }
    score.clamp(MIN_PRIORITY, MAX_PRIORITY)
}

/// Lead lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LeadStatus {
    #[default]
    New,
    Accepted,
    Rejected,
    Converted,
}

impl LeadStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Accepted => "Accepted",
            LeadStatus::Rejected => "Rejected",
            LeadStatus::Converted => "Converted",
        }
    }

    /// Converted is absorbing; every other status can be revised
    pub fn is_terminal(&self) -> bool {
        matches!(self, LeadStatus::Converted)
    }
}

impl fmt::Display for LeadStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the reviewer confirmed the recommended product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductFit {
    Verified,
    Mismatch,
    #[default]
    Unknown,
}

impl From<Option<bool>> for ProductFit {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => ProductFit::Verified,
            Some(false) => ProductFit::Mismatch,
            None => ProductFit::Unknown,
        }
    }
}

/// Distance from the site to the nearest supply facility
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proximity {
    pub nearest_facility: String,
    /// Unrounded great-circle distance
    pub distance_km: f64,
}

/// Coarse shipment volume estimate in metric tonnes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeEstimate {
    pub tonnes: u32,
}

impl VolumeEstimate {
    pub fn new(tonnes: u32) -> Self {
        Self { tonnes }
    }
}

impl fmt::Display for VolumeEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MT", self.tonnes)
    }
}

/// Where a lead came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provenance {
    /// Originating signal ID
    pub signal_id: String,
    /// Raw text snippet
    pub raw_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// The originating signal has been consumed
    #[serde(default)]
    pub processed: bool,
}

/// Classified, scored and routed record derived from a signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lead {
    /// Opaque ID assigned at creation
    pub id: String,
    pub provenance: Provenance,

    // Classification
    pub company_name: String,
    /// Parent entity with corporate suffixes stripped
    pub normalized_company: String,
    pub industry_sector: String,
    pub recommended_product: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_product: Option<String>,
    /// Rule confidence (0-100)
    pub confidence_score: u8,
    pub reasoning: String,

    // Geography
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proximity: Option<Proximity>,
    pub estimated_volume: VolumeEstimate,

    // Routing
    pub assigned_officer: OfficerRef,
    pub next_action: String,

    // Lifecycle
    pub status: LeadStatus,
    /// Work-queue priority, always within [0, 10]
    pub priority_score: f64,
    /// Informational only
    pub urgency_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_rating: Option<u8>,
    #[serde(default)]
    pub product_fit: ProductFit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_feedback: Option<FeedbackDetails>,
    /// Consolidated note rendered from the last feedback
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback_note: Option<String>,
    /// Source trust met the verification threshold
    #[serde(default)]
    pub is_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dispatched_at: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Incremented on every mutation; used for compare-and-swap
    #[serde(default)]
    pub version: u64,
}

impl Lead {
    /// Still awaiting a reviewer decision
    pub fn is_open(&self) -> bool {
        self.status == LeadStatus::New
    }

    /// Priority formatted for display, e.g. "9.2/10.0"
    pub fn priority_label(&self) -> String {
        format!("{:.1}/{:.1}", self.priority_score, MAX_PRIORITY)
    }
}
