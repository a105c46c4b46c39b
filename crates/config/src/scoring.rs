//! Scoring configuration: intake defaults and the feedback recalibration policy

use serde::{Deserialize, Serialize};

/// Lead intake defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Company name used when the signal names none
    #[serde(default = "default_company_placeholder")]
    pub company_placeholder: String,
    /// Location used when the signal carries none
    #[serde(default = "default_location_placeholder")]
    pub location_placeholder: String,
    /// Minimum source trust for a lead to count as verified
    #[serde(default = "default_verification_threshold")]
    pub verification_threshold: u8,
    /// Cues that mark a signal as time-critical
    #[serde(default = "default_urgency_cues")]
    pub urgency_cues: Vec<String>,
    #[serde(default = "default_high_urgency")]
    pub high_urgency_score: f64,
    #[serde(default = "default_base_urgency")]
    pub base_urgency_score: f64,
}

fn default_company_placeholder() -> String {
    "Unidentified Entity".to_string()
}

fn default_location_placeholder() -> String {
    "Identified Region".to_string()
}

fn default_verification_threshold() -> u8 {
    85
}

fn default_urgency_cues() -> Vec<String> {
    vec!["tender".to_string(), "contract".to_string(), "bid".to_string()]
}

fn default_high_urgency() -> f64 {
    9.0
}

fn default_base_urgency() -> f64 {
    5.0
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            company_placeholder: default_company_placeholder(),
            location_placeholder: default_location_placeholder(),
            verification_threshold: default_verification_threshold(),
            urgency_cues: default_urgency_cues(),
            high_urgency_score: default_high_urgency(),
            base_urgency_score: default_base_urgency(),
        }
    }
}

/// Outcome-dependent multiplicative priority update
///
/// The two rejection multipliers come from two different review surfaces
/// and are intentionally kept apart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecalibrationPolicy {
    /// Score assigned on conversion
    #[serde(default = "default_converted_score")]
    pub converted_score: f64,
    /// Applied on rejection through the full review form
    #[serde(default = "default_reject_multiplier")]
    pub reject_with_review_multiplier: f64,
    /// Applied on the lightweight dismiss path
    #[serde(default = "default_dismiss_multiplier")]
    pub dismiss_multiplier: f64,
    /// Applied on acceptance
    #[serde(default = "default_accept_multiplier")]
    pub accept_multiplier: f64,
}

fn default_converted_score() -> f64 {
    10.0
}

fn default_reject_multiplier() -> f64 {
    0.5
}

fn default_dismiss_multiplier() -> f64 {
    0.8
}

fn default_accept_multiplier() -> f64 {
    1.15
}

impl Default for RecalibrationPolicy {
    fn default() -> Self {
        Self {
            converted_score: default_converted_score(),
            reject_with_review_multiplier: default_reject_multiplier(),
            dismiss_multiplier: default_dismiss_multiplier(),
            accept_multiplier: default_accept_multiplier(),
        }
    }
}
