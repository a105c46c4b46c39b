//! Human feedback events
//!
//! Feedback is kept structured. The single free-text note that the
//! dashboard stores is rendered from it at the persistence boundary via
//! [`FeedbackDetails::render_note`].

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lead::{LeadStatus, ProductFit};

/// Reviewer decision on a lead
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackOutcome {
    /// Positive engagement
    Accepted,
    /// Deal closed
    Converted,
    /// Rejected through the full review form
    RejectedWithReview,
    /// Dismissed through the lightweight "ignore" surface
    Dismissed,
}

impl FeedbackOutcome {
    /// Status a lead lands in after this outcome
    pub fn resulting_status(&self) -> LeadStatus {
        match self {
            FeedbackOutcome::Accepted => LeadStatus::Accepted,
            FeedbackOutcome::Converted => LeadStatus::Converted,
            FeedbackOutcome::RejectedWithReview | FeedbackOutcome::Dismissed => {
                LeadStatus::Rejected
            }
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackOutcome::Accepted => "accepted",
            FeedbackOutcome::Converted => "converted",
            FeedbackOutcome::RejectedWithReview => "rejected_with_review",
            FeedbackOutcome::Dismissed => "dismissed",
        }
    }
}

/// Structured free-text attributes of a feedback event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    /// Competitor already supplying the site
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Reviewer flagged the signal source as unreliable (dismiss path)
    #[serde(default)]
    pub source_unreliable: bool,
}

impl FeedbackDetails {
    /// Render the consolidated note stored alongside the lead
    pub fn render_note(&self, outcome: FeedbackOutcome) -> String {
        match outcome {
            FeedbackOutcome::Dismissed => format!(
                "REASON: {} | SOURCE_UNRELIABLE: {} | CONTEXT: {}",
                non_empty(&self.rejection_reason).unwrap_or("N/A"),
                if self.source_unreliable { "YES" } else { "NO" },
                non_empty(&self.notes).unwrap_or("None"),
            ),
            _ => format!(
                "Competitor: {} | Notes: {} | Reason: {}",
                non_empty(&self.competitor).unwrap_or("None"),
                non_empty(&self.notes).unwrap_or("No extra notes"),
                non_empty(&self.rejection_reason).unwrap_or("N/A"),
            ),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// A validated feedback event ready to be applied to a lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    pub outcome: FeedbackOutcome,
    /// Lead quality rating (1-5)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<u8>,
    #[serde(default)]
    pub product_fit: ProductFit,
    #[serde(default)]
    pub details: FeedbackDetails,
}

impl FeedbackEvent {
    pub fn new(outcome: FeedbackOutcome) -> Self {
        Self {
            outcome,
            rating: None,
            product_fit: ProductFit::Unknown,
            details: FeedbackDetails::default(),
        }
    }

    pub fn with_rating(mut self, rating: u8) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_product_fit(mut self, fit: ProductFit) -> Self {
        self.product_fit = fit;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.details.rejection_reason = Some(reason.into());
        self
    }

    pub fn with_competitor(mut self, competitor: impl Into<String>) -> Self {
        self.details.competitor = Some(competitor.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.details.notes = Some(notes.into());
        self
    }

    pub fn with_source_unreliable(mut self, unreliable: bool) -> Self {
        self.details.source_unreliable = unreliable;
        self
    }

    /// Check field-level constraints
    pub fn validate(&self) -> Result<()> {
        if let Some(rating) = self.rating {
            if !(1..=5).contains(&rating) {
                return Err(Error::validation(
                    "rating",
                    format!("must be between 1 and 5, got {}", rating),
                ));
            }
        }

        if self.outcome == FeedbackOutcome::Dismissed
            && non_empty(&self.details.rejection_reason).is_none()
        {
            return Err(Error::validation(
                "rejection_reason",
                "a reason is required when dismissing a lead",
            ));
        }

        Ok(())
    }
}

/// Feedback as submitted by a review surface, before validation
///
/// Every field is optional on the wire; a missing outcome is rejected by
/// [`FeedbackRequest::into_event`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FeedbackRequest {
    #[serde(default)]
    pub outcome: Option<FeedbackOutcome>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default)]
    pub product_fit_verified: Option<bool>,
    #[serde(default)]
    pub rejection_reason: Option<String>,
    #[serde(default)]
    pub competitor: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub source_unreliable: bool,
}

impl FeedbackRequest {
    pub fn into_event(self) -> Result<FeedbackEvent> {
        let outcome = self
            .outcome
            .ok_or_else(|| Error::validation("outcome", "an outcome must be selected"))?;

        let event = FeedbackEvent {
            outcome,
            rating: self.rating,
            product_fit: ProductFit::from(self.product_fit_verified),
            details: FeedbackDetails {
                rejection_reason: self.rejection_reason,
                competitor: self.competitor,
                notes: self.notes,
                source_unreliable: self.source_unreliable,
            },
        };
        event.validate()?;
        Ok(event)
    }
}
