//! Raw signals and classification results

use serde::{Deserialize, Serialize};

use crate::registry::Coordinates;

/// Raw piece of text evidence of industrial activity, not yet classified
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSignal {
    /// Signal ID from the upstream feed
    pub id: String,
    /// Raw text snippet
    pub text: String,
    /// Company named by the feed, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    /// Free-text site location, e.g. "Nagpur, MH"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Approximate site coordinates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<Coordinates>,
    /// Where the signal was scraped from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
    /// Source trust (0-100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_trust: Option<u8>,
}

impl RawSignal {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            company_name: None,
            location: None,
            coordinates: None,
            source_url: None,
            source_trust: None,
        }
    }

    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company_name = Some(company.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.coordinates = Some(Coordinates::new(latitude, longitude));
        self
    }

    pub fn with_source(mut self, url: impl Into<String>, trust: u8) -> Self {
        self.source_url = Some(url.into());
        self.source_trust = Some(trust);
        self
    }
}

/// Outcome of a successful keyword classification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Matched product name
    pub product: String,
    /// Cross-sell product attached to the winning rule
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_product: Option<String>,
    /// Industry label of the winning rule
    pub industry: String,
    /// Base confidence of the winning rule, verbatim (0-100)
    pub confidence: u8,
    /// Every cue of the winning rule found in the text, in rule order
    pub matched_cues: Vec<String>,
    /// Human-readable reasoning trace
    pub reasoning: String,
}
