//! Signal Classifier
//!
//! Maps raw text to a product recommendation using ordered keyword rules.
//!
//! Matching is case-insensitive substring containment over the whole text,
//! not tokenized word matching. A cue inside an unrelated word still
//! matches ("oil" inside "spoiled"); this is a known false-positive source
//! kept for compatibility with existing rule sets.
//!
//! Policy: the first rule in configured order with at least one matching
//! cue wins. There is no weighting by cue count or specificity, and the
//! rule's base confidence is reported verbatim.

use lead_pulse_config::{ProductRule, RegistryConfig};
use lead_pulse_core::{ClassificationResult, Error, Result};

/// Keyword-rule classifier
#[derive(Debug, Clone)]
pub struct SignalClassifier {
    rules: Vec<ProductRule>,
}

impl SignalClassifier {
    /// Build from an ordered rule list
    ///
    /// Cues are lowercased once here so `classify` only lowercases the text.
    pub fn new(rules: &[ProductRule]) -> Result<Self> {
        if rules.is_empty() {
            return Err(Error::configuration("product rule list is empty"));
        }

        Ok(Self {
            rules: rules.iter().map(ProductRule::normalized).collect(),
        })
    }

    pub fn from_registry(config: &RegistryConfig) -> Result<Self> {
        Self::new(&config.products)
    }

    /// Classify a signal; `None` means no rule matched
    pub fn classify(&self, text: &str) -> Option<ClassificationResult> {
        if text.trim().is_empty() {
            return None;
        }

        let lowered = text.to_lowercase();

        self.rules.iter().find_map(|rule| {
            let matched: Vec<String> = rule
                .cues
                .iter()
                .filter(|cue| lowered.contains(cue.as_str()))
                .cloned()
                .collect();

            if matched.is_empty() {
                return None;
            }

            Some(ClassificationResult {
                product: rule.product.clone(),
                secondary_product: rule.secondary_product.clone(),
                industry: rule.industry.clone(),
                confidence: rule.confidence,
                reasoning: format!("Matched keywords: {}", matched.join(", ")),
                matched_cues: matched,
            })
        })
    }

    pub fn rules(&self) -> &[ProductRule] {
        &self.rules
    }
}
