//! Product rule configuration
//!
//! Each rule maps a set of keyword cues to a product recommendation.
//! Rule order is significant: the classifier picks the first rule with
//! any matching cue, so more specific products belong earlier in the list.

use serde::{Deserialize, Serialize};

/// Keyword rule for one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRule {
    /// Product name (unique across the catalog)
    pub product: String,
    /// Lowercase keyword cues, matched as substrings
    pub cues: Vec<String>,
    /// Industry label attached to a match
    pub industry: String,
    /// Base confidence (0-100), reported verbatim on a match
    pub confidence: u8,
    /// Cross-sell product
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_product: Option<String>,
}

impl ProductRule {
    pub fn new(
        product: impl Into<String>,
        cues: &[&str],
        industry: impl Into<String>,
        confidence: u8,
    ) -> Self {
        Self {
            product: product.into(),
            cues: cues.iter().map(|c| c.to_string()).collect(),
            industry: industry.into(),
            confidence,
            secondary_product: None,
        }
    }

    pub fn with_secondary(mut self, product: impl Into<String>) -> Self {
        self.secondary_product = Some(product.into());
        self
    }

    /// Copy with cues trimmed, lowercased and de-duplicated (first wins)
    pub fn normalized(&self) -> Self {
        let mut cues: Vec<String> = Vec::with_capacity(self.cues.len());
        for cue in &self.cues {
            let cue = cue.trim().to_lowercase();
            if !cue.is_empty() && !cues.contains(&cue) {
                cues.push(cue);
            }
        }
        Self {
            cues,
            ..self.clone()
        }
    }
}

/// Built-in product portfolio
pub fn default_product_rules() -> Vec<ProductRule> {
    vec![
        ProductRule::new(
            "Bitumen (VG-30/VG-40)",
            &["highway", "road", "expressway", "nhai", "paving", "bridge"],
            "Construction & Infrastructure",
            95,
        )
        .with_secondary("LDO (Machinery Fuel)"),
        ProductRule::new(
            "Furnace Oil (FO)",
            &["boiler", "furnace", "glass plant", "steel mill", "thermal power", "heating"],
            "Manufacturing",
            90,
        )
        .with_secondary("LSHS (Low Sulphur Fuel)"),
        ProductRule::new(
            "Jute Batch Oil (JBO)",
            &["jute", "batching", "spinning", "textile mill", "fiber processing"],
            "Textiles",
            90,
        )
        .with_secondary("LDO (Genset Fuel)"),
        ProductRule::new(
            "Hexane",
            &["solvent extraction", "edible oil", "perfume", "pharmaceutical"],
            "Chemicals & Agri-processing",
            85,
        )
        .with_secondary("Solvent 1425"),
        ProductRule::new(
            "Light Diesel Oil (LDO)",
            &["generator set", "genset", "dg set", "lift irrigation", "pumping"],
            "Power & Agriculture",
            85,
        )
        .with_secondary("HSD (High Speed Diesel)"),
        ProductRule::new(
            "Low Sulphur Heavy Stock (LSHS)",
            &["metallurgical", "fertilizer plant", "high-temp heating"],
            "Heavy Industry",
            80,
        )
        .with_secondary("Furnace Oil (FO)"),
    ]
}
