//! Registry configuration loader
//!
//! Unified interface for loading and validating the static registries the
//! pipeline runs against: product rules, facilities, officers, the volume
//! table and the scoring policy. Registries are read at startup and passed
//! into each component at construction time.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use lead_pulse_core::{Facility, Officer};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::{
    facility::{default_facilities, VolumeTable},
    officer::{default_fallback_officer, default_officers},
    product::{default_product_rules, ProductRule},
    scoring::{IntakeConfig, RecalibrationPolicy},
    ConfigError,
};

/// Complete registry configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Registry version
    #[serde(default = "default_version")]
    pub version: String,
    /// Ordered product rules
    #[serde(default = "default_product_rules")]
    pub products: Vec<ProductRule>,
    /// Supply facilities
    #[serde(default = "default_facilities")]
    pub facilities: Vec<Facility>,
    /// Regional officers
    #[serde(default = "default_officers")]
    pub officers: Vec<Officer>,
    /// Officer used when no region matches
    #[serde(default = "default_fallback_officer")]
    pub fallback_officer: Officer,
    /// Sector -> volume table
    #[serde(default)]
    pub volume: VolumeTable,
    /// Intake defaults
    #[serde(default)]
    pub intake: IntakeConfig,
    /// Feedback score policy
    #[serde(default)]
    pub recalibration: RecalibrationPolicy,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            products: default_product_rules(),
            facilities: default_facilities(),
            officers: default_officers(),
            fallback_officer: default_fallback_officer(),
            volume: VolumeTable::default(),
            intake: IntakeConfig::default(),
            recalibration: RecalibrationPolicy::default(),
        }
    }
}

impl RegistryConfig {
    /// Load from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = read_file(path.as_ref())?;
        serde_yaml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load from JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = read_file(path.as_ref())?;
        serde_json::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Load by extension (`.yaml`/`.yml`, otherwise JSON) and validate
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let config = if is_yaml(path) {
            Self::from_yaml_file(path)?
        } else {
            Self::from_json_file(path)?
        };
        config.validate()?;

        tracing::debug!(
            path = %path.display(),
            products = config.products.len(),
            facilities = config.facilities.len(),
            officers = config.officers.len(),
            "Registry loaded"
        );
        Ok(config)
    }

    /// Save to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content =
            serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    /// Validate configuration
    ///
    /// An empty or malformed registry is a fatal startup error.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if self.products.is_empty() {
            errors.push("at least one product rule is required".to_string());
        }

        let mut seen = HashSet::new();
        for rule in &self.products {
            if rule.product.trim().is_empty() {
                errors.push("product name cannot be empty".to_string());
            } else if !seen.insert(rule.product.as_str()) {
                errors.push(format!("duplicate product rule: {}", rule.product));
            }
            if rule.cues.iter().all(|c| c.trim().is_empty()) {
                errors.push(format!("product '{}' has no cues", rule.product));
            }
            if rule.confidence > 100 {
                errors.push(format!(
                    "product '{}' confidence must be 0-100, got {}",
                    rule.product, rule.confidence
                ));
            }
        }

        if self.facilities.is_empty() {
            errors.push("at least one facility is required".to_string());
        }
        for facility in &self.facilities {
            if !facility.coordinates().is_valid() {
                errors.push(format!(
                    "facility '{}' has invalid coordinates ({}, {})",
                    facility.name, facility.latitude, facility.longitude
                ));
            }
        }

        if self.officers.is_empty() {
            tracing::warn!("Officer registry is empty; every lead routes to the fallback officer");
        }
        for officer in &self.officers {
            if officer.city_key().is_empty() {
                errors.push(format!("officer '{}' has an empty region", officer.name));
            }
        }
        if self.fallback_officer.name.trim().is_empty() {
            errors.push("fallback officer name cannot be empty".to_string());
        }

        let policy = &self.recalibration;
        for (field, value) in [
            ("reject_with_review_multiplier", policy.reject_with_review_multiplier),
            ("dismiss_multiplier", policy.dismiss_multiplier),
            ("accept_multiplier", policy.accept_multiplier),
        ] {
            if !value.is_finite() || value <= 0.0 {
                errors.push(format!("recalibration.{} must be positive, got {}", field, value));
            }
        }
        if !(0.0..=10.0).contains(&policy.converted_score) {
            errors.push(format!(
                "recalibration.converted_score must be within 0-10, got {}",
                policy.converted_score
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::InvalidValue {
                field: "registry".to_string(),
                message: errors.join("; "),
            })
        }
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    )
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }
    std::fs::read_to_string(path).map_err(|e| ConfigError::ParseError(e.to_string()))
}

/// Registry holder with reload support
///
/// Registries can be updated on disk and reloaded without a rebuild.
pub struct RegistryManager {
    config: Arc<RwLock<RegistryConfig>>,
    config_path: Option<String>,
}

impl RegistryManager {
    /// Create new manager with the built-in registry
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            config: Arc::new(RwLock::new(config)),
            config_path: None,
        }
    }

    /// Load from file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config = RegistryConfig::load(&path)?;
        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_path: Some(path.as_ref().to_string_lossy().to_string()),
        })
    }

    /// Reload from file; the current registry is kept if the new one is invalid
    pub fn reload(&self) -> Result<RegistryConfig, ConfigError> {
        let path = self
            .config_path
            .as_ref()
            .ok_or_else(|| ConfigError::FileNotFound("No registry path set".to_string()))?;

        let new_config = RegistryConfig::load(path)?;
        *self.config.write() = new_config.clone();
        tracing::info!(path = %path, version = %new_config.version, "Registry reloaded");
        Ok(new_config)
    }

    /// Snapshot of the current registry
    pub fn get(&self) -> RegistryConfig {
        self.config.read().clone()
    }

    pub fn path(&self) -> Option<&str> {
        self.config_path.as_deref()
    }
}

impl Default for RegistryManager {
    fn default() -> Self {
        Self::new()
    }
}
