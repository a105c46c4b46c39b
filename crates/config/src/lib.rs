//! Configuration management for the lead pipeline
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (LEAD_PULSE__ prefix)
//!
//! # Registries
//!
//! The static data every component runs against lives in a registry file
//! (`config/registry.yaml` by default):
//! - Product rules (ordered keyword cues -> product)
//! - Supply facilities and the sector -> volume table
//! - Regional officers and the fallback officer
//! - Intake defaults and the feedback recalibration policy

pub mod facility;
pub mod officer;
pub mod product;
pub mod registry;
pub mod scoring;
pub mod settings;

pub use facility::{default_facilities, VolumeTable, VolumeTier};
pub use officer::{default_fallback_officer, default_officers};
pub use product::{default_product_rules, ProductRule};
pub use registry::{RegistryConfig, RegistryManager};
pub use scoring::{IntakeConfig, RecalibrationPolicy};
pub use settings::{
    load_settings, ObservabilityConfig, RuntimeEnvironment, ServerConfig, Settings,
};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
