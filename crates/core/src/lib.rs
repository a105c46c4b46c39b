//! Core types for the lead pipeline
//!
//! This crate provides the plain data shared by every other crate:
//! - Raw signals and classification results
//! - The lead record and its lifecycle
//! - Facility and officer registry entries
//! - Feedback events
//! - Error types

pub mod error;
pub mod feedback;
pub mod lead;
pub mod registry;
pub mod signal;

pub use error::{Error, Result};
pub use feedback::{FeedbackDetails, FeedbackEvent, FeedbackOutcome, FeedbackRequest};
pub use lead::{
    clamp_priority, Lead, LeadStatus, ProductFit, Provenance, Proximity, VolumeEstimate,
    MAX_PRIORITY, MIN_PRIORITY,
};
pub use registry::{city_key, Coordinates, Facility, Officer, OfficerRef};
pub use signal::{ClassificationResult, RawSignal};
