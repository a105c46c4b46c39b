//! Lead scoring engine
//!
//! Turns raw industrial-activity signals into scored, routed leads:
//! - Keyword classification to a recommended product
//! - Nearest supply facility and volume estimate
//! - Officer routing by region
//! - Priority recalibration from human feedback
//! - Dispatch of the next priority lead

pub mod assignment;
pub mod classifier;
pub mod dispatch;
pub mod entity;
pub mod intake;
pub mod proximity;
pub mod recalibration;

pub use assignment::OfficerResolver;
pub use classifier::SignalClassifier;
pub use dispatch::{format_alert, mark_dispatched, next_priority_lead};
pub use entity::normalize_company;
pub use intake::{IngestReport, LeadEngine};
pub use proximity::{format_distance_km, haversine_distance, ProximityResolver};
pub use recalibration::PriorityRecalibrator;
