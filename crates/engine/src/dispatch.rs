//! Priority dispatch
//!
//! Picks the next lead to push to a field officer and renders the alert.
//! Delivery itself (WhatsApp, SMS) happens outside this crate.

use std::cmp::Ordering;

use chrono::Utc;
use lead_pulse_core::{Lead, Officer};

/// Highest-priority `New` lead that has not been dispatched yet
///
/// Equal scores go to the older lead.
pub fn next_priority_lead(leads: &[Lead]) -> Option<&Lead> {
    leads
        .iter()
        .filter(|l| l.is_open() && l.dispatched_at.is_none())
        .max_by(|a, b| match a.priority_score.total_cmp(&b.priority_score) {
            Ordering::Equal => b.created_at.cmp(&a.created_at),
            other => other,
        })
}

/// Officer alert text
pub fn format_alert(lead: &Lead, officer: &Officer) -> String {
    format!(
        "LEAD PULSE: TOP PRIORITY\n\n\
         Entity: {}\n\
         Product: {}\n\
         Reason: {}\n\
         Priority: {}\n\
         Site: {}\n\
         Officer: {} ({}, {})",
        lead.normalized_company,
        lead.recommended_product,
        lead.reasoning,
        lead.priority_label(),
        lead.location,
        officer.name,
        officer.region,
        officer.phone,
    )
}

/// Copy of the lead stamped as dispatched
pub fn mark_dispatched(lead: &Lead) -> Lead {
    let now = Utc::now();
    let mut updated = lead.clone();
    updated.dispatched_at = Some(now);
    updated.updated_at = now;
    updated.version = lead.version + 1;
    updated
}
