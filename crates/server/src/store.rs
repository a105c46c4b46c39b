//! Lead persistence
//!
//! Read-modify-write updates go through `compare_and_swap`, keyed on the
//! lead's `version`, so two reviewers acting on one lead cannot silently
//! overwrite each other.

use std::collections::HashMap;

use async_trait::async_trait;
use lead_pulse_core::{Error, Lead, LeadStatus, Result};
use parking_lot::RwLock;

/// Lead store trait for pluggable backends
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Insert a freshly created lead
    async fn insert(&self, lead: Lead) -> Result<()>;

    async fn get(&self, id: &str) -> Result<Option<Lead>>;

    /// All leads, highest priority first
    async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>>;

    /// Replace a lead if the stored version still equals `expected_version`
    async fn compare_and_swap(&self, lead: Lead, expected_version: u64) -> Result<()>;

    async fn count(&self) -> usize;
}

/// In-memory lead store (default)
///
/// Leads do not survive a restart.
#[derive(Default)]
pub struct InMemoryLeadStore {
    leads: RwLock<HashMap<String, Lead>>,
}

impl InMemoryLeadStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LeadStore for InMemoryLeadStore {
    async fn insert(&self, lead: Lead) -> Result<()> {
        let mut leads = self.leads.write();
        if leads.contains_key(&lead.id) {
            return Err(Error::validation(
                "id",
                format!("lead {} already exists", lead.id),
            ));
        }
        leads.insert(lead.id.clone(), lead);
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<Option<Lead>> {
        Ok(self.leads.read().get(id).cloned())
    }

    async fn list(&self, status: Option<LeadStatus>) -> Result<Vec<Lead>> {
        let mut leads: Vec<Lead> = self
            .leads
            .read()
            .values()
            .filter(|l| status.map_or(true, |s| l.status == s))
            .cloned()
            .collect();

        leads.sort_by(|a, b| {
            b.priority_score
                .total_cmp(&a.priority_score)
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(leads)
    }

    async fn compare_and_swap(&self, lead: Lead, expected_version: u64) -> Result<()> {
        let mut leads = self.leads.write();
        let current = leads
            .get(&lead.id)
            .ok_or_else(|| Error::NotFound(format!("lead {}", lead.id)))?;

        if current.version != expected_version {
            return Err(Error::ConcurrencyConflict {
                lead_id: lead.id.clone(),
                expected: expected_version,
                found: current.version,
            });
        }

        leads.insert(lead.id.clone(), lead);
        Ok(())
    }

    async fn count(&self) -> usize {
        self.leads.read().len()
    }
}
