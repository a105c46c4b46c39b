//! Application state

use std::sync::Arc;

use lead_pulse_config::{RegistryManager, Settings};
use lead_pulse_engine::LeadEngine;
use metrics_exporter_prometheus::PrometheusHandle;
use parking_lot::RwLock;

use crate::store::{InMemoryLeadStore, LeadStore};
use crate::ServerError;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Settings>,
    /// Swapped wholesale on registry reload; handlers hold a snapshot
    engine: Arc<RwLock<Arc<LeadEngine>>>,
    pub registry: Arc<RegistryManager>,
    pub leads: Arc<dyn LeadStore>,
    pub metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Build state from a loaded registry, with the in-memory lead store
    pub fn new(config: Settings, registry: RegistryManager) -> Result<Self, ServerError> {
        Self::with_store(config, registry, Arc::new(InMemoryLeadStore::new()))
    }

    pub fn with_store(
        config: Settings,
        registry: RegistryManager,
        leads: Arc<dyn LeadStore>,
    ) -> Result<Self, ServerError> {
        let engine = LeadEngine::from_registry(&registry.get())?;

        Ok(Self {
            config: Arc::new(config),
            engine: Arc::new(RwLock::new(Arc::new(engine))),
            registry: Arc::new(registry),
            leads,
            metrics: None,
        })
    }

    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    /// Current engine snapshot
    pub fn engine(&self) -> Arc<LeadEngine> {
        self.engine.read().clone()
    }

    /// Re-read the registry file and rebuild the engine
    ///
    /// On any failure the running engine stays in place.
    pub fn reload_registry(&self) -> Result<String, ServerError> {
        let config = self.registry.reload()?;
        let engine = LeadEngine::from_registry(&config)?;
        *self.engine.write() = Arc::new(engine);

        tracing::info!(version = %config.version, "Lead engine rebuilt from registry");
        Ok(config.version)
    }
}
