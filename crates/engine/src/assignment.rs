//! Officer Assignment Resolver
//!
//! Routes a lead to the officer whose region city key exactly matches the
//! city key of the lead's location. Matching is case-sensitive and never
//! substring-based, so "Nagpur, MH" does not capture "Nagpur Rural".
//! Unmatched and empty locations go to the fallback officer.

use std::collections::HashMap;

use lead_pulse_config::RegistryConfig;
use lead_pulse_core::{city_key, Officer};

#[derive(Debug, Clone)]
pub struct OfficerResolver {
    officers: Vec<Officer>,
    /// City key -> index into `officers`
    by_city: HashMap<String, usize>,
    fallback: Officer,
}

impl OfficerResolver {
    /// Build the resolver; the first officer listed for a city key owns it
    pub fn new(officers: Vec<Officer>, fallback: Officer) -> Self {
        let mut by_city = HashMap::new();
        for (idx, officer) in officers.iter().enumerate() {
            let key = officer.city_key();
            if key.is_empty() {
                continue;
            }
            if by_city.contains_key(key) {
                tracing::warn!(
                    city = %key,
                    officer = %officer.name,
                    "Duplicate officer region; keeping the first entry"
                );
                continue;
            }
            by_city.insert(key.to_string(), idx);
        }

        Self {
            officers,
            by_city,
            fallback,
        }
    }

    pub fn from_registry(config: &RegistryConfig) -> Self {
        Self::new(config.officers.clone(), config.fallback_officer.clone())
    }

    /// Officer for a location; always returns someone
    pub fn assign_officer(&self, location: &str) -> &Officer {
        let key = city_key(location);
        if key.is_empty() {
            return &self.fallback;
        }

        self.by_city
            .get(key)
            .and_then(|&idx| self.officers.get(idx))
            .unwrap_or(&self.fallback)
    }

    /// Look up an officer by name, including the fallback
    pub fn find_by_name(&self, name: &str) -> Option<&Officer> {
        self.officers
            .iter()
            .chain(std::iter::once(&self.fallback))
            .find(|o| o.name == name)
    }

    pub fn officers(&self) -> &[Officer] {
        &self.officers
    }

    pub fn fallback(&self) -> &Officer {
        &self.fallback
    }
}
