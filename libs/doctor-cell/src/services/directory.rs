// libs/doctor-cell/src/services/directory.rs
use std::collections::HashSet;
use std::path::Path;

use tracing::{debug, info};

use shared_models::time::TimeOfDay;

use crate::models::{default_roster, DirectoryError, Provider, ProviderRosterEntry};

/// Read-only table of providers in the order they were defined.
///
/// Built once at start-up and shared behind an `Arc`; nothing mutates it
/// afterwards. Lookups by name are linear, which is fine for a clinic-sized
/// roster and keeps iteration order identical to the roster order.
#[derive(Debug, Clone)]
pub struct ProviderDirectory {
    providers: Vec<Provider>,
}

impl ProviderDirectory {
    pub fn new(providers: Vec<Provider>) -> Result<Self, DirectoryError> {
        let mut seen = HashSet::with_capacity(providers.len());
        for provider in &providers {
            if !seen.insert(provider.name()) {
                return Err(DirectoryError::DuplicateProvider(provider.name().to_string()));
            }
        }

        debug!("Provider directory built with {} providers", providers.len());
        Ok(Self { providers })
    }

    pub fn from_roster(roster: Vec<ProviderRosterEntry>) -> Result<Self, DirectoryError> {
        let providers = roster
            .into_iter()
            .map(ProviderRosterEntry::into_provider)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(providers)
    }

    /// Load a JSON roster (`[{"name": .., "intervals": [{"start": .., "end": ..}]}]`).
    pub fn from_roster_file(path: impl AsRef<Path>) -> Result<Self, DirectoryError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let roster: Vec<ProviderRosterEntry> = serde_json::from_str(&contents)?;
        let directory = Self::from_roster(roster)?;
        info!("Loaded {} providers from {}", directory.len(), path.display());
        Ok(directory)
    }

    pub fn clinic_default() -> Result<Self, DirectoryError> {
        Self::from_roster(default_roster())
    }

    pub fn is_working(&self, provider: &str, t: TimeOfDay) -> bool {
        self.get(provider).is_some_and(|p| p.is_working(t))
    }

    /// Provider names in definition order.
    pub fn all_providers(&self) -> impl Iterator<Item = &str> + '_ {
        self.providers.iter().map(Provider::name)
    }

    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    pub fn get(&self, provider: &str) -> Option<&Provider> {
        self.providers.iter().find(|p| p.name() == provider)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}
