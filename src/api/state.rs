//! Application state for the loot split API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use tracing::info;

use crate::appraisal::{Appraiser, JaniceAppraiser};
use crate::config::ConfigLoader;
use crate::error::LootResult;
use crate::store::{Roster, SplitStore, TrustList};

/// Shared application state.
///
/// Holds the stores and the appraisal client. Cloning is cheap. Store
/// handles are exposed as `Arc`s so writes can move onto blocking threads.
#[derive(Clone)]
pub struct AppState {
    splits: Arc<SplitStore>,
    roster: Arc<Roster>,
    trust: Arc<TrustList>,
    appraiser: Arc<dyn Appraiser>,
}

impl AppState {
    /// Creates a state from already-opened parts.
    pub fn new(
        splits: SplitStore,
        roster: Roster,
        trust: TrustList,
        appraiser: Arc<dyn Appraiser>,
    ) -> Self {
        Self {
            splits: Arc::new(splits),
            roster: Arc::new(roster),
            trust: Arc::new(trust),
            appraiser,
        }
    }

    /// Opens every store under the configured data directory and builds the
    /// Janice appraisal client.
    pub fn from_config(loader: &ConfigLoader) -> LootResult<Self> {
        let config = loader.config();
        let storage = &config.storage;

        let api_key = loader.resolve_api_key();
        if api_key.is_none() {
            info!("No appraisal API key found, /appraise will fail until one is configured");
        }

        Ok(Self::new(
            SplitStore::open(storage.splits_path())?,
            Roster::open(storage.roster_path(), &config.roster.seed_pilots)?,
            TrustList::open(storage.trust_path())?,
            Arc::new(JaniceAppraiser::from_config(&config.appraisal, api_key)?),
        ))
    }

    /// Saved splits.
    pub fn splits(&self) -> &Arc<SplitStore> {
        &self.splits
    }

    /// Pilot roster.
    pub fn roster(&self) -> &Arc<Roster> {
        &self.roster
    }

    /// Trust lists.
    pub fn trust(&self) -> &Arc<TrustList> {
        &self.trust
    }

    /// Appraisal client.
    pub fn appraiser(&self) -> &dyn Appraiser {
        self.appraiser.as_ref()
    }
}
