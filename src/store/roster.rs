//! The pilot roster.
//!
//! The visible roster is the configured seed pilots plus added names, minus
//! removed names. Only the added and removed sets are persisted.

use std::collections::BTreeSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LootError, LootResult};

use super::json_file::JsonFile;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct RosterChanges {
    #[serde(default)]
    added: BTreeSet<String>,
    #[serde(default)]
    removed: BTreeSet<String>,
}

/// Pilot names available for role assignment.
#[derive(Debug)]
pub struct Roster {
    seed: BTreeSet<String>,
    file: JsonFile<RosterChanges>,
}

fn normalize(name: &str) -> LootResult<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(LootError::PilotNameRequired);
    }
    Ok(trimmed.to_string())
}

impl Roster {
    /// Opens the roster file, seeding the visible roster with `seed_pilots`.
    pub fn open(path: impl Into<PathBuf>, seed_pilots: &[String]) -> LootResult<Self> {
        let seed = seed_pilots
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect();

        Ok(Self {
            seed,
            file: JsonFile::open(path)?,
        })
    }

    /// Current roster names, sorted.
    pub fn list(&self) -> Vec<String> {
        self.file.read(|changes| {
            self.seed
                .union(&changes.added)
                .filter(|name| !changes.removed.contains(*name))
                .cloned()
                .collect()
        })
    }

    /// Adds a pilot, clearing any earlier removal. Returns the updated roster.
    pub fn add(&self, name: &str) -> LootResult<Vec<String>> {
        let name = normalize(name)?;
        self.file.update(|changes| {
            changes.removed.remove(&name);
            if !self.seed.contains(&name) {
                changes.added.insert(name.clone());
            }
            Ok(())
        })?;

        info!(pilot = %name, "Added pilot to roster");
        Ok(self.list())
    }

    /// Removes a pilot. Returns the updated roster.
    pub fn remove(&self, name: &str) -> LootResult<Vec<String>> {
        let name = normalize(name)?;
        self.file.update(|changes| {
            changes.added.remove(&name);
            changes.removed.insert(name.clone());
            Ok(())
        })?;

        info!(pilot = %name, "Removed pilot from roster");
        Ok(self.list())
    }
}
