//! Saved split persistence.

use std::path::PathBuf;

use tracing::info;
use uuid::Uuid;

use crate::error::{LootError, LootResult};
use crate::models::{NewSplit, SavedSplit};

use super::json_file::JsonFile;

/// Saved splits, kept in insertion order in a single JSON array.
///
/// # Example
///
/// ```no_run
/// use loot_split::store::SplitStore;
///
/// let store = SplitStore::open("data/loot_splits.json").unwrap();
/// for split in store.list() {
///     println!("{} {}", split.id, split.total_buy_price);
/// }
/// ```
#[derive(Debug)]
pub struct SplitStore {
    file: JsonFile<Vec<SavedSplit>>,
}

impl SplitStore {
    /// Opens the store, creating an empty one if the file does not exist yet.
    pub fn open(path: impl Into<PathBuf>) -> LootResult<Self> {
        Ok(Self {
            file: JsonFile::open(path)?,
        })
    }

    /// All saved splits, oldest first.
    pub fn list(&self) -> Vec<SavedSplit> {
        self.file.read(|splits| splits.clone())
    }

    /// Looks up one split.
    pub fn get(&self, id: Uuid) -> LootResult<SavedSplit> {
        self.file
            .read(|splits| splits.iter().find(|s| s.id == id).cloned())
            .ok_or(LootError::SplitNotFound { id })
    }

    /// Validates and persists a split, assigning its id and date.
    pub fn save(&self, split: NewSplit) -> LootResult<SavedSplit> {
        split.validate()?;
        let saved = SavedSplit::create(split);

        self.file.update(|splits| {
            splits.push(saved.clone());
            Ok(())
        })?;

        info!(
            split_id = %saved.id,
            total_buy_price = saved.total_buy_price,
            path = %self.file.path().display(),
            "Saved loot split"
        );
        Ok(saved)
    }

    /// Replaces the battle report of an existing split.
    pub fn update_battle_report(
        &self,
        id: Uuid,
        battle_report: impl Into<String>,
    ) -> LootResult<SavedSplit> {
        let battle_report = battle_report.into();
        let updated = self.file.update(|splits| {
            let split = splits
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or(LootError::SplitNotFound { id })?;
            split.battle_report = battle_report;
            Ok(split.clone())
        })?;

        info!(split_id = %id, "Updated battle report");
        Ok(updated)
    }

    /// Removes a split, returning the removed record.
    pub fn delete(&self, id: Uuid) -> LootResult<SavedSplit> {
        let removed = self.file.update(|splits| {
            let index = splits
                .iter()
                .position(|s| s.id == id)
                .ok_or(LootError::SplitNotFound { id })?;
            Ok(splits.remove(index))
        })?;

        info!(split_id = %id, "Deleted loot split");
        Ok(removed)
    }
}
