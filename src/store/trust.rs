//! Trusted and untrusted characters and corporations.

use std::path::PathBuf;

use tracing::info;

use crate::error::LootResult;
use crate::models::{EntityKind, TrustEntry, TrustIdentifier, TrustLists, TrustStatus};

use super::json_file::JsonFile;

/// The four trust lists, persisted as one JSON document.
#[derive(Debug)]
pub struct TrustList {
    file: JsonFile<TrustLists>,
}

impl TrustList {
    /// Opens the trust list file.
    pub fn open(path: impl Into<PathBuf>) -> LootResult<Self> {
        Ok(Self {
            file: JsonFile::open(path)?,
        })
    }

    /// Snapshot of every list.
    pub fn list(&self) -> TrustLists {
        self.file.read(|lists| lists.clone())
    }

    /// Adds a record to the list for `status` and `kind`.
    ///
    /// Any record of the same kind with the same identifier is replaced,
    /// whichever list it was on.
    pub fn add(&self, status: TrustStatus, kind: EntityKind, entry: TrustEntry) -> LootResult<TrustEntry> {
        let identifier = entry.identifier.clone();
        let replaced = self.file.update(|lists| {
            let replaced = remove_matching(lists, kind, &identifier);
            lists.list_mut(status, kind).push(entry.clone());
            Ok(replaced)
        })?;

        info!(
            identifier = %identifier,
            status = ?status,
            kind = ?kind,
            replaced,
            "Recorded trust entry"
        );
        Ok(entry)
    }

    /// Removes every record of `kind` matching `identifier`. Returns how many were removed.
    pub fn remove(&self, kind: EntityKind, identifier: &TrustIdentifier) -> LootResult<usize> {
        let removed = self
            .file
            .update(|lists| Ok(remove_matching(lists, kind, identifier)))?;

        info!(identifier = %identifier, kind = ?kind, removed, "Removed trust entries");
        Ok(removed)
    }
}

fn remove_matching(lists: &mut TrustLists, kind: EntityKind, identifier: &TrustIdentifier) -> usize {
    [TrustStatus::Trusted, TrustStatus::Untrusted]
        .into_iter()
        .map(|status| {
            let list = lists.list_mut(status, kind);
            let before = list.len();
            list.retain(|entry| !identifier.matches(entry));
            before - list.len()
        })
        .sum()
}
