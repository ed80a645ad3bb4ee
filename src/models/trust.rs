//! Trust list records for characters and corporations.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which list a record belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrustStatus {
    /// Trusted entities.
    Trusted,
    /// Untrusted entities.
    Untrusted,
}

/// The kind of entity on the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// A single character.
    Character,
    /// A corporation.
    Corporation,
}

/// How a record is identified: a numeric game id or a name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrustIdentifier {
    /// Numeric character or corporation id.
    Id(i64),
    /// Display name.
    Name(String),
}

impl TrustIdentifier {
    /// Returns true if this identifier refers to the given entry.
    ///
    /// Names compare case-insensitively against both identifier and display name.
    pub fn matches(&self, entry: &TrustEntry) -> bool {
        match (self, &entry.identifier) {
            (TrustIdentifier::Id(a), TrustIdentifier::Id(b)) => a == b,
            (TrustIdentifier::Name(name), _) => {
                entry.name.eq_ignore_ascii_case(name)
                    || matches!(&entry.identifier, TrustIdentifier::Name(n) if n.eq_ignore_ascii_case(name))
            }
            _ => false,
        }
    }
}

impl fmt::Display for TrustIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrustIdentifier::Id(id) => write!(f, "{}", id),
            TrustIdentifier::Name(name) => f.write_str(name),
        }
    }
}

/// One record on a trust list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustEntry {
    /// Numeric id or name.
    pub identifier: TrustIdentifier,
    /// Display name.
    pub name: String,
    /// Optional free-text comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Who added the record, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added_by: Option<String>,
    /// Status flag shown as "on couch" in the roster views.
    #[serde(default)]
    pub on_couch: bool,
    /// When the record was added.
    pub date_added: DateTime<Utc>,
}

/// All four trust lists.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TrustLists {
    /// Trusted characters.
    #[serde(default)]
    pub characters: Vec<TrustEntry>,
    /// Trusted corporations.
    #[serde(default)]
    pub corporations: Vec<TrustEntry>,
    /// Untrusted characters.
    #[serde(default)]
    pub untrusted_characters: Vec<TrustEntry>,
    /// Untrusted corporations.
    #[serde(default)]
    pub untrusted_corporations: Vec<TrustEntry>,
}

impl TrustLists {
    /// Returns the list for a status and kind.
    pub fn list(&self, status: TrustStatus, kind: EntityKind) -> &Vec<TrustEntry> {
        match (status, kind) {
            (TrustStatus::Trusted, EntityKind::Character) => &self.characters,
            (TrustStatus::Trusted, EntityKind::Corporation) => &self.corporations,
            (TrustStatus::Untrusted, EntityKind::Character) => &self.untrusted_characters,
            (TrustStatus::Untrusted, EntityKind::Corporation) => &self.untrusted_corporations,
        }
    }

    /// Returns the list for a status and kind, mutably.
    pub fn list_mut(&mut self, status: TrustStatus, kind: EntityKind) -> &mut Vec<TrustEntry> {
        match (status, kind) {
            (TrustStatus::Trusted, EntityKind::Character) => &mut self.characters,
            (TrustStatus::Trusted, EntityKind::Corporation) => &mut self.corporations,
            (TrustStatus::Untrusted, EntityKind::Character) => &mut self.untrusted_characters,
            (TrustStatus::Untrusted, EntityKind::Corporation) => &mut self.untrusted_corporations,
        }
    }
}
