//! Core data models for the loot split engine.
//!
//! This module contains the domain models shared by the calculators, the
//! stores, and the HTTP API.

mod participant;
mod saved_split;
mod split_config;
mod split_result;
mod trust;

pub use participant::{Isk, Participant, Role};
pub use saved_split::{NewSplit, SavedSplit, decimal_to_isk, isk_string};
pub use split_config::{RoleBasedConfig, SplitConfiguration};
pub use split_result::{
    AuditStep, AuditTrace, AuditWarning, CORPORATION_LABEL, INVALID_DATA_DESCRIPTION, Payout,
    SplitResult, SplitRule,
};
pub use trust::{EntityKind, TrustEntry, TrustIdentifier, TrustLists, TrustStatus};
