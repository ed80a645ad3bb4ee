//! Error types for the loot split engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every fallible operation outside the calculators. The calculators
//! themselves are total and report bad input through sentinel results.

use thiserror::Error;
use uuid::Uuid;

/// The main error type for the loot split engine.
///
/// # Example
///
/// ```
/// use loot_split::error::LootError;
///
/// let error = LootError::ConfigNotFound {
///     path: "/missing/loot-split.yaml".to_string(),
/// };
/// assert_eq!(
///     error.to_string(),
///     "Configuration file not found: /missing/loot-split.yaml"
/// );
/// ```
#[derive(Debug, Error)]
pub enum LootError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A participant in a split configuration was invalid.
    #[error("Invalid participant '{name}': {message}")]
    InvalidParticipant {
        /// The offending display name.
        name: String,
        /// What made the participant invalid.
        message: String,
    },

    /// An ISK amount could not be parsed or was not a whole number.
    #[error("Invalid amount '{value}': {message}")]
    InvalidAmount {
        /// The raw value that was rejected.
        value: String,
        /// Why the value was rejected.
        message: String,
    },

    /// No saved split exists with the given identifier.
    #[error("Saved split not found: {id}")]
    SplitNotFound {
        /// The identifier that was looked up.
        id: Uuid,
    },

    /// A roster operation was given a blank pilot name.
    #[error("Pilot name is required")]
    PilotNameRequired,

    /// A backing file could not be read or written.
    #[error("Storage error for '{path}': {message}")]
    Storage {
        /// The file involved.
        path: String,
        /// A description of the failure.
        message: String,
    },

    /// The appraisal service could not be reached or rejected the request.
    #[error("Appraisal failed: {message}")]
    Appraisal {
        /// A description of the failure.
        message: String,
    },
}

/// A type alias for Results that return LootError.
pub type LootResult<T> = Result<T, LootError>;
