//! Loot split engine for corporation fleet operations.
//!
//! This crate appraises salvaged loot and divides its value among the pilots
//! who took part, following the corporation's role-based and count-based
//! payout rules. The calculators are pure; the surrounding HTTP service adds
//! appraisal, saved splits, a pilot roster, and a trust list.

#![warn(missing_docs)]

pub mod api;
pub mod appraisal;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
