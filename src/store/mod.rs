//! JSON-file backed stores for saved splits, the roster, and the trust list.
//!
//! Each store owns one file. Access is serialised through a mutex so
//! concurrent requests cannot interleave read-modify-write cycles.

mod json_file;
mod roster;
mod splits;
mod trust;

pub use roster::Roster;
pub use splits::SplitStore;
pub use trust::TrustList;
