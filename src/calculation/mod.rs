//! Split calculation logic for the loot split engine.
//!
//! This module contains the role-based calculator (scout plus involved
//! pilots, with minimum-share rebalancing), the count-based calculator
//! (pilots plus scanners, with the corporation cut threshold), the share
//! arithmetic they share, and ISK display formatting.

mod count_based;
mod format;
mod rebalance;
mod role_based;
mod shares;

pub use count_based::{OVER_ALLOCATION_WARNING, calculate_count_based_split};
pub use format::{format_isk, format_isk_with_unit};
pub use rebalance::{Distribution, fallback_distribution, needs_rebalancing};
pub use role_based::calculate_role_based_split;
pub use shares::{
    CORPORATION_CUT_PERCENT, CORPORATION_CUT_THRESHOLD, GROUP_PERCENT, INVOLVED_POOL_PERCENT,
    MINIMUM_PARTICIPANT_SHARE, SCANNER_BONUS_PERCENT, SCOUT_FALLBACK_PERCENT, SCOUT_SOLO_PERCENT,
    even_shares, percent_of,
};

use crate::models::{Isk, SplitConfiguration, SplitResult};

/// Computes a split for either configuration shape.
///
/// # Example
///
/// ```
/// use loot_split::calculation::calculate_split;
/// use loot_split::models::SplitConfiguration;
///
/// let config = SplitConfiguration::CountBased { pilots: 0, scanners: 0 };
/// assert_eq!(calculate_split(1_000, &config).description, "Invalid data provided.");
/// ```
pub fn calculate_split(total_value: Isk, config: &SplitConfiguration) -> SplitResult {
    match config {
        SplitConfiguration::RoleBased(config) => calculate_role_based_split(total_value, config),
        SplitConfiguration::CountBased { pilots, scanners } => {
            calculate_count_based_split(total_value, *pilots, *scanners)
        }
    }
}
