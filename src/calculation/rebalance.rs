//! Minimum-share rebalancing.
//!
//! After a role-based rule has produced a distribution, any participant
//! payout below [`MINIMUM_PARTICIPANT_SHARE`] discards that distribution in
//! favour of a fixed fallback: 25% to the scout and the rest to the
//! corporation, or everything to the corporation when there is no scout.

use crate::models::{Isk, Payout, Role, SplitRule};

use super::shares::{MINIMUM_PARTICIPANT_SHARE, SCOUT_FALLBACK_PERCENT, percent_of};

/// A distribution produced by one split rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    /// The rule that produced the distribution.
    pub rule: SplitRule,
    /// Participant payouts in iteration order.
    pub payouts: Vec<Payout>,
    /// The corporation's share.
    pub corporation_share: Isk,
}

impl Distribution {
    /// Everything to the corporation.
    pub fn corporation_only(total_value: Isk) -> Self {
        Self {
            rule: SplitRule::CorporationOnly,
            payouts: Vec::new(),
            corporation_share: total_value,
        }
    }

    /// The smallest participant payout, ignoring the corporation.
    pub fn min_participant_payout(&self) -> Option<Isk> {
        self.payouts.iter().map(|p| p.amount).min()
    }
}

/// Returns true if any participant payout falls below the minimum share.
///
/// # Example
///
/// ```
/// use loot_split::calculation::{Distribution, needs_rebalancing};
/// use loot_split::models::{Payout, Role, SplitRule};
///
/// let distribution = Distribution {
///     rule: SplitRule::EvenSplit,
///     payouts: vec![Payout::new("Kira", Role::Scout, 99_999_999)],
///     corporation_share: 0,
/// };
/// assert!(needs_rebalancing(&distribution));
/// ```
pub fn needs_rebalancing(distribution: &Distribution) -> bool {
    distribution
        .min_participant_payout()
        .is_some_and(|min| min < MINIMUM_PARTICIPANT_SHARE)
}

/// Computes the fallback distribution.
///
/// With a scout, the scout receives `floor(total × 0.25)` and the corporation
/// receives `total − scout`, so no ISK is lost to rounding. Without a scout the
/// corporation receives everything.
pub fn fallback_distribution(total_value: Isk, scout: Option<&str>) -> Distribution {
    match scout {
        Some(name) => {
            let scout_share = percent_of(total_value, SCOUT_FALLBACK_PERCENT);
            Distribution {
                rule: SplitRule::ScoutFallback,
                payouts: vec![Payout::new(name, Role::Scout, scout_share)],
                corporation_share: total_value - scout_share,
            }
        }
        None => Distribution::corporation_only(total_value),
    }
}
