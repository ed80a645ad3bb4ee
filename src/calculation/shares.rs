//! Share arithmetic shared by both split modes.
//!
//! All arithmetic is exact integer math. Percentages are applied as
//! `floor(total × percent / 100)` with a 128-bit intermediate so large
//! appraisals cannot overflow.

use crate::models::Isk;

/// Participant payouts below this amount trigger the rebalancing fallback.
pub const MINIMUM_PARTICIPANT_SHARE: Isk = 100_000_000;

/// Count-based per-head shares above this amount incur the corporation cut.
pub const CORPORATION_CUT_THRESHOLD: Isk = 100_000_000;

/// The corporation's cut, and the scout's base share in the 10/80/10 rule.
pub const CORPORATION_CUT_PERCENT: Isk = 10;

/// The scout's share when a scout splits alone with the corporation.
pub const SCOUT_SOLO_PERCENT: Isk = 90;

/// The pool shared by the scout and involved pilots in the 10/80/10 rule.
pub const INVOLVED_POOL_PERCENT: Isk = 80;

/// The portion shared by a scoutless group of three or more.
pub const GROUP_PERCENT: Isk = 90;

/// The scout's share under the rebalancing fallback.
pub const SCOUT_FALLBACK_PERCENT: Isk = 25;

/// The bonus pool shared by scanners in count-based mode.
pub const SCANNER_BONUS_PERCENT: Isk = 10;

/// Returns `floor(total × percent / 100)`.
///
/// # Example
///
/// ```
/// use loot_split::calculation::percent_of;
///
/// assert_eq!(percent_of(1_000_000_005, 10), 100_000_000);
/// assert_eq!(percent_of(50_000_000, 25), 12_500_000);
/// ```
pub fn percent_of(total: Isk, percent: Isk) -> Isk {
    (i128::from(total) * i128::from(percent)).div_euclid(100) as Isk
}

/// Divides `total` into `count` equal shares.
///
/// Returns the per-head share and the remainder left by floor division.
/// `count` must be positive.
pub fn even_shares(total: Isk, count: Isk) -> (Isk, Isk) {
    let share = total.div_euclid(count);
    (share, total - share * count)
}
