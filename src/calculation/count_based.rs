//! Count-based split calculation.
//!
//! Splits an appraisal across anonymous pilots and scanners. When the per-head
//! share exceeds the corporation cut threshold, the corporation takes 10%
//! first. Scanners receive a 10% bonus pool on top of the base payout.
//!
//! The bonus pool is paid on top of a division that already covers the whole
//! remaining value, so a split with scanners can pay out more than it was
//! given. That over-allocation is kept as observed and surfaced as an
//! `OVER_ALLOCATION` audit warning rather than corrected.

use crate::models::{AuditTrace, Isk, Payout, Role, SplitResult, SplitRule};

use super::format::format_isk;
use super::shares::{
    CORPORATION_CUT_PERCENT, CORPORATION_CUT_THRESHOLD, SCANNER_BONUS_PERCENT, even_shares,
    percent_of,
};

/// Warning code attached when scanner bonuses push payouts past the total.
pub const OVER_ALLOCATION_WARNING: &str = "OVER_ALLOCATION";

/// Computes a count-based split.
///
/// # Arguments
///
/// * `total_value` - The appraisal value in ISK
/// * `pilots` - Number of pilots
/// * `scanners` - Number of scanners
///
/// # Returns
///
/// A `SplitResult` with one payout per scanner ("Scanner 1", ...) followed by
/// one per pilot ("Pilot 1", ...). A non-positive value or an empty fleet
/// yields the invalid sentinel ("Invalid data provided.").
///
/// # Examples
///
/// ```
/// use loot_split::calculation::calculate_count_based_split;
///
/// let result = calculate_count_based_split(2_000_000_000, 4, 0);
/// assert_eq!(result.corporation_share, 200_000_000);
/// assert_eq!(result.payout_for("Pilot 1"), Some(450_000_000));
/// ```
pub fn calculate_count_based_split(total_value: Isk, pilots: u32, scanners: u32) -> SplitResult {
    let participants = Isk::from(pilots) + Isk::from(scanners);
    if total_value <= 0 || participants <= 0 {
        return SplitResult::invalid(total_value);
    }

    let mut trace = AuditTrace::default();

    let (base_share, _) = even_shares(total_value, participants);
    let corporation_cut_applies = base_share > CORPORATION_CUT_THRESHOLD;
    let corporation_cut = if corporation_cut_applies {
        percent_of(total_value, CORPORATION_CUT_PERCENT)
    } else {
        0
    };
    let remaining_value = total_value - corporation_cut;

    trace.record(
        "corporation_cut",
        "Corporation Cut",
        serde_json::json!({
            "total_value": total_value,
            "participants": participants,
            "base_share": base_share,
            "threshold": CORPORATION_CUT_THRESHOLD
        }),
        serde_json::json!({
            "applied": corporation_cut_applies,
            "corporation_cut": corporation_cut,
            "remaining_value": remaining_value
        }),
        if corporation_cut_applies {
            format!(
                "Per-head share {} exceeds {}: corporation takes {}",
                format_isk(base_share),
                format_isk(CORPORATION_CUT_THRESHOLD),
                format_isk(corporation_cut)
            )
        } else {
            format!(
                "Per-head share {} does not exceed {}: no corporation cut",
                format_isk(base_share),
                format_isk(CORPORATION_CUT_THRESHOLD)
            )
        },
    );

    let (base_payout, _) = even_shares(remaining_value, participants);
    let scanner_bonus = if scanners > 0 {
        let bonus_pool = percent_of(remaining_value, SCANNER_BONUS_PERCENT);
        even_shares(bonus_pool, Isk::from(scanners)).0
    } else {
        0
    };
    let scanner_payout = base_payout + scanner_bonus;
    let pilot_payout = base_payout;

    trace.record(
        "payouts",
        "Pilot and Scanner Payouts",
        serde_json::json!({
            "remaining_value": remaining_value,
            "pilots": pilots,
            "scanners": scanners
        }),
        serde_json::json!({
            "base_payout": base_payout,
            "scanner_bonus": scanner_bonus,
            "scanner_payout": scanner_payout,
            "pilot_payout": pilot_payout
        }),
        format!(
            "{} / {} = {} per head; scanners add {}",
            format_isk(remaining_value),
            participants,
            format_isk(base_payout),
            format_isk(scanner_bonus)
        ),
    );

    let mut payouts: Vec<Payout> = (1..=scanners)
        .map(|i| Payout::new(format!("Scanner {}", i), Role::Scanner, scanner_payout))
        .chain((1..=pilots).map(|i| Payout::new(format!("Pilot {}", i), Role::Pilot, pilot_payout)))
        .collect();

    let distributed = scanner_payout * Isk::from(scanners) + pilot_payout * Isk::from(pilots);
    let leftover = remaining_value - distributed;
    let corporation_share = corporation_cut;

    let leftover_reasoning = if scanners > 0 {
        if leftover > 0 {
            if let Some(first_scanner) = payouts.first_mut() {
                first_scanner.amount += leftover;
            }
            format!("Leftover {} added to the first scanner", format_isk(leftover))
        } else if leftover < 0 {
            trace.warn(
                OVER_ALLOCATION_WARNING,
                format!(
                    "Payouts exceed the remaining value by {}",
                    format_isk(-leftover)
                ),
                "medium",
            );
            format!(
                "Distributed {} of {}; negative leftover is not applied",
                format_isk(distributed),
                format_isk(remaining_value)
            )
        } else {
            "No leftover".to_string()
        }
    } else {
        if let Some(last_pilot) = payouts.last_mut() {
            last_pilot.amount += leftover;
        }
        format!("Leftover {} added to the last pilot", format_isk(leftover))
    };

    trace.record(
        "leftover",
        "Leftover Allocation",
        serde_json::json!({
            "remaining_value": remaining_value,
            "distributed": distributed
        }),
        serde_json::json!({
            "leftover": leftover,
            "corporation_share": corporation_share
        }),
        leftover_reasoning,
    );

    let rule = if corporation_cut_applies {
        SplitRule::CountWithCorpCut
    } else {
        SplitRule::CountWithoutCorpCut
    };

    let description = if scanners > 0 {
        format!(
            "{} with a {}% scanner bonus",
            rule.description(),
            SCANNER_BONUS_PERCENT
        )
    } else {
        rule.description().to_string()
    };

    SplitResult {
        total_value,
        payouts,
        corporation_share,
        rule: Some(rule),
        description,
        rebalanced: false,
        audit_trace: trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_value_is_invalid() {
        let result = calculate_count_based_split(0, 3, 1);
        assert!(result.is_sentinel());
        assert_eq!(result.description, "Invalid data provided.");
        assert!(result.payouts.is_empty());
    }

    #[test]
    fn test_negative_value_is_invalid() {
        let result = calculate_count_based_split(-1, 3, 1);
        assert_eq!(result.description, "Invalid data provided.");
    }

    #[test]
    fn test_empty_fleet_is_invalid() {
        let result = calculate_count_based_split(1_000_000_000, 0, 0);
        assert!(result.is_sentinel());
        assert_eq!(result.description, "Invalid data provided.");
    }

    #[test]
    fn test_scanner_bonus_over_allocates_without_subtracting() {
        let result = calculate_count_based_split(900_000_000, 8, 1);

        assert_eq!(result.rule, Some(SplitRule::CountWithoutCorpCut));
        assert_eq!(result.corporation_share, 0);
        assert_eq!(result.payout_for("Scanner 1"), Some(190_000_000));
        assert_eq!(result.payout_for("Pilot 1"), Some(100_000_000));
        assert_eq!(result.payout_for("Pilot 8"), Some(100_000_000));
        assert_eq!(result.payouts.len(), 9);
        assert_eq!(result.distributed_total(), 990_000_000);

        let warnings = &result.audit_trace.warnings;
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, OVER_ALLOCATION_WARNING);
        assert!(warnings[0].message.contains("90,000,000"));
    }

    #[test]
    fn test_corporation_cut_applies_above_threshold() {
        let result = calculate_count_based_split(2_000_000_000, 4, 0);

        assert_eq!(result.rule, Some(SplitRule::CountWithCorpCut));
        assert_eq!(result.corporation_share, 200_000_000);
        for i in 1..=4 {
            assert_eq!(result.payout_for(&format!("Pilot {}", i)), Some(450_000_000));
        }
        assert_eq!(result.distributed_total(), 2_000_000_000);
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_descriptions_differ_by_corporation_cut() {
        let with_cut = calculate_count_based_split(2_000_000_000, 4, 0);
        let without_cut = calculate_count_based_split(400_000_000, 4, 0);
        assert_ne!(with_cut.description, without_cut.description);
        assert_eq!(without_cut.corporation_share, 0);
    }

    #[test]
    fn test_pilots_only_leftover_goes_to_last_pilot() {
        let result = calculate_count_based_split(200_000_000, 3, 0);

        assert_eq!(result.rule, Some(SplitRule::CountWithoutCorpCut));
        assert_eq!(result.corporation_share, 0);
        assert_eq!(result.payout_for("Pilot 1"), Some(66_666_666));
        assert_eq!(result.payout_for("Pilot 2"), Some(66_666_666));
        assert_eq!(result.payout_for("Pilot 3"), Some(66_666_668));
        assert_eq!(result.distributed_total(), 200_000_000);
    }

    #[test]
    fn test_corporation_share_is_exactly_the_cut() {
        // 3B / 7 per head clears the threshold: the cut is 300M and the
        // 2.7B remainder leaves 5 ISK after the even division
        let with_cut = calculate_count_based_split(3_000_000_000, 7, 0);
        assert_eq!(with_cut.corporation_share, 300_000_000);
        assert_eq!(with_cut.payout_for("Pilot 7"), Some(385_714_290));
        assert_eq!(with_cut.distributed_total(), 3_000_000_000);

        let without_cut = calculate_count_based_split(100, 3, 0);
        assert_eq!(without_cut.corporation_share, 0);
        assert_eq!(without_cut.payout_for("Pilot 3"), Some(34));
    }

    #[test]
    fn test_description_mentions_bonus_only_with_scanners() {
        let pilots_only = calculate_count_based_split(400_000_000, 4, 0);
        assert_eq!(pilots_only.description, "No Corp cut, split among pilots");

        let with_scanner = calculate_count_based_split(900_000_000, 8, 1);
        assert_eq!(
            with_scanner.description,
            "No Corp cut, split among pilots with a 10% scanner bonus"
        );
    }

    #[test]
    fn test_positive_leftover_goes_to_first_scanner() {
        // base 10 / 3 = 3, bonus floor(1 / 2) = 0, distributed 9, leftover 1
        let result = calculate_count_based_split(10, 1, 2);

        assert_eq!(result.payout_for("Scanner 1"), Some(4));
        assert_eq!(result.payout_for("Scanner 2"), Some(3));
        assert_eq!(result.payout_for("Pilot 1"), Some(3));
        assert_eq!(result.distributed_total(), 10);
        assert!(result.audit_trace.warnings.is_empty());
    }

    #[test]
    fn test_scanners_listed_before_pilots() {
        let result = calculate_count_based_split(1_000_000_000, 2, 2);
        let roles: Vec<Role> = result.payouts.iter().map(|p| p.role).collect();
        assert_eq!(
            roles,
            vec![Role::Scanner, Role::Scanner, Role::Pilot, Role::Pilot]
        );
    }

    #[test]
    fn test_scanners_only() {
        let result = calculate_count_based_split(3_000_000_000, 0, 2);

        // per head 1.5B > threshold: cut 300M, remaining 2.7B, base 1.35B,
        // bonus pool 270M split 135M each
        assert_eq!(result.corporation_share, 300_000_000);
        assert_eq!(result.payout_for("Scanner 1"), Some(1_485_000_000));
        assert_eq!(result.payout_for("Scanner 2"), Some(1_485_000_000));
    }
}
