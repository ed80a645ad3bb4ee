//! Role-based split calculation.
//!
//! This module divides an appraisal among an optional scout and a list of
//! involved pilots. Rules are evaluated in a fixed priority order, then the
//! minimum-share pass may replace the result with the rebalancing fallback.

use crate::models::{AuditTrace, Isk, Payout, Role, RoleBasedConfig, SplitResult, SplitRule};

use super::format::format_isk;
use super::rebalance::{Distribution, fallback_distribution, needs_rebalancing};
use super::shares::{
    CORPORATION_CUT_PERCENT, GROUP_PERCENT, INVOLVED_POOL_PERCENT, MINIMUM_PARTICIPANT_SHARE,
    SCOUT_SOLO_PERCENT, even_shares, percent_of,
};

/// Computes a role-based split.
///
/// Rule priority:
/// 1. Scout with fewer than three heads in total: even split, scout takes the remainder
/// 2. Scout alone: 90% scout, 10% corporation
/// 3. Scout with involved pilots: 10% scout, 80% pool shared by scout and involved, 10% corporation
/// 4. No scout, one or two involved: even split, last pilot takes the remainder
/// 5. No scout, three or more involved: 90% shared, 10% corporation
/// 6. Nobody: 100% to the corporation
///
/// Rules 1 to 5 are then subject to the minimum-share rebalancing pass.
///
/// # Arguments
///
/// * `total_value` - The appraisal value in ISK
/// * `config` - The scout and involved pilots
///
/// # Returns
///
/// A `SplitResult`. A non-positive `total_value` yields the empty sentinel.
///
/// # Examples
///
/// ```
/// use loot_split::calculation::calculate_role_based_split;
/// use loot_split::models::RoleBasedConfig;
///
/// let config = RoleBasedConfig::anonymous(true, 2);
/// let result = calculate_role_based_split(1_000_000_000, &config);
///
/// assert_eq!(result.payout_for("Scout"), Some(366_666_666));
/// assert_eq!(result.payout_for("Involved 1"), Some(266_666_666));
/// assert_eq!(result.corporation_share, 100_000_002);
/// ```
pub fn calculate_role_based_split(total_value: Isk, config: &RoleBasedConfig) -> SplitResult {
    if total_value <= 0 {
        return SplitResult::empty(total_value);
    }

    let mut trace = AuditTrace::default();
    let scout = config.scout.as_deref();
    let involved = &config.involved;

    let selected = match scout {
        Some(scout) if involved.len() + 1 < 3 => even_split_with_scout(total_value, scout, involved),
        Some(scout) if involved.is_empty() => scout_ninety_corp_ten(total_value, scout),
        Some(scout) => scout_pool_corp(total_value, scout, involved),
        None if involved.is_empty() => Distribution::corporation_only(total_value),
        None if involved.len() < 3 => even_split_among_involved(total_value, involved),
        None => group_ninety_corp_ten(total_value, involved),
    };

    trace.record(
        "rule_selection",
        "Rule Selection",
        serde_json::json!({
            "total_value": total_value,
            "scout_present": scout.is_some(),
            "involved_count": involved.len()
        }),
        serde_json::json!({
            "rule": selected.rule,
            "corporation_share": selected.corporation_share,
            "payouts": selected.payouts.iter().map(|p| p.amount).collect::<Vec<_>>()
        }),
        format!(
            "{} with {} and {} involved: {}",
            format_isk(total_value),
            if scout.is_some() { "a scout" } else { "no scout" },
            involved.len(),
            selected.rule.description()
        ),
    );

    let mut rebalanced = false;
    let distribution = if selected.rule == SplitRule::CorporationOnly {
        selected
    } else {
        let min_payout = selected.min_participant_payout();
        let fallback = needs_rebalancing(&selected);
        let distribution = if fallback {
            rebalanced = true;
            fallback_distribution(total_value, scout)
        } else {
            selected
        };

        trace.record(
            "minimum_share",
            "Minimum Share Check",
            serde_json::json!({
                "min_participant_payout": min_payout,
                "threshold": MINIMUM_PARTICIPANT_SHARE
            }),
            serde_json::json!({
                "rebalanced": fallback,
                "rule": distribution.rule
            }),
            match min_payout {
                Some(min) if fallback => format!(
                    "Smallest share {} is below {}: {}",
                    format_isk(min),
                    format_isk(MINIMUM_PARTICIPANT_SHARE),
                    distribution.rule.description()
                ),
                Some(min) => format!(
                    "Smallest share {} meets the {} minimum",
                    format_isk(min),
                    format_isk(MINIMUM_PARTICIPANT_SHARE)
                ),
                None => "No participant shares to check".to_string(),
            },
        );

        distribution
    };

    SplitResult {
        total_value,
        description: distribution.rule.description().to_string(),
        rule: Some(distribution.rule),
        payouts: distribution.payouts,
        corporation_share: distribution.corporation_share,
        rebalanced,
        audit_trace: trace,
    }
}

fn involved_payouts(involved: &[String], share: Isk) -> Vec<Payout> {
    involved
        .iter()
        .map(|name| Payout::new(name.clone(), Role::Involved, share))
        .collect()
}

/// Even split among scout and involved; the scout absorbs the remainder.
fn even_split_with_scout(total_value: Isk, scout: &str, involved: &[String]) -> Distribution {
    let heads = involved.len() as Isk + 1;
    let (share, remainder) = even_shares(total_value, heads);

    let mut payouts = vec![Payout::new(scout, Role::Scout, share + remainder)];
    payouts.extend(involved_payouts(involved, share));

    Distribution {
        rule: SplitRule::EvenSplit,
        payouts,
        corporation_share: 0,
    }
}

/// 90% to a lone scout, 10% plus rounding to the corporation.
fn scout_ninety_corp_ten(total_value: Isk, scout: &str) -> Distribution {
    let scout_share = percent_of(total_value, SCOUT_SOLO_PERCENT);
    let corporation_base = percent_of(total_value, CORPORATION_CUT_PERCENT);
    let remainder = total_value - scout_share - corporation_base;

    Distribution {
        rule: SplitRule::ScoutNinetyCorpTen,
        payouts: vec![Payout::new(scout, Role::Scout, scout_share)],
        corporation_share: corporation_base + remainder,
    }
}

/// 10% scout base, 80% pool split across scout and involved, 10% corporation.
///
/// Every rounding remainder lands with the corporation.
fn scout_pool_corp(total_value: Isk, scout: &str, involved: &[String]) -> Distribution {
    let scout_base = percent_of(total_value, CORPORATION_CUT_PERCENT);
    let corporation_base = percent_of(total_value, CORPORATION_CUT_PERCENT);
    let pool = percent_of(total_value, INVOLVED_POOL_PERCENT);
    let pool_heads = involved.len() as Isk + 1;
    let (involved_share, _) = even_shares(pool, pool_heads);

    let remainder = total_value - (scout_base + corporation_base + involved_share * pool_heads);

    let mut payouts = vec![Payout::new(scout, Role::Scout, scout_base + involved_share)];
    payouts.extend(involved_payouts(involved, involved_share));

    Distribution {
        rule: SplitRule::ScoutPoolCorp,
        payouts,
        corporation_share: corporation_base + remainder,
    }
}

/// Even split among involved pilots; the last pilot absorbs the remainder.
fn even_split_among_involved(total_value: Isk, involved: &[String]) -> Distribution {
    let (share, remainder) = even_shares(total_value, involved.len() as Isk);
    let mut payouts = involved_payouts(involved, share);
    if let Some(last) = payouts.last_mut() {
        last.amount += remainder;
    }

    Distribution {
        rule: SplitRule::EvenSplit,
        payouts,
        corporation_share: 0,
    }
}

/// 10% to the corporation, 90% across the group; the last pilot absorbs the remainder.
fn group_ninety_corp_ten(total_value: Isk, involved: &[String]) -> Distribution {
    let corporation_share = percent_of(total_value, CORPORATION_CUT_PERCENT);
    let group_pool = percent_of(total_value, GROUP_PERCENT);
    let (share, _) = even_shares(group_pool, involved.len() as Isk);
    let remainder = total_value - (corporation_share + share * involved.len() as Isk);

    let mut payouts = involved_payouts(involved, share);
    if let Some(last) = payouts.last_mut() {
        last.amount += remainder;
    }

    Distribution {
        rule: SplitRule::GroupNinetyCorpTen,
        payouts,
        corporation_share,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(count: usize) -> Vec<String> {
        (1..=count).map(|i| format!("Pilot {}", i)).collect()
    }

    fn scout_config(involved: usize) -> RoleBasedConfig {
        RoleBasedConfig::new(Some("Kira".to_string()), names(involved))
    }

    fn assert_conserved(result: &SplitResult) {
        assert_eq!(
            result.distributed_total(),
            result.total_value,
            "payouts {:?} + corp {} != {}",
            result.payouts,
            result.corporation_share,
            result.total_value
        );
    }

    #[test]
    fn test_zero_value_returns_empty_sentinel() {
        let result = calculate_role_based_split(0, &scout_config(2));
        assert_eq!(result, SplitResult::empty(0));
        assert!(result.description.is_empty());
    }

    #[test]
    fn test_negative_value_returns_empty_sentinel() {
        let result = calculate_role_based_split(-5, &scout_config(0));
        assert!(result.is_sentinel());
        assert!(result.payouts.is_empty());
    }

    #[test]
    fn test_lone_scout_takes_everything() {
        let result = calculate_role_based_split(300_000_000, &scout_config(0));

        assert_eq!(result.rule, Some(SplitRule::EvenSplit));
        assert_eq!(result.description, "Even Split");
        assert_eq!(result.payout_for("Kira"), Some(300_000_000));
        assert_eq!(result.corporation_share, 0);
        assert!(!result.rebalanced);
    }

    #[test]
    fn test_scout_and_one_involved_split_evenly() {
        let result = calculate_role_based_split(1_000_000_000, &scout_config(1));

        assert_eq!(result.rule, Some(SplitRule::EvenSplit));
        assert_eq!(result.payout_for("Kira"), Some(500_000_000));
        assert_eq!(result.payout_for("Pilot 1"), Some(500_000_000));
        assert_eq!(result.corporation_share, 0);
    }

    #[test]
    fn test_scout_absorbs_even_split_remainder() {
        let result = calculate_role_based_split(1_000_000_001, &scout_config(1));

        assert_eq!(result.payout_for("Kira"), Some(500_000_001));
        assert_eq!(result.payout_for("Pilot 1"), Some(500_000_000));
        assert_conserved(&result);
    }

    #[test]
    fn test_scout_with_two_involved_uses_pool_rule() {
        let result = calculate_role_based_split(1_000_000_000, &scout_config(2));

        assert_eq!(result.rule, Some(SplitRule::ScoutPoolCorp));
        assert_eq!(
            result.description,
            "10% to Scout, 80% to involved + scout, 10% to Corp"
        );
        assert_eq!(result.payout_for("Kira"), Some(366_666_666));
        assert_eq!(result.payout_for("Pilot 1"), Some(266_666_666));
        assert_eq!(result.payout_for("Pilot 2"), Some(266_666_666));
        assert_eq!(result.corporation_share, 100_000_002);
        assert!(!result.rebalanced);
        assert_conserved(&result);
    }

    #[test]
    fn test_small_pool_split_rebalances_to_scout_fallback() {
        let result = calculate_role_based_split(50_000_000, &scout_config(2));

        assert_eq!(result.rule, Some(SplitRule::ScoutFallback));
        assert_eq!(result.description, "25% to the Scout, 75% to the Corp");
        assert_eq!(result.payouts.len(), 1);
        assert_eq!(result.payout_for("Kira"), Some(12_500_000));
        assert_eq!(result.corporation_share, 37_500_000);
        assert!(result.rebalanced);
        assert_conserved(&result);
    }

    #[test]
    fn test_lone_scout_below_minimum_rebalances() {
        let result = calculate_role_based_split(50_000_000, &scout_config(0));

        assert_eq!(result.rule, Some(SplitRule::ScoutFallback));
        assert_eq!(result.payout_for("Kira"), Some(12_500_000));
        assert_eq!(result.corporation_share, 37_500_000);
    }

    #[test]
    fn test_scout_ninety_corp_ten_rule() {
        let distribution = scout_ninety_corp_ten(1_000_000_009, "Kira");

        assert_eq!(distribution.rule, SplitRule::ScoutNinetyCorpTen);
        assert_eq!(distribution.payouts[0].amount, 900_000_008);
        assert_eq!(distribution.corporation_share, 100_000_001);
        assert_eq!(
            distribution.payouts[0].amount + distribution.corporation_share,
            1_000_000_009
        );
    }

    #[test]
    fn test_lone_scout_never_reaches_ninety_ten_rule() {
        let result = calculate_role_based_split(5_000_000_000, &scout_config(0));
        assert_eq!(result.rule, Some(SplitRule::EvenSplit));
    }

    #[test]
    fn test_two_involved_without_scout_last_takes_remainder() {
        let config = RoleBasedConfig::new(None, names(2));
        let result = calculate_role_based_split(1_000_000_001, &config);

        assert_eq!(result.rule, Some(SplitRule::EvenSplit));
        assert_eq!(result.payout_for("Pilot 1"), Some(500_000_000));
        assert_eq!(result.payout_for("Pilot 2"), Some(500_000_001));
        assert_conserved(&result);
    }

    #[test]
    fn test_group_of_three_without_scout() {
        let config = RoleBasedConfig::new(None, names(3));
        let result = calculate_role_based_split(1_000_000_000, &config);

        assert_eq!(result.rule, Some(SplitRule::GroupNinetyCorpTen));
        assert_eq!(result.description, "90% split to involved, 10% to Corp");
        assert_eq!(result.corporation_share, 100_000_000);
        assert_eq!(result.payout_for("Pilot 1"), Some(300_000_000));
        assert_eq!(result.payout_for("Pilot 3"), Some(300_000_000));
        assert_conserved(&result);
    }

    #[test]
    fn test_group_remainder_goes_to_last_pilot() {
        let config = RoleBasedConfig::new(None, names(7));
        let result = calculate_role_based_split(10_000_000_000, &config);

        // 9,000,000,000 / 7 = 1,285,714,285 remainder 5
        assert_eq!(result.payout_for("Pilot 1"), Some(1_285_714_285));
        assert_eq!(result.payout_for("Pilot 7"), Some(1_285_714_290));
        assert_eq!(result.corporation_share, 1_000_000_000);
        assert_conserved(&result);
    }

    #[test]
    fn test_small_group_without_scout_rebalances_to_corporation() {
        let config = RoleBasedConfig::new(None, names(4));
        let result = calculate_role_based_split(200_000_000, &config);

        assert_eq!(result.rule, Some(SplitRule::CorporationOnly));
        assert_eq!(result.description, "100% to the Corp");
        assert!(result.payouts.is_empty());
        assert_eq!(result.corporation_share, 200_000_000);
        assert!(result.rebalanced);
    }

    #[test]
    fn test_nobody_assigned_goes_to_corporation() {
        let result = calculate_role_based_split(1_234, &RoleBasedConfig::default());

        assert_eq!(result.rule, Some(SplitRule::CorporationOnly));
        assert_eq!(result.corporation_share, 1_234);
        assert!(!result.rebalanced);
        assert_eq!(result.audit_trace.steps.len(), 1);
    }

    #[test]
    fn test_audit_trace_records_rule_and_minimum_check() {
        let result = calculate_role_based_split(50_000_000, &scout_config(2));
        let steps = &result.audit_trace.steps;

        assert_eq!(steps.len(), 2);
        assert_eq!(steps[0].rule_id, "rule_selection");
        assert_eq!(steps[0].output["rule"], "scout_pool_corp");
        assert_eq!(steps[1].rule_id, "minimum_share");
        assert_eq!(steps[1].output["rebalanced"], true);
        assert!(steps[1].reasoning.contains("100,000,000"));
    }

    #[test]
    fn test_same_input_same_output() {
        let config = scout_config(5);
        assert_eq!(
            calculate_role_based_split(7_777_777_777, &config),
            calculate_role_based_split(7_777_777_777, &config)
        );
    }
}
