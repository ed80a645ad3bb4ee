//! Split result models.
//!
//! This module contains the [`SplitResult`] type and the structures that
//! capture one split computation: per-participant payouts, the corporation
//! share, the rule that fired, and an audit trace of every decision taken.

use serde::{Deserialize, Serialize};

use super::{Isk, Role};

/// The label under which the corporation share is reported.
pub const CORPORATION_LABEL: &str = "Corporation";

/// Description carried by the count-based invalid-input sentinel.
pub const INVALID_DATA_DESCRIPTION: &str = "Invalid data provided.";

/// The rule that produced a split.
///
/// # Example
///
/// ```
/// use loot_split::models::SplitRule;
///
/// assert_eq!(SplitRule::EvenSplit.description(), "Even Split");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitRule {
    /// Equal shares among everyone present.
    EvenSplit,
    /// Scout alone: 90% to the scout, 10% to the corporation.
    ScoutNinetyCorpTen,
    /// 10% scout base, 80% pool shared by scout and involved, 10% corporation.
    ScoutPoolCorp,
    /// No scout, three or more involved: 90% shared, 10% corporation.
    GroupNinetyCorpTen,
    /// Everything to the corporation.
    CorporationOnly,
    /// Rebalancing fallback with a scout: 25% scout, 75% corporation.
    ScoutFallback,
    /// Count-based split with the 10% corporation cut applied.
    CountWithCorpCut,
    /// Count-based split with no corporation cut.
    CountWithoutCorpCut,
}

impl SplitRule {
    /// Returns the human-readable rule description.
    pub fn description(&self) -> &'static str {
        match self {
            SplitRule::EvenSplit => "Even Split",
            SplitRule::ScoutNinetyCorpTen => "90% to Scout, 10% to Corp",
            SplitRule::ScoutPoolCorp => "10% to Scout, 80% to involved + scout, 10% to Corp",
            SplitRule::GroupNinetyCorpTen => "90% split to involved, 10% to Corp",
            SplitRule::CorporationOnly => "100% to the Corp",
            SplitRule::ScoutFallback => "25% to the Scout, 75% to the Corp",
            SplitRule::CountWithCorpCut => "10% to Corp, remainder split among pilots",
            SplitRule::CountWithoutCorpCut => "No Corp cut, split among pilots",
        }
    }
}

/// A single payout to one participant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// The participant's display label.
    pub label: String,
    /// The participant's role.
    pub role: Role,
    /// The amount paid.
    pub amount: Isk,
}

impl Payout {
    /// Creates a payout line.
    pub fn new(label: impl Into<String>, role: Role, amount: Isk) -> Self {
        Self {
            label: label.into(),
            role,
            amount,
        }
    }
}

/// A single step in the audit trace recording a calculation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The identifier of the rule that was evaluated.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

/// A warning generated during calculation.
///
/// Warnings flag results that are well-defined but deserve attention,
/// such as a count-based split paying out more than the appraisal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditWarning {
    /// A code identifying the type of warning.
    pub code: String,
    /// A human-readable description of the warning.
    pub message: String,
    /// The severity level (e.g., "low", "medium", "high").
    pub severity: String,
}

/// The audit trace for one split.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AuditTrace {
    /// The sequence of calculation steps.
    pub steps: Vec<AuditStep>,
    /// Any warnings generated during calculation.
    pub warnings: Vec<AuditWarning>,
}

impl AuditTrace {
    /// Appends a step, numbering it after the existing ones.
    pub fn record(
        &mut self,
        rule_id: &str,
        rule_name: &str,
        input: serde_json::Value,
        output: serde_json::Value,
        reasoning: String,
    ) {
        let step_number = self.steps.len() as u32 + 1;
        self.steps.push(AuditStep {
            step_number,
            rule_id: rule_id.to_string(),
            rule_name: rule_name.to_string(),
            input,
            output,
            reasoning,
        });
    }

    /// Appends a warning.
    pub fn warn(&mut self, code: &str, message: String, severity: &str) {
        self.warnings.push(AuditWarning {
            code: code.to_string(),
            message,
            severity: severity.to_string(),
        });
    }
}

/// The result of one split computation.
///
/// A result with no rule is a sentinel: either the empty no-op result for
/// role-based input with a non-positive value, or the count-based invalid
/// result whose description explains the problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitResult {
    /// The appraisal value that was split.
    pub total_value: Isk,
    /// Participant payouts in iteration order.
    pub payouts: Vec<Payout>,
    /// The share retained by the corporation.
    pub corporation_share: Isk,
    /// The rule that produced the payouts, `None` for sentinels.
    pub rule: Option<SplitRule>,
    /// The rule description, or the reason for a sentinel.
    pub description: String,
    /// True when the minimum-share pass replaced the original distribution.
    pub rebalanced: bool,
    /// Decisions taken while computing the split.
    pub audit_trace: AuditTrace,
}

impl SplitResult {
    /// The role-based no-op result.
    pub fn empty(total_value: Isk) -> Self {
        Self {
            total_value,
            payouts: Vec::new(),
            corporation_share: 0,
            rule: None,
            description: String::new(),
            rebalanced: false,
            audit_trace: AuditTrace::default(),
        }
    }

    /// The count-based invalid-input result.
    pub fn invalid(total_value: Isk) -> Self {
        Self {
            description: INVALID_DATA_DESCRIPTION.to_string(),
            ..Self::empty(total_value)
        }
    }

    /// Returns true if no rule fired.
    pub fn is_sentinel(&self) -> bool {
        self.rule.is_none()
    }

    /// Sum of all participant payouts, excluding the corporation.
    pub fn participant_total(&self) -> Isk {
        self.payouts.iter().map(|p| p.amount).sum()
    }

    /// Sum of participant payouts and the corporation share.
    pub fn distributed_total(&self) -> Isk {
        self.participant_total() + self.corporation_share
    }

    /// The smallest participant payout, if any participant was paid.
    pub fn min_participant_payout(&self) -> Option<Isk> {
        self.payouts.iter().map(|p| p.amount).min()
    }

    /// Looks up the payout for a label.
    pub fn payout_for(&self, label: &str) -> Option<Isk> {
        self.payouts
            .iter()
            .find(|p| p.label == label)
            .map(|p| p.amount)
    }
}
