//! Request types for the loot split API.
//!
//! This module defines the JSON request structures for the calculation,
//! saved split, roster, and trust list endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{
    EntityKind, Isk, RoleBasedConfig, SplitConfiguration, TrustEntry, TrustIdentifier,
    TrustStatus, isk_string,
};

/// Request body for `POST /split/role`.
///
/// `total_value` accepts a JSON number or a numeric string and must be a
/// whole amount of ISK.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleSplitRequest {
    /// The appraised loot value.
    #[serde(deserialize_with = "isk_string::deserialize")]
    pub total_value: Isk,
    /// The scout, if one took part.
    #[serde(default)]
    pub scout: Option<String>,
    /// The involved pilots.
    #[serde(default)]
    pub involved: Vec<String>,
}

impl From<RoleSplitRequest> for RoleBasedConfig {
    fn from(req: RoleSplitRequest) -> Self {
        RoleBasedConfig::new(req.scout, req.involved)
    }
}

/// Request body for `POST /split/count`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountSplitRequest {
    /// The appraised loot value.
    #[serde(deserialize_with = "isk_string::deserialize")]
    pub total_value: Isk,
    /// Number of pilots who did not scan.
    pub pilot_count: u32,
    /// Number of scanners.
    pub scanner_count: u32,
}

impl From<&CountSplitRequest> for SplitConfiguration {
    fn from(req: &CountSplitRequest) -> Self {
        SplitConfiguration::CountBased {
            pilots: req.pilot_count,
            scanners: req.scanner_count,
        }
    }
}

/// Request body for `PATCH /splits/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattleReportRequest {
    /// The new battle report reference.
    pub battle_report: String,
}

/// Request body for `POST /pilots`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PilotRequest {
    /// The pilot display name.
    pub name: String,
}

/// Request body for `POST /trust`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustRequest {
    /// Which list to add to.
    pub status: TrustStatus,
    /// Character or corporation.
    pub kind: EntityKind,
    /// Numeric id or name.
    pub identifier: TrustIdentifier,
    /// Display name. Defaults to the identifier.
    #[serde(default)]
    pub name: Option<String>,
    /// Optional comment.
    #[serde(default)]
    pub comment: Option<String>,
    /// Who is adding the record.
    #[serde(default)]
    pub added_by: Option<String>,
    /// Couch flag.
    #[serde(default)]
    pub on_couch: bool,
}

impl TrustRequest {
    /// Converts the request into a record stamped with `now`.
    pub fn into_entry(self, now: DateTime<Utc>) -> TrustEntry {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.identifier.to_string());

        TrustEntry {
            identifier: self.identifier,
            name,
            comment: self.comment.filter(|c| !c.trim().is_empty()),
            added_by: self.added_by,
            on_couch: self.on_couch,
            date_added: now,
        }
    }
}

/// Request body for `DELETE /trust`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustRemoveRequest {
    /// Character or corporation.
    pub kind: EntityKind,
    /// Numeric id or name.
    pub identifier: TrustIdentifier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_request_accepts_string_total() {
        let json = r#"{"total_value": "1000000000", "scout": "Kira", "involved": ["Ansel"]}"#;
        let req: RoleSplitRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.total_value, 1_000_000_000);

        let config: RoleBasedConfig = req.into();
        assert_eq!(config.scout.as_deref(), Some("Kira"));
        assert_eq!(config.involved, vec!["Ansel"]);
    }

    #[test]
    fn test_role_request_defaults() {
        let req: RoleSplitRequest = serde_json::from_str(r#"{"total_value": 5}"#).unwrap();
        assert!(req.scout.is_none());
        assert!(req.involved.is_empty());
    }

    #[test]
    fn test_role_request_rejects_fractional_total() {
        let json = r#"{"total_value": 10.5}"#;
        assert!(serde_json::from_str::<RoleSplitRequest>(json).is_err());
    }

    #[test]
    fn test_count_request_into_configuration() {
        let json = r#"{"total_value": 900000000, "pilot_count": 9, "scanner_count": 2}"#;
        let req: CountSplitRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            SplitConfiguration::from(&req),
            SplitConfiguration::CountBased {
                pilots: 9,
                scanners: 2
            }
        );
    }

    #[test]
    fn test_battle_report_request_is_camel_case() {
        let req: BattleReportRequest =
            serde_json::from_str(r#"{"battleReport": "br-1"}"#).unwrap();
        assert_eq!(req.battle_report, "br-1");
    }

    #[test]
    fn test_trust_request_name_defaults_to_identifier() {
        let json = r#"{"status": "untrusted", "kind": "corporation", "identifier": 98000001}"#;
        let req: TrustRequest = serde_json::from_str(json).unwrap();
        let entry = req.into_entry(Utc::now());

        assert_eq!(entry.name, "98000001");
        assert_eq!(entry.identifier, TrustIdentifier::Id(98000001));
        assert!(entry.comment.is_none());
    }
}
