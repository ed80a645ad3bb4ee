//! Split configuration models.
//!
//! Two configuration shapes exist: a role-based one with an optional scout and
//! named involved pilots, and a count-based one with anonymous pilot and
//! scanner counts.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{LootError, LootResult};

use super::{CORPORATION_LABEL, Participant, Role};

/// A role-based split: zero or one scout plus any number of involved pilots.
///
/// # Example
///
/// ```
/// use loot_split::models::RoleBasedConfig;
///
/// let config = RoleBasedConfig::new(Some("Kira".to_string()), vec!["Ansel".to_string()]);
/// assert_eq!(config.head_count(), 2);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleBasedConfig {
    /// The scout, if one took part.
    #[serde(default)]
    pub scout: Option<String>,
    /// The involved pilots in assignment order.
    #[serde(default)]
    pub involved: Vec<String>,
}

impl RoleBasedConfig {
    /// Creates a configuration from names.
    pub fn new(scout: Option<String>, involved: Vec<String>) -> Self {
        Self { scout, involved }
    }

    /// Creates a configuration with generated labels ("Scout", "Involved 1", ...).
    pub fn anonymous(scout_present: bool, involved_count: usize) -> Self {
        let scout = scout_present.then(|| Role::Scout.label().to_string());
        let involved = (1..=involved_count)
            .map(|i| format!("{} {}", Role::Involved.label(), i))
            .collect();
        Self { scout, involved }
    }

    /// Returns true if a scout is assigned.
    pub fn has_scout(&self) -> bool {
        self.scout.is_some()
    }

    /// Returns the number of involved pilots, excluding the scout.
    pub fn involved_count(&self) -> usize {
        self.involved.len()
    }

    /// Returns the scout plus involved head count.
    pub fn head_count(&self) -> usize {
        self.involved.len() + usize::from(self.has_scout())
    }

    /// Returns every participant, scout first.
    pub fn participants(&self) -> Vec<Participant> {
        self.scout
            .iter()
            .map(|name| Participant::new(name.clone(), Role::Scout))
            .chain(
                self.involved
                    .iter()
                    .map(|name| Participant::new(name.clone(), Role::Involved)),
            )
            .collect()
    }

    /// Checks that names are non-blank, unique, and that nobody holds two roles.
    ///
    /// The corporation's label is reserved in any letter case, since
    /// payouts and the corporation share are reported side by side.
    pub fn validate(&self) -> LootResult<()> {
        let mut seen = HashSet::new();

        for participant in self.participants() {
            let trimmed = participant.name.trim();
            if trimmed.is_empty() {
                return Err(LootError::InvalidParticipant {
                    name: participant.name,
                    message: "display name must not be blank".to_string(),
                });
            }
            if trimmed.eq_ignore_ascii_case(CORPORATION_LABEL) {
                return Err(LootError::InvalidParticipant {
                    name: participant.name,
                    message: "name is reserved for the corporation share".to_string(),
                });
            }
            if !seen.insert(trimmed.to_string()) {
                let message = if self.scout.as_deref().map(str::trim) == Some(trimmed) {
                    "already assigned as scout"
                } else {
                    "listed more than once"
                };
                return Err(LootError::InvalidParticipant {
                    name: participant.name,
                    message: message.to_string(),
                });
            }
        }

        Ok(())
    }
}

/// The participant composition for one computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SplitConfiguration {
    /// Optional scout plus named involved pilots.
    RoleBased(RoleBasedConfig),
    /// Anonymous pilot and scanner counts.
    CountBased {
        /// Number of pilots.
        pilots: u32,
        /// Number of scanners.
        scanners: u32,
    },
}

impl SplitConfiguration {
    /// Validates the configuration. Count-based configurations carry no names
    /// and always pass; zero counts are handled by the calculator's sentinel.
    pub fn validate(&self) -> LootResult<()> {
        match self {
            SplitConfiguration::RoleBased(config) => config.validate(),
            SplitConfiguration::CountBased { .. } => Ok(()),
        }
    }

    /// A short summary suitable for logs and saved records.
    pub fn summary(&self) -> String {
        match self {
            SplitConfiguration::RoleBased(config) => format!(
                "{} + {} involved",
                if config.has_scout() { "scout" } else { "no scout" },
                config.involved_count()
            ),
            SplitConfiguration::CountBased { pilots, scanners } => {
                format!("{} pilots, {} scanners", pilots, scanners)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_anonymous_generates_labels() {
        let config = RoleBasedConfig::anonymous(true, 2);
        assert_eq!(config.scout.as_deref(), Some("Scout"));
        assert_eq!(config.involved, names(&["Involved 1", "Involved 2"]));
        assert_eq!(config.head_count(), 3);
    }

    #[test]
    fn test_anonymous_without_scout() {
        let config = RoleBasedConfig::anonymous(false, 0);
        assert!(!config.has_scout());
        assert_eq!(config.head_count(), 0);
    }

    #[test]
    fn test_participants_lists_scout_first() {
        let config = RoleBasedConfig::new(Some("Kira".to_string()), names(&["Ansel", "Moss"]));
        let participants = config.participants();
        assert_eq!(participants.len(), 3);
        assert_eq!(participants[0], Participant::new("Kira", Role::Scout));
        assert_eq!(participants[2], Participant::new("Moss", Role::Involved));
    }

    #[test]
    fn test_scout_cannot_also_be_involved() {
        let config = RoleBasedConfig::new(Some("Kira".to_string()), names(&["Ansel", "Kira"]));
        match config.validate().unwrap_err() {
            LootError::InvalidParticipant { name, message } => {
                assert_eq!(name, "Kira");
                assert_eq!(message, "already assigned as scout");
            }
            other => panic!("Expected InvalidParticipant, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_involved_rejected() {
        let config = RoleBasedConfig::new(None, names(&["Ansel", "Ansel"]));
        match config.validate().unwrap_err() {
            LootError::InvalidParticipant { message, .. } => {
                assert_eq!(message, "listed more than once");
            }
            other => panic!("Expected InvalidParticipant, got {:?}", other),
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        let config = RoleBasedConfig::new(None, names(&["  "]));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_corporation_label_reserved() {
        let as_scout = RoleBasedConfig::new(Some("Corporation".to_string()), names(&["A", "B"]));
        match as_scout.validate().unwrap_err() {
            LootError::InvalidParticipant { name, message } => {
                assert_eq!(name, "Corporation");
                assert!(message.contains("reserved"));
            }
            other => panic!("Expected InvalidParticipant, got {:?}", other),
        }

        let as_involved = RoleBasedConfig::new(None, names(&["Ansel", " CORPORATION "]));
        assert!(as_involved.validate().is_err());
    }

    #[test]
    fn test_count_based_always_validates() {
        let config = SplitConfiguration::CountBased {
            pilots: 0,
            scanners: 0,
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_configuration_serializes_with_mode_tag() {
        let config = SplitConfiguration::CountBased {
            pilots: 8,
            scanners: 1,
        };
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["mode"], "count_based");
        assert_eq!(json["pilots"], 8);
    }

    #[test]
    fn test_summary() {
        let role = SplitConfiguration::RoleBased(RoleBasedConfig::anonymous(true, 2));
        assert_eq!(role.summary(), "scout + 2 involved");
        let count = SplitConfiguration::CountBased {
            pilots: 3,
            scanners: 1,
        };
        assert_eq!(count.summary(), "3 pilots, 1 scanners");
    }
}
