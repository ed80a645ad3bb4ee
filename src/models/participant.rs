//! Participant models.

use serde::{Deserialize, Serialize};

/// An amount of ISK. The currency has no fractional unit.
pub type Isk = i64;

/// The role a participant plays in a single split.
///
/// A participant holds exactly one role per computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// The designated lead of a role-based split.
    Scout,
    /// A named participant in a role-based split who is not the scout.
    Involved,
    /// A count-based participant who earns the scanner bonus.
    Scanner,
    /// A count-based participant paid the base share.
    Pilot,
}

impl Role {
    /// Returns the display label used when a participant has no name.
    pub fn label(&self) -> &'static str {
        match self {
            Role::Scout => "Scout",
            Role::Involved => "Involved",
            Role::Scanner => "Scanner",
            Role::Pilot => "Pilot",
        }
    }
}

/// A participant identified by display name and role.
///
/// # Example
///
/// ```
/// use loot_split::models::{Participant, Role};
///
/// let scout = Participant::new("Kira Vale", Role::Scout);
/// assert!(scout.is_scout());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Participant {
    /// The display name.
    pub name: String,
    /// The role held in this split.
    pub role: Role,
}

impl Participant {
    /// Creates a participant.
    pub fn new(name: impl Into<String>, role: Role) -> Self {
        Self {
            name: name.into(),
            role,
        }
    }

    /// Returns true if this participant is the scout.
    pub fn is_scout(&self) -> bool {
        self.role == Role::Scout
    }
}
