//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles available in the portal's RBAC system.
///
/// Roles are ordered by privilege level:
/// Admin > Manager > Editor > Agent > Citizen. Admin is the bypass tier —
/// it satisfies every permission check unconditionally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "account_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Registered resident. Can file complaints and browse public content.
    Citizen,
    /// Field agent with sector responsibility for complaint handling.
    Agent,
    /// Content editor for news, events, and the establishment directory.
    Editor,
    /// Commune-level manager overseeing editors and agents.
    Manager,
    /// Full system administrator. Bypasses all permission checks.
    Admin,
}

impl Role {
    /// Return the privilege level (higher = more privileged).
    pub fn privilege_level(&self) -> u8 {
        match self {
            Self::Citizen => 1,
            Self::Agent => 2,
            Self::Editor => 3,
            Self::Manager => 4,
            Self::Admin => 5,
        }
    }

    /// Check if this role has at least the given role's privileges.
    pub fn has_at_least(&self, other: &Role) -> bool {
        self.privilege_level() >= other.privilege_level()
    }

    /// Check if this role is the unconditional-bypass tier.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Return the role as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Citizen => "citizen",
            Self::Agent => "agent",
            Self::Editor => "editor",
            Self::Manager => "manager",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = civiport_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "citizen" => Ok(Self::Citizen),
            "agent" => Ok(Self::Agent),
            "editor" => Ok(Self::Editor),
            "manager" => Ok(Self::Manager),
            "admin" => Ok(Self::Admin),
            _ => Err(civiport_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: citizen, agent, editor, manager, admin"
            ))),
        }
    }
}
