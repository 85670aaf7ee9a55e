use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Organization role of the acting user.
///
/// Ordered `Viewer < Member < Admin < Owner`. The ordering only backs
/// minimum-role checks; assignment decisions go through [`Capabilities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Role {
    Viewer,
    Member,
    Admin,
    Owner,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Viewer, Role::Member, Role::Admin, Role::Owner];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Viewer => "viewer",
            Role::Member => "member",
            Role::Admin => "admin",
            Role::Owner => "owner",
        }
    }

    /// Strict, case-insensitive parse. Returns `None` for anything unrecognized.
    pub fn parse(value: &str) -> Option<Role> {
        match value.trim().to_lowercase().as_str() {
            "viewer" => Some(Role::Viewer),
            "member" => Some(Role::Member),
            "admin" => Some(Role::Admin),
            "owner" => Some(Role::Owner),
            _ => None,
        }
    }

    /// Lenient parse for role strings coming from the API or UI.
    /// Absent and unknown values fall back to `Member`.
    pub fn normalize(value: Option<&str>) -> Role {
        value.and_then(Role::parse).unwrap_or_default()
    }

    pub fn capabilities(&self) -> Capabilities {
        match self {
            Role::Viewer => PERMISSION_TABLE[0],
            Role::Member => PERMISSION_TABLE[1],
            Role::Admin => PERMISSION_TABLE[2],
            Role::Owner => PERMISSION_TABLE[3],
        }
    }

    pub fn at_least(&self, minimum: Role) -> bool {
        *self >= minimum
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Member
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Role {
    fn from(value: &str) -> Self {
        Role::normalize(Some(value))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Non-string values (numbers, objects, null) decode as `Member`.
        let raw = Value::deserialize(deserializer)?;
        Ok(Role::normalize(raw.as_str()))
    }
}

/// Breadth of users a role may assign tasks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentScope {
    #[serde(rename = "self")]
    SelfOnly,
    Project,
    Organization,
}

impl AssignmentScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssignmentScope::SelfOnly => "self",
            AssignmentScope::Project => "project",
            AssignmentScope::Organization => "organization",
        }
    }
}

/// Assignment capabilities granted by a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Capabilities {
    pub role: Role,
    pub can_assign_to_self: bool,
    pub can_assign_to_others: bool,
    pub assignment_scope: AssignmentScope,
}

/// Indexed in `Role` order.
pub const PERMISSION_TABLE: [Capabilities; 4] = [
    Capabilities {
        role: Role::Viewer,
        can_assign_to_self: true,
        can_assign_to_others: false,
        assignment_scope: AssignmentScope::SelfOnly,
    },
    Capabilities {
        role: Role::Member,
        can_assign_to_self: true,
        can_assign_to_others: false,
        assignment_scope: AssignmentScope::SelfOnly,
    },
    Capabilities {
        role: Role::Admin,
        can_assign_to_self: true,
        can_assign_to_others: true,
        assignment_scope: AssignmentScope::Project,
    },
    Capabilities {
        role: Role::Owner,
        can_assign_to_self: true,
        can_assign_to_others: true,
        assignment_scope: AssignmentScope::Organization,
    },
];
