use serde::Serialize;

use super::role::{AssignmentScope, Role};

pub const VIEWER_SELF_ONLY: &str = "Viewers can only assign tasks to themselves";
pub const MEMBER_SELF_ONLY: &str = "Members can only assign tasks to themselves";
pub const ADMIN_PROJECT_TEAM: &str = "Admins can assign tasks to project team members";
pub const OWNER_ORGANIZATION: &str = "Owners can assign tasks to any organization member";
pub const NOT_ON_PROJECT_TEAM: &str = "Selected user is not a member of this project team";
pub const ASSIGNMENT_UNAVAILABLE: &str = "Task assignment not available for your role";

/// Display text describing what a role may assign. Never branch on it.
pub fn restriction_message(role: Role) -> &'static str {
    match (role.capabilities().assignment_scope, role) {
        (AssignmentScope::SelfOnly, Role::Viewer) => VIEWER_SELF_ONLY,
        (AssignmentScope::SelfOnly, Role::Member) => MEMBER_SELF_ONLY,
        (AssignmentScope::Project, _) => ADMIN_PROJECT_TEAM,
        (AssignmentScope::Organization, _) => OWNER_ORGANIZATION,
        _ => ASSIGNMENT_UNAVAILABLE,
    }
}

/// Why a single assignment was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectionReason {
    /// The role cannot assign work to anyone but the actor.
    OthersForbidden,
    /// Project-scoped actor and the target is not on the team roster.
    NotOnProjectTeam,
    /// The role cannot assign at all.
    Unavailable,
}

impl RejectionReason {
    pub fn message(&self, role: Role) -> &'static str {
        match self {
            RejectionReason::OthersForbidden => restriction_message(role),
            RejectionReason::NotOnProjectTeam => NOT_ON_PROJECT_TEAM,
            RejectionReason::Unavailable => ASSIGNMENT_UNAVAILABLE,
        }
    }
}
