//! Task assignment authorization
//!
//! Decides who may assign tasks to whom:
//! - Static role -> capability table
//! - Single-assignment predicate with optional project roster
//! - Assignee picker filtering
//! - Restriction messages and batch validation for multi-assignee forms

mod evaluator;
mod messages;
mod role;
mod validation;

pub use evaluator::{assignable_members, can_assign, AssignmentPolicy, DefaultAssignmentPolicy};
pub use messages::{restriction_message, RejectionReason};
pub use role::{AssignmentScope, Capabilities, Role, PERMISSION_TABLE};
pub use validation::{validate_batch, validate_batch_with, BatchValidation};

pub mod text {
    pub use super::messages::{
        ADMIN_PROJECT_TEAM, ASSIGNMENT_UNAVAILABLE, MEMBER_SELF_ONLY, NOT_ON_PROJECT_TEAM,
        OWNER_ORGANIZATION, VIEWER_SELF_ONLY,
    };
}

use crate::errors::AppError;

pub const MISSING_TEAM_ENV: &str = "ASSIGNMENT_MISSING_TEAM";

/// What a project-scoped actor gets when no team roster was supplied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MissingTeamPolicy {
    /// Roster not enforced (matches the web client)
    #[default]
    Allow,
    /// Refuse assignments to others until a roster is supplied
    Deny,
}

impl MissingTeamPolicy {
    pub fn parse(value: &str) -> Result<Self, AppError> {
        match value.trim().to_lowercase().as_str() {
            "allow" => Ok(MissingTeamPolicy::Allow),
            "deny" => Ok(MissingTeamPolicy::Deny),
            other => Err(AppError::configuration(format!(
                "{MISSING_TEAM_ENV} must be 'allow' or 'deny', got '{other}'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentConfig {
    pub missing_team: MissingTeamPolicy,
}

impl AssignmentConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let missing_team = std::env::var(MISSING_TEAM_ENV)
            .map(|val| MissingTeamPolicy::parse(&val))
            .unwrap_or(Ok(MissingTeamPolicy::Allow))?;

        Ok(Self { missing_team })
    }
}
