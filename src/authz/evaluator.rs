use crate::models::{Member, ProjectContext, ProjectTeam};

use super::messages::RejectionReason;
use super::role::{AssignmentScope, Role};
use super::{AssignmentConfig, MissingTeamPolicy};

/// Policy evaluator trait for pluggable assignment rules
pub trait AssignmentPolicy: Send + Sync {
    /// Reason the actor may not assign `target_id`, or `None` when allowed
    fn rejection(
        &self,
        role: Role,
        actor_id: &str,
        target_id: &str,
        ctx: Option<&ProjectContext>,
    ) -> Option<RejectionReason>;

    fn can_assign(
        &self,
        role: Role,
        actor_id: &str,
        target_id: &str,
        ctx: Option<&ProjectContext>,
    ) -> bool {
        self.rejection(role, actor_id, target_id, ctx).is_none()
    }

    /// Members the actor may pick as assignees, in input order.
    ///
    /// Capability check first, then the project roster when one is supplied.
    /// Organization-scoped actors skip the roster.
    fn assignable_members<'a>(
        &self,
        members: &'a [Member],
        role: Role,
        actor_id: &str,
        ctx: Option<&ProjectContext>,
    ) -> Vec<&'a Member> {
        let roster: Option<&ProjectTeam> = match role.capabilities().assignment_scope {
            AssignmentScope::Organization => None,
            AssignmentScope::SelfOnly | AssignmentScope::Project => {
                ctx.and_then(ProjectContext::team)
            }
        };

        members
            .iter()
            .filter(|m| self.can_assign(role, actor_id, &m.id, ctx))
            .filter(|m| roster.map_or(true, |team| team.contains(&m.id)))
            .collect()
    }
}

/// Default evaluator backed by the static permission table
///
/// Evaluation order:
/// 1. self-assignment -> `can_assign_to_self`
/// 2. role cannot assign others -> deny
/// 3. scope: self -> deny, organization -> allow,
///    project -> roster membership (missing roster per `MissingTeamPolicy`)
#[derive(Debug, Clone, Default)]
pub struct DefaultAssignmentPolicy {
    config: AssignmentConfig,
}

impl DefaultAssignmentPolicy {
    pub fn new(config: AssignmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssignmentConfig {
        &self.config
    }
}

impl AssignmentPolicy for DefaultAssignmentPolicy {
    fn rejection(
        &self,
        role: Role,
        actor_id: &str,
        target_id: &str,
        ctx: Option<&ProjectContext>,
    ) -> Option<RejectionReason> {
        let caps = role.capabilities();

        // 1. Self-assignment
        if actor_id == target_id {
            if caps.can_assign_to_self {
                return None;
            }
            tracing::debug!(role = %role, actor_id, "self-assignment denied");
            return Some(RejectionReason::Unavailable);
        }

        // 2. Assigning others at all
        if !caps.can_assign_to_others {
            tracing::debug!(role = %role, actor_id, target_id, "role cannot assign others");
            return Some(RejectionReason::OthersForbidden);
        }

        // 3. Scope
        let decision = match (caps.assignment_scope, ctx.and_then(ProjectContext::team)) {
            (AssignmentScope::SelfOnly, _) => Some(RejectionReason::OthersForbidden),
            (AssignmentScope::Project, Some(team)) => {
                (!team.contains(target_id)).then_some(RejectionReason::NotOnProjectTeam)
            }
            (AssignmentScope::Project, None) => match self.config.missing_team {
                MissingTeamPolicy::Allow => None,
                MissingTeamPolicy::Deny => Some(RejectionReason::NotOnProjectTeam),
            },
            (AssignmentScope::Organization, _) => None,
        };

        tracing::debug!(
            role = %role,
            scope = caps.assignment_scope.as_str(),
            actor_id,
            target_id,
            allowed = decision.is_none(),
            "assignment evaluated"
        );
        decision
    }
}

/// Whether `role` acting as `actor_id` may assign a task to `target_id`.
pub fn can_assign(
    role: Role,
    actor_id: &str,
    target_id: &str,
    ctx: Option<&ProjectContext>,
) -> bool {
    DefaultAssignmentPolicy::default().can_assign(role, actor_id, target_id, ctx)
}

pub fn assignable_members<'a>(
    members: &'a [Member],
    role: Role,
    actor_id: &str,
    ctx: Option<&ProjectContext>,
) -> Vec<&'a Member> {
    DefaultAssignmentPolicy::default().assignable_members(members, role, actor_id, ctx)
}
