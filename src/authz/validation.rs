use serde::Serialize;

use crate::errors::AppError;
use crate::models::ProjectContext;

use super::evaluator::{AssignmentPolicy, DefaultAssignmentPolicy};
use super::role::Role;

/// Outcome of checking a multi-assignee selection before submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchValidation {
    pub valid: bool,
    /// Rejected ids, first occurrence order, no duplicates
    pub invalid_targets: Vec<String>,
    pub first_error_message: Option<String>,
}

impl BatchValidation {
    /// Turn a failed validation into `AppError::Forbidden` carrying the first message.
    pub fn into_result(self) -> Result<(), AppError> {
        match self.first_error_message {
            Some(message) if !self.valid => Err(AppError::forbidden(message)),
            _ => Ok(()),
        }
    }
}

pub fn validate_batch_with<P, S>(
    policy: &P,
    role: Role,
    actor_id: &str,
    target_ids: &[S],
    ctx: Option<&ProjectContext>,
) -> BatchValidation
where
    P: AssignmentPolicy + ?Sized,
    S: AsRef<str>,
{
    let mut invalid_targets: Vec<String> = Vec::new();
    let mut first_error_message = None;

    for target in target_ids.iter().map(|t| t.as_ref()) {
        let Some(reason) = policy.rejection(role, actor_id, target, ctx) else {
            continue;
        };
        if first_error_message.is_none() {
            first_error_message = Some(reason.message(role).to_string());
        }
        if !invalid_targets.iter().any(|t| t == target) {
            invalid_targets.push(target.to_string());
        }
    }

    BatchValidation {
        valid: invalid_targets.is_empty(),
        invalid_targets,
        first_error_message,
    }
}

/// Check every intended assignee with the default policy.
pub fn validate_batch<S: AsRef<str>>(
    role: Role,
    actor_id: &str,
    target_ids: &[S],
    ctx: Option<&ProjectContext>,
) -> BatchValidation {
    validate_batch_with(&DefaultAssignmentPolicy::default(), role, actor_id, target_ids, ctx)
}
