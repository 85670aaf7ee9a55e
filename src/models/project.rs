use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Roster entry of a project team. Only the id matters for authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: String,
}

/// Set of member ids that belong to a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<TeamMember>", into = "Vec<TeamMember>")]
pub struct ProjectTeam {
    ids: HashSet<String>,
}

impl ProjectTeam {
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: ids.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl From<Vec<TeamMember>> for ProjectTeam {
    fn from(members: Vec<TeamMember>) -> Self {
        Self::from_ids(members.into_iter().map(|m| m.id))
    }
}

impl From<ProjectTeam> for Vec<TeamMember> {
    fn from(team: ProjectTeam) -> Self {
        let mut ids: Vec<String> = team.ids.into_iter().collect();
        ids.sort();
        ids.into_iter().map(|id| TeamMember { id }).collect()
    }
}

/// Optional project scoping supplied by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_team: Option<ProjectTeam>,
}

impl ProjectContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_project(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_team(mut self, team: ProjectTeam) -> Self {
        self.project_team = Some(team);
        self
    }

    pub fn team(&self) -> Option<&ProjectTeam> {
        self.project_team.as_ref()
    }
}
