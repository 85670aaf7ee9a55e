pub mod member;
pub mod project;

pub use member::Member;
pub use project::{ProjectContext, ProjectTeam, TeamMember};
