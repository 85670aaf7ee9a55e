pub mod authz;
pub mod errors;
pub mod models;
pub mod utils;

pub use authz::{assignable_members, can_assign, restriction_message, validate_batch, Role};
pub use errors::{AppError, AppResult};
