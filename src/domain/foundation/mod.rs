//! Foundation module - Shared domain primitives.
//!
//! Value objects, identifiers, and error types that form the vocabulary
//! of the tiergate domain.

mod auth;
mod errors;
mod ids;
mod timestamp;

pub use auth::{AuthError, Principal};
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::AccountId;
pub use timestamp::Timestamp;
