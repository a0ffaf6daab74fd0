//! Authentication adapters.
//!
//! - `JwtSessionService` - self-issued HS256 session tokens
//! - `GoogleIdentityVerifier` - federated ID-token verification via JWKS
//! - Mock implementations for testing

mod google;
mod jwt;
mod mock;

pub use google::{GoogleConfig, GoogleIdentityVerifier};
pub use jwt::{JwtConfig, JwtSessionService};
pub use mock::{MockIdentityProvider, MockSessionIssuer, MockSessionValidator};
