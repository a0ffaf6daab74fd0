//! Authentication endpoints: signup, login, federated sign-in.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{AccountResponse, SessionData};
pub use routes::auth_routes;
