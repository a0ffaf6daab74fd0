//! Administrative entitlement-override endpoints.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::admin_routes;
