//! Payment endpoints: order creation and subscription completion.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use routes::payment_routes;
