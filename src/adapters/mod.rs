//! Adapters - Implementations of ports for external systems.
//!
//! Following hexagonal architecture, adapters translate between the
//! domain and external systems:
//!
//! - `auth` - session token signing/validation and federated identity
//! - `razorpay` - payment gateway client
//! - `postgres` - database persistence
//! - `memory` - in-memory stand-ins for tests
//! - `http` - axum routers, handlers, and DTOs

pub mod auth;
pub mod http;
pub mod memory;
pub mod postgres;
pub mod razorpay;
