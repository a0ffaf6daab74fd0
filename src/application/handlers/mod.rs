//! Command handlers, one file per operation.

pub mod admin;
pub mod auth;
pub mod billing;
