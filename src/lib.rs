//! Tiergate - Paid-tier access backend for the model catalog.
//!
//! This crate implements authentication (self-issued session tokens plus
//! federated sign-in) and the subscription-entitlement state machine that
//! converts a verified payment into a plan upgrade.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
