//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AccountRepository` - durable account storage (uniqueness authoritative)
//! - `SessionIssuer` / `SessionValidator` - self-issued signed tokens
//! - `IdentityProvider` - federated identity assertion verification
//! - `PaymentGateway` - order creation and charged-amount lookup

mod account_repository;
mod identity_provider;
mod payment_gateway;
mod session;

pub use account_repository::AccountRepository;
pub use identity_provider::{FederatedIdentity, IdentityProvider};
pub use payment_gateway::{GatewayError, GatewayOrder, PaymentGateway};
pub use session::{SessionIssuer, SessionValidator};
