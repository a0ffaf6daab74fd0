//! HTTP adapters - REST API implementations.
//!
//! Each domain module has its own HTTP adapter (dto/handlers/routes);
//! `AppState` wires the application handlers to the port implementations
//! and `api_router` assembles the full surface.

pub mod admin;
pub mod auth;
pub mod envelope;
pub mod health;
pub mod middleware;
pub mod payments;

pub use envelope::{ApiEnvelope, ApiError};

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use secrecy::SecretString;
use sqlx::PgPool;

use crate::application::handlers::admin::{
    ListAccountsHandler, ToggleEntitlementHandler, UpdateEntitlementHandler,
};
use crate::application::handlers::auth::{GoogleSignInHandler, LoginHandler, SignupHandler};
use crate::application::handlers::billing::{CompleteSubscriptionHandler, CreateOrderHandler};
use crate::domain::billing::BillingPlan;
use crate::ports::{
    AccountRepository, IdentityProvider, PaymentGateway, SessionIssuer, SessionValidator,
};

/// Shared application state containing all dependencies.
///
/// Cloned per request; every dependency is Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub repository: Arc<dyn AccountRepository>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub session_issuer: Arc<dyn SessionIssuer>,
    pub session_validator: Arc<dyn SessionValidator>,
    pub gateway: Arc<dyn PaymentGateway>,

    /// Server-side pepper for credential digests.
    pub pepper: SecretString,

    /// Plan used when create-order names no recognizable plan.
    pub default_plan: BillingPlan,

    /// Public gateway key id, returned to checkout frontends.
    pub razorpay_key_id: String,

    /// Connection pool for readiness checks; `None` in handler tests.
    pub pool: Option<PgPool>,
}

impl AppState {
    /// Create handlers on demand from the shared state.
    pub fn signup_handler(&self) -> SignupHandler {
        SignupHandler::new(
            self.repository.clone(),
            self.session_issuer.clone(),
            self.pepper.clone(),
        )
    }

    pub fn login_handler(&self) -> LoginHandler {
        LoginHandler::new(
            self.repository.clone(),
            self.session_issuer.clone(),
            self.pepper.clone(),
        )
    }

    pub fn google_sign_in_handler(&self) -> GoogleSignInHandler {
        GoogleSignInHandler::new(
            self.repository.clone(),
            self.identity_provider.clone(),
            self.session_issuer.clone(),
        )
    }

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.gateway.clone(), self.default_plan)
    }

    pub fn complete_subscription_handler(&self) -> CompleteSubscriptionHandler {
        CompleteSubscriptionHandler::new(self.repository.clone(), self.gateway.clone())
    }

    pub fn update_entitlement_handler(&self) -> UpdateEntitlementHandler {
        UpdateEntitlementHandler::new(self.repository.clone())
    }

    pub fn toggle_entitlement_handler(&self) -> ToggleEntitlementHandler {
        ToggleEntitlementHandler::new(self.repository.clone())
    }

    pub fn list_accounts_handler(&self) -> ListAccountsHandler {
        ListAccountsHandler::new(self.repository.clone())
    }
}

/// Assemble the complete API router.
///
/// # Routes
///
/// ## Authentication (open)
/// - `POST /signup` - Register a password-based account
/// - `POST /login` - Authenticate with email and password
/// - `POST /google-signin` - Sign in with a federated ID token
///
/// ## Payments (bearer token validated when present)
/// - `POST /payments/create-order` - Create a payment order for a plan
/// - `POST /payments/complete-subscription` - Complete a purchase (requires auth)
///
/// ## Administration (requires operator token)
/// - `GET /admin/accounts` - List all accounts
/// - `PUT /admin/accounts/:id/entitlement` - Set an account's entitlement
/// - `POST /admin/accounts/:id/entitlement/toggle` - Toggle an entitlement
///
/// ## Operations
/// - `GET /health` - Readiness probe
pub fn api_router(state: AppState) -> Router {
    let protected = Router::new()
        .nest("/payments", payments::payment_routes())
        .nest("/admin", admin::admin_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.session_validator.clone(),
            middleware::auth_middleware,
        ));

    Router::new()
        .merge(auth::auth_routes())
        .merge(protected)
        .route("/health", get(health::health_check))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::adapters::auth::{MockIdentityProvider, MockSessionIssuer, MockSessionValidator};
    use crate::adapters::memory::MemoryAccountRepository;
    use crate::adapters::razorpay::MockPaymentGateway;

    /// A fully mocked state for handler tests.
    pub fn mock_state() -> AppState {
        state_with(
            Arc::new(MemoryAccountRepository::new()),
            Arc::new(MockSessionValidator::new()),
        )
    }

    pub fn state_with(
        repository: Arc<MemoryAccountRepository>,
        validator: Arc<MockSessionValidator>,
    ) -> AppState {
        AppState {
            repository,
            identity_provider: Arc::new(MockIdentityProvider::new()),
            session_issuer: Arc::new(MockSessionIssuer::new()),
            session_validator: validator,
            gateway: Arc::new(MockPaymentGateway::new()),
            pepper: SecretString::new("pepper".to_string()),
            default_plan: BillingPlan::Pro,
            razorpay_key_id: "rzp_test_mock".to_string(),
            pool: None,
        }
    }
}
