//! Axum router for the payment endpoints.

use axum::{routing::post, Router};

use super::super::AppState;
use super::handlers::{complete_subscription, create_order};

/// Payment routes, mounted under `/payments`.
///
/// - `POST /create-order`
/// - `POST /complete-subscription` (requires auth)
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/create-order", post(create_order))
        .route("/complete-subscription", post(complete_subscription))
}
