//! Axum router for the administrative endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::super::AppState;
use super::handlers::{list_accounts, toggle_entitlement, update_entitlement};

/// Administrative routes, mounted under `/admin`.
///
/// - `GET /accounts`
/// - `PUT /accounts/:id/entitlement`
/// - `POST /accounts/:id/entitlement/toggle`
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts))
        .route("/accounts/:id/entitlement", put(update_entitlement))
        .route("/accounts/:id/entitlement/toggle", post(toggle_entitlement))
}
