//! Axum router for the authentication endpoints.

use axum::{routing::post, Router};

use super::super::AppState;
use super::handlers::{google_sign_in, login, signup};

/// Authentication routes.
///
/// - `POST /signup`
/// - `POST /login`
/// - `POST /google-signin`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup))
        .route("/login", post(login))
        .route("/google-signin", post(google_sign_in))
}
