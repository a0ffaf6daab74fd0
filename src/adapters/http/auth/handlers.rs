//! HTTP handlers for the authentication endpoints.

use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::auth::{GoogleSignInCommand, LoginCommand, SignupCommand};

use super::super::envelope::{ApiEnvelope, ApiError};
use super::super::AppState;
use super::dto::{
    AccountResponse, GoogleSignInRequest, LoginRequest, SessionData, SignupRequest,
};

/// POST /signup - Register a password-based account.
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.signup_handler();
    let result = handler
        .handle(SignupCommand {
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            mobile_number: request.mobile_number,
            password: request.password,
        })
        .await?;

    let data = SessionData {
        token: result.token,
        account: AccountResponse::from(&result.account),
    };

    Ok((
        StatusCode::CREATED,
        Json(ApiEnvelope::ok("Account registered successfully", data)),
    ))
}

/// POST /login - Authenticate with email and password.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse + std::fmt::Debug, ApiError> {
    let handler = state.login_handler();
    let result = handler
        .handle(LoginCommand {
            email: request.email,
            password: request.password,
        })
        .await?;

    let data = SessionData {
        token: result.token,
        account: AccountResponse::from(&result.account),
    };

    Ok(Json(ApiEnvelope::ok("Login successful", data)))
}

/// POST /google-signin - Sign in with a federated ID token.
///
/// Creates the account on first sign-in; links the federated subject to
/// an existing account with the same email otherwise.
pub async fn google_sign_in(
    State(state): State<AppState>,
    Json(request): Json<GoogleSignInRequest>,
) -> Result<impl IntoResponse + std::fmt::Debug, ApiError> {
    let handler = state.google_sign_in_handler();
    let result = handler
        .handle(GoogleSignInCommand {
            id_token: request.id_token,
        })
        .await?;

    let status = if result.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    let data = SessionData {
        token: result.token,
        account: AccountResponse::from(&result.account),
    };

    Ok((status, Json(ApiEnvelope::ok("Signed in with Google", data))))
}
