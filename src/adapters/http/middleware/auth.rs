//! Authentication middleware and extractors for axum.
//!
//! - `auth_middleware` - validates Bearer tokens and injects the principal
//! - `RequireAuth` - extractor that requires an authenticated principal
//!
//! The middleware uses the `SessionValidator` port, so the HTTP layer
//! never sees token internals. Requests without a token pass through;
//! handlers that need a principal use `RequireAuth` and reject with 401.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::{AuthError, Principal};
use crate::ports::SessionValidator;

use super::super::envelope::{ApiEnvelope, ApiErrorBody};

/// Auth middleware state - wraps the session validator.
pub type AuthState = Arc<dyn SessionValidator>;

/// Validates the `Authorization: Bearer <token>` header when present.
///
/// On a valid token the `Principal` is injected into request extensions.
/// On an invalid token the request is rejected with 401; a provider
/// outage rejects with 503. Requests without a token continue
/// unauthenticated.
pub async fn auth_middleware(
    State(validator): State<AuthState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "));

    match token {
        Some(token) => match validator.validate(token).await {
            Ok(principal) => {
                request.extensions_mut().insert(principal);
                next.run(request).await
            }
            Err(e) => {
                let (status, message) = match &e {
                    AuthError::ProviderUnavailable(msg) => {
                        tracing::error!("Session validator unavailable: {}", msg);
                        (
                            StatusCode::SERVICE_UNAVAILABLE,
                            "Authentication service unavailable",
                        )
                    }
                    _ => (StatusCode::UNAUTHORIZED, "Invalid or expired token"),
                };
                rejection(status, message, "INVALID_TOKEN")
            }
        },
        None => next.run(request).await,
    }
}

/// Extractor that requires an authenticated principal.
#[derive(Debug, Clone)]
pub struct RequireAuth(pub Principal);

impl<S> axum::extract::FromRequestParts<S> for RequireAuth
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            parts
                .extensions
                .get::<Principal>()
                .cloned()
                .map(RequireAuth)
                .ok_or(AuthRejection::Unauthenticated)
        })
    }
}

/// Rejection type for authentication failures.
#[derive(Debug, Clone)]
pub enum AuthRejection {
    /// No valid authentication token was provided.
    Unauthenticated,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            AuthRejection::Unauthenticated => rejection(
                StatusCode::UNAUTHORIZED,
                "Authentication required",
                "UNAUTHORIZED",
            ),
        }
    }
}

fn rejection(status: StatusCode, message: &str, code: &str) -> Response {
    let body: ApiEnvelope<()> = ApiEnvelope {
        success: false,
        message: message.to_string(),
        data: None,
        error: Some(ApiErrorBody {
            code: code.to_string(),
            details: Default::default(),
        }),
    };
    (status, Json(body)).into_response()
}
