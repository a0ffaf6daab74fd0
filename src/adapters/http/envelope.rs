//! JSON response envelope shared by every endpoint.
//!
//! Success and failure both use the same shape:
//! `{success, message, data?, error?}`. Domain error codes decide the
//! HTTP status.

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// The response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ApiErrorBody>,
}

/// Machine-readable error payload inside a failure envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorBody {
    pub code: String,

    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub details: HashMap<String, String>,
}

impl<T: Serialize> ApiEnvelope<T> {
    /// A success envelope with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiEnvelope<()> {
    /// A success envelope without a payload.
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            error: None,
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

/// HTTP status for a domain error code.
pub fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed
        | ErrorCode::DuplicateAccount
        | ErrorCode::InvalidPlan
        | ErrorCode::PaymentMismatch => StatusCode::BAD_REQUEST,

        ErrorCode::InvalidCredentials | ErrorCode::InvalidToken | ErrorCode::Unauthorized => {
            StatusCode::UNAUTHORIZED
        }

        ErrorCode::Forbidden => StatusCode::FORBIDDEN,

        ErrorCode::AccountNotFound | ErrorCode::PlanNotFound => StatusCode::NOT_FOUND,

        ErrorCode::GatewayUnavailable | ErrorCode::DependencyUnavailable => {
            StatusCode::SERVICE_UNAVAILABLE
        }

        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = status_for(self.0.code);

        if status.is_server_error() {
            tracing::error!(code = %self.0.code, message = %self.0.message, "Request failed");
        } else {
            tracing::debug!(code = %self.0.code, message = %self.0.message, "Request rejected");
        }

        let body: ApiEnvelope<()> = ApiEnvelope {
            success: false,
            message: self.0.message,
            data: None,
            error: Some(ApiErrorBody {
                code: self.0.code.to_string(),
                details: self.0.details,
            }),
        };

        (status, Json(body)).into_response()
    }
}
