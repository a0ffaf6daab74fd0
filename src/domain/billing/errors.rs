//! Billing-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidPlan | 400 |
//! | PlanNotFound | 404 |
//! | PaymentMismatch | 400 |
//! | GatewayUnavailable | 503 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};

/// Billing-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingError {
    /// The plan cannot be purchased (free or zero-amount).
    InvalidPlan(String),

    /// The plan identifier is not recognized.
    PlanNotFound(String),

    /// The gateway's recorded charge does not equal the plan's price.
    PaymentMismatch {
        order_ref: String,
        expected: i64,
        charged: i64,
    },

    /// The payment gateway is unreachable or cannot produce the order.
    GatewayUnavailable(String),

    /// Infrastructure error.
    Infrastructure(String),
}

impl BillingError {
    pub fn invalid_plan(plan: impl Into<String>) -> Self {
        BillingError::InvalidPlan(plan.into())
    }

    pub fn plan_not_found(plan: impl Into<String>) -> Self {
        BillingError::PlanNotFound(plan.into())
    }

    pub fn payment_mismatch(order_ref: impl Into<String>, expected: i64, charged: i64) -> Self {
        BillingError::PaymentMismatch {
            order_ref: order_ref.into(),
            expected,
            charged,
        }
    }

    pub fn gateway_unavailable(message: impl Into<String>) -> Self {
        BillingError::GatewayUnavailable(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BillingError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BillingError::InvalidPlan(_) => ErrorCode::InvalidPlan,
            BillingError::PlanNotFound(_) => ErrorCode::PlanNotFound,
            BillingError::PaymentMismatch { .. } => ErrorCode::PaymentMismatch,
            BillingError::GatewayUnavailable(_) => ErrorCode::GatewayUnavailable,
            BillingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            BillingError::InvalidPlan(_) => "Invalid or free plan selected".to_string(),
            BillingError::PlanNotFound(plan) => format!("Invalid plan selected: {}", plan),
            BillingError::PaymentMismatch { .. } => {
                "Payment amount does not match the selected plan".to_string()
            }
            BillingError::GatewayUnavailable(_) => {
                "Failed to validate payment order".to_string()
            }
            BillingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for BillingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BillingError {}

impl From<BillingError> for DomainError {
    fn from(err: BillingError) -> Self {
        let domain = DomainError::new(err.code(), err.message());
        match &err {
            BillingError::PaymentMismatch {
                order_ref,
                expected,
                charged,
            } => domain
                .with_detail("orderRef", order_ref.clone())
                .with_detail("expected", expected.to_string())
                .with_detail("charged", charged.to_string()),
            _ => domain,
        }
    }
}
