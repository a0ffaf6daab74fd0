//! Account-specific error types.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | DuplicateEmail / DuplicateMobile | 400 |
//! | NotFound | 404 |
//! | InvalidCredentials | 401 |
//! | FederatedOnly | 400 |
//! | InvalidEntitlement | 400 |
//! | Validation | 400 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{AccountId, DomainError, ErrorCode};

use super::PlanTier;

/// Account-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    /// An account with this email already exists.
    DuplicateEmail(String),

    /// An account with this mobile number already exists.
    DuplicateMobile(String),

    /// Account was not found.
    NotFound(AccountId),

    /// Email and password did not match any account.
    InvalidCredentials,

    /// The account has no credential material; it was created through
    /// federated sign-in and must authenticate that way.
    FederatedOnly,

    /// Plan tier and active flag disagree (e.g. free + active).
    InvalidEntitlement { tier: PlanTier, active: bool },

    /// Validation failed.
    Validation { field: String, message: String },

    /// Infrastructure error.
    Infrastructure(String),
}

impl AccountError {
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        AccountError::DuplicateEmail(email.into())
    }

    pub fn duplicate_mobile(mobile: impl Into<String>) -> Self {
        AccountError::DuplicateMobile(mobile.into())
    }

    pub fn not_found(id: AccountId) -> Self {
        AccountError::NotFound(id)
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AccountError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        AccountError::Infrastructure(message.into())
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            AccountError::DuplicateEmail(_) | AccountError::DuplicateMobile(_) => {
                ErrorCode::DuplicateAccount
            }
            AccountError::NotFound(_) => ErrorCode::AccountNotFound,
            AccountError::InvalidCredentials => ErrorCode::InvalidCredentials,
            AccountError::FederatedOnly => ErrorCode::ValidationFailed,
            AccountError::InvalidEntitlement { .. } => ErrorCode::ValidationFailed,
            AccountError::Validation { .. } => ErrorCode::ValidationFailed,
            AccountError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            AccountError::DuplicateEmail(_) => {
                "User with this email already exists".to_string()
            }
            AccountError::DuplicateMobile(_) => {
                "User with this mobile number already exists".to_string()
            }
            AccountError::NotFound(_) => "User not found".to_string(),
            AccountError::InvalidCredentials => "Invalid email or password".to_string(),
            AccountError::FederatedOnly => {
                "This account was created with Google. Please use \"Sign in with Google\" to log in."
                    .to_string()
            }
            AccountError::InvalidEntitlement { tier, active } => format!(
                "Entitlement disagreement: tier '{}' cannot have active={}",
                tier, active
            ),
            AccountError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            AccountError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for AccountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AccountError {}

impl From<DomainError> for AccountError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::AccountNotFound => {
                AccountError::Infrastructure(err.to_string())
            }
            ErrorCode::ValidationFailed => AccountError::Validation {
                field: err
                    .details
                    .get("field")
                    .cloned()
                    .unwrap_or_else(|| "unknown".to_string()),
                message: err.message,
            },
            _ => AccountError::Infrastructure(err.to_string()),
        }
    }
}

impl From<AccountError> for DomainError {
    fn from(err: AccountError) -> Self {
        let domain = DomainError::new(err.code(), err.message());
        match &err {
            AccountError::DuplicateEmail(_) => domain.with_detail("field", "email"),
            AccountError::DuplicateMobile(_) => domain.with_detail("field", "mobileNumber"),
            _ => domain,
        }
    }
}
