//! HTTP DTOs for the authentication endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::Account;

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to register a password-based account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_number: String,
    pub password: String,
}

/// Request to authenticate with email and password.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request to sign in with a federated ID token.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleSignInRequest {
    /// The provider-issued ID token.
    pub id_token: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Public view of an account.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub mobile_number: Option<String>,
    pub avatar_url: Option<String>,
    pub tier: String,
    pub entitlement_active: bool,
    /// First activation time (ISO 8601), if ever activated.
    pub activated_at: Option<String>,
    pub email_verified: bool,
    pub created_at: String,
}

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            first_name: account.first_name.clone(),
            last_name: account.last_name.clone(),
            email: account.email.clone(),
            mobile_number: account.mobile_number.clone(),
            avatar_url: account.avatar_url.clone(),
            tier: account.tier.as_str().to_string(),
            entitlement_active: account.entitlement_active,
            activated_at: account
                .activated_at
                .map(|t| t.as_datetime().to_rfc3339()),
            email_verified: account.email_verified,
            created_at: account.created_at.as_datetime().to_rfc3339(),
        }
    }
}

/// Session payload returned by every authentication endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionData {
    pub token: String,
    pub account: AccountResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::account::{CredentialDigest, PlanTier};
    use crate::domain::foundation::{AccountId, Timestamp};
    use secrecy::SecretString;

    fn account() -> Account {
        Account::signup(
            AccountId::new(),
            "Asha",
            "Iyer",
            "asha@example.com",
            "9876543210",
            CredentialDigest::from_password("secret99", &SecretString::new("p".to_string())),
            Timestamp::now(),
        )
    }

    #[test]
    fn signup_request_deserializes_camel_case() {
        let json = r#"{
            "firstName": "Asha",
            "lastName": "Iyer",
            "email": "asha@example.com",
            "mobileNumber": "9876543210",
            "password": "secret99"
        }"#;
        let request: SignupRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.first_name, "Asha");
        assert_eq!(request.mobile_number, "9876543210");
    }

    #[test]
    fn google_sign_in_request_deserializes() {
        let json = r#"{"idToken": "header.payload.signature"}"#;
        let request: GoogleSignInRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.id_token, "header.payload.signature");
    }

    #[test]
    fn account_response_uses_camel_case_and_wire_tier() {
        let response = AccountResponse::from(&account());
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains(r#""firstName":"Asha""#));
        assert!(json.contains(r#""entitlementActive":false"#));
        assert!(json.contains(r#""tier":"free""#));
    }

    #[test]
    fn account_response_never_carries_credentials() {
        let response = AccountResponse::from(&account());
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("credential"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn activated_account_serializes_activation_time() {
        let mut a = account();
        a.activate_plan(PlanTier::Pro, Timestamp::now()).unwrap();
        let response = AccountResponse::from(&a);
        assert!(response.activated_at.is_some());
        assert_eq!(response.tier, "pro");
    }
}
