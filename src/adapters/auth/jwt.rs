//! Self-issued session tokens (HS256).
//!
//! Implements both `SessionIssuer` and `SessionValidator` over the same
//! symmetric secret. Tokens carry `{sub, iat, exp}` and an optional
//! `role` claim; the only recognized role is `operator`. Validity is a
//! fixed window from issuance (default 7 days) and there is no
//! revocation.

use async_trait::async_trait;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AccountId, AuthError, Principal, Timestamp};
use crate::ports::{SessionIssuer, SessionValidator};

const OPERATOR_ROLE: &str = "operator";

/// Configuration for the session token service.
#[derive(Clone)]
pub struct JwtConfig {
    /// Symmetric signing secret.
    pub secret: SecretString,

    /// Token validity window in days.
    pub validity_days: i64,
}

impl JwtConfig {
    pub fn new(secret: SecretString) -> Self {
        Self {
            secret,
            validity_days: 7,
        }
    }

    pub fn with_validity_days(mut self, days: i64) -> Self {
        self.validity_days = days;
        self
    }
}

/// Claims carried by a self-issued session token.
#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    /// Account id the token was issued for.
    sub: String,

    /// Issued-at (Unix epoch seconds).
    iat: i64,

    /// Expiry (Unix epoch seconds).
    exp: i64,

    /// Role claim; only `operator` is recognized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
}

/// HS256 session token issuer and validator.
pub struct JwtSessionService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtSessionService {
    pub fn new(config: JwtConfig) -> Self {
        let secret_bytes = config.secret.expose_secret().as_bytes();
        let encoding_key = EncodingKey::from_secret(secret_bytes);
        let decoding_key = DecodingKey::from_secret(secret_bytes);
        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    fn mint(&self, account_id: &AccountId, role: Option<&str>) -> Result<String, AuthError> {
        let now = Timestamp::now();
        let claims = SessionClaims {
            sub: account_id.to_string(),
            iat: now.as_unix_secs(),
            exp: now.add_days(self.config.validity_days).as_unix_secs(),
            role: role.map(str::to_string),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("Failed to sign session token: {}", e);
            AuthError::ProviderUnavailable(format!("Failed to sign session token: {}", e))
        })
    }
}

#[async_trait]
impl SessionIssuer for JwtSessionService {
    async fn issue(&self, account_id: &AccountId) -> Result<String, AuthError> {
        self.mint(account_id, None)
    }

    async fn issue_operator(&self, account_id: &AccountId) -> Result<String, AuthError> {
        self.mint(account_id, Some(OPERATOR_ROLE))
    }
}

#[async_trait]
impl SessionValidator for JwtSessionService {
    async fn validate(&self, token: &str) -> Result<Principal, AuthError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                tracing::debug!("Session token rejected: {}", e);
                AuthError::InvalidToken
            })?;

        let claims = token_data.claims;
        let account_id: AccountId = claims.sub.parse().map_err(|_| {
            tracing::warn!("Session token carries malformed subject");
            AuthError::InvalidToken
        })?;

        if claims.role.as_deref() == Some(OPERATOR_ROLE) {
            Ok(Principal::operator(account_id))
        } else {
            Ok(Principal::user(account_id))
        }
    }
}

impl std::fmt::Debug for JwtSessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtSessionService")
            .field("validity_days", &self.config.validity_days)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> JwtSessionService {
        JwtSessionService::new(JwtConfig::new(SecretString::new(
            "test-secret-at-least-32-bytes-long!!".to_string(),
        )))
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Issue / Validate Round Trips
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn issued_token_validates_to_same_account() {
        let service = service();
        let account_id = AccountId::new();

        let token = service.issue(&account_id).await.unwrap();
        let principal = service.validate(&token).await.unwrap();

        assert_eq!(principal.account_id, account_id);
        assert!(!principal.operator);
    }

    #[tokio::test]
    async fn operator_token_carries_operator_flag() {
        let service = service();
        let account_id = AccountId::new();

        let token = service.issue_operator(&account_id).await.unwrap();
        let principal = service.validate(&token).await.unwrap();

        assert_eq!(principal.account_id, account_id);
        assert!(principal.operator);
    }

    #[tokio::test]
    async fn ordinary_token_never_grants_operator() {
        let service = service();

        let token = service.issue(&AccountId::new()).await.unwrap();
        let principal = service.validate(&token).await.unwrap();

        assert!(!principal.operator);
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Rejection Paths
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn garbage_token_is_rejected() {
        let service = service();

        let result = service.validate("not-a-jwt").await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_rejected() {
        let issuer = JwtSessionService::new(JwtConfig::new(SecretString::new(
            "a-completely-different-signing-secret".to_string(),
        )));
        let validator = service();

        let token = issuer.issue(&AccountId::new()).await.unwrap();
        let result = validator.validate(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn expired_token_is_rejected() {
        let service = JwtSessionService::new(
            JwtConfig::new(SecretString::new(
                "test-secret-at-least-32-bytes-long!!".to_string(),
            ))
            .with_validity_days(-1),
        );

        let token = service.issue(&AccountId::new()).await.unwrap();
        let result = service.validate(&token).await;

        assert!(matches!(result, Err(AuthError::InvalidToken)));
    }

    #[tokio::test]
    async fn tampered_token_is_rejected() {
        let service = service();

        let mut token = service.issue(&AccountId::new()).await.unwrap();
        // Flip a character in the payload segment
        let mid = token.len() / 2;
        let replacement = if token.as_bytes()[mid] == b'A' { "B" } else { "A" };
        token.replace_range(mid..mid + 1, replacement);

        let result = service.validate(&token).await;
        assert!(result.is_err());
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let service = service();
        let debug = format!("{:?}", service);
        assert!(!debug.contains("test-secret"));
    }
}
