//! Google/Firebase federated identity verification.
//!
//! Implements the `IdentityProvider` port against Google's secure-token
//! infrastructure. ID tokens are validated by:
//!
//! 1. Fetching the signing keys (JWKS) from Google's key endpoint
//! 2. Validating the RS256 signature against the matching key
//! 3. Validating issuer (`https://securetoken.google.com/<project>`),
//!    audience (the project id), and expiry
//! 4. Mapping the asserted profile claims to `FederatedIdentity`
//!
//! Keys are cached and refetched after the cache window elapses.

use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use jsonwebtoken::{
    decode, decode_header, jwk::JwkSet, Algorithm, DecodingKey, TokenData, Validation,
};
use serde::Deserialize;
use tokio::sync::RwLock;

use crate::domain::foundation::AuthError;
use crate::ports::{FederatedIdentity, IdentityProvider};

const GOOGLE_JWKS_URL: &str =
    "https://www.googleapis.com/service_accounts/v1/jwk/securetoken@system.gserviceaccount.com";

/// Configuration for the Google identity verifier.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// The Firebase/Google Cloud project id. Determines both the
    /// expected issuer and the expected audience.
    pub project_id: String,

    /// How long to cache the signing keys before refetching.
    /// Defaults to 1 hour if not specified.
    pub jwks_cache_duration: Option<Duration>,

    /// Key endpoint override, for tests.
    pub jwks_url: Option<String>,
}

impl GoogleConfig {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            jwks_cache_duration: None,
            jwks_url: None,
        }
    }

    pub fn with_cache_duration(mut self, duration: Duration) -> Self {
        self.jwks_cache_duration = Some(duration);
        self
    }

    pub fn with_jwks_url(mut self, url: impl Into<String>) -> Self {
        self.jwks_url = Some(url.into());
        self
    }

    fn expected_issuer(&self) -> String {
        format!("https://securetoken.google.com/{}", self.project_id)
    }

    fn jwks_url(&self) -> &str {
        self.jwks_url.as_deref().unwrap_or(GOOGLE_JWKS_URL)
    }
}

/// Claims asserted by a Google ID token.
#[derive(Debug, Deserialize)]
struct GoogleClaims {
    /// Provider-scoped stable subject id.
    sub: String,

    /// Issuer URL.
    iss: String,

    /// Expiry timestamp (Unix epoch seconds).
    #[allow(dead_code)]
    exp: i64,

    /// Asserted email address.
    #[serde(default)]
    email: Option<String>,

    /// Display name, when the account shares one.
    #[serde(default)]
    name: Option<String>,

    /// Avatar URL, when the account shares one.
    #[serde(default)]
    picture: Option<String>,
}

/// Cached signing keys with expiry tracking.
struct JwksCache {
    jwks: JwkSet,
    fetched_at: Instant,
    cache_duration: Duration,
}

impl JwksCache {
    fn new(jwks: JwkSet, cache_duration: Duration) -> Self {
        Self {
            jwks,
            fetched_at: Instant::now(),
            cache_duration,
        }
    }

    fn is_expired(&self) -> bool {
        self.fetched_at.elapsed() > self.cache_duration
    }
}

/// Google ID-token verifier.
///
/// Production implementation of `IdentityProvider`.
pub struct GoogleIdentityVerifier {
    config: GoogleConfig,
    http_client: reqwest::Client,
    jwks_cache: Arc<RwLock<Option<JwksCache>>>,
}

impl GoogleIdentityVerifier {
    /// Create a new verifier.
    ///
    /// Does NOT fetch keys immediately - they are fetched lazily on first
    /// verification to avoid blocking startup.
    pub fn new(config: GoogleConfig) -> Result<Self, AuthError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                AuthError::provider_unavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            config,
            http_client,
            jwks_cache: Arc::new(RwLock::new(None)),
        })
    }

    async fn fetch_jwks(&self) -> Result<JwkSet, AuthError> {
        let url = self.config.jwks_url();

        tracing::debug!("Fetching signing keys from {}", url);

        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to fetch signing keys: {}", e);
            AuthError::provider_unavailable(format!("Failed to fetch signing keys: {}", e))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::error!("Key endpoint returned {}", status);
            return Err(AuthError::provider_unavailable(format!(
                "Key endpoint returned {}",
                status
            )));
        }

        let jwks: JwkSet = response.json().await.map_err(|e| {
            tracing::error!("Failed to parse signing keys: {}", e);
            AuthError::provider_unavailable(format!("Failed to parse signing keys: {}", e))
        })?;

        tracing::debug!("Fetched {} signing keys", jwks.keys.len());

        Ok(jwks)
    }

    /// Get signing keys, using the cache if fresh.
    async fn get_jwks(&self) -> Result<JwkSet, AuthError> {
        {
            let cache = self.jwks_cache.read().await;
            if let Some(ref cached) = *cache {
                if !cached.is_expired() {
                    return Ok(cached.jwks.clone());
                }
            }
        }

        let jwks = self.fetch_jwks().await?;

        {
            let mut cache = self.jwks_cache.write().await;
            let duration = self
                .config
                .jwks_cache_duration
                .unwrap_or(Duration::from_secs(3600));
            *cache = Some(JwksCache::new(jwks.clone(), duration));
        }

        Ok(jwks)
    }

    fn find_decoding_key(
        &self,
        header: &jsonwebtoken::Header,
        jwks: &JwkSet,
    ) -> Result<DecodingKey, AuthError> {
        let kid = header.kid.as_ref().ok_or_else(|| {
            tracing::warn!("ID token missing 'kid' header");
            AuthError::InvalidToken
        })?;

        let jwk = jwks.find(kid).ok_or_else(|| {
            tracing::warn!("No matching signing key for kid: {}", kid);
            AuthError::InvalidToken
        })?;

        DecodingKey::from_jwk(jwk).map_err(|e| {
            tracing::warn!("Failed to create decoding key: {}", e);
            AuthError::InvalidToken
        })
    }

    fn validate_token(
        &self,
        token: &str,
        decoding_key: &DecodingKey,
    ) -> Result<TokenData<GoogleClaims>, AuthError> {
        // Google signs ID tokens with RS256 only.
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[self.config.expected_issuer()]);
        validation.set_audience(&[&self.config.project_id]);
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        decode::<GoogleClaims>(token, decoding_key, &validation).map_err(|e| {
            tracing::debug!("ID token rejected: {}", e);
            AuthError::InvalidToken
        })
    }
}

#[async_trait]
impl IdentityProvider for GoogleIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<FederatedIdentity, AuthError> {
        let header = decode_header(token).map_err(|e| {
            tracing::debug!("Failed to decode ID token header: {}", e);
            AuthError::InvalidToken
        })?;

        let jwks = self.get_jwks().await?;
        let decoding_key = self.find_decoding_key(&header, &jwks)?;
        let token_data = self.validate_token(token, &decoding_key)?;
        let claims = token_data.claims;

        if claims.iss != self.config.expected_issuer() {
            tracing::warn!(
                "Issuer mismatch after validation: expected '{}', got '{}'",
                self.config.expected_issuer(),
                claims.iss
            );
            return Err(AuthError::InvalidToken);
        }

        // Email binding is mandatory: an account cannot be matched or
        // created without one.
        let email = claims.email.ok_or_else(|| {
            tracing::warn!("ID token missing email claim");
            AuthError::InvalidToken
        })?;

        Ok(FederatedIdentity {
            subject: claims.sub,
            email,
            display_name: claims.name,
            avatar_url: claims.picture,
        })
    }
}

impl std::fmt::Debug for GoogleIdentityVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleIdentityVerifier")
            .field("project_id", &self.config.project_id)
            .finish_non_exhaustive()
    }
}
