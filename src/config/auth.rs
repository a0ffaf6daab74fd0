//! Authentication configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Authentication configuration: session token signing and the
/// federated identity provider.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfig {
    /// Symmetric secret for signing session tokens.
    pub session_secret: String,

    /// Session token validity window in days.
    #[serde(default = "default_validity_days")]
    pub session_validity_days: i64,

    /// Server-side pepper for credential digests.
    pub credential_pepper: String,

    /// Google/Firebase project id; sets the expected issuer and
    /// audience of federated ID tokens.
    pub google_project_id: String,
}

impl AuthConfig {
    /// Validate authentication configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_secret.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__SESSION_SECRET"));
        }
        if self.session_secret.len() < 32 {
            return Err(ValidationError::SessionSecretTooShort);
        }
        if !(1..=365).contains(&self.session_validity_days) {
            return Err(ValidationError::InvalidSessionValidity);
        }
        if self.credential_pepper.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__CREDENTIAL_PEPPER"));
        }
        if self.google_project_id.is_empty() {
            return Err(ValidationError::MissingRequired("AUTH__GOOGLE_PROJECT_ID"));
        }
        Ok(())
    }
}

fn default_validity_days() -> i64 {
    7
}
