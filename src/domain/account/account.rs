//! Account aggregate.
//!
//! Reachable entitlement states are `free/inactive` (initial),
//! `pro/active`, and `enterprise/active`. Every mutation of the
//! tier/active pair goes through the transition methods here; callers
//! never write those fields directly.

use crate::domain::foundation::{AccountId, Timestamp};

use super::{AccountError, CredentialDigest, PlanTier};

/// Durable account record: identity attributes plus entitlement state.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub first_name: String,
    pub last_name: String,

    /// Stored lowercased; unique across all accounts.
    pub email: String,

    /// Unique when present; `None` for federation-created accounts.
    pub mobile_number: Option<String>,

    /// Present only for password-based accounts.
    pub credential: Option<CredentialDigest>,

    /// Identity-provider subject; present only for linked accounts.
    pub federated_subject: Option<String>,

    pub avatar_url: Option<String>,

    pub tier: PlanTier,
    pub entitlement_active: bool,

    /// Set on first activation, never cleared.
    pub activated_at: Option<Timestamp>,

    pub email_verified: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    /// Signup transition: creates a password-based `free/inactive` account.
    pub fn signup(
        id: AccountId,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: &str,
        mobile_number: impl Into<String>,
        credential: CredentialDigest,
        now: Timestamp,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: normalize_email(email),
            mobile_number: Some(mobile_number.into()),
            credential: Some(credential),
            federated_subject: None,
            avatar_url: None,
            tier: PlanTier::Free,
            entitlement_active: false,
            activated_at: None,
            email_verified: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Federated-bind transition, creation arm: a `free/inactive` account
    /// seeded from the provider profile. No mobile, no credential, contact
    /// pre-verified.
    pub fn from_federated_profile(
        id: AccountId,
        subject: impl Into<String>,
        email: &str,
        display_name: Option<&str>,
        avatar_url: Option<String>,
        now: Timestamp,
    ) -> Self {
        let (first_name, last_name) = split_display_name(display_name);
        Self {
            id,
            first_name,
            last_name,
            email: normalize_email(email),
            mobile_number: None,
            credential: None,
            federated_subject: Some(subject.into()),
            avatar_url,
            tier: PlanTier::Free,
            entitlement_active: false,
            activated_at: None,
            email_verified: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Federated-bind transition, link arm: attaches the provider subject
    /// to an existing account if not already linked.
    ///
    /// Returns true if anything changed.
    pub fn link_federated_subject(
        &mut self,
        subject: impl Into<String>,
        avatar_url: Option<String>,
        now: Timestamp,
    ) -> bool {
        if self.federated_subject.is_some() {
            return false;
        }
        self.federated_subject = Some(subject.into());
        if avatar_url.is_some() {
            self.avatar_url = avatar_url;
        }
        self.updated_at = now;
        true
    }

    /// True if the account can only authenticate through the identity
    /// provider (no credential material).
    pub fn is_federated_only(&self) -> bool {
        self.federated_subject.is_some() && self.credential.is_none()
    }

    /// Purchase-completion transition: moves the account to the paid tier.
    ///
    /// Only called after the payment broker has validated the charge
    /// against the purchase intent. Rejects the free tier.
    pub fn activate_plan(&mut self, tier: PlanTier, now: Timestamp) -> Result<(), AccountError> {
        if !tier.is_paid() {
            return Err(AccountError::InvalidEntitlement { tier, active: true });
        }
        self.tier = tier;
        self.entitlement_active = true;
        if self.activated_at.is_none() {
            self.activated_at = Some(now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Administrative override: direct set of the tier/active pair.
    ///
    /// The pair must agree: paid tiers are active, free is inactive.
    pub fn set_entitlement(
        &mut self,
        tier: PlanTier,
        active: bool,
        now: Timestamp,
    ) -> Result<(), AccountError> {
        if active != tier.is_paid() {
            return Err(AccountError::InvalidEntitlement { tier, active });
        }
        self.tier = tier;
        self.entitlement_active = active;
        if active && self.activated_at.is_none() {
            self.activated_at = Some(now);
        }
        self.updated_at = now;
        Ok(())
    }

    /// Administrative override: flips between `free/inactive` and
    /// `pro/active`. Enterprise accounts toggle down to free.
    pub fn toggle_entitlement(&mut self, now: Timestamp) -> PlanTier {
        let next = if self.entitlement_active {
            PlanTier::Free
        } else {
            PlanTier::Pro
        };
        // Both arms of the toggle satisfy the agreement invariant.
        self.tier = next;
        self.entitlement_active = next.is_paid();
        if self.entitlement_active && self.activated_at.is_none() {
            self.activated_at = Some(now);
        }
        self.updated_at = now;
        next
    }
}

/// Lowercases and trims an email for storage and lookup.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Splits a provider display name into first/last with fallbacks.
fn split_display_name(display_name: Option<&str>) -> (String, String) {
    let name = display_name.unwrap_or("").trim();
    let mut parts = name.split_whitespace();
    let first = parts.next().unwrap_or("User").to_string();
    let rest = parts.collect::<Vec<_>>().join(" ");
    let last = if rest.is_empty() {
        "Unknown".to_string()
    } else {
        rest
    };
    (first, last)
}
