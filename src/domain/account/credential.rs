//! Credential material for password-based accounts.
//!
//! Passwords are never stored raw. The digest is an HMAC-SHA256 of the
//! password keyed by a server-side pepper, compared in constant time.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Opaque credential digest stored on password-based accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialDigest(Vec<u8>);

impl CredentialDigest {
    /// Digests a raw password with the server pepper.
    pub fn from_password(password: &str, pepper: &SecretString) -> Self {
        let mut mac = HmacSha256::new_from_slice(pepper.expose_secret().as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(password.as_bytes());
        Self(mac.finalize().into_bytes().to_vec())
    }

    /// Verifies a raw password against this digest in constant time.
    pub fn verify(&self, password: &str, pepper: &SecretString) -> bool {
        let candidate = Self::from_password(password, pepper);
        self.0.ct_eq(&candidate.0).unwrap_u8() == 1
    }

    /// Hex encoding used by the persistence layer.
    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Parses the persistence-layer hex encoding.
    pub fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() % 2 != 0 {
            return None;
        }
        let bytes = (0..hex.len())
            .step_by(2)
            .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
            .collect::<Option<Vec<u8>>>()?;
        Some(Self(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pepper() -> SecretString {
        SecretString::new("test-pepper".to_string())
    }

    #[test]
    fn correct_password_verifies() {
        let digest = CredentialDigest::from_password("hunter22", &pepper());
        assert!(digest.verify("hunter22", &pepper()));
    }

    #[test]
    fn wrong_password_fails() {
        let digest = CredentialDigest::from_password("hunter22", &pepper());
        assert!(!digest.verify("hunter23", &pepper()));
    }

    #[test]
    fn different_pepper_fails() {
        let digest = CredentialDigest::from_password("hunter22", &pepper());
        assert!(!digest.verify("hunter22", &SecretString::new("other".to_string())));
    }

    #[test]
    fn hex_roundtrips() {
        let digest = CredentialDigest::from_password("hunter22", &pepper());
        let parsed = CredentialDigest::from_hex(&digest.to_hex()).unwrap();
        assert_eq!(digest, parsed);
    }

    #[test]
    fn from_hex_rejects_garbage() {
        assert!(CredentialDigest::from_hex("abc").is_none());
        assert!(CredentialDigest::from_hex("zz").is_none());
    }
}
