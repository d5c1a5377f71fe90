//! Signed global identifiers for attachment references.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::{MentionError, MentionResult};

/// Claims carried inside a signed attachment identifier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SgidClaims {
    /// Stable identifier of the referenced entity
    pub sub: String,
    /// Entity kind, e.g. "user"
    pub kind: String,
    /// Issuer
    pub iss: String,
}

/// Signs and verifies attachment reference identifiers.
///
/// The identifier is an HS256 token whose base64url alphabet contains no
/// `@`, which keeps generated attachment markup out of reach of the
/// mention pattern.
pub struct SgidSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
}

impl SgidSigner {
    /// Create a new signer from a shared secret
    pub fn new(secret: &str, issuer: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            issuer: issuer.into(),
        }
    }

    /// Produce a signed identifier for an entity
    pub fn sign(&self, kind: &str, reference_id: &str) -> MentionResult<String> {
        let claims = SgidClaims {
            sub: reference_id.to_string(),
            kind: kind.to_string(),
            iss: self.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| MentionError::Signing(e.to_string()))
    }

    /// Validate a signed identifier and return its claims
    pub fn verify(&self, sgid: &str) -> MentionResult<SgidClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims::<&str>(&[]);
        validation.validate_exp = false;
        validation.set_issuer(&[&self.issuer]);

        let data = decode::<SgidClaims>(sgid, &self.decoding_key, &validation)
            .map_err(|e| MentionError::InvalidReference(e.to_string()))?;

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_and_verify_round_trip() {
        let signer = SgidSigner::new("test-secret", "corkboard");

        let sgid = signer.sign("user", "usr_123").unwrap();
        let claims = signer.verify(&sgid).unwrap();

        assert_eq!(claims.sub, "usr_123");
        assert_eq!(claims.kind, "user");
        assert_eq!(claims.iss, "corkboard");
    }

    #[test]
    fn test_signing_is_stable_for_same_input() {
        let signer = SgidSigner::new("test-secret", "corkboard");

        let first = signer.sign("user", "usr_123").unwrap();
        let second = signer.sign("user", "usr_123").unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let signer = SgidSigner::new("test-secret", "corkboard");
        let other = SgidSigner::new("other-secret", "corkboard");

        let sgid = signer.sign("user", "usr_123").unwrap();
        assert!(matches!(
            other.verify(&sgid),
            Err(MentionError::InvalidReference(_))
        ));
    }

    #[test]
    fn test_wrong_issuer_is_rejected() {
        let signer = SgidSigner::new("test-secret", "corkboard");
        let other = SgidSigner::new("test-secret", "elsewhere");

        let sgid = signer.sign("user", "usr_123").unwrap();
        assert!(other.verify(&sgid).is_err());
    }

    #[test]
    fn test_sgid_contains_no_at_sign() {
        let signer = SgidSigner::new("test-secret", "corkboard");
        let sgid = signer.sign("user", "user@example.com").unwrap();
        assert!(!sgid.contains('@'));
    }
}
