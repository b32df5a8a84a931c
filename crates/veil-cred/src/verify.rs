//! Credential trust checks.
//!
//! Verification flow:
//! 1. Structural decode of the compact token.
//! 2. Algorithm check (`alg` must be HS256 — no `none` downgrade).
//! 3. Constant-time HMAC-SHA256 signature check over `header.payload`.
//! 4. Issuer equality against the pinned issuer, when configured.
//! 5. Expiry: `exp` is required and compared against the clock with the
//!    configured leeway.
//!
//! Every rejection is a [`CredError`]; callers fall back to
//! [`crate::Policy::deny_all`] rather than trusting the embedded policy.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::Mac;
use zeroize::Zeroizing;

use crate::error::{CredError, CredResult};
use crate::token::{split, HmacSha256, ALG_HS256};
use crate::types::Claims;

/// Credential verifier holding the shared secret and acceptance rules.
///
/// The secret is zeroized on drop.
pub struct Verifier {
    secret: Zeroizing<Vec<u8>>,
    issuer: Option<String>,
    leeway_secs: i64,
}

impl Verifier {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: Zeroizing::new(secret.into()),
            issuer: None,
            leeway_secs: 0,
        }
    }

    /// Pin the expected issuer. Credentials from any other issuer are
    /// rejected.
    pub fn with_issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = Some(issuer.into());
        self
    }

    /// Clock-skew tolerance applied to the expiry check.
    pub fn with_leeway(mut self, leeway_secs: i64) -> Self {
        self.leeway_secs = leeway_secs;
        self
    }

    /// Verify a credential against the current clock.
    pub fn verify(&self, token: &str) -> CredResult<Claims> {
        self.verify_at(token, chrono::Utc::now().timestamp())
    }

    /// Verify a credential at an explicit point in time (unix seconds).
    pub fn verify_at(&self, token: &str, now_secs: i64) -> CredResult<Claims> {
        let (header_b64, claims_b64, sig_b64) = split(token)?;

        let header_bytes = URL_SAFE_NO_PAD
            .decode(header_b64)
            .map_err(|_| CredError::DecodingFailed)?;
        let header: crate::token::Header =
            serde_json::from_slice(&header_bytes).map_err(|_| CredError::DecodingFailed)?;

        if header.alg != ALG_HS256 {
            tracing::warn!(alg = %header.alg, "credential rejected: unsupported algorithm");
            return Err(CredError::UnsupportedAlgorithm(header.alg));
        }

        let tag = URL_SAFE_NO_PAD
            .decode(sig_b64)
            .map_err(|_| CredError::DecodingFailed)?;
        let signing_input = format!("{}.{}", header_b64, claims_b64);
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| CredError::InternalError)?;
        mac.update(signing_input.as_bytes());
        if mac.verify_slice(&tag).is_err() {
            tracing::warn!("credential rejected: signature mismatch");
            return Err(CredError::SignatureMismatch);
        }

        let claims_bytes = URL_SAFE_NO_PAD
            .decode(claims_b64)
            .map_err(|_| CredError::DecodingFailed)?;
        let claims: Claims =
            serde_json::from_slice(&claims_bytes).map_err(|_| CredError::DecodingFailed)?;

        if let Some(expected) = &self.issuer {
            if claims.iss.as_deref() != Some(expected.as_str()) {
                tracing::warn!("credential rejected: issuer mismatch");
                return Err(CredError::IssuerMismatch);
            }
        }

        // A credential without an expiry never ages out; treat it as
        // already expired rather than trusting it indefinitely.
        match claims.exp {
            Some(exp) if exp.saturating_add(self.leeway_secs) > now_secs => {}
            _ => {
                tracing::warn!("credential rejected: expired or missing expiry");
                return Err(CredError::CredentialExpired);
            }
        }

        tracing::debug!(
            issuer = claims.iss.as_deref().unwrap_or(""),
            subject = claims.sub.as_deref().unwrap_or(""),
            "credential verified"
        );
        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::encode_hs256;
    use crate::types::{Claims, Policy};

    const KEY: &[u8] = b"verifier-test-key";
    const NOW: i64 = 1_800_000_000;

    fn make_claims() -> Claims {
        Claims::new(Policy::default().allow(["name"]))
            .with_issuer("test")
            .with_subject("caller-1")
            .with_expiry(NOW + 600)
    }

    fn make_verifier() -> Verifier {
        Verifier::new(KEY).with_issuer("test")
    }

    #[test]
    fn test_verify_valid_credential() {
        let token = encode_hs256(&make_claims(), KEY).unwrap();
        let claims = make_verifier().verify_at(&token, NOW).unwrap();
        assert!(claims.policy.allowed.contains("name"));
        assert_eq!(claims.sub.as_deref(), Some("caller-1"));
    }

    #[test]
    fn test_verify_rejects_wrong_key() {
        let token = encode_hs256(&make_claims(), b"some-other-key").unwrap();
        let err = make_verifier().verify_at(&token, NOW).unwrap_err();
        assert_eq!(err, CredError::SignatureMismatch);
    }

    #[test]
    fn test_verify_rejects_tampered_claims() {
        let token = encode_hs256(&make_claims(), KEY).unwrap();
        // Swap the claims segment for one granting everything.
        let forged_claims = Claims::new(
            Policy::default().allow(["name", "street", "city", "house_number"]),
        )
        .with_issuer("test")
        .with_expiry(NOW + 600);
        let forged = encode_hs256(&forged_claims, b"attacker-key").unwrap();
        let (_, forged_payload, _) = crate::token::split(&forged).unwrap();
        let (header, _, sig) = crate::token::split(&token).unwrap();
        let spliced = format!("{}.{}.{}", header, forged_payload, sig);

        let err = make_verifier().verify_at(&spliced, NOW).unwrap_err();
        assert_eq!(err, CredError::SignatureMismatch);
    }

    #[test]
    fn test_verify_rejects_wrong_issuer() {
        let claims = make_claims().with_issuer("someone-else");
        let token = encode_hs256(&claims, KEY).unwrap();
        let err = make_verifier().verify_at(&token, NOW).unwrap_err();
        assert_eq!(err, CredError::IssuerMismatch);
    }

    #[test]
    fn test_verify_no_pinned_issuer_accepts_any() {
        let claims = make_claims().with_issuer("someone-else");
        let token = encode_hs256(&claims, KEY).unwrap();
        assert!(Verifier::new(KEY).verify_at(&token, NOW).is_ok());
    }

    #[test]
    fn test_verify_rejects_expired() {
        let claims = make_claims().with_expiry(NOW - 1);
        let token = encode_hs256(&claims, KEY).unwrap();
        let err = make_verifier().verify_at(&token, NOW).unwrap_err();
        assert_eq!(err, CredError::CredentialExpired);
    }

    #[test]
    fn test_verify_leeway_tolerates_recent_expiry() {
        let claims = make_claims().with_expiry(NOW - 10);
        let token = encode_hs256(&claims, KEY).unwrap();
        let verifier = make_verifier().with_leeway(30);
        assert!(verifier.verify_at(&token, NOW).is_ok());
    }

    #[test]
    fn test_verify_distant_expiry_with_leeway_does_not_panic() {
        let claims = make_claims().with_expiry(i64::MAX);
        let token = encode_hs256(&claims, KEY).unwrap();
        let verifier = make_verifier().with_leeway(30);
        assert!(verifier.verify_at(&token, NOW).is_ok());
    }

    #[test]
    fn test_verify_rejects_missing_expiry() {
        let mut claims = make_claims();
        claims.exp = None;
        let token = encode_hs256(&claims, KEY).unwrap();
        let err = make_verifier().verify_at(&token, NOW).unwrap_err();
        assert_eq!(err, CredError::CredentialExpired);
    }

    #[test]
    fn test_verify_rejects_alg_none() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(serde_json::to_vec(&make_claims()).unwrap());
        let token = format!("{}.{}.", header, payload);
        let err = make_verifier().verify_at(&token, NOW).unwrap_err();
        assert_eq!(err, CredError::UnsupportedAlgorithm("none".to_string()));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let err = make_verifier().verify_at("garbage", NOW).unwrap_err();
        assert_eq!(err, CredError::MalformedCredential);
    }
}
