//! Compact JWS encoding and decoding.
//!
//! Credentials travel as `base64url(header).base64url(claims).base64url(sig)`
//! with an HMAC-SHA256 signature over the first two segments. Decoding
//! here is purely structural; trust checks live in [`crate::verify`].

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::error::{CredError, CredResult};
use crate::types::Claims;

pub(crate) type HmacSha256 = Hmac<Sha256>;

/// The only signing algorithm veil credentials accept.
pub const ALG_HS256: &str = "HS256";

/// JOSE header of a credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub alg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typ: Option<String>,
}

impl Header {
    pub fn hs256() -> Self {
        Self {
            alg: ALG_HS256.to_string(),
            typ: Some("JWT".to_string()),
        }
    }
}

/// Split a compact token into its three segments.
pub(crate) fn split(token: &str) -> CredResult<(&str, &str, &str)> {
    let mut parts = token.split('.');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(p), Some(s), None) if !h.is_empty() && !p.is_empty() => Ok((h, p, s)),
        _ => Err(CredError::MalformedCredential),
    }
}

/// Decode a credential's header and claims without any trust checks.
pub fn decode(token: &str) -> CredResult<(Header, Claims)> {
    let (header_b64, claims_b64, _) = split(token)?;

    let header_bytes = URL_SAFE_NO_PAD
        .decode(header_b64)
        .map_err(|_| CredError::DecodingFailed)?;
    let header: Header =
        serde_json::from_slice(&header_bytes).map_err(|_| CredError::DecodingFailed)?;

    let claims_bytes = URL_SAFE_NO_PAD
        .decode(claims_b64)
        .map_err(|_| CredError::DecodingFailed)?;
    let claims: Claims =
        serde_json::from_slice(&claims_bytes).map_err(|_| CredError::DecodingFailed)?;

    Ok((header, claims))
}

/// Mint an HS256 credential from a claim set. Used by issuers, demos,
/// and the test suites.
pub fn encode_hs256(claims: &Claims, key: &[u8]) -> CredResult<String> {
    let header_json = serde_json::to_vec(&Header::hs256()).map_err(|_| CredError::EncodingFailed)?;
    let claims_json = serde_json::to_vec(claims).map_err(|_| CredError::EncodingFailed)?;

    let signing_input = format!(
        "{}.{}",
        URL_SAFE_NO_PAD.encode(header_json),
        URL_SAFE_NO_PAD.encode(claims_json)
    );
    let tag = sign_hs256(signing_input.as_bytes(), key)?;

    Ok(format!("{}.{}", signing_input, URL_SAFE_NO_PAD.encode(tag)))
}

/// HMAC-SHA256 over the signing input.
pub(crate) fn sign_hs256(signing_input: &[u8], key: &[u8]) -> CredResult<Vec<u8>> {
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| CredError::InternalError)?;
    mac.update(signing_input);
    Ok(mac.finalize().into_bytes().to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Policy;

    const KEY: &[u8] = b"test-signing-key";

    fn make_claims() -> Claims {
        Claims::new(Policy::default().allow(["name"]).reduce(["street"]))
            .with_issuer("test")
            .with_expiry(1_900_000_000)
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let claims = make_claims();
        let token = encode_hs256(&claims, KEY).unwrap();
        let (header, decoded) = decode(&token).unwrap();
        assert_eq!(header.alg, ALG_HS256);
        assert_eq!(decoded, claims);
    }

    #[test]
    fn test_decode_rejects_wrong_segment_count() {
        assert_eq!(
            decode("only-one-segment").unwrap_err(),
            CredError::MalformedCredential
        );
        assert_eq!(decode("a.b").unwrap_err(), CredError::MalformedCredential);
        assert_eq!(
            decode("a.b.c.d").unwrap_err(),
            CredError::MalformedCredential
        );
    }

    #[test]
    fn test_decode_rejects_bad_base64() {
        assert_eq!(
            decode("!!!.???.sig").unwrap_err(),
            CredError::DecodingFailed
        );
    }

    #[test]
    fn test_decode_rejects_non_json_payload() {
        let garbage = format!(
            "{}.{}.{}",
            URL_SAFE_NO_PAD.encode(b"{\"alg\":\"HS256\"}"),
            URL_SAFE_NO_PAD.encode(b"not json"),
            URL_SAFE_NO_PAD.encode(b"sig")
        );
        assert_eq!(decode(&garbage).unwrap_err(), CredError::DecodingFailed);
    }

    #[test]
    fn test_signature_segment_present() {
        let token = encode_hs256(&make_claims(), KEY).unwrap();
        let (_, _, sig) = split(&token).unwrap();
        let tag = URL_SAFE_NO_PAD.decode(sig).unwrap();
        assert_eq!(tag.len(), 32);
    }

    #[test]
    fn test_sign_deterministic() {
        let a = sign_hs256(b"input", KEY).unwrap();
        let b = sign_hs256(b"input", KEY).unwrap();
        assert_eq!(a, b);
        let c = sign_hs256(b"input", b"other-key").unwrap();
        assert_ne!(a, c);
    }
}
