use thiserror::Error;

/// Oracle-safe error type for credential handling.
///
/// Display implementations never leak token contents or key material.
/// Crypto failures return generic variants so rejection messages carry
/// no oracle information.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredError {
    #[error("malformed credential")]
    MalformedCredential,

    #[error("decoding failed")]
    DecodingFailed,

    #[error("encoding failed")]
    EncodingFailed,

    #[error("unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("signature verification failed")]
    SignatureMismatch,

    #[error("issuer mismatch")]
    IssuerMismatch,

    #[error("credential expired")]
    CredentialExpired,

    #[error("internal error")]
    InternalError,
}

pub type CredResult<T> = Result<T, CredError>;
