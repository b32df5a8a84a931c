//! Credential handling for the veil minimization engine.
//!
//! A caller's credential is a compact HS256 JWS whose payload carries a
//! minimization [`Policy`] alongside the registered identity claims.
//! This crate decodes the payload ([`token::decode`]), mints credentials
//! for tests and demos ([`token::encode_hs256`]), and enforces the
//! trust checks — signature, issuer, expiry — via [`Verifier`].
//!
//! Verification failures are never fatal to a call: the engine responds
//! to any [`CredError`] by falling back to [`Policy::deny_all`], so an
//! unverified policy is never trusted.

pub mod error;
pub mod token;
pub mod types;
pub mod verify;

pub use error::*;
pub use token::*;
pub use types::*;
pub use verify::*;
