//! The veil field-disposition engine.
//!
//! Sits between a downstream RPC handler and the wire, enforcing
//! purpose limitation on every structured response: each field is
//! resolved to exactly one [`Disposition`] from the caller's credential
//! policy and rewritten by the matching transform before the response
//! leaves the process.
//!
//! Per-call flow ([`Minimizer::intercept`]):
//! 1. Invoke the downstream handler; failures propagate untouched.
//! 2. Require a walkable message body (fail closed otherwise).
//! 3. Extract and verify the credential policy; any credential problem
//!    degrades to the deny-all policy instead of ending the call.
//! 4. Walk the fields, resolve dispositions, transform in place.

pub mod audit;
pub mod disposition;
pub mod engine;
pub mod error;
pub mod transform;

pub use audit::{AuditSink, InMemoryAuditSink, MinimizationEvent};
pub use disposition::{resolve, Disposition};
pub use engine::Minimizer;
pub use error::{CallError, CallResult};
