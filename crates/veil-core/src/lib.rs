//! Shared data model for the veil minimization engine.
//!
//! This crate defines the call-boundary types the engine operates on:
//! typed response fields ([`Field`], [`Record`]), the walker seam that
//! decouples the engine from any particular message encoding
//! ([`FieldWalk`], [`FieldVisitor`]), and the case-insensitive call
//! metadata the RPC framework supplies ([`CallMetadata`]).

pub mod error;
pub mod metadata;
pub mod record;
pub mod types;

pub use error::*;
pub use metadata::*;
pub use record::*;
pub use types::*;
