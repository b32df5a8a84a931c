//! Per-call orchestration: handler invocation, policy extraction, and
//! the field walk that applies transforms in place.

use std::error::Error as StdError;
use std::sync::Arc;

use rand::Rng;

use veil_core::{
    CallMetadata, CoreResult, Field, FieldVisitor, FieldWalk, Record, ResponseBody,
    AUTHORIZATION_KEY,
};
use veil_cred::{Policy, Verifier};

use crate::audit::{AuditSink, MinimizationEvent};
use crate::disposition::resolve;
use crate::error::{CallError, CallResult};
use crate::transform;

// ---------------------------------------------------------------------------
// Minimizer — the response-side purpose-limitation engine
// ---------------------------------------------------------------------------

/// Response-side interceptor enforcing purpose limitation.
///
/// One instance serves many concurrent calls: it holds only the
/// credential verifier and an optional audit sink, and each call owns
/// its response exclusively for the duration of the field walk.
pub struct Minimizer {
    verifier: Verifier,
    audit_sink: Option<Arc<dyn AuditSink>>,
}

impl Minimizer {
    pub fn new(verifier: Verifier) -> Self {
        Self {
            verifier,
            audit_sink: None,
        }
    }

    /// Record every minimization decision in the given sink.
    pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
        self.audit_sink = Some(sink);
        self
    }

    /// Run one call through the engine.
    ///
    /// The handler is invoked first; its failure propagates unchanged
    /// with no minimization attempted. A successful handler must return
    /// a walkable message, otherwise the call fails closed. Credential
    /// problems do not fail the call — they degrade the policy to
    /// deny-all so every field is suppressed.
    pub fn intercept<H, E>(&self, metadata: &CallMetadata, handler: H) -> CallResult<ResponseBody, E>
    where
        H: FnOnce() -> Result<ResponseBody, E>,
        E: StdError + 'static,
    {
        self.intercept_with_rng(metadata, handler, &mut rand::thread_rng())
    }

    /// [`Minimizer::intercept`] with an explicit random source, for
    /// deterministic noising in tests.
    pub fn intercept_with_rng<H, E, R>(
        &self,
        metadata: &CallMetadata,
        handler: H,
        rng: &mut R,
    ) -> CallResult<ResponseBody, E>
    where
        H: FnOnce() -> Result<ResponseBody, E>,
        E: StdError + 'static,
        R: Rng + ?Sized,
    {
        let body = handler().map_err(CallError::Handler)?;

        let mut record = match body {
            ResponseBody::Message(record) => record,
            ResponseBody::Opaque(_) => {
                tracing::warn!("rejecting opaque response body");
                return Err(CallError::UnsupportedResponse);
            }
        };

        let policy = self.policy_for_call(metadata);
        self.minimize(&mut record, &policy, rng)?;

        Ok(ResponseBody::Message(record))
    }

    /// Derive the policy governing this call from its metadata.
    ///
    /// Missing, malformed, unverifiable, wrongly-issued, or expired
    /// credentials all land on [`Policy::deny_all`]: an unverified
    /// policy is never trusted.
    pub fn policy_for_call(&self, metadata: &CallMetadata) -> Policy {
        let Some(token) = metadata.get_first(AUTHORIZATION_KEY) else {
            tracing::warn!("no credential presented, suppressing all fields");
            return Policy::deny_all();
        };

        match self.verifier.verify(token) {
            Ok(claims) => claims.policy,
            Err(err) => {
                tracing::warn!(error = %err, "credential rejected, suppressing all fields");
                Policy::deny_all()
            }
        }
    }

    /// Resolve and apply a disposition for every field of the record.
    pub fn minimize<R: Rng + ?Sized>(
        &self,
        record: &mut Record,
        policy: &Policy,
        rng: &mut R,
    ) -> CoreResult<()> {
        let mut visitor = MinimizeVisitor {
            policy,
            rng,
            audit_sink: self.audit_sink.as_deref(),
        };
        record.walk(&mut visitor)
    }
}

// ---------------------------------------------------------------------------
// MinimizeVisitor — one walk over the response fields
// ---------------------------------------------------------------------------

struct MinimizeVisitor<'a, R: Rng + ?Sized> {
    policy: &'a Policy,
    rng: &'a mut R,
    audit_sink: Option<&'a dyn AuditSink>,
}

impl<R: Rng + ?Sized> FieldVisitor for MinimizeVisitor<'_, R> {
    fn visit(&mut self, field: &mut Field) -> CoreResult<()> {
        let disposition = resolve(field.name(), self.policy);
        tracing::trace!(
            field = field.name(),
            kind = %field.kind(),
            disposition = %disposition,
            "resolved field disposition"
        );

        if let Some(sink) = self.audit_sink {
            let event = MinimizationEvent {
                field: field.name().to_string(),
                kind: field.kind(),
                disposition,
            };
            if let Err(err) = sink.emit(&event) {
                tracing::warn!(error = %err, "audit sink failed, continuing walk");
            }
        }

        transform::apply(field, disposition, self.rng)
    }
}
