use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use veil_core::FieldKind;

use crate::disposition::Disposition;

// ---------------------------------------------------------------------------
// AuditSink — per-field minimization event emission
// ---------------------------------------------------------------------------

/// One minimization decision, emitted per examined field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimizationEvent {
    pub field: String,
    pub kind: FieldKind,
    pub disposition: Disposition,
}

/// Trait for recording minimization decisions.
///
/// Sink failures never fail the call; the engine logs them and keeps
/// walking, since minimization must complete even when observability
/// does not.
pub trait AuditSink: Send + Sync {
    fn emit(&self, event: &MinimizationEvent) -> Result<(), String>;
}

/// In-memory audit sink for testing.
#[derive(Default)]
pub struct InMemoryAuditSink {
    events: Mutex<Vec<MinimizationEvent>>,
}

impl InMemoryAuditSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<MinimizationEvent> {
        self.events
            .lock()
            .expect("audit sink lock poisoned")
            .clone()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .expect("audit sink lock poisoned")
            .clear();
    }
}

impl AuditSink for InMemoryAuditSink {
    fn emit(&self, event: &MinimizationEvent) -> Result<(), String> {
        self.events
            .lock()
            .map_err(|_| "audit sink lock poisoned".to_string())?
            .push(event.clone());
        Ok(())
    }
}
