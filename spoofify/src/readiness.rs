//! Model readiness gate
//!
//! Tracks whether the warm-up inference call has finished. The flag only ever
//! moves from not-ready to ready, so an atomic load/store is all the
//! synchronization it needs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared handle to the process-wide readiness flag
///
/// Cloning yields another handle to the same flag.
#[derive(Debug, Clone, Default)]
pub struct ReadinessGate {
    ready: Arc<AtomicBool>,
}

impl ReadinessGate {
    /// Create a gate in the not-ready state
    pub fn new() -> Self {
        Self::default()
    }

    /// Non-blocking readiness check
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    /// Mark the model as ready. Idempotent.
    pub fn mark_ready(&self) {
        if !self.ready.swap(true, Ordering::AcqRel) {
            tracing::info!("Language model marked ready");
        }
    }
}
