//! Registration receivers
//!
//! The store forwards every `(id, name)` assignment to a receiver supplied at
//! initialization, synchronously and outside any store lock.

use super::CodeUnitId;
use parking_lot::Mutex;

/// Sink for code unit registrations
pub trait InvokeReceiver: Send + Sync {
    /// Called once for each newly registered code unit
    fn register_class(&self, id: CodeUnitId, name: &str);
}

impl<F> InvokeReceiver for F
where
    F: Fn(CodeUnitId, &str) + Send + Sync,
{
    fn register_class(&self, id: CodeUnitId, name: &str) {
        self(id, name);
    }
}

/// Receiver that drops every registration
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReceiver;

impl InvokeReceiver for NullReceiver {
    fn register_class(&self, _id: CodeUnitId, _name: &str) {}
}

/// Receiver that keeps the id → name table in memory
#[derive(Debug, Default)]
pub struct RecordingReceiver {
    registrations: Mutex<Vec<(CodeUnitId, String)>>,
}

impl RecordingReceiver {
    /// Create an empty receiver
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registrations seen so far, in arrival order
    #[must_use]
    pub fn registrations(&self) -> Vec<(CodeUnitId, String)> {
        self.registrations.lock().clone()
    }

    /// Name received for `id`
    #[must_use]
    pub fn name_of(&self, id: CodeUnitId) -> Option<String> {
        self.registrations
            .lock()
            .iter()
            .find(|(seen, _)| *seen == id)
            .map(|(_, name)| name.clone())
    }

    /// Number of registrations seen
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.lock().len()
    }

    /// Whether nothing was received
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.lock().is_empty()
    }
}

impl InvokeReceiver for RecordingReceiver {
    fn register_class(&self, id: CodeUnitId, name: &str) {
        self.registrations.lock().push((id, name.to_string()));
    }
}
