//! Event sink abstraction for fire-and-forget analytics.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::AnalyticsEvent;

/// Trait for reporting analytics events.
///
/// Implementations must not block and never report failure back to the
/// caller; a lost event is preferable to an interrupted user flow.
pub trait EventSink: Send + Sync {
    fn send_event(&self, category: &str, action: &str, label: &str);
}

/// Type alias for shared event sink reference.
pub type EventSinkRef = Arc<dyn EventSink>;

/// In-memory event sink for testing.
///
/// Captures all sent events for later inspection.
#[derive(Default)]
pub struct InMemoryEventSink {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<AnalyticsEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Get all captured events.
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.lock().clone()
    }

    /// Get events for a specific action.
    pub fn events_for(&self, action: &str) -> Vec<AnalyticsEvent> {
        self.lock()
            .iter()
            .filter(|e| e.action == action)
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl EventSink for InMemoryEventSink {
    fn send_event(&self, category: &str, action: &str, label: &str) {
        self.lock().push(AnalyticsEvent::new(category, action, label));
    }
}

/// No-op sink that discards all events.
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn send_event(&self, _category: &str, _action: &str, _label: &str) {}
}

/// Writes events to the `tracing` log instead of an analytics backend.
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn send_event(&self, category: &str, action: &str, label: &str) {
        tracing::info!(category, action, label, "analytics event");
    }
}
