//! Analytics event contracts.
//!
//! Engagement code reports what the user did through the [`EventSink`]
//! trait, keeping the analytics transport out of the core logic.

mod sink;

pub use sink::{EventSink, EventSinkRef, InMemoryEventSink, NullEventSink, TracingEventSink};

use serde::{Deserialize, Serialize};

/// A single analytics hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub category: String,
    pub action: String,
    pub label: String,
}

impl AnalyticsEvent {
    pub fn new(
        category: impl Into<String>,
        action: impl Into<String>,
        label: impl Into<String>,
    ) -> Self {
        Self {
            category: category.into(),
            action: action.into(),
            label: label.into(),
        }
    }
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// Category for everything the rating prompt reports.
    pub const ASK_FOR_RATING: &str = "AskForRating";
    /// Rating affordance was attached to the settings surface.
    pub const ADDED: &str = "Added";
    /// Label sent with [`ADDED`].
    pub const NEW: &str = "New";
    /// User picked a star value.
    pub const RATING_CLICKED: &str = "Rating Clicked";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analytics_event_deserialize() {
        let json = r#"{"category": "AskForRating", "action": "Added", "label": "New"}"#;
        let event: AnalyticsEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            AnalyticsEvent::new(event_names::ASK_FOR_RATING, event_names::ADDED, event_names::NEW)
        );
    }
}
