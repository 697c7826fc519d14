//! Rating prompt engagement.
//!
//! Decides whether the settings surface should offer a store rating and
//! routes the user's answer: high ratings go to the store listing, low
//! ratings open a feedback choice.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Domain Layer                            │
//! │  controller.rs - RatingEngagementController state machine   │
//! │  condition.rs  - DisplayCondition policy + usage tracking   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                     Boundary Layer                          │
//! │  boundary.rs - AffordanceHost, ExternalActions              │
//! │  openwith-events - EventSink for analytics                  │
//! │  openwith-settings - SettingsStore for durable state        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```ignore
//! let mut controller = RatingEngagementController::new(condition, host, actions, events);
//! controller.on_evaluate();
//! controller.on_rating_submitted(2);
//! controller.choose_feedback(FeedbackChoice::Never);
//! controller.on_feedback_dialog_closed();
//! ```

mod boundary;
mod condition;
mod constants;
mod controller;

pub use boundary::{AffordanceHost, BoundaryError, ContactRequest, ExternalActions};
pub use condition::{
    DisplayCondition, RatingPolicy, UsageDisplayCondition, KEY_ALREADY_SHOWN, KEY_FIRST_SEEN_MS,
    KEY_LAUNCH_COUNT, KEY_POLICY,
};
pub use openwith_settings::{MemorySettings, SettingsStore};
pub use constants::*;
pub use controller::{FeedbackChoice, RatingEngagementController, RatingState};
