//! Rating prompt state machine.

use std::mem;

use openwith_events::{event_names, EventSinkRef};
use serde::Serialize;

use crate::boundary::{AffordanceHost, ContactRequest, ExternalActions};
use crate::condition::DisplayCondition;
use crate::constants::{
    AFFORDANCE_KEY, DEFAULT_GOOD_RATING, MAX_RATING, MIN_RATING, STORE_LISTING_URL,
};

/// Observable state of the rating prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RatingState {
    Hidden,
    Visible,
    /// A low rating was given and the feedback dialog is open.
    AwaitingFeedbackChoice,
    /// Removed for this session. The next evaluation starts over.
    Dismissed,
}

/// Exits of the low-rating feedback dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackChoice {
    /// Close the dialog, ask again later.
    Cancel,
    /// Never ask again.
    Never,
    /// Write to the developer.
    Submit,
}

enum Phase<H> {
    Hidden,
    /// Added to the surface but not found by key yet. Never added twice.
    Attaching,
    Visible(H),
    AwaitingFeedbackChoice(H),
    Dismissed,
}

impl<H> Phase<H> {
    fn state(&self) -> RatingState {
        match self {
            Phase::Hidden | Phase::Attaching => RatingState::Hidden,
            Phase::Visible(_) => RatingState::Visible,
            Phase::AwaitingFeedbackChoice(_) => RatingState::AwaitingFeedbackChoice,
            Phase::Dismissed => RatingState::Dismissed,
        }
    }
}

/// Decides whether the rating widget is shown and handles what the user
/// does with it.
///
/// Driven from the UI thread only. Collaborator failures are logged and
/// never abort a transition.
pub struct RatingEngagementController<C, H: AffordanceHost, A> {
    condition: C,
    host: H,
    actions: A,
    events: EventSinkRef,
    good_rating: u8,
    phase: Phase<H::Handle>,
}

impl<C, H, A> RatingEngagementController<C, H, A>
where
    C: DisplayCondition,
    H: AffordanceHost,
    A: ExternalActions,
{
    pub fn new(condition: C, host: H, actions: A, events: EventSinkRef) -> Self {
        Self {
            condition,
            host,
            actions,
            events,
            good_rating: DEFAULT_GOOD_RATING,
            phase: Phase::Hidden,
        }
    }

    /// Override the lowest rating that counts as positive.
    pub fn with_good_rating(mut self, good_rating: u8) -> Self {
        self.good_rating = good_rating.clamp(MIN_RATING, MAX_RATING);
        self
    }

    pub fn state(&self) -> RatingState {
        self.phase.state()
    }

    pub fn condition(&self) -> &C {
        &self.condition
    }

    pub fn condition_mut(&mut self) -> &mut C {
        &mut self.condition
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn actions(&self) -> &A {
        &self.actions
    }

    /// Reconcile the widget with the display condition.
    ///
    /// Attaching and the "Added" event happen only on a change of state.
    pub fn on_evaluate(&mut self) {
        let should_display = self.condition.should_display();
        let phase = mem::replace(&mut self.phase, Phase::Hidden);

        self.phase = match (should_display, phase) {
            (true, Phase::Hidden | Phase::Dismissed) => self.attach(),
            (true, Phase::Attaching) => self.find_attached(),
            (true, attached) => attached,
            (false, Phase::Visible(handle) | Phase::AwaitingFeedbackChoice(handle)) => {
                self.detach(handle);
                Phase::Hidden
            }
            (false, Phase::Attaching) => match self.host.find_affordance(AFFORDANCE_KEY) {
                Some(handle) => {
                    self.detach(handle);
                    Phase::Hidden
                }
                None => Phase::Attaching,
            },
            (false, Phase::Hidden | Phase::Dismissed) => Phase::Hidden,
        };
    }

    /// Handle a star rating from the widget.
    ///
    /// Ignored unless the widget is visible. Branching uses the rating
    /// clamped into 1..=5; analytics get the value as submitted.
    pub fn on_rating_submitted(&mut self, rating: u8) {
        let handle = match mem::replace(&mut self.phase, Phase::Hidden) {
            Phase::Visible(handle) => handle,
            other => {
                tracing::debug!(rating, state = ?other.state(), "Ignoring rating");
                self.phase = other;
                return;
            }
        };

        let stars = rating.clamp(MIN_RATING, MAX_RATING);
        if stars >= self.good_rating {
            if let Err(e) = self.actions.open_store_listing(STORE_LISTING_URL) {
                tracing::warn!("Failed to open store listing: {}", e);
            }
            self.condition.set_already_shown(true);
            self.detach(handle);
            self.phase = Phase::Dismissed;
        } else {
            tracing::debug!(stars, "Low rating, asking for feedback");
            self.phase = Phase::AwaitingFeedbackChoice(handle);
        }

        self.events.send_event(
            event_names::ASK_FOR_RATING,
            event_names::RATING_CLICKED,
            &rating.to_string(),
        );
    }

    /// Apply a button press in the feedback dialog.
    ///
    /// The widget stays attached until [`Self::on_feedback_dialog_closed`].
    pub fn choose_feedback(&mut self, choice: FeedbackChoice) {
        if !matches!(self.phase, Phase::AwaitingFeedbackChoice(_)) {
            tracing::debug!(?choice, "No feedback dialog open");
            return;
        }

        match choice {
            FeedbackChoice::Cancel => {}
            FeedbackChoice::Never => self.condition.set_already_shown(true),
            FeedbackChoice::Submit => {
                if let Err(e) = self.actions.open_contact_chooser(&ContactRequest::feedback()) {
                    tracing::warn!("Failed to open contact chooser: {}", e);
                }
            }
        }
    }

    /// The feedback dialog went away, by any route. Always removes the widget.
    pub fn on_feedback_dialog_closed(&mut self) {
        match mem::replace(&mut self.phase, Phase::Hidden) {
            Phase::AwaitingFeedbackChoice(handle) => {
                self.detach(handle);
                self.phase = Phase::Dismissed;
            }
            other => self.phase = other,
        }
    }

    /// Press `choice` (if any) and close the dialog.
    pub fn complete_feedback(&mut self, choice: Option<FeedbackChoice>) {
        if let Some(choice) = choice {
            self.choose_feedback(choice);
        }
        self.on_feedback_dialog_closed();
    }

    fn attach(&mut self) -> Phase<H::Handle> {
        if let Err(e) = self.host.add_affordance() {
            tracing::warn!("Failed to attach rating prompt: {}", e);
            return Phase::Hidden;
        }
        self.find_attached()
    }

    fn find_attached(&mut self) -> Phase<H::Handle> {
        let Some(handle) = self.host.find_affordance(AFFORDANCE_KEY) else {
            tracing::warn!("Rating prompt missing after attach, will look again");
            return Phase::Attaching;
        };

        tracing::debug!("Rating prompt attached");
        self.events
            .send_event(event_names::ASK_FOR_RATING, event_names::ADDED, event_names::NEW);
        Phase::Visible(handle)
    }

    fn detach(&mut self, handle: H::Handle) {
        if let Err(e) = self.host.remove_affordance(handle) {
            tracing::warn!("Failed to detach rating prompt: {}", e);
        }
        tracing::debug!("Rating prompt detached");
    }
}
