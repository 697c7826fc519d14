//! Rating collaborators that print to stdout instead of driving a UI.

use openwith_rating::{
    AffordanceHost, BoundaryError, ContactRequest, DisplayCondition, ExternalActions,
    AFFORDANCE_KEY,
};

#[derive(Default)]
pub struct TerminalHost {
    attached: bool,
}

impl AffordanceHost for TerminalHost {
    type Handle = ();

    fn add_affordance(&mut self) -> Result<(), BoundaryError> {
        self.attached = true;
        println!("How would you rate Open Link With? (1-5)");
        Ok(())
    }

    fn find_affordance(&self, key: &str) -> Option<Self::Handle> {
        (self.attached && key == AFFORDANCE_KEY).then_some(())
    }

    fn remove_affordance(&mut self, _handle: Self::Handle) -> Result<(), BoundaryError> {
        self.attached = false;
        println!("Rating prompt removed.");
        Ok(())
    }
}

pub struct TerminalActions;

impl ExternalActions for TerminalActions {
    fn open_store_listing(&self, url: &str) -> Result<(), BoundaryError> {
        println!("Thanks! Leave a review at {url}");
        Ok(())
    }

    fn open_contact_chooser(&self, request: &ContactRequest) -> Result<(), BoundaryError> {
        println!(
            "Send feedback to {} (subject: {:?}, type: {})",
            request.recipient, request.subject, request.mime_type
        );
        Ok(())
    }
}

/// Lets `--force` skip usage thresholds while still persisting answers.
pub struct ForcedCondition<C> {
    inner: C,
    force: bool,
}

impl<C> ForcedCondition<C> {
    pub fn new(inner: C, force: bool) -> Self {
        Self { inner, force }
    }
}

impl<C: DisplayCondition> DisplayCondition for ForcedCondition<C> {
    fn should_display(&self) -> bool {
        self.force || self.inner.should_display()
    }

    fn already_shown(&self) -> bool {
        self.inner.already_shown()
    }

    fn set_already_shown(&mut self, shown: bool) {
        self.inner.set_already_shown(shown);
    }
}
