//! Collaborators the controller drives but does not own.

use serde::Serialize;

use crate::constants::{FEEDBACK_EMAIL, FEEDBACK_MIME_TYPE, FEEDBACK_SUBJECT};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoundaryError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),
}

/// The settings surface that shows or hides the rating widget.
///
/// Must only be driven from the UI thread.
pub trait AffordanceHost {
    type Handle;

    /// Inflate the rating widget into the surface.
    fn add_affordance(&mut self) -> Result<(), BoundaryError>;

    /// Look up an attached widget by key.
    fn find_affordance(&self, key: &str) -> Option<Self::Handle>;

    fn remove_affordance(&mut self, handle: Self::Handle) -> Result<(), BoundaryError>;
}

/// Navigation that leaves the app. Results are never observed.
pub trait ExternalActions {
    fn open_store_listing(&self, url: &str) -> Result<(), BoundaryError>;

    fn open_contact_chooser(&self, request: &ContactRequest) -> Result<(), BoundaryError>;
}

/// Pre-filled message for the share/contact chooser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactRequest {
    pub recipient: String,
    pub subject: String,
    pub mime_type: String,
}

impl ContactRequest {
    pub fn feedback() -> Self {
        Self {
            recipient: FEEDBACK_EMAIL.to_string(),
            subject: FEEDBACK_SUBJECT.to_string(),
            mime_type: FEEDBACK_MIME_TYPE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedback_request() {
        let request = ContactRequest::feedback();
        assert_eq!(request.mime_type, "message/rfc822");
        assert!(request.recipient.contains("tasomaniac+openlinkwith@gmail.com"));
    }
}
