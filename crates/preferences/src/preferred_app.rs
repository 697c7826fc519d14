use serde::{Deserialize, Serialize};

use crate::{ComponentName, PreferenceError};

/// Persisted association between a host and the app that opens it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreferredApp {
    pub id: i64,
    pub host: String,
    /// Flattened [`ComponentName`], parsed lazily by [`Self::component_name`].
    pub component: String,
    /// `true` for "always open with", `false` for "just once".
    pub preferred: bool,
}

impl PreferredApp {
    pub fn component_name(&self) -> Result<ComponentName, PreferenceError> {
        ComponentName::unflatten(&self.component)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_component_name_parses_lazily() {
        let app = PreferredApp {
            id: 1,
            host: "example.com".to_string(),
            component: "com.browser/.Main".to_string(),
            preferred: true,
        };
        assert_eq!(app.component_name().unwrap().class(), "com.browser.Main");
    }

    #[test]
    fn test_component_name_error_is_visible() {
        let app = PreferredApp {
            id: 1,
            host: "example.com".to_string(),
            component: "garbage".to_string(),
            preferred: false,
        };
        assert!(matches!(app.component_name(), Err(PreferenceError::Codec(_))));
    }
}
