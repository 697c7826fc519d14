//! Two-part application component names (`package/class`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::PreferenceError;

/// Names an application package and the entry point inside it.
///
/// Serialized as its flattened string so deserializing goes through the codec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ComponentName {
    package: String,
    class: String,
}

impl ComponentName {
    /// Builds a component name. A class starting with `.` is resolved
    /// against the package.
    pub fn new(
        package: impl Into<String>,
        class: impl Into<String>,
    ) -> Result<Self, PreferenceError> {
        let package = package.into();
        let class = class.into();
        if package.is_empty() || class.is_empty() || package.contains('/') {
            return Err(PreferenceError::Codec(format!("{package}/{class}")));
        }
        let class = if class.starts_with('.') {
            if class.len() == 1 {
                return Err(PreferenceError::Codec(format!("{package}/{class}")));
            }
            format!("{package}{class}")
        } else {
            class
        };
        Ok(Self { package, class })
    }

    /// Parses the flattened `package/class` form.
    pub fn unflatten(flat: &str) -> Result<Self, PreferenceError> {
        let (package, class) = flat
            .split_once('/')
            .ok_or_else(|| PreferenceError::Codec(flat.to_string()))?;
        Self::new(package, class).map_err(|_| PreferenceError::Codec(flat.to_string()))
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn class(&self) -> &str {
        &self.class
    }

    /// Canonical stored form, always with the fully qualified class.
    pub fn flatten_to_string(&self) -> String {
        format!("{}/{}", self.package, self.class)
    }

    /// Shorter form that abbreviates a class living inside the package.
    pub fn flatten_to_short_string(&self) -> String {
        match self.class.strip_prefix(self.package.as_str()) {
            Some(rest) if rest.starts_with('.') => format!("{}/{}", self.package, rest),
            _ => self.flatten_to_string(),
        }
    }
}

impl fmt::Display for ComponentName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.flatten_to_string())
    }
}

impl FromStr for ComponentName {
    type Err = PreferenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::unflatten(s)
    }
}

impl TryFrom<String> for ComponentName {
    type Error = PreferenceError;

    fn try_from(flat: String) -> Result<Self, Self::Error> {
        Self::unflatten(&flat)
    }
}

impl From<ComponentName> for String {
    fn from(name: ComponentName) -> Self {
        name.flatten_to_string()
    }
}
