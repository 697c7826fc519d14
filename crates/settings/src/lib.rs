//! Durable key/value settings.
//!
//! `openwith-storage` implements [`SettingsStore`] over SQLite; consumers
//! such as the rating prompt only see the trait.

use std::collections::HashMap;
use std::convert::Infallible;
use std::sync::{Arc, Mutex};

pub trait SettingsStore: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    fn get_setting(&self, key: &str) -> Result<Option<String>, Self::Error>;
    fn set_setting(&self, key: &str, value: &str) -> Result<(), Self::Error>;
}

impl<T: SettingsStore> SettingsStore for Arc<T> {
    type Error = T::Error;

    fn get_setting(&self, key: &str) -> Result<Option<String>, Self::Error> {
        (**self).get_setting(key)
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        (**self).set_setting(key, value)
    }
}

/// Process-local settings, for tests and headless runs.
#[derive(Debug, Default)]
pub struct MemorySettings {
    values: Mutex<HashMap<String, String>>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettings {
    type Error = Infallible;

    fn get_setting(&self, key: &str) -> Result<Option<String>, Self::Error> {
        let values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        Ok(values.get(key).cloned())
    }

    fn set_setting(&self, key: &str, value: &str) -> Result<(), Self::Error> {
        let mut values = self.values.lock().unwrap_or_else(|e| e.into_inner());
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
