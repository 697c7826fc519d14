//! When the rating prompt is allowed to appear.

use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use openwith_settings::SettingsStore;
use serde::{Deserialize, Serialize};

use crate::boundary::BoundaryError;
use crate::constants::DEFAULT_GOOD_RATING;

pub const KEY_ALREADY_SHOWN: &str = "rating.already_shown";
pub const KEY_FIRST_SEEN_MS: &str = "rating.first_seen_ms";
pub const KEY_LAUNCH_COUNT: &str = "rating.launch_count";
pub const KEY_POLICY: &str = "rating.policy";

/// Policy deciding whether the rating prompt should be offered.
pub trait DisplayCondition {
    fn should_display(&self) -> bool;

    fn already_shown(&self) -> bool;

    /// Once `true`, the prompt is suppressed for good.
    fn set_already_shown(&mut self, shown: bool);
}

/// Thresholds for [`UsageDisplayCondition`], stored as JSON under [`KEY_POLICY`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingPolicy {
    pub min_days_installed: u32,
    pub min_launches: u32,
    pub good_rating: u8,
}

impl Default for RatingPolicy {
    fn default() -> Self {
        Self {
            min_days_installed: 3,
            min_launches: 5,
            good_rating: DEFAULT_GOOD_RATING,
        }
    }
}

impl RatingPolicy {
    /// Missing or unreadable policies fall back to the defaults.
    pub fn load<S: SettingsStore>(store: &S) -> Self {
        match store.get_setting(KEY_POLICY) {
            Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
                tracing::warn!("Invalid rating policy, using defaults: {}", e);
                Self::default()
            }),
            Ok(None) => Self::default(),
            Err(e) => {
                tracing::warn!("Failed to read rating policy: {}", e);
                Self::default()
            }
        }
    }

    pub fn save<S: SettingsStore>(&self, store: &S) -> Result<(), BoundaryError> {
        let json =
            serde_json::to_string(self).map_err(|e| BoundaryError::Unavailable(e.to_string()))?;
        store
            .set_setting(KEY_POLICY, &json)
            .map_err(|e| BoundaryError::Unavailable(e.to_string()))
    }
}

/// Shows the prompt once the app has been around long enough and used
/// often enough, until the user answers it for good.
///
/// Storage failures degrade to "do not display" and are only logged.
pub struct UsageDisplayCondition<S> {
    store: S,
    policy: RatingPolicy,
}

impl<S: SettingsStore> UsageDisplayCondition<S> {
    pub fn new(store: S) -> Self {
        let policy = RatingPolicy::load(&store);
        Self { store, policy }
    }

    pub fn with_policy(store: S, policy: RatingPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> RatingPolicy {
        self.policy
    }

    pub fn record_launch(&self, now: DateTime<Utc>) {
        if self.first_seen().is_none() {
            self.write(KEY_FIRST_SEEN_MS, &now.timestamp_millis().to_string());
        }
        let count = self.launch_count().saturating_add(1);
        self.write(KEY_LAUNCH_COUNT, &count.to_string());
        tracing::debug!(count, "Recorded launch");
    }

    pub fn launch_count(&self) -> u32 {
        self.read(KEY_LAUNCH_COUNT).unwrap_or(0)
    }

    pub fn first_seen(&self) -> Option<DateTime<Utc>> {
        self.read::<i64>(KEY_FIRST_SEEN_MS)
            .and_then(DateTime::from_timestamp_millis)
    }

    pub fn should_display_at(&self, now: DateTime<Utc>) -> bool {
        if self.already_shown() || self.launch_count() < self.policy.min_launches {
            return false;
        }
        let Some(first_seen) = self.first_seen() else {
            return false;
        };
        now - first_seen >= Duration::days(i64::from(self.policy.min_days_installed))
    }

    fn read<T: FromStr>(&self, key: &str) -> Option<T> {
        match self.store.get_setting(key) {
            Ok(value) => value.and_then(|v| v.parse().ok()),
            Err(e) => {
                tracing::warn!("Failed to read setting {}: {}", key, e);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(e) = self.store.set_setting(key, value) {
            tracing::warn!("Failed to write setting {}: {}", key, e);
        }
    }
}

impl<S: SettingsStore> DisplayCondition for UsageDisplayCondition<S> {
    fn should_display(&self) -> bool {
        self.should_display_at(Utc::now())
    }

    fn already_shown(&self) -> bool {
        self.read(KEY_ALREADY_SHOWN).unwrap_or(false)
    }

    fn set_already_shown(&mut self, shown: bool) {
        self.write(KEY_ALREADY_SHOWN, &shown.to_string());
    }
}
