//! Async access to preferences for callers on a UI-bound thread.
//!
//! Each call runs on tokio's blocking pool. Writes for the same host are
//! serialized by the connection lock and resolve last-write-wins.

use std::sync::Arc;

use openwith_preferences::{ComponentName, PreferredApp, PreferredAppRepository};

use crate::{Database, Result, StorageError};

#[derive(Clone)]
pub struct PreferenceStore {
    db: Arc<Database>,
}

impl PreferenceStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }

    pub async fn get_preference(&self, host: &str) -> Result<Option<PreferredApp>> {
        let host = host.to_string();
        self.run(move |db| db.get_preference(&host)).await
    }

    pub async fn set_preference(
        &self,
        host: &str,
        component: ComponentName,
        preferred: bool,
    ) -> Result<()> {
        let host = host.to_string();
        self.run(move |db| db.set_preference(&host, &component, preferred))
            .await
    }

    pub async fn clear_preference(&self, host: &str) -> Result<()> {
        let host = host.to_string();
        self.run(move |db| db.clear_preference(&host)).await
    }

    pub async fn list_preferences(&self) -> Result<Vec<PreferredApp>> {
        self.run(|db| db.list_preferences()).await
    }

    /// Component to open `host` with, without asking the user.
    ///
    /// `None` means "prompt": no "always" preference exists, or storage
    /// could not answer.
    pub async fn resolve(&self, host: &str) -> Option<ComponentName> {
        let lookup = host.to_string();
        let result = self
            .run(move |db| match db.get_preference(&lookup)? {
                Some(app) if app.preferred => Ok(Some(app.component_name()?)),
                _ => Ok(None),
            })
            .await;

        match result {
            Ok(component) => component,
            Err(e) => {
                tracing::warn!(host, "Preference lookup failed, falling back to prompt: {}", e);
                None
            }
        }
    }

    async fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Database) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = Arc::clone(&self.db);
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| StorageError::TaskJoin(e.to_string()))?
    }
}
