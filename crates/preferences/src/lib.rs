//! Host to application preferences.
//!
//! Domain types only. Persistence lives in `openwith-storage`, which
//! implements [`PreferredAppRepository`].

mod component;
mod preferred_app;

pub use component::ComponentName;
pub use preferred_app::PreferredApp;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreferenceError {
    #[error("malformed component name: {0:?}")]
    Codec(String),
}

/// Repository trait for host preferences.
/// Implemented by storage layer, allowing domain to remain decoupled.
///
/// Hosts are compared as exact, case-sensitive strings. Callers normalize
/// before calling if they need to.
pub trait PreferredAppRepository: Send + Sync {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Exact-match lookup. `Ok(None)` when no row exists for `host`.
    fn get_preference(&self, host: &str) -> Result<Option<PreferredApp>, Self::Error>;

    /// Insert or overwrite the record for `host`, keeping its id.
    fn set_preference(
        &self,
        host: &str,
        component: &ComponentName,
        preferred: bool,
    ) -> Result<(), Self::Error>;

    /// Remove the record for `host`. Absent hosts are not an error.
    fn clear_preference(&self, host: &str) -> Result<(), Self::Error>;

    fn list_preferences(&self) -> Result<Vec<PreferredApp>, Self::Error>;
}
