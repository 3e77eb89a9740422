use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::app::errors::{AppError, AppResult};

/// Project identifiers handed to the backend when an app is registered.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FirebaseOptions {
    pub api_key: Option<String>,
    pub auth_domain: Option<String>,
    pub project_id: Option<String>,
    pub storage_bucket: Option<String>,
    pub messaging_sender_id: Option<String>,
    pub app_id: Option<String>,
}

impl FirebaseOptions {
    pub(crate) fn is_defined(&self) -> bool {
        self.api_key.is_some()
            || self.auth_domain.is_some()
            || self.project_id.is_some()
            || self.storage_bucket.is_some()
            || self.messaging_sender_id.is_some()
            || self.app_id.is_some()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FirebaseAppSettings {
    pub name: Option<String>,
    pub automatic_data_collection_enabled: Option<bool>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FirebaseAppConfig {
    pub name: Arc<str>,
    pub automatic_data_collection_enabled: bool,
}

impl FirebaseAppConfig {
    pub fn new(name: impl Into<String>, automatic: bool) -> Self {
        Self {
            name: Arc::from(name.into().into_boxed_str()),
            automatic_data_collection_enabled: automatic,
        }
    }
}

/// Handle to a registered Firebase app.
///
/// Clones share the same underlying app; use [`FirebaseApp::ptr_eq`] to check
/// whether two handles refer to the same registration.
#[derive(Clone)]
pub struct FirebaseApp {
    inner: Arc<FirebaseAppInner>,
}

struct FirebaseAppInner {
    options: FirebaseOptions,
    config: FirebaseAppConfig,
    automatic_data_collection_enabled: AtomicBool,
    is_deleted: AtomicBool,
}

impl FirebaseApp {
    pub fn new(options: FirebaseOptions, config: FirebaseAppConfig) -> Self {
        let automatic = config.automatic_data_collection_enabled;
        Self {
            inner: Arc::new(FirebaseAppInner {
                options,
                config,
                automatic_data_collection_enabled: AtomicBool::new(automatic),
                is_deleted: AtomicBool::new(false),
            }),
        }
    }

    pub fn name(&self) -> &str {
        &self.inner.config.name
    }

    pub fn options(&self) -> FirebaseOptions {
        self.inner.options.clone()
    }

    pub fn config(&self) -> FirebaseAppConfig {
        self.inner.config.clone()
    }

    pub fn automatic_data_collection_enabled(&self) -> bool {
        self.inner
            .automatic_data_collection_enabled
            .load(Ordering::SeqCst)
    }

    pub fn set_automatic_data_collection_enabled(&self, value: bool) {
        self.inner
            .automatic_data_collection_enabled
            .store(value, Ordering::SeqCst);
    }

    pub fn is_deleted(&self) -> bool {
        self.inner.is_deleted.load(Ordering::SeqCst)
    }

    pub(crate) fn set_is_deleted(&self, value: bool) {
        self.inner.is_deleted.store(value, Ordering::SeqCst);
    }

    pub fn check_destroyed(&self) -> AppResult<()> {
        if self.is_deleted() {
            return Err(AppError::AppDeleted {
                app_name: self.name().to_owned(),
            });
        }
        Ok(())
    }

    /// Returns true when both handles point at the same registered app.
    pub fn ptr_eq(&self, other: &FirebaseApp) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl std::fmt::Debug for FirebaseApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FirebaseApp")
            .field("name", &self.name())
            .field("project_id", &self.inner.options.project_id)
            .field(
                "automatic_data_collection_enabled",
                &self.automatic_data_collection_enabled(),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let app = FirebaseApp::new(FirebaseOptions::default(), FirebaseAppConfig::new("a", true));
        let clone = app.clone();
        clone.set_automatic_data_collection_enabled(false);
        assert!(!app.automatic_data_collection_enabled());
        assert!(app.ptr_eq(&clone));
    }

    #[test]
    fn deleted_app_reports_error() {
        let app = FirebaseApp::new(
            FirebaseOptions::default(),
            FirebaseAppConfig::new("gone", true),
        );
        app.set_is_deleted(true);
        assert_eq!(
            app.check_destroyed(),
            Err(AppError::AppDeleted {
                app_name: "gone".into()
            })
        );
    }

    #[test]
    fn debug_output_omits_api_key() {
        let options = FirebaseOptions {
            api_key: Some("secret-key".into()),
            project_id: Some("p1".into()),
            ..Default::default()
        };
        let app = FirebaseApp::new(options, FirebaseAppConfig::new("dbg", true));
        let rendered = format!("{app:?}");
        assert!(rendered.contains("p1"));
        assert!(!rendered.contains("secret-key"));
    }
}
