use crate::app::{AppRegistry, FirebaseApp, FirebaseAppSettings};
use crate::auth::{get_auth, Auth, GoogleAuthProvider, OAuthProvider, OAuthProviderFactory};
use crate::bootstrap::error::BootstrapResult;
use crate::config::FirebaseConfig;
use crate::firestore::{get_firestore, Firestore};

/// The backend-as-a-service boundary.
///
/// [`initialize`](super::initialize) only talks to the backend through these four
/// factories, so tests can substitute an implementation that records calls.
pub trait Backend {
    type App: Clone;
    type Auth;
    type Provider;
    type Db;

    fn create_application(&self, config: &FirebaseConfig) -> BootstrapResult<Self::App>;

    fn create_auth_client(&self, app: &Self::App) -> BootstrapResult<Self::Auth>;

    /// Pure; cannot fail.
    fn create_google_provider(&self) -> Self::Provider;

    fn create_firestore_client(&self, app: &Self::App) -> BootstrapResult<Self::Db>;
}

/// Backend built on this crate's app registry, auth and Firestore clients.
#[derive(Debug, Default)]
pub struct FirebaseBackend {
    registry: AppRegistry,
    settings: FirebaseAppSettings,
}

impl FirebaseBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses `settings` (app name, data collection flag) for every app this backend creates.
    pub fn with_settings(settings: FirebaseAppSettings) -> Self {
        Self {
            registry: AppRegistry::new(),
            settings,
        }
    }

    pub fn registry(&self) -> &AppRegistry {
        &self.registry
    }
}

impl Backend for FirebaseBackend {
    type App = FirebaseApp;
    type Auth = Auth;
    type Provider = OAuthProvider;
    type Db = Firestore;

    fn create_application(&self, config: &FirebaseConfig) -> BootstrapResult<FirebaseApp> {
        config.validate()?;
        let app = self
            .registry
            .initialize_app(config.clone().into_options(), Some(self.settings.clone()))?;
        Ok(app)
    }

    fn create_auth_client(&self, app: &FirebaseApp) -> BootstrapResult<Auth> {
        Ok(get_auth(app)?)
    }

    fn create_google_provider(&self) -> OAuthProvider {
        GoogleAuthProvider::new()
    }

    fn create_firestore_client(&self, app: &FirebaseApp) -> BootstrapResult<Firestore> {
        Ok(get_firestore(app)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppError;
    use crate::bootstrap::BootstrapError;

    fn config(api_key: &str) -> FirebaseConfig {
        FirebaseConfig {
            api_key: api_key.into(),
            auth_domain: "p1.firebaseapp.com".into(),
            project_id: "p1".into(),
            storage_bucket: "p1.appspot.com".into(),
            messaging_sender_id: "123".into(),
            app_id: "1:123:web:abc".into(),
        }
    }

    #[test]
    fn same_config_reuses_the_registered_app() {
        let backend = FirebaseBackend::new();
        let first = backend.create_application(&config("K")).unwrap();
        let second = backend.create_application(&config("K")).unwrap();
        assert!(first.ptr_eq(&second));
        assert_eq!(backend.registry().get_apps().len(), 1);
    }

    #[test]
    fn conflicting_config_is_an_initialization_error() {
        let backend = FirebaseBackend::new();
        backend.create_application(&config("K")).unwrap();
        let err = backend.create_application(&config("other")).unwrap_err();
        assert!(matches!(
            err,
            BootstrapError::Initialization(AppError::DuplicateApp { .. })
        ));
    }

    #[test]
    fn malformed_config_never_reaches_the_registry() {
        let backend = FirebaseBackend::new();
        let err = backend.create_application(&config("")).unwrap_err();
        assert!(matches!(err, BootstrapError::Configuration(_)));
        assert!(backend.registry().get_apps().is_empty());
    }

    #[test]
    fn settings_name_the_app() {
        let backend = FirebaseBackend::with_settings(FirebaseAppSettings {
            name: Some("web".into()),
            automatic_data_collection_enabled: Some(false),
        });
        let app = backend.create_application(&config("K")).unwrap();
        assert_eq!(app.name(), "web");
        assert!(!app.automatic_data_collection_enabled());
    }

    #[test]
    fn client_factories_fail_on_deleted_app() {
        let backend = FirebaseBackend::new();
        let app = backend.create_application(&config("K")).unwrap();
        backend.registry().delete_app(&app).unwrap();
        assert!(matches!(
            backend.create_auth_client(&app),
            Err(BootstrapError::Client { client: "auth", .. })
        ));
        assert!(matches!(
            backend.create_firestore_client(&app),
            Err(BootstrapError::Client { client: "firestore", .. })
        ));
    }
}
