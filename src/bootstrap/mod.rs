//! Start-up wiring: validate a [`FirebaseConfig`], register the app and derive the
//! database client, the auth client and the Google provider from it.
//!
//! ```no_run
//! use firebase_bootstrap::bootstrap::{initialize, FirebaseBackend};
//! use firebase_bootstrap::config::FirebaseConfig;
//!
//! let backend = FirebaseBackend::new();
//! let clients = initialize(&FirebaseConfig::from_env(), &backend)?;
//! println!("using project {}", clients.db.project_id());
//! # Ok::<(), firebase_bootstrap::bootstrap::BootstrapError>(())
//! ```
mod backend;
mod error;

#[doc(inline)]
pub use backend::{Backend, FirebaseBackend};

#[doc(inline)]
pub use error::{BootstrapError, BootstrapResult};

use std::fmt;
use std::sync::LazyLock;

use crate::config::FirebaseConfig;
use crate::logger::Logger;

static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("firebase-bootstrap"));

/// The three handles derived from one application.
pub struct FirebaseClients<B: Backend = FirebaseBackend> {
    pub app: B::App,
    pub auth: B::Auth,
    pub google_provider: B::Provider,
    pub db: B::Db,
}

impl<B: Backend> Clone for FirebaseClients<B>
where
    B::Auth: Clone,
    B::Provider: Clone,
    B::Db: Clone,
{
    fn clone(&self) -> Self {
        Self {
            app: self.app.clone(),
            auth: self.auth.clone(),
            google_provider: self.google_provider.clone(),
            db: self.db.clone(),
        }
    }
}

impl<B: Backend> fmt::Debug for FirebaseClients<B>
where
    B::App: fmt::Debug,
    B::Auth: fmt::Debug,
    B::Provider: fmt::Debug,
    B::Db: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FirebaseClients")
            .field("app", &self.app)
            .field("auth", &self.auth)
            .field("google_provider", &self.google_provider)
            .field("db", &self.db)
            .finish()
    }
}

/// Runs the start-up sequence against `backend`.
///
/// The configuration is validated before the backend is touched. Every failure is
/// returned as-is; nothing is retried.
pub fn initialize<B: Backend>(
    config: &FirebaseConfig,
    backend: &B,
) -> BootstrapResult<FirebaseClients<B>> {
    if let Err(err) = config.validate() {
        LOGGER.error(err.to_string());
        return Err(err.into());
    }

    let app = backend.create_application(config).inspect_err(|err| {
        LOGGER.error(format!("Project '{}': {err}", config.project_id));
    })?;
    let db = backend.create_firestore_client(&app)?;
    let auth = backend.create_auth_client(&app)?;
    let google_provider = backend.create_google_provider();

    LOGGER.info(format!(
        "Firebase clients ready for project '{}'",
        config.project_id
    ));
    Ok(FirebaseClients {
        app,
        auth,
        google_provider,
        db,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppError;
    use crate::config::ConfigField;
    use std::sync::Mutex;

    /// Hands out numbered apps and records every factory call.
    #[derive(Default)]
    struct RecordingBackend {
        calls: Mutex<Vec<&'static str>>,
        next_app: Mutex<u32>,
        reject: Option<AppError>,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    struct MockApp {
        id: u32,
        project_id: String,
    }

    impl RecordingBackend {
        fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl Backend for RecordingBackend {
        type App = MockApp;
        type Auth = MockApp;
        type Provider = &'static str;
        type Db = MockApp;

        fn create_application(&self, config: &FirebaseConfig) -> BootstrapResult<MockApp> {
            self.record("app");
            if let Some(err) = &self.reject {
                return Err(err.clone().into());
            }
            let mut next = self.next_app.lock().unwrap();
            *next += 1;
            Ok(MockApp {
                id: *next,
                project_id: config.project_id.clone(),
            })
        }

        fn create_auth_client(&self, app: &MockApp) -> BootstrapResult<MockApp> {
            self.record("auth");
            Ok(app.clone())
        }

        fn create_google_provider(&self) -> &'static str {
            self.record("provider");
            "google.com"
        }

        fn create_firestore_client(&self, app: &MockApp) -> BootstrapResult<MockApp> {
            self.record("db");
            Ok(app.clone())
        }
    }

    fn config() -> FirebaseConfig {
        FirebaseConfig {
            api_key: "K".into(),
            auth_domain: "d.example.com".into(),
            project_id: "p1".into(),
            storage_bucket: "p1.appspot.com".into(),
            messaging_sender_id: "123".into(),
            app_id: "1:123:web:abc".into(),
        }
    }

    #[test]
    fn clients_share_one_application() {
        let backend = RecordingBackend::default();
        let clients = initialize(&config(), &backend).unwrap();

        assert_eq!(clients.app.id, 1);
        assert_eq!(clients.db, clients.app);
        assert_eq!(clients.auth, clients.app);
        assert_eq!(clients.google_provider, "google.com");
        assert_eq!(backend.calls(), vec!["app", "db", "auth", "provider"]);
    }

    #[test]
    fn invalid_config_stops_before_any_factory() {
        let backend = RecordingBackend::default();
        let mut config = config();
        config.project_id.clear();

        let err = initialize(&config, &backend).unwrap_err();
        match err {
            BootstrapError::Configuration(err) => assert!(err.is_missing(ConfigField::ProjectId)),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(backend.calls().is_empty());
    }

    #[test]
    fn rejected_registration_propagates() {
        let backend = RecordingBackend {
            reject: Some(AppError::NoApp {
                app_name: "[DEFAULT]".into(),
            }),
            ..Default::default()
        };
        let err = initialize(&config(), &backend).unwrap_err();
        assert!(matches!(err, BootstrapError::Initialization(AppError::NoApp { .. })));
        assert_eq!(backend.calls(), vec!["app"]);
    }

    #[test]
    fn real_backend_clients_reference_project() {
        let backend = FirebaseBackend::new();
        let clients = initialize(&config(), &backend).unwrap();

        assert_eq!(clients.db.project_id(), "p1");
        assert_eq!(clients.auth.project_id().as_deref(), Some("p1"));
        assert_eq!(clients.google_provider.provider_id(), "google.com");
        assert!(clients.db.app().ptr_eq(&clients.app));
        assert!(clients.auth.app().ptr_eq(&clients.app));
    }
}
