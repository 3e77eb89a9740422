use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use url::Url;

use crate::app::FirebaseApp;
use crate::auth::error::{AuthError, AuthResult};
use crate::logger::Logger;

pub(crate) const DEFAULT_IDENTITY_TOOLKIT_ENDPOINT: &str =
    "https://identitytoolkit.googleapis.com/v1";

static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("@firebase/auth"));

/// Authentication client bound to a single [`FirebaseApp`].
///
/// Constructing an `Auth` only captures configuration; no request is sent until a
/// sign-in or session operation runs.
#[derive(Clone)]
pub struct Auth {
    inner: Arc<AuthInner>,
}

struct AuthInner {
    app: FirebaseApp,
    api_key: String,
    language_code: Mutex<Option<String>>,
    identity_toolkit_endpoint: Mutex<String>,
}

impl Auth {
    /// Binds a new client to `app`. Fails when the app has no API key.
    pub fn new(app: FirebaseApp) -> AuthResult<Self> {
        let api_key = app
            .options()
            .api_key
            .ok_or_else(|| AuthError::InvalidCredential("Missing API key".into()))?;

        Ok(Self {
            inner: Arc::new(AuthInner {
                app,
                api_key,
                language_code: Mutex::new(None),
                identity_toolkit_endpoint: Mutex::new(
                    DEFAULT_IDENTITY_TOOLKIT_ENDPOINT.to_string(),
                ),
            }),
        })
    }

    pub fn app(&self) -> &FirebaseApp {
        &self.inner.app
    }

    pub fn api_key(&self) -> &str {
        &self.inner.api_key
    }

    pub fn auth_domain(&self) -> Option<String> {
        self.inner.app.options().auth_domain
    }

    pub fn project_id(&self) -> Option<String> {
        self.inner.app.options().project_id
    }

    pub fn language_code(&self) -> Option<String> {
        self.inner
            .language_code
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sets the locale hint forwarded to identity providers.
    pub fn set_language_code(&self, language_code: Option<String>) {
        *self
            .inner
            .language_code
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = language_code;
    }

    pub fn identity_toolkit_endpoint(&self) -> String {
        self.inner
            .identity_toolkit_endpoint
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Points the client at another Identity Toolkit endpoint, e.g. the local emulator.
    ///
    /// The endpoint must be an absolute `http(s)` URL; otherwise the current one is kept.
    pub fn set_identity_toolkit_endpoint(&self, endpoint: impl Into<String>) -> AuthResult<()> {
        let endpoint = endpoint.into();
        let parsed = Url::parse(&endpoint)
            .map_err(|err| AuthError::InvalidEndpoint(format!("{endpoint}: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(AuthError::InvalidEndpoint(format!(
                "{endpoint}: expected an http or https URL"
            )));
        }
        LOGGER.debug(format!(
            "Identity Toolkit endpoint for app '{}' set to {endpoint}",
            self.inner.app.name()
        ));
        *self
            .inner
            .identity_toolkit_endpoint
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = endpoint;
        Ok(())
    }

    /// URL of the `accounts:<method>` REST call, e.g. `signInWithIdp`.
    pub fn endpoint_url(&self, method: &str) -> AuthResult<Url> {
        let base = self.identity_toolkit_endpoint();
        let endpoint = format!("{}/accounts:{}", base.trim_end_matches('/'), method);
        let mut url = Url::parse(&endpoint)
            .map_err(|err| AuthError::InvalidEndpoint(format!("{endpoint}: {err}")))?;
        url.query_pairs_mut().append_pair("key", self.api_key());
        Ok(url)
    }
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("app", &self.inner.app.name())
            .field("auth_domain", &self.auth_domain())
            .field("identity_toolkit_endpoint", &self.identity_toolkit_endpoint())
            .finish()
    }
}

/// Returns an authentication client for `app`.
///
/// Every call builds a fresh client; clients created from the same app are
/// interchangeable.
pub fn get_auth(app: &FirebaseApp) -> AuthResult<Auth> {
    app.check_destroyed()?;
    let auth = Auth::new(app.clone())?;
    LOGGER.debug(format!("Auth client created for app '{}'", app.name()));
    Ok(auth)
}
