use std::collections::HashMap;

use url::Url;

use super::pkce::PkcePair;
use super::OAuthRequest;
use crate::auth::api::Auth;
use crate::auth::error::{AuthError, AuthResult};

// Query keys set by `build_request` itself; custom parameters cannot override them.
const RESERVED_PARAMETERS: &[&str] = &[
    "apiKey",
    "auth_domain",
    "client_id",
    "code_challenge",
    "code_challenge_method",
    "hl",
    "redirect_uri",
    "response_type",
    "scope",
    "state",
];

/// Stateless description of an OAuth identity provider.
///
/// The provider stores configuration (scopes, custom parameters, language hint)
/// and turns it into an [`OAuthRequest`] for a given [`Auth`] instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OAuthProvider {
    provider_id: String,
    authorization_endpoint: String,
    scopes: Vec<String>,
    custom_parameters: HashMap<String, String>,
    language_code: Option<String>,
    pkce_enabled: bool,
}

impl OAuthProvider {
    pub fn new(provider_id: impl Into<String>, authorization_endpoint: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            authorization_endpoint: authorization_endpoint.into(),
            scopes: Vec::new(),
            custom_parameters: HashMap::new(),
            language_code: None,
            pkce_enabled: false,
        }
    }

    /// Returns the provider identifier (e.g. `google.com`).
    pub fn provider_id(&self) -> &str {
        &self.provider_id
    }

    pub fn authorization_endpoint(&self) -> &str {
        &self.authorization_endpoint
    }

    pub fn scopes(&self) -> &[String] {
        &self.scopes
    }

    pub fn custom_parameters(&self) -> &HashMap<String, String> {
        &self.custom_parameters
    }

    pub fn language_code(&self) -> Option<&str> {
        self.language_code.as_deref()
    }

    /// Adds a scope to the provider if it has not been added yet.
    pub fn add_scope(&mut self, scope: impl Into<String>) {
        let value = scope.into();
        if !self.scopes.contains(&value) {
            self.scopes.push(value);
        }
    }

    pub fn set_scopes<I, S>(&mut self, scopes: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scopes.clear();
        for scope in scopes {
            self.add_scope(scope);
        }
    }

    pub fn set_custom_parameters(&mut self, parameters: HashMap<String, String>) -> &mut Self {
        self.custom_parameters = parameters;
        self
    }

    pub fn set_language_code(&mut self, value: impl Into<String>) -> &mut Self {
        self.language_code = Some(value.into());
        self
    }

    pub fn enable_pkce(&mut self) -> &mut Self {
        self.pkce_enabled = true;
        self
    }

    pub fn disable_pkce(&mut self) -> &mut Self {
        self.pkce_enabled = false;
        self
    }

    pub fn pkce_enabled(&self) -> bool {
        self.pkce_enabled
    }

    /// Builds the authorization request for `auth`'s project.
    ///
    /// The provider's own language hint wins over the one set on `auth`.
    pub fn build_request(&self, auth: &Auth) -> AuthResult<OAuthRequest> {
        let mut url = Url::parse(&self.authorization_endpoint).map_err(|err| {
            AuthError::InvalidCredential(format!(
                "Invalid authorization endpoint for provider {}: {err}",
                self.provider_id
            ))
        })?;

        let language_code = self
            .language_code
            .clone()
            .or_else(|| auth.language_code());
        let pkce_pair = self.pkce_enabled.then(PkcePair::generate);

        {
            let mut pairs = url.query_pairs_mut();
            if !self.scopes.is_empty() {
                pairs.append_pair("scope", &self.scopes.join(" "));
            }
            if let Some(lang) = &language_code {
                pairs.append_pair("hl", lang);
            }
            if let Some(auth_domain) = auth.auth_domain() {
                pairs.append_pair("auth_domain", &auth_domain);
            }
            pairs.append_pair("apiKey", auth.api_key());

            let mut custom: Vec<_> = self
                .custom_parameters
                .iter()
                .filter(|(key, _)| !RESERVED_PARAMETERS.contains(&key.as_str()))
                .collect();
            custom.sort();
            for (key, value) in custom {
                pairs.append_pair(key, value);
            }

            if let Some(pkce) = &pkce_pair {
                pairs.append_pair("code_challenge", pkce.code_challenge());
                pairs.append_pair("code_challenge_method", pkce.method());
            }
        }

        let mut request = OAuthRequest::new(self.provider_id.clone(), String::from(url))
            .with_custom_parameters(self.custom_parameters.clone())
            .with_pkce(pkce_pair);
        if let Some(lang) = language_code {
            request = request.with_language_code(lang);
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{FirebaseApp, FirebaseAppConfig, FirebaseOptions};
    use crate::auth::{get_auth, GoogleAuthProvider, OAuthProviderFactory};

    fn test_auth() -> Auth {
        let options = FirebaseOptions {
            api_key: Some("test-key".into()),
            auth_domain: Some("p1.firebaseapp.com".into()),
            project_id: Some("p1".into()),
            ..Default::default()
        };
        let app = FirebaseApp::new(options, FirebaseAppConfig::new("oauth-test", false));
        get_auth(&app).expect("auth")
    }

    fn query(request: &OAuthRequest) -> HashMap<String, String> {
        Url::parse(&request.auth_url)
            .unwrap()
            .query_pairs()
            .into_owned()
            .collect()
    }

    #[test]
    fn google_request_carries_project_parameters() {
        let auth = test_auth();
        let request = GoogleAuthProvider::new().build_request(&auth).unwrap();
        let params = query(&request);

        assert_eq!(request.provider_id, "google.com");
        assert!(request
            .auth_url
            .starts_with("https://accounts.google.com/o/oauth2/v2/auth?"));
        assert_eq!(params["scope"], "profile email");
        assert_eq!(params["auth_domain"], "p1.firebaseapp.com");
        assert_eq!(params["apiKey"], "test-key");
        assert_eq!(params["prompt"], "select_account");
        assert_eq!(params["code_challenge_method"], "S256");
        let pkce = request.pkce().expect("pkce pair");
        assert_eq!(params["code_challenge"], pkce.code_challenge());
    }

    #[test]
    fn language_hint_falls_back_to_auth() {
        let auth = test_auth();
        auth.set_language_code(Some("it".into()));
        let mut provider = OAuthProvider::new("example.com", "https://example.com/authorize");
        let request = provider.build_request(&auth).unwrap();
        assert_eq!(query(&request)["hl"], "it");
        assert!(request.pkce().is_none());

        provider.set_language_code("fr");
        let request = provider.build_request(&auth).unwrap();
        assert_eq!(query(&request)["hl"], "fr");
        assert_eq!(request.language_code.as_deref(), Some("fr"));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let auth = test_auth();
        let provider = OAuthProvider::new("broken", "not a url");
        let err = provider.build_request(&auth).unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredential(_)));
    }

    #[test]
    fn custom_parameters_cannot_override_reserved_keys() {
        let auth = test_auth();
        let mut provider = OAuthProvider::new("example.com", "https://example.com/authorize");
        provider.add_scope("openid");
        provider.set_custom_parameters(HashMap::from([
            ("apiKey".to_string(), "other-key".to_string()),
            ("scope".to_string(), "admin".to_string()),
            ("login_hint".to_string(), "ada@example.com".to_string()),
        ]));

        let request = provider.build_request(&auth).unwrap();
        let pairs: Vec<(String, String)> = Url::parse(&request.auth_url)
            .unwrap()
            .query_pairs()
            .into_owned()
            .collect();
        let values = |name: &str| {
            pairs
                .iter()
                .filter(|(key, _)| key == name)
                .map(|(_, value)| value.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(values("apiKey"), ["test-key"]);
        assert_eq!(values("scope"), ["openid"]);
        assert_eq!(values("login_hint"), ["ada@example.com"]);
    }

    #[test]
    fn set_scopes_deduplicates() {
        let mut provider = OAuthProvider::new("example.com", "https://example.com/authorize");
        provider.set_scopes(["a", "b", "a"]);
        assert_eq!(provider.scopes(), &["a".to_string(), "b".to_string()]);
    }
}
