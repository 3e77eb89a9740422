mod pkce;
mod provider;
mod providers;

pub use pkce::PkcePair;
pub use provider::OAuthProvider;
pub use providers::{GoogleAuthProvider, OAuthProviderFactory};

use std::collections::HashMap;

/// Parameters needed to start a provider sign-in flow.
///
/// The popup or redirect machinery that opens `auth_url` lives outside this crate.
#[derive(Debug, Clone)]
pub struct OAuthRequest {
    /// Provider identifier (e.g. `google.com`).
    pub provider_id: String,
    /// Fully qualified authorization URL.
    pub auth_url: String,
    pub language_code: Option<String>,
    pub custom_parameters: HashMap<String, String>,
    pub pkce: Option<PkcePair>,
}

impl OAuthRequest {
    pub fn new(provider_id: impl Into<String>, auth_url: impl Into<String>) -> Self {
        Self {
            provider_id: provider_id.into(),
            auth_url: auth_url.into(),
            language_code: None,
            custom_parameters: HashMap::new(),
            pkce: None,
        }
    }

    pub fn with_language_code(mut self, value: impl Into<String>) -> Self {
        self.language_code = Some(value.into());
        self
    }

    pub fn with_custom_parameters(mut self, parameters: HashMap<String, String>) -> Self {
        self.custom_parameters = parameters;
        self
    }

    pub fn with_pkce(mut self, pkce: Option<PkcePair>) -> Self {
        self.pkce = pkce;
        self
    }

    pub fn pkce(&self) -> Option<&PkcePair> {
        self.pkce.as_ref()
    }
}
