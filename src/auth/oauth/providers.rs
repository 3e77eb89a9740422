use super::provider::OAuthProvider;

/// Builds a preconfigured [`OAuthProvider`] for a well-known identity provider.
pub trait OAuthProviderFactory {
    fn provider_id() -> &'static str;
    fn new() -> OAuthProvider;
}

pub struct GoogleAuthProvider;

impl GoogleAuthProvider {
    /// Adds a `login_hint` custom parameter to the Google provider configuration.
    pub fn add_login_hint(provider: &mut OAuthProvider, hint: &str) {
        let mut params = provider.custom_parameters().clone();
        params.insert("login_hint".to_string(), hint.to_string());
        provider.set_custom_parameters(params);
    }
}

impl OAuthProviderFactory for GoogleAuthProvider {
    fn provider_id() -> &'static str {
        "google.com"
    }

    fn new() -> OAuthProvider {
        let mut provider = OAuthProvider::new(
            Self::provider_id(),
            "https://accounts.google.com/o/oauth2/v2/auth",
        );
        provider.add_scope("profile");
        provider.add_scope("email");
        provider.set_custom_parameters(
            [("prompt".to_string(), "select_account".to_string())]
                .into_iter()
                .collect(),
        );
        provider.enable_pkce();
        provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn google_defaults() {
        let provider = GoogleAuthProvider::new();
        assert_eq!(provider.provider_id(), "google.com");
        assert_eq!(provider.scopes(), &["profile".to_string(), "email".to_string()]);
        assert_eq!(
            provider.custom_parameters().get("prompt").map(String::as_str),
            Some("select_account")
        );
        assert!(provider.pkce_enabled());
    }

    #[test]
    fn login_hint_keeps_existing_parameters() {
        let mut provider = GoogleAuthProvider::new();
        GoogleAuthProvider::add_login_hint(&mut provider, "user@example.com");
        let params = provider.custom_parameters();
        assert_eq!(params.get("login_hint").map(String::as_str), Some("user@example.com"));
        assert!(params.contains_key("prompt"));
    }

    #[test]
    fn descriptors_are_interchangeable() {
        let first = GoogleAuthProvider::new();
        let second = GoogleAuthProvider::new();
        assert_eq!(first, second);
    }
}
