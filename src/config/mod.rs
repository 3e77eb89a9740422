//! The six-field Firebase web configuration and its validation rules.
//!
//! A [`FirebaseConfig`] can be written literally, parsed from the JSON snippet the
//! Firebase console shows for a web app, or read from `FIREBASE_*` environment
//! variables. [`FirebaseConfig::validate`] checks every field before anything is
//! handed to the backend.
mod error;

#[doc(inline)]
pub use error::{ConfigError, ConfigField, ConfigResult, FieldViolation, ViolationKind};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::app::FirebaseOptions;

const MAX_PROJECT_ID_LEN: usize = 30;
const APP_ID_PLATFORMS: [&str; 3] = ["web", "android", "ios"];

#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FirebaseConfig {
    pub api_key: String,
    pub auth_domain: String,
    pub project_id: String,
    pub storage_bucket: String,
    pub messaging_sender_id: String,
    pub app_id: String,
}

impl FirebaseConfig {
    /// Parses the web config object, e.g. `{"apiKey": "...", "projectId": "..."}`.
    ///
    /// Absent keys are left empty and reported later by [`FirebaseConfig::validate`].
    pub fn from_json(raw: &str) -> ConfigResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads the configuration from `FIREBASE_API_KEY`, `FIREBASE_AUTH_DOMAIN`,
    /// `FIREBASE_PROJECT_ID`, `FIREBASE_STORAGE_BUCKET`,
    /// `FIREBASE_MESSAGING_SENDER_ID` and `FIREBASE_APP_ID`.
    pub fn from_env() -> Self {
        Self::from_env_with(|name| std::env::var(name).ok())
    }

    /// Same as [`FirebaseConfig::from_env`] with a caller-supplied variable lookup.
    pub fn from_env_with<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |field: ConfigField| lookup(field.env_var()).unwrap_or_default();
        Self {
            api_key: read(ConfigField::ApiKey),
            auth_domain: read(ConfigField::AuthDomain),
            project_id: read(ConfigField::ProjectId),
            storage_bucket: read(ConfigField::StorageBucket),
            messaging_sender_id: read(ConfigField::MessagingSenderId),
            app_id: read(ConfigField::AppId),
        }
    }

    pub fn field(&self, field: ConfigField) -> &str {
        match field {
            ConfigField::ApiKey => &self.api_key,
            ConfigField::AuthDomain => &self.auth_domain,
            ConfigField::ProjectId => &self.project_id,
            ConfigField::StorageBucket => &self.storage_bucket,
            ConfigField::MessagingSenderId => &self.messaging_sender_id,
            ConfigField::AppId => &self.app_id,
        }
    }

    /// Checks every field and reports all violations, in field order.
    pub fn validate(&self) -> ConfigResult<()> {
        let mut violations = Vec::new();
        for field in ConfigField::ALL {
            let value = self.field(field);
            if value.trim().is_empty() {
                violations.push(FieldViolation::missing(field));
                continue;
            }
            if value.chars().any(char::is_whitespace) {
                violations.push(FieldViolation::malformed(field, "must not contain whitespace"));
                continue;
            }
            let checked = match field {
                ConfigField::ApiKey => Ok(()),
                ConfigField::AuthDomain | ConfigField::StorageBucket => check_host(value),
                ConfigField::ProjectId => check_project_id(value),
                ConfigField::MessagingSenderId => check_sender_id(value),
                ConfigField::AppId => check_app_id(value, &self.messaging_sender_id),
            };
            if let Err(reason) = checked {
                violations.push(FieldViolation::malformed(field, reason));
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Invalid { violations })
        }
    }

    /// Converts the record into the options understood by the app registry.
    pub fn into_options(self) -> FirebaseOptions {
        fn present(value: String) -> Option<String> {
            (!value.is_empty()).then_some(value)
        }
        FirebaseOptions {
            api_key: present(self.api_key),
            auth_domain: present(self.auth_domain),
            project_id: present(self.project_id),
            storage_bucket: present(self.storage_bucket),
            messaging_sender_id: present(self.messaging_sender_id),
            app_id: present(self.app_id),
        }
    }
}

impl fmt::Debug for FirebaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.api_key.is_empty() { "" } else { "<redacted>" };
        f.debug_struct("FirebaseConfig")
            .field("api_key", &api_key)
            .field("auth_domain", &self.auth_domain)
            .field("project_id", &self.project_id)
            .field("storage_bucket", &self.storage_bucket)
            .field("messaging_sender_id", &self.messaging_sender_id)
            .field("app_id", &self.app_id)
            .finish()
    }
}

fn check_host(value: &str) -> Result<(), String> {
    if value.contains("://") || value.contains('/') {
        return Err("must be a bare host name without scheme or path".into());
    }
    if !value.contains('.') || value.starts_with('.') || value.ends_with('.') {
        return Err(format!("'{value}' is not a valid host name"));
    }
    Ok(())
}

fn check_project_id(value: &str) -> Result<(), String> {
    if value.len() > MAX_PROJECT_ID_LEN {
        return Err(format!("must be at most {MAX_PROJECT_ID_LEN} characters"));
    }
    if !value.starts_with(|c: char| c.is_ascii_lowercase()) {
        return Err("must start with a lowercase letter".into());
    }
    if value.ends_with('-') {
        return Err("must not end with a hyphen".into());
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("may only contain lowercase letters, digits and hyphens".into());
    }
    Ok(())
}

fn check_sender_id(value: &str) -> Result<(), String> {
    if value.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err("must be numeric".into())
    }
}

fn check_app_id(value: &str, sender_id: &str) -> Result<(), String> {
    let parts: Vec<&str> = value.split(':').collect();
    let [version, sender, platform, hash] = parts.as_slice() else {
        return Err("must look like 1:<sender id>:<platform>:<hash>".into());
    };
    if *version != "1" {
        return Err(format!("has unsupported version '{version}'"));
    }
    if sender.is_empty() || !sender.chars().all(|c| c.is_ascii_digit()) {
        return Err("must embed a numeric sender id".into());
    }
    if !sender_id.is_empty() && *sender != sender_id {
        return Err(format!(
            "embeds sender id '{sender}' but messagingSenderId is '{sender_id}'"
        ));
    }
    if !APP_ID_PLATFORMS.contains(platform) {
        return Err(format!("has unknown platform '{platform}'"));
    }
    if hash.is_empty() || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("must end with a hexadecimal hash".into());
    }
    Ok(())
}
