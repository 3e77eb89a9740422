use std::fmt;

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Names of the six configuration fields as they appear in the web config snippet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConfigField {
    ApiKey,
    AuthDomain,
    ProjectId,
    StorageBucket,
    MessagingSenderId,
    AppId,
}

impl ConfigField {
    pub const ALL: [ConfigField; 6] = [
        ConfigField::ApiKey,
        ConfigField::AuthDomain,
        ConfigField::ProjectId,
        ConfigField::StorageBucket,
        ConfigField::MessagingSenderId,
        ConfigField::AppId,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigField::ApiKey => "apiKey",
            ConfigField::AuthDomain => "authDomain",
            ConfigField::ProjectId => "projectId",
            ConfigField::StorageBucket => "storageBucket",
            ConfigField::MessagingSenderId => "messagingSenderId",
            ConfigField::AppId => "appId",
        }
    }

    /// Environment variable read by [`FirebaseConfig::from_env`](super::FirebaseConfig::from_env).
    pub fn env_var(self) -> &'static str {
        match self {
            ConfigField::ApiKey => "FIREBASE_API_KEY",
            ConfigField::AuthDomain => "FIREBASE_AUTH_DOMAIN",
            ConfigField::ProjectId => "FIREBASE_PROJECT_ID",
            ConfigField::StorageBucket => "FIREBASE_STORAGE_BUCKET",
            ConfigField::MessagingSenderId => "FIREBASE_MESSAGING_SENDER_ID",
            ConfigField::AppId => "FIREBASE_APP_ID",
        }
    }
}

impl fmt::Display for ConfigField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViolationKind {
    Missing,
    Malformed(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: ConfigField,
    pub kind: ViolationKind,
}

impl FieldViolation {
    pub(crate) fn missing(field: ConfigField) -> Self {
        Self {
            field,
            kind: ViolationKind::Missing,
        }
    }

    pub(crate) fn malformed(field: ConfigField, reason: impl Into<String>) -> Self {
        Self {
            field,
            kind: ViolationKind::Malformed(reason.into()),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "{} is missing", self.field),
            ViolationKind::Malformed(reason) => write!(f, "{} {reason}", self.field),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// One or more fields are missing or do not match the expected format.
    Invalid { violations: Vec<FieldViolation> },
    /// The web config snippet could not be parsed.
    Parse(String),
}

impl ConfigError {
    pub fn violations(&self) -> &[FieldViolation] {
        match self {
            ConfigError::Invalid { violations } => violations,
            ConfigError::Parse(_) => &[],
        }
    }

    /// Returns true when `field` is reported as missing.
    pub fn is_missing(&self, field: ConfigField) -> bool {
        self.violations()
            .iter()
            .any(|violation| violation.field == field && violation.kind == ViolationKind::Missing)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid { violations } => {
                let details = violations
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; ");
                write!(f, "Invalid Firebase configuration: {details}")
            }
            ConfigError::Parse(message) => {
                write!(f, "Unable to parse Firebase configuration: {message}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err.to_string())
    }
}
