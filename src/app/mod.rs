//! App registration: options, settings and the registry that hands out
//! [`FirebaseApp`] handles.
mod api;
mod constants;
mod errors;
mod logger;
mod types;

#[doc(inline)]
pub use api::{AppRegistry, SDK_VERSION};

#[doc(inline)]
pub use constants::DEFAULT_ENTRY_NAME;

#[doc(inline)]
pub use errors::{AppError, AppResult};

#[doc(inline)]
pub use logger::LOGGER;

#[doc(inline)]
pub use types::{FirebaseApp, FirebaseAppConfig, FirebaseAppSettings, FirebaseOptions};
