use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::app::constants::DEFAULT_ENTRY_NAME;
use crate::app::errors::{AppError, AppResult};
use crate::app::logger::LOGGER;
use crate::app::types::{FirebaseApp, FirebaseAppConfig, FirebaseAppSettings, FirebaseOptions};

pub static SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Owned set of initialized apps, keyed by app name.
///
/// Callers hold the registry explicitly instead of reaching for process-wide state,
/// so separate registries never see each other's apps.
#[derive(Default)]
pub struct AppRegistry {
    apps: Mutex<HashMap<String, FirebaseApp>>,
}

fn normalize_name(settings: &FirebaseAppSettings) -> AppResult<String> {
    let name = settings
        .name
        .clone()
        .unwrap_or_else(|| DEFAULT_ENTRY_NAME.to_string());
    if name.trim().is_empty() {
        return Err(AppError::BadAppName { app_name: name });
    }
    Ok(name)
}

impl AppRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn apps(&self) -> MutexGuard<'_, HashMap<String, FirebaseApp>> {
        self.apps.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an app, or returns the existing one when the name is already taken
    /// by an app with identical options and config.
    pub fn initialize_app(
        &self,
        options: FirebaseOptions,
        settings: Option<FirebaseAppSettings>,
    ) -> AppResult<FirebaseApp> {
        let settings = settings.unwrap_or_default();
        let name = normalize_name(&settings)?;
        let automatic = settings.automatic_data_collection_enabled.unwrap_or(true);

        if !options.is_defined() {
            return Err(AppError::NoOptions);
        }

        let config = FirebaseAppConfig::new(name.clone(), automatic);

        let mut apps = self.apps();
        if let Some(existing) = apps.get(&name) {
            if existing.options() == options && existing.config() == config {
                return Ok(existing.clone());
            }
            return Err(AppError::DuplicateApp { app_name: name });
        }

        let app = FirebaseApp::new(options, config);
        apps.insert(name.clone(), app.clone());
        LOGGER.debug(format!("Firebase App '{name}' initialized (sdk {SDK_VERSION})"));
        Ok(app)
    }

    pub fn get_app(&self, name: Option<&str>) -> AppResult<FirebaseApp> {
        let lookup = name.unwrap_or(DEFAULT_ENTRY_NAME);
        self.apps()
            .get(lookup)
            .cloned()
            .ok_or_else(|| AppError::NoApp {
                app_name: lookup.to_string(),
            })
    }

    pub fn get_apps(&self) -> Vec<FirebaseApp> {
        self.apps().values().cloned().collect()
    }

    /// Removes the app from the registry and marks every handle to it as deleted.
    ///
    /// Fails with `NoApp` when `app` is not the instance this registry holds under
    /// its name, e.g. a handle from another registry or one already deleted.
    pub fn delete_app(&self, app: &FirebaseApp) -> AppResult<()> {
        let mut apps = self.apps();
        match apps.get(app.name()) {
            Some(existing) if existing.ptr_eq(app) => {}
            _ => {
                return Err(AppError::NoApp {
                    app_name: app.name().to_string(),
                })
            }
        }
        apps.remove(app.name());
        app.set_is_deleted(true);
        LOGGER.debug(format!("Firebase App '{}' deleted", app.name()));
        Ok(())
    }
}

impl std::fmt::Debug for AppRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut names: Vec<String> = self.apps().keys().cloned().collect();
        names.sort();
        f.debug_struct("AppRegistry").field("apps", &names).finish()
    }
}
