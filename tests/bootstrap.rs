use firebase_bootstrap::app::FirebaseAppSettings;
use firebase_bootstrap::bootstrap::{initialize, BootstrapError, FirebaseBackend};
use firebase_bootstrap::config::{ConfigField, FirebaseConfig};
use serde_json::{json, Value};

fn scenario_config() -> Value {
    json!({
        "apiKey": "K",
        "authDomain": "d.example.com",
        "projectId": "p1",
        "storageBucket": "p1.appspot.com",
        "messagingSenderId": "123",
        "appId": "1:123:web:abc"
    })
}

fn parse(value: &Value) -> FirebaseConfig {
    FirebaseConfig::from_json(&value.to_string()).expect("parse config")
}

#[test]
fn scenario_config_initializes_all_clients() {
    let backend = FirebaseBackend::new();
    let clients = initialize(&parse(&scenario_config()), &backend).expect("initialize");

    assert_eq!(clients.app.options().project_id.as_deref(), Some("p1"));
    assert_eq!(clients.db.project_id(), "p1");
    assert_eq!(clients.auth.project_id().as_deref(), Some("p1"));
    assert_eq!(clients.auth.auth_domain().as_deref(), Some("d.example.com"));
    assert_eq!(clients.google_provider.provider_id(), "google.com");

    assert!(clients.db.app().ptr_eq(&clients.app));
    assert!(clients.auth.app().ptr_eq(&clients.app));
    assert_eq!(backend.registry().get_apps().len(), 1);
}

#[test]
fn omitted_project_id_is_a_configuration_error() {
    let mut raw = scenario_config();
    raw.as_object_mut().unwrap().remove("projectId");

    let backend = FirebaseBackend::new();
    let err = initialize(&parse(&raw), &backend).unwrap_err();

    match &err {
        BootstrapError::Configuration(config_err) => {
            assert!(config_err.is_missing(ConfigField::ProjectId));
        }
        other => panic!("expected configuration error, got {other:?}"),
    }
    assert!(err.to_string().contains("projectId is missing"));
    assert!(backend.registry().get_apps().is_empty());
}

#[test]
fn repeated_initialization_yields_equivalent_clients() {
    let backend = FirebaseBackend::new();
    let config = parse(&scenario_config());
    let first = initialize(&config, &backend).expect("first");
    let second = initialize(&config, &backend).expect("second");

    assert!(first.app.ptr_eq(&second.app));
    assert_eq!(first.db.database_id(), second.db.database_id());
    assert_eq!(first.auth.api_key(), second.auth.api_key());
    assert_eq!(first.google_provider, second.google_provider);
}

#[test]
fn separate_backends_do_not_share_apps() {
    let config = parse(&scenario_config());
    let first_backend = FirebaseBackend::new();
    let second_backend = FirebaseBackend::with_settings(FirebaseAppSettings {
        name: Some("secondary".into()),
        automatic_data_collection_enabled: None,
    });

    let first = initialize(&config, &first_backend).expect("first");
    let second = initialize(&config, &second_backend).expect("second");

    assert!(!first.app.ptr_eq(&second.app));
    assert_eq!(second.app.name(), "secondary");
    assert!(second_backend.registry().get_app(Some("[DEFAULT]")).is_err());
}

#[test]
fn google_sign_in_request_targets_the_project() {
    let backend = FirebaseBackend::new();
    let clients = initialize(&parse(&scenario_config()), &backend).expect("initialize");

    let request = clients
        .google_provider
        .build_request(&clients.auth)
        .expect("request");
    assert!(request.auth_url.contains("auth_domain=d.example.com"));
    assert!(request.auth_url.contains("apiKey=K"));
}
