use firebase_bootstrap::bootstrap::{initialize, FirebaseBackend};
use firebase_bootstrap::config::FirebaseConfig;
use firebase_bootstrap::logger::{set_log_level, LogLevel};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    set_log_level(LogLevel::Debug)?;

    // Export FIREBASE_API_KEY, FIREBASE_AUTH_DOMAIN, FIREBASE_PROJECT_ID,
    // FIREBASE_STORAGE_BUCKET, FIREBASE_MESSAGING_SENDER_ID and FIREBASE_APP_ID first.
    let config = FirebaseConfig::from_env();
    let backend = FirebaseBackend::new();
    let clients = initialize(&config, &backend)?;

    println!("app:       {}", clients.app.name());
    println!("database:  {}", clients.db.documents_root());
    println!("auth:      {}", clients.auth.endpoint_url("signInWithIdp")?);

    let request = clients.google_provider.build_request(&clients.auth)?;
    println!("sign in:   {}", request.auth_url);
    Ok(())
}
