use std::sync::{Arc, LazyLock, Mutex, PoisonError};

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::app::FirebaseApp;
use crate::firestore::constants::{FIRESTORE_API_HOST, FIRESTORE_API_VERSION};
use crate::firestore::database_id::DatabaseId;
use crate::firestore::error::{internal_error, invalid_argument, FirestoreResult};
use crate::logger::Logger;

static LOGGER: LazyLock<Logger> = LazyLock::new(|| Logger::new("@firebase/firestore"));

const PATH_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Document-database client scoped to one app and one database.
#[derive(Clone)]
pub struct Firestore {
    inner: Arc<FirestoreInner>,
}

struct FirestoreInner {
    app: FirebaseApp,
    database_id: DatabaseId,
    host: Mutex<String>,
}

impl Firestore {
    pub(crate) fn new(app: FirebaseApp, database_id: DatabaseId) -> Self {
        Self {
            inner: Arc::new(FirestoreInner {
                app,
                database_id,
                host: Mutex::new(FIRESTORE_API_HOST.to_string()),
            }),
        }
    }

    /// Returns the `FirebaseApp` this Firestore instance is scoped to.
    pub fn app(&self) -> &FirebaseApp {
        &self.inner.app
    }

    /// The fully qualified database identifier (project + database name).
    pub fn database_id(&self) -> &DatabaseId {
        &self.inner.database_id
    }

    pub fn project_id(&self) -> &str {
        self.inner.database_id.project_id()
    }

    /// Returns the logical database name (usually `"(default)"`).
    pub fn database(&self) -> &str {
        self.inner.database_id.database()
    }

    pub fn host(&self) -> String {
        self.inner
            .host
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Routes REST calls to a local emulator, e.g. `connect_emulator("127.0.0.1", 8080)`.
    pub fn connect_emulator(&self, host: &str, port: u16) {
        let target = format!("http://{host}:{port}");
        LOGGER.debug(format!(
            "Firestore for app '{}' now targets emulator {target}",
            self.inner.app.name()
        ));
        *self
            .inner
            .host
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = target;
    }

    /// `projects/{project}/databases/{database}/documents`
    pub fn documents_root(&self) -> String {
        format!("{}/documents", self.inner.database_id.resource_name())
    }

    /// REST URL of the document at `path` (`collection/doc[/collection/doc...]`).
    pub fn document_url(&self, path: &str) -> FirestoreResult<Url> {
        let segments = document_segments(path)?;
        let encoded = segments
            .iter()
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        let raw = format!(
            "{}/{}/{}/{}",
            self.host().trim_end_matches('/'),
            FIRESTORE_API_VERSION,
            self.documents_root(),
            encoded
        );
        Url::parse(&raw)
            .map_err(|err| internal_error(format!("Invalid document URL {raw}: {err}")))
    }
}

impl std::fmt::Debug for Firestore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Firestore")
            .field("app", &self.inner.app.name())
            .field("database_id", &self.inner.database_id)
            .field("host", &self.host())
            .finish()
    }
}

fn document_segments(path: &str) -> FirestoreResult<Vec<&str>> {
    if path.contains("//") {
        return Err(invalid_argument("Found empty segment in document path"));
    }
    let segments: Vec<&str> = path.split('/').filter(|segment| !segment.is_empty()).collect();
    if segments.is_empty() || segments.len() % 2 != 0 {
        return Err(invalid_argument(format!(
            "Document path '{path}' must have an even number of segments"
        )));
    }
    if let Some(segment) = segments.iter().find(|segment| is_reserved_segment(segment)) {
        return Err(invalid_argument(format!(
            "Document path '{path}' contains the reserved segment '{segment}'"
        )));
    }
    Ok(segments)
}

// `.` and `..` would be resolved by the URL parser; `__name__` ids are reserved.
fn is_reserved_segment(segment: &str) -> bool {
    segment == "."
        || segment == ".."
        || (segment.len() >= 4 && segment.starts_with("__") && segment.ends_with("__"))
}

/// Returns a client for the app's default database.
///
/// Binding performs no I/O; each call builds an independent but equivalent handle.
pub fn get_firestore(app: &FirebaseApp) -> FirestoreResult<Firestore> {
    app.check_destroyed()
        .map_err(|err| internal_error(err.to_string()))?;
    let database_id = DatabaseId::from_app(app)?;
    LOGGER.debug(format!(
        "Firestore client created for {}",
        database_id.resource_name()
    ));
    Ok(Firestore::new(app.clone(), database_id))
}

/// Returns a client for a named database, given as a bare name or as
/// `projects/{project}/databases/{database}`.
pub fn get_firestore_with_database(
    app: &FirebaseApp,
    database: &str,
) -> FirestoreResult<Firestore> {
    app.check_destroyed()
        .map_err(|err| internal_error(err.to_string()))?;
    let database_id = DatabaseId::parse(app, database)?;
    Ok(Firestore::new(app.clone(), database_id))
}
