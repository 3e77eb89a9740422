use crate::app::FirebaseApp;
use crate::firestore::constants::DEFAULT_DATABASE_ID;
use crate::firestore::error::{invalid_argument, missing_project_id, FirestoreResult};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DatabaseId {
    project_id: String,
    database: String,
}

impl DatabaseId {
    pub fn new(project_id: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            database: database.into(),
        }
    }

    pub fn default(project_id: impl Into<String>) -> Self {
        Self::new(project_id, DEFAULT_DATABASE_ID)
    }

    pub fn from_app(app: &FirebaseApp) -> FirestoreResult<Self> {
        let project_id = app.options().project_id.ok_or_else(missing_project_id)?;
        Ok(Self::default(project_id))
    }

    /// Accepts either a bare database name or `projects/{project}/databases/{database}`.
    pub fn parse(app: &FirebaseApp, identifier: &str) -> FirestoreResult<Self> {
        if identifier.starts_with("projects/") {
            let segments: Vec<_> = identifier.split('/').collect();
            if let ["projects", project, "databases", database] = segments.as_slice() {
                if !project.is_empty() && !database.is_empty() {
                    return Ok(Self::new(*project, *database));
                }
            }
            return Err(invalid_argument(
                "Database identifier must follow projects/{project}/databases/{database}",
            ));
        }
        if identifier.trim().is_empty() || identifier.contains('/') {
            return Err(invalid_argument(format!("Invalid database name '{identifier}'")));
        }
        Ok(Self::from_app(app)?.with_database(identifier))
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn database(&self) -> &str {
        &self.database
    }

    pub fn is_default_database(&self) -> bool {
        self.database == DEFAULT_DATABASE_ID
    }

    pub fn with_database(&self, database: impl Into<String>) -> Self {
        Self::new(self.project_id.clone(), database)
    }

    /// `projects/{project}/databases/{database}`
    pub fn resource_name(&self) -> String {
        format!("projects/{}/databases/{}", self.project_id, self.database)
    }
}
