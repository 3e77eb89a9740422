//! Firestore client handles and database identifiers.
mod constants;
mod database;
mod database_id;
pub mod error;

#[doc(inline)]
pub use constants::DEFAULT_DATABASE_ID;

#[doc(inline)]
pub use database::{get_firestore, get_firestore_with_database, Firestore};

#[doc(inline)]
pub use database_id::DatabaseId;

#[doc(inline)]
pub use error::{FirestoreError, FirestoreErrorCode, FirestoreResult};
