//! Repository Module
//!
//! Typed CRUD operations over the MongoDB collections.

pub mod activity;
pub mod feedback;
pub mod order;
pub mod payment;
pub mod product;
pub mod supplier;
pub mod user;

// Re-exports
pub use activity::ActivityRepository;
pub use feedback::FeedbackRepository;
pub use order::OrderRepository;
pub use payment::PaymentRepository;
pub use product::ProductRepository;
pub use supplier::SupplierRepository;
pub use user::UserRepository;

use bson::oid::ObjectId;
use mongodb::{Collection, Database};
use thiserror::Error;

use crate::utils::AppError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<mongodb::error::Error> for RepoError {
    fn from(err: mongodb::error::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::NotFound(msg) => AppError::not_found(msg),
            RepoError::Duplicate(msg) => AppError::conflict(msg),
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Database(msg) => AppError::database(msg),
        }
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Parse a 24-hex id string into an ObjectId
///
/// A malformed id is a validation error (bad request), not a lookup miss.
pub fn parse_object_id(id: &str) -> RepoResult<ObjectId> {
    ObjectId::parse_str(id).map_err(|_| RepoError::Validation(format!("Invalid id: {id}")))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Database,
}

impl BaseRepository {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Database {
        &self.db
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection::<T>(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_object_id_accepts_24_hex() {
        let oid = parse_object_id("65f0a1b2c3d4e5f6a7b8c9d0").unwrap();
        assert_eq!(oid.to_hex(), "65f0a1b2c3d4e5f6a7b8c9d0");
    }

    #[test]
    fn test_parse_object_id_rejects_malformed() {
        assert!(matches!(
            parse_object_id("not-hex"),
            Err(RepoError::Validation(_))
        ));
        assert!(matches!(
            parse_object_id("65f0a1b2c3d4e5f6a7b8c9"),
            Err(RepoError::Validation(_))
        ));
        assert!(matches!(parse_object_id(""), Err(RepoError::Validation(_))));
    }

    #[test]
    fn test_repo_error_maps_to_app_error() {
        assert!(matches!(
            AppError::from(RepoError::NotFound("x".into())),
            AppError::NotFound(_)
        ));
        assert!(matches!(
            AppError::from(RepoError::Duplicate("x".into())),
            AppError::Conflict(_)
        ));
        assert!(matches!(
            AppError::from(RepoError::Validation("x".into())),
            AppError::Validation(_)
        ));
        assert!(matches!(
            AppError::from(RepoError::Database("x".into())),
            AppError::Database(_)
        ));
    }
}
