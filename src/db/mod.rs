//! Database Module
//!
//! Handles the MongoDB connection and exposes models and repositories.

pub mod models;
pub mod repository;

use bson::doc;
use mongodb::{Client, Database};

use crate::utils::AppError;

/// Database service — owns the MongoDB database handle
///
/// The handle is cheaply clonable and shared across all repositories;
/// connection pooling is managed inside the driver.
#[derive(Clone)]
pub struct DbService {
    pub db: Database,
}

impl DbService {
    /// Connect to MongoDB and verify the connection with a ping
    pub async fn connect(uri: &str, database: &str) -> Result<Self, AppError> {
        let client = Client::with_uri_str(uri)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to MongoDB: {e}")))?;

        let db = client.database(database);
        db.run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| AppError::database(format!("MongoDB ping failed: {e}")))?;

        tracing::info!(database = %database, "MongoDB connection established");

        Ok(Self { db })
    }
}
