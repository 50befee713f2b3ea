//! Server state
//!
//! `ServerState` holds the shared handles every handler needs: the
//! configuration, the database, and the JWT service. It is `Clone` and
//! cheap to copy (the database handle and the JWT service are shared).

use std::path::PathBuf;
use std::sync::Arc;

use mongodb::Database;

use crate::auth::JwtService;
use crate::core::Config;
use crate::db::DbService;
use crate::utils::AppError;

#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// MongoDB database handle
    pub db: Database,
    /// JWT token service
    pub jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize the server state
    ///
    /// Connects to MongoDB and constructs the JWT service. A missing
    /// connection string or signing secret is a configuration error.
    pub async fn initialize(config: &Config) -> Result<Self, AppError> {
        let uri = config
            .mongodb_uri
            .as_deref()
            .ok_or_else(|| AppError::config("MONGODB_URI is not set".to_string()))?;

        let db_service = DbService::connect(uri, &config.database).await?;

        let jwt_service = JwtService::from_env()
            .map_err(|e| AppError::config(e.to_string()))?;

        Ok(Self {
            config: config.clone(),
            db: db_service.db,
            jwt_service: Arc::new(jwt_service),
        })
    }

    /// Get the database handle
    pub fn get_db(&self) -> Database {
        self.db.clone()
    }

    /// Get the JWT service
    pub fn get_jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    /// Directory uploaded images are stored in
    pub fn upload_dir(&self) -> PathBuf {
        PathBuf::from(&self.config.upload_dir)
    }
}
