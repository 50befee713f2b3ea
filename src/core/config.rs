//! Server configuration
//!
//! All settings come from environment variables (a `.env` file is
//! loaded by the binary before this runs):
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | MONGODB_URI | (required) | MongoDB connection string |
//! | MONGODB_DB | inventoryhub | Database name |
//! | JWT_SECRET | (required) | Token signing secret, min 32 chars |
//! | JWT_EXPIRATION_MINUTES | 1440 | Token lifetime |
//! | HTTP_PORT | 8000 | Listen port |
//! | UPLOAD_DIR | public/uploads | Stored image directory |
//! | LOG_LEVEL | info | Log level when RUST_LOG is unset |
//! | LOG_DIR | (none) | Daily-rolling log file directory |

#[derive(Debug, Clone)]
pub struct Config {
    /// MongoDB connection string; checked at startup
    pub mongodb_uri: Option<String>,
    /// Database name
    pub database: String,
    /// HTTP API listen port
    pub http_port: u16,
    /// Directory for uploaded images
    pub upload_dir: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            mongodb_uri: std::env::var("MONGODB_URI").ok(),
            database: std::env::var("MONGODB_DB").unwrap_or_else(|_| "inventoryhub".into()),
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),
            upload_dir: std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "public/uploads".into()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
