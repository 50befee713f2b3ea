//! InventoryHub Server - inventory and e-commerce management backend
//!
//! # Architecture overview
//!
//! A single stateless HTTP service over MongoDB:
//!
//! - **Auth** (`auth`): JWT + Argon2 authentication, role enforcement
//! - **API** (`api`): one router per resource, merged in `core::server`
//! - **Database** (`db`): typed models and repositories per collection
//! - **Uploads** (`api::upload`): image storage served under `/uploads`
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # config, state, server
//! ├── auth/          # JWT auth, middleware, extractor
//! ├── api/           # HTTP routes and handlers
//! ├── db/            # models and repositories
//! └── utils/         # errors, logging, time, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - structured tracing for auth events
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

pub fn print_banner() {
    println!(
        r#"
    ____                      __                   __  __      __
   /  _/___ _   _____  ____  / /_____  _______  __/ / / /_  __/ /_
   / // __ \ | / / _ \/ __ \/ __/ __ \/ ___/ / / / /_/ / / / / __ \
 _/ // / / / |/ /  __/ / / / /_/ /_/ / /  / /_/ / __  / /_/ / /_/ /
/___/_/ /_/|___/\___/_/ /_/\__/\____/_/   \__, /_/ /_/\__,_/_.___/
                                         /____/
    "#
    );
}
