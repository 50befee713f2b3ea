//! Authentication
//!
//! JWT token service, Axum middleware, and the `CurrentUser` extractor.

mod extractor;
pub mod jwt;
pub mod middleware;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
