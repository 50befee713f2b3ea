//! Authentication Handlers
//!
//! Handles registration and login. Both endpoints are public and
//! respond with a signed bearer token.

use std::time::Duration;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{Role, User, UserCreate};
use crate::db::repository::UserRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult, time::now_millis};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Stock threshold assigned to new accounts
const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Option<Role>,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

/// Self-registration cannot grant the admin role; a requested `admin`
/// is silently downgraded to `customer`.
fn effective_role(requested: Option<Role>) -> Role {
    match requested {
        Some(Role::Admin) | None => Role::Customer,
        Some(role) => role,
    }
}

/// Register handler
///
/// Creates a user with an argon2 password hash and returns a token.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<AuthResponse>> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let repo = UserRepository::new(state.get_db());

    if repo.find_by_email(&req.email).await?.is_some() {
        return Err(AppError::conflict("User already exists".to_string()));
    }

    let role = effective_role(req.role);
    let password_hash = User::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?;

    let user_id = repo
        .create(UserCreate {
            name: req.name,
            email: req.email.clone(),
            password: password_hash,
            role,
            low_stock_threshold: DEFAULT_LOW_STOCK_THRESHOLD,
            favorites: Vec::new(),
            cart_items: Vec::new(),
            created_at: now_millis(),
        })
        .await?;

    let token = state
        .get_jwt_service()
        .generate_token(&user_id.to_hex(), role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %user_id.to_hex(), email = %req.email, "User registered");

    Ok(Json(AuthResponse { token }))
}

/// Login handler
///
/// Authenticates email/password and returns a token. Unknown email and
/// wrong password produce the same error message.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let repo = UserRepository::new(state.get_db());
    let user = repo.find_by_email(&req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) => {
            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - user not found");
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user
        .id
        .map(|oid| oid.to_hex())
        .ok_or_else(|| AppError::internal("Stored user is missing an id".to_string()))?;

    let token = state
        .get_jwt_service()
        .generate_token(&user_id, user.role)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id = %user_id, role = %user.role, "User logged in successfully");

    Ok(Json(AuthResponse { token }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_registration_is_downgraded() {
        assert_eq!(effective_role(Some(Role::Admin)), Role::Customer);
        assert_eq!(effective_role(Some(Role::Customer)), Role::Customer);
        assert_eq!(effective_role(None), Role::Customer);
    }
}
