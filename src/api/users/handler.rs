//! User self-service handlers
//!
//! Every operation here acts on the authenticated user's own document;
//! the id always comes from the token, never from the request.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{CartItem, User, UserProfileUpdate};
use crate::db::repository::{UserRepository, user::ProfilePatch};
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user: User,
    /// Present when email or password changed and the old token content
    /// is stale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub cart_items: Vec<CartItem>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<String>,
}

/// GET /api/user/profile - current user's profile
pub async fn get_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<ProfileResponse>> {
    let repo = UserRepository::new(state.get_db());
    let profile = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found".to_string()))?;

    Ok(Json(ProfileResponse {
        user: profile,
        token: None,
    }))
}

/// PUT /api/user/profile - update name, email, password, or threshold
///
/// When the email or password changes, the response carries a fresh
/// token so the client can stay logged in.
pub async fn update_profile(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<UserProfileUpdate>,
) -> AppResult<Json<ProfileResponse>> {
    if let Some(name) = &req.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &req.email {
        validate_email(email)?;
    }
    if let Some(password) = &req.password {
        validate_password(password)?;
    }
    if let Some(threshold) = req.low_stock_threshold
        && threshold < 0
    {
        return Err(AppError::validation(
            "Low stock threshold must be a non-negative number".to_string(),
        ));
    }

    let reissue_token = req.email.is_some() || req.password.is_some();

    let password_hash = match &req.password {
        Some(password) => Some(
            User::hash_password(password)
                .map_err(|e| AppError::internal(format!("Password hashing failed: {e}")))?,
        ),
        None => None,
    };

    let repo = UserRepository::new(state.get_db());
    let updated = repo
        .update_profile(
            &user.id,
            ProfilePatch {
                name: req.name,
                email: req.email,
                password_hash,
                low_stock_threshold: req.low_stock_threshold,
            },
        )
        .await?;

    let token = if reissue_token {
        Some(
            state
                .get_jwt_service()
                .generate_token(&user.id, updated.role)
                .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?,
        )
    } else {
        None
    };

    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(Json(ProfileResponse {
        user: updated,
        token,
    }))
}

/// GET /api/user/cart - stored cart lines
pub async fn get_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<CartResponse>> {
    let repo = UserRepository::new(state.get_db());
    let profile = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found".to_string()))?;

    Ok(Json(CartResponse {
        cart_items: profile.cart_items,
    }))
}

/// PUT /api/user/cart - replace the stored cart
pub async fn update_cart(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(items): Json<Vec<CartItem>>,
) -> AppResult<Json<CartResponse>> {
    for item in &items {
        if item.quantity <= 0 {
            return Err(AppError::validation(
                "Cart item quantity must be positive".to_string(),
            ));
        }
        if item.price <= 0.0 {
            return Err(AppError::validation(
                "Cart item price must be positive".to_string(),
            ));
        }
    }

    let repo = UserRepository::new(state.get_db());
    let cart_items = repo.set_cart(&user.id, &items).await?;

    Ok(Json(CartResponse { cart_items }))
}

/// GET /api/user/favorites - favorite product ids
pub async fn get_favorites(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<FavoritesResponse>> {
    let repo = UserRepository::new(state.get_db());
    let profile = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found".to_string()))?;

    Ok(Json(FavoritesResponse {
        favorites: profile.favorites,
    }))
}

/// PUT /api/user/favorites - replace the favorites set
pub async fn update_favorites(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(favorites): Json<Vec<String>>,
) -> AppResult<Json<FavoritesResponse>> {
    let repo = UserRepository::new(state.get_db());
    let favorites = repo.set_favorites(&user.id, &favorites).await?;

    Ok(Json(FavoritesResponse { favorites }))
}
