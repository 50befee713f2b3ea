//! Product API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};

use crate::api::page::{Page, PageQuery};
use crate::core::ServerState;
use crate::db::models::{Product, ProductCreate, ProductUpdate};
use crate::db::repository::ProductRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

fn validate_payload(
    name: Option<&String>,
    price: Option<f64>,
    quantity: Option<i64>,
    image_url: &Option<String>,
    category: &Option<String>,
) -> AppResult<()> {
    if let Some(name) = name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(price) = price
        && price <= 0.0
    {
        return Err(AppError::validation("price must be positive".to_string()));
    }
    if let Some(quantity) = quantity
        && quantity < 0
    {
        return Err(AppError::validation(
            "quantity must not be negative".to_string(),
        ));
    }
    validate_optional_text(image_url, "imageUrl", MAX_URL_LEN)?;
    validate_optional_text(category, "category", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}

/// GET /api/products - paginated catalog listing
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Product>>> {
    let repo = ProductRepository::new(state.get_db());
    let products = repo.find_page(query.skip(), query.limit() as i64).await?;
    let total = repo.count().await?;

    Ok(Json(Page::new(products, total, &query)))
}

/// GET /api/products/{id} - point lookup
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Product>> {
    let repo = ProductRepository::new(state.get_db());
    let product = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found".to_string()))?;

    Ok(Json(product))
}

/// POST /api/products - create a product (admin)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCreate>,
) -> AppResult<Json<Product>> {
    validate_payload(
        Some(&payload.name),
        Some(payload.price),
        Some(payload.quantity),
        &payload.image_url,
        &payload.category,
    )?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.create(payload).await?;

    tracing::info!(
        product_id = %product.id.map(|o| o.to_hex()).unwrap_or_default(),
        name = %product.name,
        "Product created"
    );

    Ok(Json(product))
}

/// PUT /api/products/{id} - partial update (admin)
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductUpdate>,
) -> AppResult<Json<Product>> {
    validate_payload(
        payload.name.as_ref(),
        payload.price,
        payload.quantity,
        &payload.image_url,
        &payload.category,
    )?;

    let repo = ProductRepository::new(state.get_db());
    let product = repo.update(&id, payload).await?;

    tracing::info!(product_id = %id, "Product updated");

    Ok(Json(product))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_positive_price() {
        assert!(validate_payload(None, Some(0.0), None, &None, &None).is_err());
        assert!(validate_payload(None, Some(-1.5), None, &None, &None).is_err());
        assert!(validate_payload(None, Some(9.99), None, &None, &None).is_ok());
    }

    #[test]
    fn test_rejects_negative_quantity() {
        assert!(validate_payload(None, None, Some(-1), &None, &None).is_err());
        assert!(validate_payload(None, None, Some(0), &None, &None).is_ok());
    }

    #[test]
    fn test_rejects_empty_name() {
        let empty = String::new();
        assert!(validate_payload(Some(&empty), None, None, &None, &None).is_err());
    }
}
