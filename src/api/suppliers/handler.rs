//! Supplier API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Serialize;

use crate::api::page::{Page, PageQuery};
use crate::core::ServerState;
use crate::db::models::{Supplier, SupplierCreate, SupplierUpdate};
use crate::db::repository::{ProductRepository, SupplierRepository};
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_email, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// GET /api/suppliers - paginated listing with product counts
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Supplier>>> {
    let repo = SupplierRepository::new(state.get_db());
    let product_repo = ProductRepository::new(state.get_db());

    let mut suppliers = repo.find_page(query.skip(), query.limit() as i64).await?;
    let total = repo.count().await?;

    for supplier in &mut suppliers {
        if let Some(id) = supplier.id {
            supplier.product_count =
                Some(product_repo.count_by_supplier(&id.to_hex()).await?);
        }
    }

    Ok(Json(Page::new(suppliers, total, &query)))
}

/// POST /api/suppliers - create a supplier
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SupplierCreate>,
) -> AppResult<Json<Supplier>> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_email(&payload.contact_email)?;
    validate_optional_text(&payload.contact_phone, "contactPhone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let repo = SupplierRepository::new(state.get_db());
    let supplier = repo.create(payload).await?;

    tracing::info!(
        supplier_id = %supplier.id.map(|o| o.to_hex()).unwrap_or_default(),
        name = %supplier.name,
        "Supplier created"
    );

    Ok(Json(supplier))
}

/// PUT /api/suppliers/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<SupplierUpdate>,
) -> AppResult<Json<Supplier>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(email) = &payload.contact_email {
        validate_email(email)?;
    }
    validate_optional_text(&payload.contact_phone, "contactPhone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.address, "address", MAX_ADDRESS_LEN)?;

    let repo = SupplierRepository::new(state.get_db());
    let supplier = repo.update(&id, payload).await?;

    tracing::info!(supplier_id = %id, "Supplier updated");

    Ok(Json(supplier))
}

/// DELETE /api/suppliers/{id}
///
/// Deletion is refused while any product still references the supplier.
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteResponse>> {
    let repo = SupplierRepository::new(state.get_db());
    let product_repo = ProductRepository::new(state.get_db());

    let supplier = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found("Supplier not found".to_string()))?;

    let referenced = product_repo.count_by_supplier(&id).await?;
    if referenced > 0 {
        return Err(AppError::validation(format!(
            "Supplier has {referenced} associated product(s) and cannot be deleted"
        )));
    }

    repo.delete(&id).await?;

    tracing::info!(supplier_id = %id, name = %supplier.name, "Supplier deleted");

    Ok(Json(DeleteResponse {
        message: "Supplier deleted",
    }))
}
