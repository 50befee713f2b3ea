//! Order API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::api::page::{Page, PageQuery};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Activity, EntityType, Order, OrderItem, OrderItemInput, OrderStatus};
use crate::db::repository::{
    ActivityRepository, OrderRepository, ProductRepository, UserRepository,
};
use crate::utils::{AppError, AppResult, time::now_millis};

/// Total as the sum of unit price times quantity
fn order_total(items: &[OrderItem]) -> f64 {
    items.iter().map(|i| i.price * i.quantity as f64).sum()
}

/// Short human-readable order reference (last 6 hex chars)
fn short_ref(id: &str) -> &str {
    &id[id.len().saturating_sub(6)..]
}

/// POST /api/orders - place an order from submitted line items
///
/// Every line is priced from the current catalog; client-supplied prices
/// are ignored. The order insert, stock decrements, cart clear, and
/// activity append run as independent sequential writes with no
/// transaction — a failure partway leaves the earlier writes in place.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(items): Json<Vec<OrderItemInput>>,
) -> AppResult<Json<Order>> {
    if items.is_empty() {
        return Err(AppError::validation("Cart items are required".to_string()));
    }

    let product_repo = ProductRepository::new(state.get_db());

    // Resolve and price every line before writing anything
    let mut order_items = Vec::with_capacity(items.len());
    for item in &items {
        if item.quantity <= 0 {
            return Err(AppError::validation(
                "Order item quantity must be positive".to_string(),
            ));
        }

        let product = product_repo
            .find_by_id(&item.product_id)
            .await?
            .ok_or_else(|| {
                AppError::not_found(format!("Product {} not found", item.product_id))
            })?;

        if product.quantity < item.quantity {
            return Err(AppError::validation(format!(
                "Insufficient stock for {}",
                product.name
            )));
        }

        order_items.push(OrderItem {
            product_id: product
                .id
                .map(|o| o.to_hex())
                .unwrap_or_else(|| item.product_id.clone()),
            quantity: item.quantity,
            price: product.price,
        });
    }

    let order = Order {
        id: None,
        customer_id: user.id.clone(),
        total_amount: order_total(&order_items),
        items: order_items,
        status: OrderStatus::Processing,
        order_date: now_millis(),
        updated_at: None,
    };

    let order_repo = OrderRepository::new(state.get_db());
    let order = order_repo.create(order).await?;
    let order_id = order
        .id
        .map(|o| o.to_hex())
        .ok_or_else(|| AppError::internal("Inserted order is missing an id".to_string()))?;

    for item in &order.items {
        product_repo
            .decrement_quantity(&item.product_id, item.quantity)
            .await?;
    }

    let user_repo = UserRepository::new(state.get_db());
    user_repo.clear_cart(&user.id).await?;

    let activity_repo = ActivityRepository::new(state.get_db());
    activity_repo
        .append(Activity {
            id: None,
            action: "Created".to_string(),
            entity_type: EntityType::Order,
            entity_id: order_id.clone(),
            details: format!("Order #{} placed", short_ref(&order_id)),
            user_id: Some(user.id.clone()),
            created_at: now_millis(),
        })
        .await?;

    tracing::info!(
        order_id = %order_id,
        customer_id = %user.id,
        total = order.total_amount,
        "Order placed"
    );

    Ok(Json(order))
}

/// GET /api/orders - paginated listing of all orders (admin)
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo.find_page(query.skip(), query.limit() as i64).await?;
    let total = repo.count().await?;

    Ok(Json(Page::new(orders, total, &query)))
}

#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: OrderStatus,
}

/// PUT /api/orders/{id} - update order status (admin)
pub async fn update_status(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<StatusUpdateRequest>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo.update_status(&id, req.status).await?;

    let activity_repo = ActivityRepository::new(state.get_db());
    activity_repo
        .append(Activity {
            id: None,
            action: "Updated".to_string(),
            entity_type: EntityType::Order,
            entity_id: id.clone(),
            details: format!(
                "Order #{} status updated to {}",
                short_ref(&id),
                req.status
            ),
            user_id: Some(user.id),
            created_at: now_millis(),
        })
        .await?;

    tracing::info!(order_id = %id, status = %req.status, "Order status updated");

    Ok(Json(order))
}

/// GET /api/order-history - the caller's own orders
pub async fn history(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Order>>> {
    let repo = OrderRepository::new(state.get_db());
    let orders = repo
        .find_page_for_customer(&user.id, query.skip(), query.limit() as i64)
        .await?;
    let total = repo.count_for_customer(&user.id).await?;

    Ok(Json(Page::new(orders, total, &query)))
}

/// GET /api/order-history/{id} - one of the caller's own orders
pub async fn history_by_id(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<Order>> {
    let repo = OrderRepository::new(state.get_db());
    let order = repo
        .find_by_id_for_customer(&id, &user.id)
        .await?
        .ok_or_else(|| {
            AppError::not_found("Order not found or not authorized".to_string())
        })?;

    Ok(Json(order))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(price: f64, quantity: i64) -> OrderItem {
        OrderItem {
            product_id: "65f0a1b2c3d4e5f6a7b8c9d0".to_string(),
            quantity,
            price,
        }
    }

    #[test]
    fn test_order_total_sums_price_times_quantity() {
        let items = vec![item(9.99, 2), item(100.0, 1), item(0.5, 4)];
        let total = order_total(&items);
        assert!((total - 121.98).abs() < 1e-9);
    }

    #[test]
    fn test_order_total_of_empty_list_is_zero() {
        assert_eq!(order_total(&[]), 0.0);
    }

    #[test]
    fn test_short_ref_takes_last_six_chars() {
        assert_eq!(short_ref("65f0a1b2c3d4e5f6a7b8c9d0"), "b8c9d0");
        assert_eq!(short_ref("abc"), "abc");
    }
}
