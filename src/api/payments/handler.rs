//! Payment Record Handlers

use axum::{Json, extract::State};

use crate::core::ServerState;
use crate::db::models::{Payment, PaymentCreate};
use crate::db::repository::{PaymentRepository, parse_object_id};
use crate::utils::{AppError, AppResult, time::now_millis};

/// GET /api/payments - all payment records
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Payment>>> {
    let repo = PaymentRepository::new(state.get_db());
    let payments = repo.find_all().await?;
    Ok(Json(payments))
}

/// POST /api/payments - record a payment
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<PaymentCreate>,
) -> AppResult<Json<Payment>> {
    parse_object_id(&payload.order_id)?;
    if payload.amount < 0.0 {
        return Err(AppError::validation(
            "amount must not be negative".to_string(),
        ));
    }

    let repo = PaymentRepository::new(state.get_db());
    let payment = repo
        .create(Payment {
            id: None,
            order_id: payload.order_id,
            amount: payload.amount,
            status: payload.status.unwrap_or_default(),
            payment_method: payload.payment_method,
            created_at: now_millis(),
            updated_at: None,
        })
        .await?;

    Ok(Json(payment))
}
