//! Feedback API Handlers

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::api::page::{Page, PageQuery};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Feedback, FeedbackCreate};
use crate::db::repository::{FeedbackRepository, parse_object_id};
use crate::utils::validation::{MAX_COMMENT_LEN, validate_rating, validate_required_text};
use crate::utils::{AppError, AppResult, time::now_millis};

#[derive(Debug, Deserialize)]
pub struct FeedbackQuery {
    #[serde(rename = "productId")]
    pub product_id: Option<String>,
    pub page: Option<u64>,
    pub limit: Option<u64>,
}

impl FeedbackQuery {
    fn page_query(&self) -> PageQuery {
        let defaults = PageQuery::default();
        PageQuery {
            page: self.page.unwrap_or(defaults.page),
            limit: self.limit.unwrap_or(defaults.limit),
        }
    }
}

/// Feedback listing: either one product's feedback or the paginated
/// admin view
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FeedbackListResponse {
    ByProduct { data: Vec<Feedback> },
    All(Page<Feedback>),
}

/// GET /api/feedback - feedback for one product, or everything (admin)
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
    Query(query): Query<FeedbackQuery>,
) -> AppResult<Json<FeedbackListResponse>> {
    let repo = FeedbackRepository::new(state.get_db());

    if let Some(product_id) = &query.product_id {
        parse_object_id(product_id)?;
        let data = repo.find_by_product(product_id).await?;
        return Ok(Json(FeedbackListResponse::ByProduct { data }));
    }

    if !user.is_admin() {
        return Err(AppError::forbidden("Admin access required".to_string()));
    }

    let page_query = query.page_query();
    let feedback = repo
        .find_page(page_query.skip(), page_query.limit() as i64)
        .await?;
    let total = repo.count().await?;

    Ok(Json(FeedbackListResponse::All(Page::new(
        feedback,
        total,
        &page_query,
    ))))
}

/// POST /api/feedback - leave feedback on a product
///
/// The author is always the authenticated user.
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<FeedbackCreate>,
) -> AppResult<Json<Feedback>> {
    parse_object_id(&payload.product_id)?;
    validate_required_text(&payload.comment, "comment", MAX_COMMENT_LEN)?;
    validate_rating(payload.rating)?;

    let repo = FeedbackRepository::new(state.get_db());
    let feedback = repo
        .create(Feedback {
            id: None,
            user_id: user.id,
            product_id: payload.product_id,
            comment: payload.comment,
            rating: payload.rating,
            created_at: now_millis(),
        })
        .await?;

    Ok(Json(feedback))
}
