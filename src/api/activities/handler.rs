//! Activity Log Handlers

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::page::{Page, PageQuery};
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Activity, ActivityCreate};
use crate::db::repository::ActivityRepository;
use crate::utils::validation::{
    MAX_COMMENT_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use crate::utils::{AppResult, time::now_millis};

/// GET /api/activities - paginated log, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<Activity>>> {
    let repo = ActivityRepository::new(state.get_db());
    let activities = repo.find_page(query.skip(), query.limit() as i64).await?;
    let total = repo.count().await?;

    Ok(Json(Page::new(activities, total, &query)))
}

/// POST /api/activities - append a manual log entry
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<ActivityCreate>,
) -> AppResult<Json<Activity>> {
    validate_required_text(&payload.action, "action", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.entity_id, "entityId", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&payload.details, "details", MAX_COMMENT_LEN)?;

    let repo = ActivityRepository::new(state.get_db());
    let activity = repo
        .append(Activity {
            id: None,
            action: payload.action,
            entity_type: payload.entity_type,
            entity_id: payload.entity_id,
            details: payload.details,
            user_id: Some(user.id),
            created_at: now_millis(),
        })
        .await?;

    Ok(Json(activity))
}
