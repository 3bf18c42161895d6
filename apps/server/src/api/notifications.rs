use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::auth::UserScope;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use nestegg_core::notifications::Notification;

async fn list_notifications(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
) -> ApiResult<Json<Vec<Notification>>> {
    Ok(Json(state.notification_service.list_notifications(&user)?))
}

async fn mark_read(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.notification_service.mark_read(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn mark_all_read(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
) -> ApiResult<StatusCode> {
    state.notification_service.mark_all_read(&user).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/notifications", get(list_notifications))
        .route("/notifications/{id}/read", post(mark_read))
        .route("/notifications/read-all", post(mark_all_read))
}
