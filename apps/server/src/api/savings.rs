use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::UserScope;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use nestegg_core::savings::{NewSavingsPlan, SavingsPlan, SavingsPlanUpdate};

async fn list_plans(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
) -> ApiResult<Json<Vec<SavingsPlan>>> {
    Ok(Json(state.savings_service.list_plans(&user)?))
}

async fn create_plan(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Json(new_plan): Json<NewSavingsPlan>,
) -> ApiResult<(StatusCode, Json<SavingsPlan>)> {
    let plan = state.savings_service.create_plan(&user, new_plan).await?;
    Ok((StatusCode::CREATED, Json(plan)))
}

async fn update_plan(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
    Json(update): Json<SavingsPlanUpdate>,
) -> ApiResult<Json<SavingsPlan>> {
    Ok(Json(
        state.savings_service.update_plan(&user, &id, update).await?,
    ))
}

async fn delete_plan(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.savings_service.delete_plan(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/savings", get(list_plans).post(create_plan))
        .route("/savings/{id}", axum::routing::put(update_plan).delete(delete_plan))
}
