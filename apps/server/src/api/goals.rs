use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::auth::UserScope;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use nestegg_core::goals::{
    ContributionOutcome, Goal, GoalProjection, GoalUpdate, NewContribution, NewGoal,
};

async fn list_goals(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
) -> ApiResult<Json<Vec<Goal>>> {
    Ok(Json(state.goal_service.list_goals(&user)?))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Json(new_goal): Json<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let goal = state.goal_service.create_goal(&user, new_goal).await?;
    Ok((StatusCode::CREATED, Json(goal)))
}

async fn get_goal(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
) -> ApiResult<Json<Goal>> {
    Ok(Json(state.goal_service.get_goal(&user, &id)?))
}

async fn update_goal(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
    Json(update): Json<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    Ok(Json(state.goal_service.update_goal(&user, &id, update).await?))
}

async fn delete_goal(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.goal_service.delete_goal(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn contribute(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
    Json(contribution): Json<NewContribution>,
) -> ApiResult<Json<ContributionOutcome>> {
    Ok(Json(
        state.goal_service.contribute(&user, &id, contribution).await?,
    ))
}

async fn project_completion(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
) -> ApiResult<Json<GoalProjection>> {
    Ok(Json(state.goal_service.project_completion(&user, &id)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(list_goals).post(create_goal))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
        .route("/goals/{id}/contributions", post(contribute))
        .route("/goals/{id}/projection", get(project_completion))
}
