use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::UserScope;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use nestegg_core::accounts::{Account, AccountUpdate, NewAccount};

async fn list_accounts(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
) -> ApiResult<Json<Vec<Account>>> {
    Ok(Json(state.account_service.list_accounts(&user)?))
}

async fn create_account(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Json(new_account): Json<NewAccount>,
) -> ApiResult<(StatusCode, Json<Account>)> {
    let account = state.account_service.create_account(&user, new_account).await?;
    Ok((StatusCode::CREATED, Json(account)))
}

async fn get_account(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
) -> ApiResult<Json<Account>> {
    Ok(Json(state.account_service.get_account(&user, &id)?))
}

async fn update_account(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
    Json(update): Json<AccountUpdate>,
) -> ApiResult<Json<Account>> {
    Ok(Json(
        state.account_service.update_account(&user, &id, update).await?,
    ))
}

async fn delete_account(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.account_service.delete_account(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route(
            "/accounts/{id}",
            get(get_account).put(update_account).delete(delete_account),
        )
}
