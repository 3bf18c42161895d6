use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::auth::UserScope;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use nestegg_core::transactions::{NewTransaction, SpendingSummary, Transaction};

async fn list_transactions(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<Transaction>>> {
    let category = params.get("category").map(String::as_str);
    Ok(Json(state.transaction_service.list_transactions(&user, category)?))
}

async fn create_transaction(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Json(new_transaction): Json<NewTransaction>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let transaction = state
        .transaction_service
        .create_transaction(&user, new_transaction)
        .await?;
    Ok((StatusCode::CREATED, Json(transaction)))
}

async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.transaction_service.delete_transaction(&user, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn spending_summary(
    State(state): State<Arc<AppState>>,
    UserScope(user): UserScope,
) -> ApiResult<Json<SpendingSummary>> {
    Ok(Json(state.transaction_service.spending_summary(&user)?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route("/transactions/spending-summary", get(spending_summary))
        .route("/transactions/{id}", axum::routing::delete(delete_transaction))
}
