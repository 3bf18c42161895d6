use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};

use crate::auth::UserScope;
use crate::error::ApiResult;
use crate::main_lib::AppState;
use nestegg_core::insights::{
    CategorySuggestion, FinancialTipsRequest, FinancialTipsResponse, SuggestCategoryRequest,
};

async fn financial_tips(
    State(state): State<Arc<AppState>>,
    UserScope(_user): UserScope,
    Json(request): Json<FinancialTipsRequest>,
) -> ApiResult<Json<FinancialTipsResponse>> {
    Ok(Json(state.insights_service.financial_tips(request).await?))
}

async fn suggest_category(
    State(state): State<Arc<AppState>>,
    UserScope(_user): UserScope,
    Json(request): Json<SuggestCategoryRequest>,
) -> ApiResult<Json<CategorySuggestion>> {
    Ok(Json(state.insights_service.suggest_category(request).await?))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/insights/tips", post(financial_tips))
        .route("/insights/categorize", post(suggest_category))
}
