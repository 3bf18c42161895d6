//! API routers.

mod accounts;
mod goals;
mod health;
mod insights;
mod notifications;
mod savings;
mod transactions;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(accounts::router())
        .merge(goals::router())
        .merge(savings::router())
        .merge(transactions::router())
        .merge(notifications::router())
        .merge(insights::router())
        .merge(health::router());

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .layer(TimeoutLayer::new(Duration::from_secs(30)))
        .with_state(state)
}
