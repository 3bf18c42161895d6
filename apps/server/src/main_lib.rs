//! Application state wiring and tracing setup.

use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;
use nestegg_core::accounts::{AccountService, AccountServiceTrait};
use nestegg_core::goals::{GoalService, GoalServiceTrait};
use nestegg_core::insights::{
    HttpInsightProvider, InsightProviderConfig, InsightsService, InsightsServiceTrait,
};
use nestegg_core::notifications::{NotificationService, NotificationServiceTrait};
use nestegg_core::savings::{SavingsPlanService, SavingsPlanServiceTrait};
use nestegg_core::transactions::{TransactionService, TransactionServiceTrait};
use nestegg_storage_sqlite::accounts::AccountRepository;
use nestegg_storage_sqlite::goals::GoalRepository;
use nestegg_storage_sqlite::notifications::NotificationRepository;
use nestegg_storage_sqlite::savings::SavingsPlanRepository;
use nestegg_storage_sqlite::transactions::TransactionRepository;
use nestegg_storage_sqlite::{create_pool, db, run_migrations, spawn_writer};

pub struct AppState {
    pub account_service: Arc<dyn AccountServiceTrait>,
    pub goal_service: Arc<dyn GoalServiceTrait>,
    pub savings_service: Arc<dyn SavingsPlanServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub notification_service: Arc<dyn NotificationServiceTrait>,
    pub insights_service: Arc<dyn InsightsServiceTrait>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("NE_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);
    let pool = create_pool(&db_path)?;
    run_migrations(&pool)?;
    let writer = spawn_writer(pool.as_ref().clone());

    let account_repository = Arc::new(AccountRepository::new(pool.clone(), writer.clone()));
    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let savings_repository = Arc::new(SavingsPlanRepository::new(pool.clone(), writer.clone()));
    let transaction_repository =
        Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let notification_repository =
        Arc::new(NotificationRepository::new(pool.clone(), writer.clone()));

    let insight_provider = Arc::new(HttpInsightProvider::new(InsightProviderConfig {
        api_url: config.ai_api_url.clone(),
        api_key: config.ai_api_key.clone(),
        model: config.ai_model.clone(),
    })?);

    Ok(Arc::new(AppState {
        account_service: Arc::new(AccountService::new(account_repository.clone())),
        goal_service: Arc::new(GoalService::new(
            goal_repository,
            account_repository.clone(),
        )),
        savings_service: Arc::new(SavingsPlanService::new(savings_repository)),
        transaction_service: Arc::new(TransactionService::new(
            transaction_repository,
            account_repository,
        )),
        notification_service: Arc::new(NotificationService::new(notification_repository)),
        insights_service: Arc::new(InsightsService::new(insight_provider)),
        db_path,
    }))
}
