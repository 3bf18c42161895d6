//! HTTP API tests driven through the router with in-process requests.

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::{Months, Utc};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use nestegg_server::api::app_router;
use nestegg_server::build_state;
use nestegg_server::config::Config;

const USER: &str = "user-1";

async fn build_test_app() -> (Router, TempDir) {
    let tmp = TempDir::new().unwrap();
    let config = Config {
        listen_addr: "127.0.0.1:0".to_string(),
        db_path: tmp.path().join("test.db").to_string_lossy().into_owned(),
        ai_api_url: "http://127.0.0.1:9".to_string(),
        ai_api_key: String::new(),
        ai_model: "test".to_string(),
    };
    let state = build_state(&config).await.unwrap();
    (app_router(state), tmp)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    user: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user) = user {
        builder = builder.header("x-user-id", user);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

fn deadline_a_year_out() -> String {
    Utc::now()
        .date_naive()
        .checked_add_months(Months::new(12))
        .unwrap()
        .to_string()
}

async fn create_account(app: &Router, balance: f64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/v1/accounts",
        Some(USER),
        Some(json!({
            "name": "Checking",
            "accountType": "bank",
            "balance": balance,
            "bankName": null,
            "currency": "USD",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_needs_no_user_scope() {
    let (app, _tmp) = build_test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/v1/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn resource_routes_require_a_user_scope() {
    let (app, _tmp) = build_test_app().await;
    let (status, _) = send(&app, Method::GET, "/api/v1/goals", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn goal_flow_over_http() {
    let (app, _tmp) = build_test_app().await;
    let account_id = create_account(&app, 500.0).await;

    // Create a structured goal; the contribution is derived server-side.
    let (status, goal) = send(
        &app,
        Method::POST,
        "/api/v1/goals",
        Some(USER),
        Some(json!({
            "name": "New Laptop",
            "targetAmount": 1200,
            "currentAmount": 0,
            "savingStrategy": "monthly",
            "targetDate": deadline_a_year_out(),
            "periodicContribution": null,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let goal_id = goal["id"].as_str().unwrap().to_string();
    assert!(goal["periodicContribution"].as_f64().unwrap() > 0.0);

    // The linked saving plan is visible on the savings surface.
    let (status, plans) = send(&app, Method::GET, "/api/v1/savings", Some(USER), None).await;
    assert_eq!(status, StatusCode::OK);
    let plans = plans.as_array().unwrap().clone();
    assert_eq!(plans.len(), 1);
    assert_eq!(plans[0]["isGoal"], true);
    assert_eq!(plans[0]["goalId"].as_str().unwrap(), goal_id);
    assert_eq!(plans[0]["category"].as_str().unwrap(), "Goal: New Laptop");

    // And resists direct deletion.
    let plan_id = plans[0]["id"].as_str().unwrap();
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/savings/{}", plan_id),
        Some(USER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Contribute from the account.
    let (status, outcome) = send(
        &app,
        Method::POST,
        &format!("/api/v1/goals/{}/contributions", goal_id),
        Some(USER),
        Some(json!({ "amount": 100, "accountId": account_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(outcome["reached"], false);
    assert_eq!(outcome["goal"]["currentAmount"].as_f64().unwrap(), 100.0);
    assert_eq!(outcome["accountBalance"].as_f64().unwrap(), 400.0);

    let (_, account) = send(
        &app,
        Method::GET,
        &format!("/api/v1/accounts/{}", account_id),
        Some(USER),
        None,
    )
    .await;
    assert_eq!(account["balance"].as_f64().unwrap(), 400.0);

    // The audit transaction and the notification both landed.
    let (_, transactions) = send(
        &app,
        Method::GET,
        "/api/v1/transactions?category=Savings",
        Some(USER),
        None,
    )
    .await;
    assert_eq!(transactions.as_array().unwrap().len(), 1);

    let (_, notifications) =
        send(&app, Method::GET, "/api/v1/notifications", Some(USER), None).await;
    assert_eq!(notifications.as_array().unwrap().len(), 1);

    // Deleting the goal removes the linked plan with it.
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/v1/goals/{}", goal_id),
        Some(USER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, plans) = send(&app, Method::GET, "/api/v1/savings", Some(USER), None).await;
    assert!(plans.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn validation_failures_are_unprocessable() {
    let (app, _tmp) = build_test_app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/v1/goals",
        Some(USER),
        Some(json!({
            "name": "x",
            "targetAmount": 100,
            "currentAmount": 0,
            "savingStrategy": "monthly",
            "targetDate": deadline_a_year_out(),
            "periodicContribution": null,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("at least 2"));
}

#[tokio::test]
async fn insufficient_funds_are_a_conflict() {
    let (app, _tmp) = build_test_app().await;
    let account_id = create_account(&app, 20.0).await;
    let (_, goal) = send(
        &app,
        Method::POST,
        "/api/v1/goals",
        Some(USER),
        Some(json!({
            "name": "Rainy Day",
            "targetAmount": 1000,
            "currentAmount": 0,
            "savingStrategy": "weekly",
            "targetDate": null,
            "periodicContribution": 50,
        })),
    )
    .await;

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/v1/goals/{}/contributions", goal["id"].as_str().unwrap()),
        Some(USER),
        Some(json!({ "amount": 100, "accountId": account_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_goals_are_not_found() {
    let (app, _tmp) = build_test_app().await;
    let (status, _) = send(
        &app,
        Method::GET,
        "/api/v1/goals/does-not-exist",
        Some(USER),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
