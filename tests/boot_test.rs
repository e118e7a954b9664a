//! Integration tests for the full boot-and-dispatch pipeline.

use axum::body::Body;
use axum::Router;
use http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use tessera_api::AppState;
use tessera_core::config::AppConfig;
use tessera_core::types::route::RouteMethod;
use tessera_plugin::hooks::point::HookPoint;
use tessera_plugin::hooks::transform::{value_fn, Contribution, HookTransform};

async fn boot() -> (Router, AppState) {
    let state = tessera_api::build_state(AppConfig::default()).await.unwrap();
    let app = tessera_api::build_app(state.clone());
    (app, state)
}

async fn get(app: &Router, path: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

#[tokio::test]
async fn test_boot_produces_expected_route_table() {
    let (_app, state) = boot().await;

    let entry = state
        .route_table
        .resolve(RouteMethod::Get, "/orders")
        .expect("orders route missing from the aggregated table");
    assert_eq!(entry.controller, "OrdersController");
    assert_eq!(entry.action, "index");
    assert_eq!(entry.owner, "orders");

    assert!(state.route_table.resolve(RouteMethod::Get, "/blog").is_some());
    assert!(state
        .route_table
        .resolve(RouteMethod::Get, "/blog/:slug")
        .is_some());
    assert!(state.route_table.resolve(RouteMethod::Get, "/").is_some());
    assert!(state.route_table.shadowed().is_empty());
}

#[tokio::test]
async fn test_get_orders_dispatches_through_the_table() {
    let (app, _state) = boot().await;

    let (status, body) = get(&app, "/orders").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["count"], json!(2));
}

#[tokio::test]
async fn test_get_order_by_reference() {
    let (app, _state) = boot().await;

    let (status, body) = get(&app, "/orders/ORD-1001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["order"]["customer"], json!("Ada"));

    let (missing, _) = get(&app, "/orders/ORD-9999").await;
    assert_eq!(missing, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_blog_index_renders_with_cross_plugin_decoration() {
    let (app, _state) = boot().await;

    let (status, body) = get(&app, "/blog").await;

    assert_eq!(status, StatusCode::OK);
    // The blog index goes through the view collaborator.
    assert_eq!(body["template"], json!("blog/index"));
    assert_eq!(body["payload"]["count"], json!(2));
    // The orders plugin decorates the blog listing through its results hook.
    assert_eq!(
        body["payload"]["promo"],
        json!("Free shipping on all orders this week")
    );
}

#[tokio::test]
async fn test_blog_show_resolves_slug_param() {
    let (app, _state) = boot().await;

    let (status, body) = get(&app, "/blog/hello-tessera").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["template"], json!("blog/show"));
    assert_eq!(body["payload"]["title"], json!("Hello, Tessera"));

    let (missing, _) = get(&app, "/blog/drafts-are-invisible").await;
    assert_eq!(missing, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_home_route_is_contributed_by_the_core() {
    let (app, _state) = boot().await;

    let (status, body) = get(&app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["application"], json!("tessera"));
}

#[tokio::test]
async fn test_health_reports_plugins_and_routes() {
    let (app, _state) = boot().await;

    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("ok"));
    assert_eq!(body["data"]["plugins"], json!(2));
}

#[tokio::test]
async fn test_system_routes_exposes_the_table() {
    let (app, _state) = boot().await;

    let (status, body) = get(&app, "/api/system/routes").await;
    assert_eq!(status, StatusCode::OK);
    let routes = body["data"]["routes"].as_array().unwrap();
    assert!(routes
        .iter()
        .any(|r| r["pattern"] == json!("/orders") && r["method"] == json!("GET")));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (app, _state) = boot().await;

    let (status, _) = get(&app, "/does-not-exist").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_subscriptions_are_locked_once_the_app_is_booted() {
    let (_app, state) = boot().await;

    let err = state
        .dispatcher
        .registry()
        .subscribe(
            HookPoint::add_routes(),
            "latecomer",
            1,
            HookTransform::Value(value_fn(|value, _args| Ok(Contribution::new(value.clone())))),
        )
        .await
        .unwrap_err();

    assert_eq!(err.kind, tessera_core::error::ErrorKind::LateRegistration);
}
