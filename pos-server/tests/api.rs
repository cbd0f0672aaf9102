//! HTTP API 端到端测试
//!
//! 内存数据库 + oneshot 请求，覆盖完整收银流程：
//! 注册/登录 → 建桌台 → 建单 → 收款 → 报表/仪表盘。

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{Datelike, Utc};
use http::{Request, StatusCode, header};
use pos_server::auth::{JwtConfig, JwtService};
use pos_server::core::{Config, ServerState};
use pos_server::db::define_schema;
use serde_json::{Value, json};
use surrealdb::Surreal;
use surrealdb::engine::local::Mem;
use tower::ServiceExt;

async fn test_app() -> Router {
    let db = Surreal::new::<Mem>(())
        .await
        .expect("Failed to open in-memory database");
    db.use_ns("test")
        .use_db("test")
        .await
        .expect("Failed to select test namespace");
    define_schema(&db).await.expect("Failed to define schema");

    let work_dir = std::env::temp_dir().join("pos-server-test");
    let config = Config::with_overrides(work_dir.to_string_lossy().to_string(), 0);
    let jwt_service = Arc::new(JwtService::with_config(JwtConfig {
        secret: "integration-test-secret-0123456789abcdef".to_string(),
        expiration_minutes: 60,
        issuer: "pos-server".to_string(),
        audience: "pos-clients".to_string(),
    }));

    let state = ServerState::new(config, db, jwt_service);
    pos_server::api::build_router(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("Failed to build request");

    let response = app
        .clone()
        .oneshot(request)
        .await
        .expect("Request failed");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

/// 注册并登录，返回令牌
async fn login_as(app: &Router, username: &str, full_name: &str, role: &str) -> String {
    let (status, _) = send(
        app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "password": "rahasia123",
            "full_name": full_name,
            "role": role,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": username, "password": "rahasia123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["access_token"]
        .as_str()
        .expect("Login response missing token")
        .to_string()
}

#[tokio::test]
async fn test_register_hides_password_hash() {
    let app = test_app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "budi",
            "password": "rahasia123",
            "full_name": "Budi Santoso",
            "role": "kasir",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "budi");
    assert!(body.get("hashed_password").is_none());

    // 重复用户名冲突
    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/register",
        None,
        Some(json!({
            "username": "budi",
            "password": "rahasia123",
            "full_name": "Budi Santoso",
            "role": "kasir",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_login_rejects_bad_password() {
    let app = test_app().await;
    login_as(&app, "budi", "Budi Santoso", "kasir").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"username": "budi", "password": "salah"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app().await;

    let (status, _) = send(&app, "GET", "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, "GET", "/api/orders", Some("not-a-jwt"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // 健康检查和 GET /api/settings 公开
    let (status, _) = send(&app, "GET", "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, body) = send(&app, "GET", "/api/settings", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["restaurant_name"], "Restoran Saya");
}

#[tokio::test]
async fn test_admin_routes_reject_cashier() {
    let app = test_app().await;
    let cashier = login_as(&app, "siti", "Siti Aminah", "kasir").await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/tables",
        Some(&cashier),
        Some(json!({"table_number": "T1", "capacity": 4, "status": "available"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, "GET", "/api/users", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // 非管理端点不受影响
    let (status, _) = send(&app, "GET", "/api/tables", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_full_checkout_flow() {
    let app = test_app().await;
    let admin = login_as(&app, "admin", "Administrator", "admin").await;
    let cashier = login_as(&app, "siti", "Siti Aminah", "kasir").await;

    // 管理员建桌台
    let (status, table) = send(
        &app,
        "POST",
        "/api/tables",
        Some(&admin),
        Some(json!({"table_number": "T1", "capacity": 4, "status": "available"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let table_id = table["id"].as_str().expect("Table missing id").to_string();

    // 收银员建堂食订单，金额服务端重算
    let (status, order) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&cashier),
        Some(json!({
            "table_id": table_id,
            "table_number": "T1",
            "order_type": "dine-in",
            "items": [
                {"menu_item_id": "menu_item:nasigoreng", "menu_item_name": "Nasi Goreng",
                 "quantity": 2, "price": 25000.0},
                {"menu_item_id": "menu_item:esteh", "menu_item_name": "Es Teh",
                 "quantity": 2, "price": 5000.0}
            ],
            "tax": 6000.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(order["subtotal"], 60000.0);
    assert_eq!(order["total"], 66000.0);
    assert_eq!(order["status"], "pending");
    assert_eq!(order["created_by"], "siti");
    let order_id = order["id"].as_str().expect("Order missing id").to_string();

    // 建单后桌台变 occupied
    let (_, tables) = send(&app, "GET", "/api/tables", Some(&cashier), None).await;
    assert_eq!(tables[0]["status"], "occupied");

    // 收款
    let (status, txn) = send(
        &app,
        "POST",
        "/api/transactions",
        Some(&cashier),
        Some(json!({
            "order_id": order_id,
            "payment_method": "cash",
            "amount_paid": 70000.0,
            "change_amount": 4000.0,
            "total": 66000.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(
        txn["transaction_number"]
            .as_str()
            .expect("Missing transaction number")
            .starts_with("TRX-")
    );
    assert_eq!(txn["cashier"], "Siti Aminah");

    // 收款后订单完成，桌台释放
    let (_, order) = send(
        &app,
        "GET",
        &format!("/api/orders/{}", order_id),
        Some(&cashier),
        None,
    )
    .await;
    assert_eq!(order["status"], "completed");
    let (_, tables) = send(&app, "GET", "/api/tables", Some(&cashier), None).await;
    assert_eq!(tables[0]["status"], "available");

    // 当日日报包含这笔交易
    let today = Utc::now().format("%Y-%m-%d").to_string();
    let (status, report) = send(
        &app,
        "GET",
        &format!("/api/reports/daily?date={}", today),
        Some(&cashier),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_revenue"], 66000.0);
    assert_eq!(report["total_transactions"], 1);
    assert_eq!(report["payment_breakdown"][0]["method"], "cash");
    assert_eq!(report["order_type_breakdown"][0]["type"], "dine-in");
    assert_eq!(report["order_type_breakdown"][0]["count"], 1);
    assert_eq!(report["top_selling_items"][0]["name"], "Nasi Goreng");

    // 仪表盘
    let (status, stats) = send(&app, "GET", "/api/dashboard/stats", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_revenue_today"], 66000.0);
    assert_eq!(stats["pending_orders"], 0);
    assert_eq!(stats["top_selling_items"][0]["quantity"], 2);
}

#[tokio::test]
async fn test_order_rejects_unknown_enum_values() {
    let app = test_app().await;
    let cashier = login_as(&app, "siti", "Siti Aminah", "kasir").await;

    // 未知 order_type 在反序列化边界被拒绝
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&cashier),
        Some(json!({
            "order_type": "delivery",
            "items": [{"menu_item_id": "menu_item:x", "menu_item_name": "X",
                       "quantity": 1, "price": 1000.0}],
            "tax": 0.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    // 未知状态过滤同理
    let (status, _) = send(&app, "GET", "/api/orders?status=paid", Some(&cashier), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_report_input_validation() {
    let app = test_app().await;
    let cashier = login_as(&app, "siti", "Siti Aminah", "kasir").await;

    let (status, _) = send(
        &app,
        "GET",
        "/api/reports/daily?date=not-a-date",
        Some(&cashier),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "GET",
        "/api/reports/monthly?year=2025&month=13",
        Some(&cashier),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // 空月份返回零值而不是错误
    let (status, report) = send(
        &app,
        "GET",
        "/api/reports/monthly?year=2020&month=1",
        Some(&cashier),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_revenue"], 0.0);
    assert_eq!(report["month_name"], "January");
}

#[tokio::test]
async fn test_report_totals_agree_across_granularities() {
    let app = test_app().await;
    let cashier = login_as(&app, "siti", "Siti Aminah", "kasir").await;

    // 一笔外带订单 + 收款，落在今天
    let (status, order) = send(
        &app,
        "POST",
        "/api/orders",
        Some(&cashier),
        Some(json!({
            "order_type": "takeaway",
            "items": [{"menu_item_id": "menu_item:ayambakar", "menu_item_name": "Ayam Bakar",
                       "quantity": 1, "price": 80000.0}],
            "tax": 8000.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let order_id = order["id"].as_str().expect("Order missing id").to_string();

    let (status, _) = send(
        &app,
        "POST",
        "/api/transactions",
        Some(&cashier),
        Some(json!({
            "order_id": order_id,
            "payment_method": "cash",
            "amount_paid": 88000.0,
            "change_amount": 0.0,
            "total": 88000.0
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // 今天同时落在日、周、月三个窗口内，三份报表的营收必须一致
    let now = Utc::now();
    let today = now.format("%Y-%m-%d").to_string();
    let (status, daily) = send(
        &app,
        "GET",
        &format!("/api/reports/daily?date={}", today),
        Some(&cashier),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, weekly) = send(
        &app,
        "GET",
        &format!("/api/reports/weekly?start_date={}", today),
        Some(&cashier),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (status, monthly) = send(
        &app,
        "GET",
        &format!("/api/reports/monthly?year={}&month={}", now.year(), now.month()),
        Some(&cashier),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    assert_eq!(daily["total_revenue"], 88000.0);
    assert_eq!(weekly["total_revenue"], daily["total_revenue"]);
    assert_eq!(monthly["total_revenue"], daily["total_revenue"]);
    assert_eq!(weekly["total_transactions"], daily["total_transactions"]);
    assert_eq!(monthly["total_transactions"], daily["total_transactions"]);

    // 周报中当天的分桶与日报总额一致
    assert_eq!(weekly["daily_breakdown"][0]["date"], today.as_str());
    assert_eq!(weekly["daily_breakdown"][0]["revenue"], daily["total_revenue"]);
}

#[tokio::test]
async fn test_settings_update_requires_admin() {
    let app = test_app().await;
    let admin = login_as(&app, "admin", "Administrator", "admin").await;
    let cashier = login_as(&app, "siti", "Siti Aminah", "kasir").await;

    let (status, _) = send(
        &app,
        "PUT",
        "/api/settings",
        Some(&cashier),
        Some(json!({"restaurant_name": "Warung Siti"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, settings) = send(
        &app,
        "PUT",
        "/api/settings",
        Some(&admin),
        Some(json!({"restaurant_name": "Warung Tegal", "tax_percentage": 11.0})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(settings["restaurant_name"], "Warung Tegal");
    assert_eq!(settings["tax_percentage"], 11.0);
}
