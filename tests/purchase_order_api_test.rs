mod common;

use std::str::FromStr;

use axum::{
    body,
    http::{Method, StatusCode},
    response::Response,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use common::{encode, TestApp};

async fn read_json(response: Response) -> Value {
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("parse response body")
}

fn create_payload(factory_name: &str, category: &str) -> Value {
    json!({
        "factory_name": factory_name,
        "category": category,
        "farmer_name": "张三",
        "harvest_date": "2024-01-15",
        "items": [
            {
                "product_name": "苹果",
                "spec": "10kg/箱",
                "quantity": 10,
                "gross_weight": 50,
                "box_weight": 5,
                "unit_price": 22,
                "discount_amount": 0,
                "total_amount": 220
            }
        ],
        "remark": "加急"
    })
}

#[tokio::test]
async fn create_then_fetch_roundtrip() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/purchase-orders",
            Some(create_payload("一号加工厂", "水果")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = read_json(response).await;
    assert_eq!(created["success"], true);
    assert_eq!(created["data"]["order_id"], "PO1001");

    let response = app
        .request(Method::GET, "/api/v1/purchase-orders/PO1001", None)
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = read_json(response).await;
    let data = &fetched["data"];
    assert_eq!(data["id"], "PO1001");
    assert_eq!(data["status"], "待审批");
    assert_eq!(data["created_by"], "系统");
    assert_eq!(data["remark"], "加急");
    assert_eq!(data["items"].as_array().map(|a| a.len()), Some(1));

    let total = Decimal::from_str(data["total_amount"].as_str().expect("total is a string"))
        .expect("parse total");
    assert_eq!(total, dec!(220));
}

#[tokio::test]
async fn create_without_items_is_rejected() {
    let app = TestApp::new().await;

    let mut payload = create_payload("一号加工厂", "水果");
    payload["items"] = json!([]);

    let response = app
        .request(Method::POST, "/api/v1/purchase-orders", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_with_blank_factory_name_is_rejected() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/purchase-orders",
            Some(create_payload("", "水果")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn omitted_discount_defaults_to_zero() {
    let app = TestApp::new().await;

    let payload = json!({
        "factory_name": "一号加工厂",
        "category": "水果",
        "farmer_name": "张三",
        "harvest_date": "2024-01-15",
        "items": [
            {
                "product_name": "苹果",
                "spec": "10kg/箱",
                "quantity": 10,
                "gross_weight": 50,
                "box_weight": 5,
                "unit_price": 22,
                "total_amount": 220
            }
        ]
    });

    let response = app
        .request(Method::POST, "/api/v1/purchase-orders", Some(payload))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(Method::GET, "/api/v1/purchase-orders/PO1001", None)
        .await;
    let fetched = read_json(response).await;
    let discount = Decimal::from_str(
        fetched["data"]["items"][0]["discount_amount"]
            .as_str()
            .expect("discount is a string"),
    )
    .expect("parse discount");
    assert_eq!(discount, Decimal::ZERO);
}

#[tokio::test]
async fn list_filters_by_category() {
    let app = TestApp::new().await;

    for (factory, category) in [("一号加工厂", "水果"), ("二号加工厂", "蔬菜")] {
        let response = app
            .request(
                Method::POST,
                "/api/v1/purchase-orders",
                Some(create_payload(factory, category)),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let uri = format!("/api/v1/purchase-orders?category={}", encode("水果"));
    let response = app.request(Method::GET, &uri, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let listed = read_json(response).await;
    assert_eq!(listed["data"]["total"], 1);
    assert_eq!(listed["data"]["orders"][0]["category"], "水果");

    // No filters returns everything.
    let response = app
        .request(Method::GET, "/api/v1/purchase-orders", None)
        .await;
    let all = read_json(response).await;
    assert_eq!(all["data"]["total"], 2);
}

#[tokio::test]
async fn fetching_an_unknown_order_returns_404() {
    let app = TestApp::new().await;

    let response = app
        .request(Method::GET, "/api/v1/purchase-orders/PO9999", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = read_json(response).await;
    assert_eq!(body["error"], "Not Found");
}

#[tokio::test]
async fn update_changes_status_and_missing_order_is_404() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/purchase-orders",
            Some(create_payload("一号加工厂", "水果")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(
            Method::PUT,
            "/api/v1/purchase-orders/PO1001",
            Some(json!({ "status": "已审批" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = read_json(response).await;
    assert_eq!(updated["data"]["status"], "已审批");
    // remark untouched by the partial update
    assert_eq!(updated["data"]["remark"], "加急");

    let response = app
        .request(
            Method::PUT,
            "/api/v1/purchase-orders/PO9999",
            Some(json!({ "status": "已审批" })),
        )
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_succeeds_once_then_404s() {
    let app = TestApp::new().await;

    let response = app
        .request(
            Method::POST,
            "/api/v1/purchase-orders",
            Some(create_payload("一号加工厂", "水果")),
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .request(Method::DELETE, "/api/v1/purchase-orders/PO1001", None)
        .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .request(Method::DELETE, "/api/v1/purchase-orders/PO1001", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .request(Method::GET, "/api/v1/purchase-orders/PO1001", None)
        .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_probes_respond() {
    let app = TestApp::new().await;

    let response = app.request(Method::GET, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "up");

    let response = app.request(Method::GET, "/health/ready", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["status"], "ready");
}
