#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request},
    response::Response,
    Router,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::Value;
use tempfile::TempDir;
use tokio::sync::mpsc;
use tower::ServiceExt;

use farmgate_api::{
    commands::purchaseorders::PurchaseOrderItemRequest,
    config::AppConfig,
    db,
    events::{self, EventSender},
    handlers::{self, AppServices},
    services::purchase_orders::{NewPurchaseOrder, PurchaseOrderService},
    AppState,
};

/// Helper harness for spinning up an application state backed by a scratch
/// SQLite database.
pub struct TestApp {
    router: Router,
    pub state: AppState,
    _db_dir: TempDir,
    _event_task: tokio::task::JoinHandle<()>,
}

impl TestApp {
    /// Construct a new test application with fresh database state.
    pub async fn new() -> Self {
        let db_dir = tempfile::tempdir().expect("create scratch dir");
        let db_path = db_dir.path().join("farmgate_test.db");

        let mut cfg = AppConfig::new(
            format!("sqlite://{}?mode=rwc", db_path.display()),
            "127.0.0.1",
            18_080,
            "test",
        );
        cfg.auto_migrate = true;
        cfg.db_max_connections = 1;
        cfg.db_min_connections = 1;

        let db_pool = db::establish_connection_from_app_config(&cfg)
            .await
            .expect("connect to scratch database");
        db::run_migrations(&db_pool).await.expect("run migrations");

        let db_arc = Arc::new(db_pool);

        let (event_tx, event_rx) = mpsc::channel(64);
        let event_sender = EventSender::new(event_tx);
        let event_task = tokio::spawn(events::process_events(event_rx));

        let services = AppServices::new(db_arc.clone(), Arc::new(event_sender.clone()));

        let state = AppState {
            db: db_arc,
            config: cfg,
            event_sender,
            services,
        };

        let router = Router::new()
            .nest("/api/v1", farmgate_api::api_v1_routes())
            .nest("/health", handlers::health::health_routes())
            .with_state(state.clone());

        Self {
            router,
            state,
            _db_dir: db_dir,
            _event_task: event_task,
        }
    }

    pub fn purchase_orders(&self) -> Arc<PurchaseOrderService> {
        self.state.services.purchase_orders.clone()
    }

    /// Dispatch a request against the in-process router.
    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                builder
                    .body(Body::from(json.to_string()))
                    .expect("build request")
            }
            None => builder.body(Body::empty()).expect("build request"),
        };

        self.router
            .clone()
            .oneshot(request)
            .await
            .expect("dispatch request")
    }
}

/// A representative line item worth `total_amount`.
pub fn line_item(product_name: &str, total_amount: Decimal) -> PurchaseOrderItemRequest {
    PurchaseOrderItemRequest {
        product_name: product_name.to_string(),
        spec: "10kg/箱".to_string(),
        quantity: dec!(10),
        gross_weight: dec!(50),
        box_weight: dec!(5),
        unit_price: dec!(22),
        discount_amount: dec!(0),
        total_amount,
    }
}

/// A creation envelope with the optional fields left to their defaults.
pub fn new_order(
    factory_name: &str,
    category: &str,
    farmer_name: &str,
    items: Vec<PurchaseOrderItemRequest>,
) -> NewPurchaseOrder {
    NewPurchaseOrder {
        factory_name: factory_name.to_string(),
        category: category.to_string(),
        farmer_name: farmer_name.to_string(),
        harvest_date: "2024-01-15".to_string(),
        items,
        remark: None,
        created_by: None,
        status: None,
    }
}

/// Percent-encode a query-string value (the test router requires ASCII URIs).
pub fn encode(value: &str) -> String {
    let mut encoded = String::new();
    for byte in value.bytes() {
        if byte.is_ascii_alphanumeric() || matches!(byte, b'-' | b'_' | b'.' | b'~') {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}
