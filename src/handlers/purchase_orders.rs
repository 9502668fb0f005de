use super::common::{
    created_response, map_service_error, no_content_response, success_response, validate_input,
};
use crate::{
    commands::purchaseorders::PurchaseOrderItemRequest,
    errors::ApiError,
    handlers::AppState,
    queries::purchase_order_queries::PurchaseOrderFilters,
    services::purchase_orders::{NewPurchaseOrder, PurchaseOrderResponse},
};
use axum::{
    extract::{Json, Path, Query, State},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

// Request and response DTOs

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreatePurchaseOrderRequest {
    #[validate(length(min = 1, message = "factory_name is required"))]
    pub factory_name: String,
    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,
    #[validate(length(min = 1, message = "farmer_name is required"))]
    pub farmer_name: String,
    #[validate(length(min = 1, message = "harvest_date is required"))]
    pub harvest_date: String,
    #[validate(length(min = 1, message = "at least one line item is required"))]
    pub items: Vec<PurchaseOrderItemRequest>,
    pub remark: Option<String>,
    pub created_by: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UpdatePurchaseOrderRequest {
    pub status: Option<String>,
    pub remark: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreatedPurchaseOrder {
    pub order_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PurchaseOrderListResponse {
    pub total: usize,
    pub orders: Vec<PurchaseOrderResponse>,
}

// Handlers

/// Create a new purchase order
#[utoipa::path(
    post,
    path = "/api/v1/purchase-orders",
    request_body = CreatePurchaseOrderRequest,
    responses(
        (status = 201, description = "Purchase order created", body = crate::ApiResponse<CreatedPurchaseOrder>),
        (status = 400, description = "Invalid request", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn create_purchase_order(
    State(state): State<AppState>,
    Json(payload): Json<CreatePurchaseOrderRequest>,
) -> Result<axum::response::Response, ApiError> {
    validate_input(&payload)?;

    let input = NewPurchaseOrder {
        factory_name: payload.factory_name,
        category: payload.category,
        farmer_name: payload.farmer_name,
        harvest_date: payload.harvest_date,
        items: payload.items,
        remark: payload.remark,
        created_by: payload.created_by,
        status: None,
    };

    let order_id = state
        .services
        .purchase_orders
        .create_purchase_order(input)
        .await
        .map_err(map_service_error)?;

    Ok(created_response(crate::ApiResponse::success(
        CreatedPurchaseOrder { order_id },
    )))
}

/// List purchase orders matching the given filters, newest first
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders",
    params(PurchaseOrderFilters),
    responses(
        (status = 200, description = "Purchase orders fetched", body = crate::ApiResponse<PurchaseOrderListResponse>)
    ),
    tag = "purchase-orders"
)]
pub async fn list_purchase_orders(
    State(state): State<AppState>,
    Query(filters): Query<PurchaseOrderFilters>,
) -> Result<axum::response::Response, ApiError> {
    let orders = state
        .services
        .purchase_orders
        .list_purchase_orders(filters)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(crate::ApiResponse::success(
        PurchaseOrderListResponse {
            total: orders.len(),
            orders,
        },
    )))
}

/// Get a purchase order by ID
#[utoipa::path(
    get,
    path = "/api/v1/purchase-orders/{id}",
    params(
        ("id" = String, Path, description = "Purchase order ID (e.g. PO1001)")
    ),
    responses(
        (status = 200, description = "Purchase order fetched", body = crate::ApiResponse<PurchaseOrderResponse>),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn get_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    let order = state
        .services
        .purchase_orders
        .get_purchase_order(&order_id)
        .await
        .map_err(map_service_error)?;

    match order {
        Some(order) => Ok(success_response(crate::ApiResponse::success(order))),
        None => Err(ApiError::NotFound(format!(
            "Purchase order {} not found",
            order_id
        ))),
    }
}

/// Update a purchase order's status and/or remark
#[utoipa::path(
    put,
    path = "/api/v1/purchase-orders/{id}",
    params(
        ("id" = String, Path, description = "Purchase order ID (e.g. PO1001)")
    ),
    request_body = UpdatePurchaseOrderRequest,
    responses(
        (status = 200, description = "Purchase order updated", body = crate::ApiResponse<PurchaseOrderResponse>),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn update_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
    Json(payload): Json<UpdatePurchaseOrderRequest>,
) -> Result<axum::response::Response, ApiError> {
    let order = state
        .services
        .purchase_orders
        .update_purchase_order(&order_id, payload.status, payload.remark)
        .await
        .map_err(map_service_error)?;

    Ok(success_response(crate::ApiResponse::success(order)))
}

/// Delete a purchase order and its line items
#[utoipa::path(
    delete,
    path = "/api/v1/purchase-orders/{id}",
    params(
        ("id" = String, Path, description = "Purchase order ID (e.g. PO1001)")
    ),
    responses(
        (status = 204, description = "Purchase order deleted"),
        (status = 404, description = "Purchase order not found", body = crate::errors::ErrorResponse)
    ),
    tag = "purchase-orders"
)]
pub async fn delete_purchase_order(
    State(state): State<AppState>,
    Path(order_id): Path<String>,
) -> Result<axum::response::Response, ApiError> {
    state
        .services
        .purchase_orders
        .delete_purchase_order(&order_id)
        .await
        .map_err(map_service_error)?;

    Ok(no_content_response())
}

pub fn purchase_order_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_purchase_order).get(list_purchase_orders))
        .route(
            "/:id",
            get(get_purchase_order)
                .put(update_purchase_order)
                .delete(delete_purchase_order),
        )
}
