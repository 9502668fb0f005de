use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "farmgate-api",
        description = "Backend service for farm-gate produce procurement: purchase orders, line items, and filtered queries"
    ),
    paths(
        handlers::purchase_orders::create_purchase_order,
        handlers::purchase_orders::list_purchase_orders,
        handlers::purchase_orders::get_purchase_order,
        handlers::purchase_orders::update_purchase_order,
        handlers::purchase_orders::delete_purchase_order,
    ),
    components(schemas(
        handlers::purchase_orders::CreatePurchaseOrderRequest,
        handlers::purchase_orders::UpdatePurchaseOrderRequest,
        handlers::purchase_orders::CreatedPurchaseOrder,
        handlers::purchase_orders::PurchaseOrderListResponse,
        crate::commands::purchaseorders::PurchaseOrderItemRequest,
        crate::services::purchase_orders::PurchaseOrderResponse,
        crate::services::purchase_orders::PurchaseOrderItemResponse,
        crate::errors::ErrorResponse,
    )),
    tags(
        (name = "purchase-orders", description = "Purchase order management endpoints")
    )
)]
pub struct ApiDoc;

/// Swagger UI mounted at `/docs`, serving the OpenAPI document from
/// `/api-docs/openapi.json`.
pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}
