use crate::{
    commands::{
        purchaseorders::{
            CreatePurchaseOrderCommand, DeletePurchaseOrderCommand, PurchaseOrderItemRequest,
            UpdatePurchaseOrderCommand,
        },
        Command,
    },
    db::DbPool,
    entities::purchase_order,
    errors::ServiceError,
    events::EventSender,
    queries::{
        purchase_order_queries::{
            GetPurchaseOrderQuery, HydratedPurchaseOrder, ListPurchaseOrdersQuery,
            PurchaseOrderFilters,
        },
        Query,
    },
    services::order_ids,
};
use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;
use utoipa::ToSchema;

/// Newly submitted orders await approval.
pub const DEFAULT_STATUS: &str = "待审批";

/// Creator recorded when the caller does not identify one.
pub const DEFAULT_CREATED_BY: &str = "系统";

/// Creation timestamps are stored with second precision; the date prefix is
/// what the list filters compare against.
const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Input envelope for order creation. There is deliberately no order-level
/// total field: the stored total is always derived from the items.
#[derive(Debug, Serialize, Deserialize)]
pub struct NewPurchaseOrder {
    pub factory_name: String,
    pub category: String,
    pub farmer_name: String,
    pub harvest_date: String,
    pub items: Vec<PurchaseOrderItemRequest>,
    pub remark: Option<String>,
    pub created_by: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseOrderResponse {
    pub id: String,
    pub factory_name: String,
    pub category: String,
    pub farmer_name: String,
    pub harvest_date: String,
    pub status: String,
    pub created_at: String,
    pub created_by: String,
    pub total_amount: Decimal,
    pub remark: String,
    pub items: Vec<PurchaseOrderItemResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PurchaseOrderItemResponse {
    pub product_name: String,
    pub spec: String,
    pub quantity: Decimal,
    pub gross_weight: Decimal,
    pub box_weight: Decimal,
    pub unit_price: Decimal,
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
}

/// Facade over the purchase-order commands and queries: the single entry
/// point the HTTP boundary calls.
#[derive(Clone)]
pub struct PurchaseOrderService {
    db_pool: Arc<DbPool>,
    event_sender: Arc<EventSender>,
}

impl PurchaseOrderService {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        Self {
            db_pool,
            event_sender,
        }
    }

    /// Allocates the next order ID, stamps the creation timestamp and the
    /// unsupplied defaults, then runs the transactional create. Returns the
    /// assigned ID.
    #[instrument(skip(self, input), fields(factory_name = %input.factory_name, category = %input.category))]
    pub async fn create_purchase_order(
        &self,
        input: NewPurchaseOrder,
    ) -> Result<String, ServiceError> {
        let order_id = order_ids::next_order_id(&self.db_pool).await?;
        let created_at = Utc::now().format(CREATED_AT_FORMAT).to_string();

        let command = CreatePurchaseOrderCommand {
            id: order_id,
            factory_name: input.factory_name,
            category: input.category,
            farmer_name: input.farmer_name,
            harvest_date: input.harvest_date,
            status: input.status.unwrap_or_else(|| DEFAULT_STATUS.to_string()),
            created_at,
            created_by: input
                .created_by
                .unwrap_or_else(|| DEFAULT_CREATED_BY.to_string()),
            remark: input.remark.unwrap_or_default(),
            items: input.items,
        };

        let result = command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await?;

        Ok(result.id)
    }

    /// Fetches an order with its items. An absent ID is a normal outcome,
    /// not an error.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn get_purchase_order(
        &self,
        order_id: &str,
    ) -> Result<Option<PurchaseOrderResponse>, ServiceError> {
        let query = GetPurchaseOrderQuery {
            order_id: order_id.to_string(),
        };

        Ok(query
            .execute(&self.db_pool)
            .await?
            .map(Self::to_response))
    }

    /// Lists orders matching the filter set, newest first.
    #[instrument(skip(self, filters))]
    pub async fn list_purchase_orders(
        &self,
        filters: PurchaseOrderFilters,
    ) -> Result<Vec<PurchaseOrderResponse>, ServiceError> {
        let query = ListPurchaseOrdersQuery { filters };

        Ok(query
            .execute(&self.db_pool)
            .await?
            .into_iter()
            .map(Self::to_response)
            .collect())
    }

    /// Applies a partial update (status and/or remark) and returns the
    /// re-read order. A missing ID surfaces as NotFound.
    #[instrument(skip(self, status, remark), fields(order_id = %order_id))]
    pub async fn update_purchase_order(
        &self,
        order_id: &str,
        status: Option<String>,
        remark: Option<String>,
    ) -> Result<PurchaseOrderResponse, ServiceError> {
        let command = UpdatePurchaseOrderCommand {
            id: order_id.to_string(),
            status,
            remark,
        };
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await?;

        self.get_purchase_order(order_id).await?.ok_or_else(|| {
            ServiceError::NotFound(format!("Purchase order {} not found", order_id))
        })
    }

    /// Deletes an order and its items. Existence is verified first so the
    /// boundary can distinguish a missing order from a completed delete.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn delete_purchase_order(&self, order_id: &str) -> Result<(), ServiceError> {
        let exists = purchase_order::Entity::find_by_id(order_id.to_string())
            .one(self.db_pool.as_ref())
            .await
            .map_err(ServiceError::db_error)?
            .is_some();

        if !exists {
            return Err(ServiceError::NotFound(format!(
                "Purchase order {} not found",
                order_id
            )));
        }

        let command = DeletePurchaseOrderCommand {
            id: order_id.to_string(),
        };
        command
            .execute(self.db_pool.clone(), self.event_sender.clone())
            .await?;

        Ok(())
    }

    fn to_response((order, items): HydratedPurchaseOrder) -> PurchaseOrderResponse {
        PurchaseOrderResponse {
            id: order.id,
            factory_name: order.factory_name,
            category: order.category,
            farmer_name: order.farmer_name,
            harvest_date: order.harvest_date,
            status: order.status,
            created_at: order.created_at,
            created_by: order.created_by,
            total_amount: order.total_amount,
            remark: order.remark,
            items: items
                .into_iter()
                .map(|item| PurchaseOrderItemResponse {
                    product_name: item.product_name,
                    spec: item.spec,
                    quantity: item.quantity,
                    gross_weight: item.gross_weight,
                    box_weight: item.box_weight,
                    unit_price: item.unit_price,
                    discount_amount: item.discount_amount,
                    total_amount: item.total_amount,
                })
                .collect(),
        }
    }
}
