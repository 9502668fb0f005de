use crate::{
    commands::Command,
    db::DbPool,
    entities::{purchase_order, purchase_order_item},
    errors::ServiceError,
    events::{Event, EventSender},
};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, Set, SqlErr, TransactionError, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Inserts a purchase order header and its line items as one transactional
/// unit. The caller supplies a fully stamped envelope (allocated ID,
/// creation timestamp, defaults applied); the order total is derived here
/// from the item totals, never taken from the caller.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreatePurchaseOrderCommand {
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub factory_name: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(length(min = 1))]
    pub farmer_name: String,
    #[validate(length(min = 1))]
    pub harvest_date: String,
    #[validate(length(min = 1))]
    pub status: String,
    #[validate(length(min = 1))]
    pub created_at: String,
    pub created_by: String,
    pub remark: String,
    #[validate]
    pub items: Vec<PurchaseOrderItemRequest>,
}

#[derive(Debug, Serialize, Deserialize, Validate, Clone, ToSchema)]
pub struct PurchaseOrderItemRequest {
    #[validate(length(min = 1))]
    pub product_name: String,
    pub spec: String,
    pub quantity: Decimal,
    pub gross_weight: Decimal,
    pub box_weight: Decimal,
    pub unit_price: Decimal,
    #[serde(default)]
    pub discount_amount: Decimal,
    pub total_amount: Decimal,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePurchaseOrderResult {
    pub id: String,
    pub total_amount: Decimal,
}

/// The stored order total is the sum of the item totals.
fn order_total(items: &[PurchaseOrderItemRequest]) -> Decimal {
    items.iter().map(|item| item.total_amount).sum()
}

#[async_trait::async_trait]
impl Command for CreatePurchaseOrderCommand {
    type Result = CreatePurchaseOrderResult;

    #[instrument(skip(self, db_pool, event_sender), fields(order_id = %self.id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        self.validate()
            .map_err(|e| ServiceError::ValidationError(e.to_string()))?;

        let total_amount = order_total(&self.items);

        let id = self.id.clone();
        let factory_name = self.factory_name.clone();
        let category = self.category.clone();
        let farmer_name = self.farmer_name.clone();
        let harvest_date = self.harvest_date.clone();
        let status = self.status.clone();
        let created_at = self.created_at.clone();
        let created_by = self.created_by.clone();
        let remark = self.remark.clone();
        let items = self.items.clone();

        let saved = db_pool
            .transaction::<_, purchase_order::Model, ServiceError>(move |txn| {
                Box::pin(async move {
                    let new_order = purchase_order::ActiveModel {
                        id: Set(id.clone()),
                        factory_name: Set(factory_name),
                        category: Set(category),
                        farmer_name: Set(farmer_name),
                        harvest_date: Set(harvest_date),
                        status: Set(status),
                        created_at: Set(created_at),
                        created_by: Set(created_by),
                        total_amount: Set(total_amount),
                        remark: Set(remark),
                    };

                    let saved_order = new_order.insert(txn).await.map_err(|e| {
                        // An ID collision must be rejected, never replace an
                        // existing order.
                        if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
                            ServiceError::Conflict(format!("Purchase order {} already exists", id))
                        } else {
                            error!(error = %e, order_id = %id, "Failed to insert purchase order");
                            ServiceError::db_error(e)
                        }
                    })?;

                    for item in &items {
                        let new_item = purchase_order_item::ActiveModel {
                            order_id: Set(saved_order.id.clone()),
                            product_name: Set(item.product_name.clone()),
                            spec: Set(item.spec.clone()),
                            quantity: Set(item.quantity),
                            gross_weight: Set(item.gross_weight),
                            box_weight: Set(item.box_weight),
                            unit_price: Set(item.unit_price),
                            discount_amount: Set(item.discount_amount),
                            total_amount: Set(item.total_amount),
                            ..Default::default()
                        };
                        new_item.insert(txn).await.map_err(|e| {
                            error!(
                                error = %e,
                                order_id = %saved_order.id,
                                product_name = %item.product_name,
                                "Failed to insert purchase order item"
                            );
                            ServiceError::db_error(e)
                        })?;
                    }

                    Ok(saved_order)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        info!(
            order_id = %saved.id,
            items_count = %self.items.len(),
            total_amount = %saved.total_amount,
            "Purchase order created"
        );

        if let Err(e) = event_sender
            .send(Event::PurchaseOrderCreated(saved.id.clone()))
            .await
        {
            warn!(error = %e, order_id = %saved.id, "Failed to publish purchase order created event");
        }

        Ok(CreatePurchaseOrderResult {
            id: saved.id,
            total_amount: saved.total_amount,
        })
    }
}
