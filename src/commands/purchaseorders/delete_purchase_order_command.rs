use crate::{
    commands::Command,
    db::DbPool,
    entities::{purchase_order, purchase_order_item},
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, TransactionError, TransactionTrait};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Removes a purchase order and its line items as one transactional unit.
/// Idempotent: deleting an ID with no matching order reports `deleted:
/// false` and leaves the store untouched.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeletePurchaseOrderCommand {
    pub id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeletePurchaseOrderResult {
    pub deleted: bool,
}

#[async_trait::async_trait]
impl Command for DeletePurchaseOrderCommand {
    type Result = DeletePurchaseOrderResult;

    #[instrument(skip(self, db_pool, event_sender), fields(order_id = %self.id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let id = self.id.clone();

        let deleted = db_pool
            .transaction::<_, bool, ServiceError>(move |txn| {
                Box::pin(async move {
                    // Items first, then the header; the cascade FK covers
                    // paths outside this command.
                    purchase_order_item::Entity::delete_many()
                        .filter(purchase_order_item::Column::OrderId.eq(id.clone()))
                        .exec(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    let result = purchase_order::Entity::delete_by_id(id)
                        .exec(txn)
                        .await
                        .map_err(ServiceError::db_error)?;

                    Ok(result.rows_affected > 0)
                })
            })
            .await
            .map_err(|e| match e {
                TransactionError::Connection(db_err) => ServiceError::db_error(db_err),
                TransactionError::Transaction(service_err) => service_err,
            })?;

        if deleted {
            info!(order_id = %self.id, "Purchase order deleted");

            if let Err(e) = event_sender
                .send(Event::PurchaseOrderDeleted(self.id.clone()))
                .await
            {
                warn!(error = %e, order_id = %self.id, "Failed to publish purchase order deleted event");
            }
        } else {
            info!(order_id = %self.id, "Purchase order delete was a no-op");
        }

        Ok(DeletePurchaseOrderResult { deleted })
    }
}
