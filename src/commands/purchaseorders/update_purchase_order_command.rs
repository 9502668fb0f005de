use crate::{
    commands::Command,
    db::DbPool,
    entities::purchase_order,
    errors::ServiceError,
    events::{Event, EventSender},
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Applies a partial update to a purchase order. Only the supplied fields
/// are written; with neither field supplied the order is re-read and
/// returned unchanged.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdatePurchaseOrderCommand {
    pub id: String,
    pub status: Option<String>,
    pub remark: Option<String>,
}

#[async_trait::async_trait]
impl Command for UpdatePurchaseOrderCommand {
    type Result = purchase_order::Model;

    #[instrument(skip(self, db_pool, event_sender), fields(order_id = %self.id))]
    async fn execute(
        &self,
        db_pool: Arc<DbPool>,
        event_sender: Arc<EventSender>,
    ) -> Result<Self::Result, ServiceError> {
        let db = db_pool.as_ref();

        let order = purchase_order::Entity::find_by_id(self.id.clone())
            .one(db)
            .await
            .map_err(ServiceError::db_error)?
            .ok_or_else(|| {
                ServiceError::NotFound(format!("Purchase order {} not found", self.id))
            })?;

        if self.status.is_none() && self.remark.is_none() {
            return Ok(order);
        }

        let old_status = order.status.clone();

        let mut active: purchase_order::ActiveModel = order.into();
        if let Some(status) = &self.status {
            active.status = Set(status.clone());
        }
        if let Some(remark) = &self.remark {
            active.remark = Set(remark.clone());
        }

        let updated = active.update(db).await.map_err(ServiceError::db_error)?;

        info!(
            order_id = %updated.id,
            old_status = %old_status,
            new_status = %updated.status,
            "Purchase order updated"
        );

        if let Err(e) = event_sender
            .send(Event::PurchaseOrderUpdated {
                order_id: updated.id.clone(),
                old_status,
                new_status: updated.status.clone(),
            })
            .await
        {
            warn!(error = %e, order_id = %updated.id, "Failed to publish purchase order updated event");
        }

        Ok(updated)
    }
}
