use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::info;

/// Domain events published by the purchase-order service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    PurchaseOrderCreated(String),
    PurchaseOrderUpdated {
        order_id: String,
        old_status: String,
        new_status: String,
    },
    PurchaseOrderDeleted(String),
}

#[derive(Debug, Clone)]
pub struct EventSender {
    sender: mpsc::Sender<Event>,
}

impl EventSender {
    /// Creates a new EventSender
    pub fn new(sender: mpsc::Sender<Event>) -> Self {
        Self { sender }
    }

    /// Sends an event asynchronously
    pub async fn send(&self, event: Event) -> Result<(), String> {
        self.sender
            .send(event)
            .await
            .map_err(|e| format!("Failed to send event: {}", e))
    }
}

/// Consumes the event channel and logs each domain event. Runs until every
/// sender handle has been dropped.
pub async fn process_events(mut rx: mpsc::Receiver<Event>) {
    info!("Starting event processing loop");

    while let Some(event) = rx.recv().await {
        match event {
            Event::PurchaseOrderCreated(order_id) => {
                info!(order_id = %order_id, "Purchase order created");
            }
            Event::PurchaseOrderUpdated {
                order_id,
                old_status,
                new_status,
            } => {
                info!(
                    order_id = %order_id,
                    old_status = %old_status,
                    new_status = %new_status,
                    "Purchase order updated"
                );
            }
            Event::PurchaseOrderDeleted(order_id) => {
                info!(order_id = %order_id, "Purchase order deleted");
            }
        }
    }

    info!("Event processing loop stopped");
}
