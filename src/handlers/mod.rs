pub mod common;
pub mod health;
pub mod purchase_orders;

use crate::db::DbPool;
use crate::events::EventSender;
use crate::services::purchase_orders::PurchaseOrderService;
use std::sync::Arc;

// Re-export AppState so handler modules can import it as crate::handlers::AppState
pub use crate::AppState;

/// Services layer that encapsulates business logic used by HTTP handlers
#[derive(Clone)]
pub struct AppServices {
    pub purchase_orders: Arc<PurchaseOrderService>,
}

impl AppServices {
    pub fn new(db_pool: Arc<DbPool>, event_sender: Arc<EventSender>) -> Self {
        let purchase_orders = Arc::new(PurchaseOrderService::new(db_pool, event_sender));

        Self { purchase_orders }
    }
}
