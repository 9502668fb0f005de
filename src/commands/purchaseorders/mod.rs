pub mod create_purchase_order_command;
pub mod delete_purchase_order_command;
pub mod update_purchase_order_command;

pub use create_purchase_order_command::{
    CreatePurchaseOrderCommand, CreatePurchaseOrderResult, PurchaseOrderItemRequest,
};
pub use delete_purchase_order_command::{DeletePurchaseOrderCommand, DeletePurchaseOrderResult};
pub use update_purchase_order_command::UpdatePurchaseOrderCommand;
