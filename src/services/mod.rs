pub mod order_ids;
pub mod purchase_orders;
