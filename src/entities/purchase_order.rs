use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Purchase order header. One row per order placed with a processing
/// factory; line items live in `purchase_order_items`.
///
/// `id` is the public `PO<n>` identifier issued by the allocator, not a
/// surrogate key. `created_at` is stored as a `YYYY-MM-DD HH:MM:SS` string
/// so date-range filters can operate on its date prefix.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "purchase_orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_order_item::Entity")]
    PurchaseOrderItem,
}

impl Related<super::purchase_order_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseOrderItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
