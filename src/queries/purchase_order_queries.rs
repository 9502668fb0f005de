use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::IntoParams;

use crate::{
    entities::{purchase_order, purchase_order_item},
    errors::ServiceError,
    queries::Query,
};

/// A purchase order with its line items in insertion order.
pub type HydratedPurchaseOrder = (purchase_order::Model, Vec<purchase_order_item::Model>);

/// Optional filter set for the list operation. Filters are combined
/// conjunctively; absent (or empty-string) values match everything.
///
/// The date bounds apply to the date portion of `created_at`. Timestamps
/// are fixed-format `YYYY-MM-DD HH:MM:SS` strings, so the inclusive
/// date-portion bounds reduce to plain string comparisons: `>= start_date`
/// and `<= end_date + " 23:59:59"`.
#[derive(Debug, Default, Clone, Serialize, Deserialize, IntoParams)]
pub struct PurchaseOrderFilters {
    /// Exact match on category (e.g. "水果" or "蔬菜")
    pub category: Option<String>,
    /// Exact match on status
    pub status: Option<String>,
    /// Exact match on processing factory name
    pub factory_name: Option<String>,
    /// Inclusive lower bound on the creation date (`YYYY-MM-DD`)
    pub start_date: Option<String>,
    /// Inclusive upper bound on the creation date (`YYYY-MM-DD`)
    pub end_date: Option<String>,
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl PurchaseOrderFilters {
    /// Folds the supplied filters into one conjunctive predicate.
    pub fn condition(&self) -> Condition {
        let mut condition = Condition::all();

        if let Some(category) = present(&self.category) {
            condition = condition.add(purchase_order::Column::Category.eq(category));
        }
        if let Some(status) = present(&self.status) {
            condition = condition.add(purchase_order::Column::Status.eq(status));
        }
        if let Some(factory_name) = present(&self.factory_name) {
            condition = condition.add(purchase_order::Column::FactoryName.eq(factory_name));
        }
        if let Some(start_date) = present(&self.start_date) {
            condition = condition.add(purchase_order::Column::CreatedAt.gte(start_date));
        }
        if let Some(end_date) = present(&self.end_date) {
            condition = condition
                .add(purchase_order::Column::CreatedAt.lte(format!("{} 23:59:59", end_date)));
        }

        condition
    }
}

/// Query to get a purchase order by ID, hydrated with its line items.
#[derive(Debug, Serialize, Deserialize)]
pub struct GetPurchaseOrderQuery {
    pub order_id: String,
}

#[async_trait]
impl Query for GetPurchaseOrderQuery {
    type Result = Option<HydratedPurchaseOrder>;

    async fn execute(&self, db: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let order = purchase_order::Entity::find_by_id(self.order_id.clone())
            .one(db)
            .await
            .map_err(ServiceError::db_error)?;

        let Some(order) = order else {
            return Ok(None);
        };

        let items = purchase_order_item::Entity::find()
            .filter(purchase_order_item::Column::OrderId.eq(order.id.clone()))
            .order_by_asc(purchase_order_item::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        Ok(Some((order, items)))
    }
}

/// Query to list purchase orders matching a filter set, newest first,
/// each hydrated with its line items.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListPurchaseOrdersQuery {
    pub filters: PurchaseOrderFilters,
}

#[async_trait]
impl Query for ListPurchaseOrdersQuery {
    type Result = Vec<HydratedPurchaseOrder>;

    async fn execute(&self, db: &DatabaseConnection) -> Result<Self::Result, ServiceError> {
        let orders = purchase_order::Entity::find()
            .filter(self.filters.condition())
            .order_by_desc(purchase_order::Column::CreatedAt)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        if orders.is_empty() {
            return Ok(Vec::new());
        }

        // Batch-load the items for every matched order and group them;
        // scanning in rowid order keeps each group in insertion order.
        let order_ids: Vec<String> = orders.iter().map(|order| order.id.clone()).collect();
        let items = purchase_order_item::Entity::find()
            .filter(purchase_order_item::Column::OrderId.is_in(order_ids))
            .order_by_asc(purchase_order_item::Column::Id)
            .all(db)
            .await
            .map_err(ServiceError::db_error)?;

        let mut grouped: HashMap<String, Vec<purchase_order_item::Model>> = HashMap::new();
        for item in items {
            grouped.entry(item.order_id.clone()).or_default().push(item);
        }

        Ok(orders
            .into_iter()
            .map(|order| {
                let items = grouped.remove(&order.id).unwrap_or_default();
                (order, items)
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{DbBackend, QueryTrait};

    fn sql_for(filters: &PurchaseOrderFilters) -> String {
        purchase_order::Entity::find()
            .filter(filters.condition())
            .build(DbBackend::Sqlite)
            .to_string()
    }

    #[test]
    fn no_filters_matches_all() {
        let sql = sql_for(&PurchaseOrderFilters::default());
        assert!(!sql.contains("WHERE"), "unexpected predicate in: {sql}");
    }

    #[test]
    fn empty_string_filters_are_ignored() {
        let filters = PurchaseOrderFilters {
            category: Some(String::new()),
            status: Some(String::new()),
            ..Default::default()
        };
        let sql = sql_for(&filters);
        assert!(!sql.contains("WHERE"), "unexpected predicate in: {sql}");
    }

    #[test]
    fn filters_combine_conjunctively() {
        let filters = PurchaseOrderFilters {
            category: Some("水果".to_string()),
            status: Some("待审批".to_string()),
            factory_name: Some("一号加工厂".to_string()),
            ..Default::default()
        };
        let sql = sql_for(&filters);
        assert!(sql.contains(r#""category" = '水果'"#), "{sql}");
        assert!(sql.contains(r#""status" = '待审批'"#), "{sql}");
        assert!(sql.contains(r#""factory_name" = '一号加工厂'"#), "{sql}");
        assert_eq!(sql.matches(" AND ").count(), 2, "{sql}");
    }

    #[test]
    fn date_bounds_cover_the_whole_day() {
        let filters = PurchaseOrderFilters {
            start_date: Some("2024-01-15".to_string()),
            end_date: Some("2024-01-15".to_string()),
            ..Default::default()
        };
        let sql = sql_for(&filters);
        assert!(sql.contains(r#""created_at" >= '2024-01-15'"#), "{sql}");
        assert!(
            sql.contains(r#""created_at" <= '2024-01-15 23:59:59'"#),
            "{sql}"
        );
    }
}
