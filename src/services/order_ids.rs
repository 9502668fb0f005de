use sea_orm::{DatabaseConnection, EntityTrait, QuerySelect};

use crate::{entities::purchase_order, errors::ServiceError};

/// Public order identifiers look like `PO1001`.
pub const ORDER_ID_PREFIX: &str = "PO";

/// Suffix issued when the store holds no (well-formed) order ID yet.
const SEED_SUFFIX: u64 = 1001;

pub fn format_order_id(suffix: u64) -> String {
    format!("{}{}", ORDER_ID_PREFIX, suffix)
}

/// Parses the numeric suffix of a well-formed order ID. Returns `None` for
/// anything that is not the prefix followed by digits only.
pub fn parse_suffix(id: &str) -> Option<u64> {
    let suffix = id.strip_prefix(ORDER_ID_PREFIX)?;
    if suffix.is_empty() || !suffix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    suffix.parse().ok()
}

/// Suffixes are compared numerically: a textual sort would rank `PO999`
/// above `PO1000` once suffixes cross a power-of-ten boundary. Malformed
/// IDs degrade softly — they are skipped, and with nothing parseable the
/// seed is issued.
fn next_id_from_existing<I, S>(ids: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let next = ids
        .into_iter()
        .filter_map(|id| parse_suffix(id.as_ref()))
        .max()
        .map(|max| max + 1)
        .unwrap_or(SEED_SUFFIX);
    format_order_id(next)
}

/// Derives the next order ID from the store, so identifier state survives
/// process restarts. Not atomic with the subsequent insert: the primary-key
/// constraint is what rejects the losing side of a concurrent race.
pub async fn next_order_id(db: &DatabaseConnection) -> Result<String, ServiceError> {
    let ids: Vec<String> = purchase_order::Entity::find()
        .select_only()
        .column(purchase_order::Column::Id)
        .into_tuple::<String>()
        .all(db)
        .await
        .map_err(ServiceError::db_error)?;

    Ok(next_id_from_existing(&ids))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_suffixes() {
        assert_eq!(parse_suffix("PO1001"), Some(1001));
        assert_eq!(parse_suffix("PO999"), Some(999));
        assert_eq!(parse_suffix("PO0"), Some(0));
    }

    #[test]
    fn rejects_malformed_ids() {
        assert_eq!(parse_suffix("XX1001"), None);
        assert_eq!(parse_suffix("PO"), None);
        assert_eq!(parse_suffix("PO12a"), None);
        assert_eq!(parse_suffix("PO+12"), None);
        assert_eq!(parse_suffix("po1001"), None);
        assert_eq!(parse_suffix(""), None);
    }

    #[test]
    fn empty_store_yields_the_seed() {
        assert_eq!(next_id_from_existing(Vec::<String>::new()), "PO1001");
    }

    #[test]
    fn malformed_ids_only_yield_the_seed() {
        assert_eq!(next_id_from_existing(["bogus", "PO12a"]), "PO1001");
    }

    #[test]
    fn increments_the_numeric_maximum() {
        assert_eq!(next_id_from_existing(["PO1001", "PO1003", "PO1002"]), "PO1004");
    }

    #[test]
    fn ranks_suffixes_numerically_across_digit_widths() {
        // A textual sort would pick PO999 as the highest.
        assert_eq!(next_id_from_existing(["PO999", "PO1000"]), "PO1001");
    }

    #[test]
    fn skips_malformed_ids_when_a_valid_one_exists() {
        assert_eq!(next_id_from_existing(["bogus", "PO2000"]), "PO2001");
    }
}
