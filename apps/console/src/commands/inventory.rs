//! # Inventory Commands
//!
//! Stock table, new items, stock edits and low-stock alerts.

use serde::Serialize;
use tracing::debug;

use taller_core::{InventoryItem, NewInventoryItem};
use taller_store::{StockLevel, StockStatus};

use crate::error::ApiError;
use crate::state::Session;

/// Inventory row as the stock table shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InventoryRow {
    #[serde(flatten)]
    pub level: StockLevel,
    pub unit_price_display: String,
    pub stock_value_display: String,
}

/// Which item a stock edit targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemKey {
    Id(String),
    Name(String),
}

/// A low-stock alert line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockAlert {
    pub id: String,
    pub name: String,
    pub stock: i64,
    pub stock_min: i64,
    pub supplier: String,
}

impl From<&InventoryItem> for StockAlert {
    fn from(item: &InventoryItem) -> Self {
        StockAlert {
            id: item.id.clone(),
            name: item.name.clone(),
            stock: item.stock,
            stock_min: item.stock_min,
            supplier: item.supplier.clone(),
        }
    }
}

pub fn list_inventory(session: &Session) -> Result<Vec<InventoryRow>, ApiError> {
    let config = session.config();
    let rows: Vec<InventoryRow> = session
        .store()
        .stock_levels()
        .into_iter()
        .map(|level| InventoryRow {
            unit_price_display: config.format_currency(level.item.unit_price),
            stock_value_display: config.format_currency(level.item.stock_value()),
            level,
        })
        .collect();

    debug!(
        count = rows.len(),
        low = rows.iter().filter(|r| r.level.status == StockStatus::Low).count(),
        "list_inventory command"
    );
    Ok(rows)
}

/// Adds an item and returns the stored row.
pub fn add_item(session: &mut Session, form: NewInventoryItem) -> Result<InventoryItem, ApiError> {
    let store = session.store_mut();
    let id = store.add_item(form)?;
    Ok(store.item(&id)?.clone())
}

pub fn update_stock(session: &mut Session, key: ItemKey, stock: i64) -> Result<InventoryItem, ApiError> {
    let store = session.store_mut();
    let item = match key {
        ItemKey::Id(id) => store.update_stock(&id, stock)?,
        ItemKey::Name(name) => store.update_stock_by_name(&name, stock)?,
    };
    Ok(item)
}

pub fn low_stock_alerts(session: &Session) -> Result<Vec<StockAlert>, ApiError> {
    Ok(session
        .store()
        .low_stock_items()
        .into_iter()
        .map(StockAlert::from)
        .collect())
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use taller_core::Money;
    use taller_store::Clock;

    use super::*;
    use crate::error::ErrorCode;
    use crate::state::ConfigState;

    fn session() -> Session {
        let today = NaiveDate::from_ymd_opt(2024, 5, 10).unwrap();
        Session::new(ConfigState::default(), Clock::Fixed(today))
    }

    #[test]
    fn test_list_inventory_display() {
        let session = session();
        let rows = list_inventory(&session).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].unit_price_display, "$25,000");
        assert_eq!(rows[0].stock_value_display, "$625,000");

        let json = serde_json::to_value(&rows[2]).unwrap();
        assert_eq!(json["name"], "Pastillas freno");
        assert_eq!(json["status"], "ok");
    }

    #[test]
    fn test_update_stock_triggers_alert() {
        let mut session = session();
        assert!(low_stock_alerts(&session).unwrap().is_empty());

        update_stock(&mut session, ItemKey::Name("Pastillas freno".to_string()), 5).unwrap();
        let alerts = low_stock_alerts(&session).unwrap();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "INV003");

        update_stock(&mut session, ItemKey::Id("INV003".to_string()), 6).unwrap();
        assert!(low_stock_alerts(&session).unwrap().is_empty());
    }

    #[test]
    fn test_add_item() {
        let mut session = session();
        let item = add_item(
            &mut session,
            NewInventoryItem {
                name: "Refrigerante".to_string(),
                stock: 2,
                stock_min: 4,
                unit_price: Money::from_major(18_000),
                supplier: "Lubricantes S.A.".to_string(),
            },
        )
        .unwrap();
        assert!(item.id.starts_with("INV"));
        assert_eq!(low_stock_alerts(&session).unwrap().len(), 1);

        let err = add_item(
            &mut session,
            NewInventoryItem {
                name: "Bujías".to_string(),
                stock: 1,
                stock_min: 1,
                unit_price: Money::from_major(1),
                supplier: "x".to_string(),
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
