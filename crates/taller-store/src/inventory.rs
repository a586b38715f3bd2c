//! # Inventory Manager
//!
//! Parts and consumables: adding items, stock updates, low-stock alerts.
//!
//! ## Low Stock Rule
//! ```text
//!   stock ≤ stock_min  ──►  LOW   (shown in alerts)
//!   stock > stock_min  ──►  OK
//!
//!   Pastillas freno  8 / 5  → OK
//!   update_stock(INV003, 5) → LOW
//! ```

use serde::Serialize;
use tracing::{debug, info};

use taller_core::validation::{validate_new_item, validate_stock};
use taller_core::{IdPrefix, InventoryItem, NewInventoryItem};

use crate::error::{StoreError, StoreResult};
use crate::store::Store;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    Low,
    Ok,
}

/// Inventory row with its alert state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StockLevel {
    #[serde(flatten)]
    pub item: InventoryItem,
    pub status: StockStatus,
}

impl Store {
    /// All items in insertion order.
    pub fn items(&self) -> &[InventoryItem] {
        &self.items
    }

    pub fn item(&self, id: &str) -> StoreResult<&InventoryItem> {
        self.items
            .iter()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::not_found("Inventory item", id))
    }

    /// Adds an item and returns its id.
    ///
    /// Item names are unique; the name and supplier are stored trimmed.
    pub fn add_item(&mut self, form: NewInventoryItem) -> StoreResult<String> {
        validate_new_item(&form)?;

        let name = form.name.trim().to_string();
        if self.items.iter().any(|i| i.name == name) {
            return Err(StoreError::duplicate("item name", name));
        }

        let item = InventoryItem {
            id: self.fresh_id(IdPrefix::InventoryItem)?,
            name,
            stock: form.stock,
            stock_min: form.stock_min,
            unit_price: form.unit_price,
            supplier: form.supplier.trim().to_string(),
        };

        info!(item_id = %item.id, name = %item.name, stock = item.stock, "Inventory item added");
        let id = item.id.clone();
        self.items.push(item);
        Ok(id)
    }

    /// Overwrites the stock of item `id`.
    pub fn update_stock(&mut self, id: &str, new_stock: i64) -> StoreResult<InventoryItem> {
        validate_stock(new_stock)?;
        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == id)
            .ok_or_else(|| StoreError::not_found("Inventory item", id))?;

        let previous = item.stock;
        item.stock = new_stock;
        info!(item_id = %id, previous, new_stock, low = item.is_low_stock(), "Stock updated");
        Ok(item.clone())
    }

    /// Overwrites the stock of the item called `name`.
    pub fn update_stock_by_name(&mut self, name: &str, new_stock: i64) -> StoreResult<InventoryItem> {
        let name = name.trim();
        let id = self
            .items
            .iter()
            .find(|i| i.name == name)
            .map(|i| i.id.clone())
            .ok_or_else(|| StoreError::not_found("Inventory item", name))?;
        self.update_stock(&id, new_stock)
    }

    /// Items at or below their minimum, in insertion order.
    pub fn low_stock_items(&self) -> Vec<&InventoryItem> {
        let low: Vec<&InventoryItem> = self.items.iter().filter(|i| i.is_low_stock()).collect();
        debug!(count = low.len(), "Low stock check");
        low
    }

    /// Every item with its low/ok flag.
    pub fn stock_levels(&self) -> Vec<StockLevel> {
        self.items
            .iter()
            .map(|item| StockLevel {
                item: item.clone(),
                status: if item.is_low_stock() {
                    StockStatus::Low
                } else {
                    StockStatus::Ok
                },
            })
            .collect()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use taller_core::{Money, ValidationError};

    use super::*;
    use crate::store::StoreConfig;

    fn store() -> Store {
        Store::seeded(StoreConfig::new())
    }

    fn fluid() -> NewInventoryItem {
        NewInventoryItem {
            name: "Líquido de frenos".to_string(),
            stock: 4,
            stock_min: 6,
            unit_price: Money::from_major_minor(18_000, 50),
            supplier: "Frenos Total".to_string(),
        }
    }

    #[test]
    fn test_seed_has_no_low_stock() {
        assert!(store().low_stock_items().is_empty());
    }

    #[test]
    fn test_brake_pads_become_low_at_minimum() {
        let mut store = store();
        assert!(!store.item("INV003").unwrap().is_low_stock());

        store.update_stock("INV003", 5).unwrap();
        let low = store.low_stock_items();
        assert_eq!(low.len(), 1);
        assert_eq!(low[0].name, "Pastillas freno");
    }

    #[test]
    fn test_raising_stock_clears_alert() {
        let mut store = store();
        store.update_stock("INV002", 3).unwrap();
        assert_eq!(store.low_stock_items().len(), 1);

        store.update_stock("INV002", 11).unwrap();
        assert!(store.low_stock_items().is_empty());

        store.update_stock("INV002", 10).unwrap();
        assert_eq!(store.low_stock_items().len(), 1);
    }

    #[test]
    fn test_update_stock_by_name() {
        let mut store = store();
        let item = store.update_stock_by_name("Bujías", 2).unwrap();
        assert_eq!(item.id, "INV004");
        assert_eq!(store.item("INV004").unwrap().stock, 2);
        assert!(store.update_stock_by_name("Radiador", 2).is_err());
    }

    #[test]
    fn test_update_stock_rejects_negative_and_unknown() {
        let mut store = store();
        assert!(matches!(
            store.update_stock("INV001", -1),
            Err(StoreError::Validation(ValidationError::TooSmall { .. }))
        ));
        assert_eq!(store.item("INV001").unwrap().stock, 25);
        assert!(matches!(
            store.update_stock("INV999", 1),
            Err(StoreError::NotFound { .. })
        ));
    }

    #[test]
    fn test_add_item() {
        let mut store = store();
        let id = store.add_item(fluid()).unwrap();
        assert!(id.starts_with("INV"));
        assert_eq!(store.items().len(), 5);

        let item = store.item(&id).unwrap();
        assert_eq!(item.unit_price.cents(), 1_800_050);
        assert_eq!(store.low_stock_items().len(), 1);
    }

    #[test]
    fn test_add_item_rejects_duplicates_and_invalid() {
        let mut store = store();
        let dup = NewInventoryItem {
            name: " Filtro aire ".to_string(),
            ..fluid()
        };
        assert!(matches!(
            store.add_item(dup),
            Err(StoreError::UniqueViolation { .. })
        ));

        let no_supplier = NewInventoryItem {
            supplier: String::new(),
            ..fluid()
        };
        assert!(store.add_item(no_supplier).is_err());
        assert_eq!(store.items().len(), 4);
    }

    #[test]
    fn test_stock_levels() {
        let mut store = store();
        store.update_stock("INV004", 20).unwrap();
        let levels = store.stock_levels();
        assert_eq!(levels.len(), 4);
        assert_eq!(levels[0].status, StockStatus::Ok);
        assert_eq!(levels[3].status, StockStatus::Low);

        let json = serde_json::to_value(&levels[3]).unwrap();
        assert_eq!(json["name"], "Bujías");
        assert_eq!(json["status"], "low");
    }
}
