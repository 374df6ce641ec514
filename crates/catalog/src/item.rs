use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use papertrail_core::{DomainError, DomainResult, IntegrityError, ItemName, Money};

/// Coarse catalog classification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Paper,
    Product,
    LargeFormat,
    Specialty,
}

/// One catalog entry. Immutable after the catalog is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub name: ItemName,
    pub category: Category,
    /// Price per unit. Always positive.
    pub unit_price: Money,
    /// Stock level at or below which a restock advisory is raised.
    pub reorder_threshold: u32,
}

/// Read-only item reference data keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    items: BTreeMap<ItemName, CatalogItem>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate names and non-positive prices.
    pub fn new(items: impl IntoIterator<Item = CatalogItem>) -> DomainResult<Self> {
        let mut map = BTreeMap::new();
        for item in items {
            if !item.unit_price.is_positive() {
                return Err(IntegrityError::NonPositiveAmount(item.unit_price).into());
            }
            let name = item.name.clone();
            if map.insert(name.clone(), item).is_some() {
                return Err(IntegrityError::DuplicateItem(name).into());
            }
        }
        Ok(Self { items: map })
    }

    pub fn get(&self, name: &ItemName) -> Option<&CatalogItem> {
        self.items.get(name)
    }

    /// Resolve a name or fail with [`DomainError::UnknownItem`].
    pub fn resolve(&self, name: &ItemName) -> DomainResult<&CatalogItem> {
        self.items
            .get(name)
            .ok_or_else(|| DomainError::unknown_item(name.clone()))
    }

    /// All items, in name order.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogItem> {
        self.items.values()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
