use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use papertrail_catalog::Category;
use papertrail_core::{ItemName, Money};

use crate::projector::{ItemSales, Projector};

/// How many best sellers a financial report carries.
pub const TOP_SELLER_LIMIT: usize = 5;

/// One row of the inventory breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryLine {
    pub item: ItemName,
    pub category: Category,
    pub on_hand: i64,
    pub unit_price: Money,
    pub value: Money,
}

/// Company-wide financial position as of a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialReport {
    pub as_of: NaiveDate,
    pub cash_balance: Money,
    pub inventory_value: Money,
    pub total_assets: Money,
    pub inventory: Vec<InventoryLine>,
    pub top_sellers: Vec<ItemSales>,
}

impl<'a> Projector<'a> {
    /// One inventory row per catalog item, in name order.
    ///
    /// Zero-stock items are included so the report is total; callers filter
    /// if they only want sellable stock.
    pub fn inventory_lines(&self, as_of: NaiveDate) -> Vec<InventoryLine> {
        let levels = self.stock_levels(as_of);
        self.catalog()
            .iter()
            .map(|entry| {
                let on_hand = levels.get(&entry.name).copied().unwrap_or(0);
                InventoryLine {
                    item: entry.name.clone(),
                    category: entry.category,
                    on_hand,
                    unit_price: entry.unit_price,
                    value: entry.unit_price.times(on_hand),
                }
            })
            .collect()
    }

    /// Cash, valuation, total assets, inventory breakdown and top sellers.
    pub fn financial_report(&self, as_of: NaiveDate) -> FinancialReport {
        let cash_balance = self.cash_balance(as_of);
        let inventory = self.inventory_lines(as_of);
        let inventory_value: Money = inventory.iter().map(|line| line.value).sum();

        FinancialReport {
            as_of,
            cash_balance,
            inventory_value,
            total_assets: cash_balance + inventory_value,
            inventory,
            top_sellers: self.top_sellers(as_of, TOP_SELLER_LIMIT),
        }
    }
}
