use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use papertrail_catalog::Catalog;
use papertrail_core::{ItemName, Money};
use papertrail_ledger::{EntryKind, Journal};

/// Per-item sales aggregate as of a date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSales {
    pub item: ItemName,
    pub units_sold: u64,
    pub revenue: Money,
}

/// Point-in-time derived views over a journal and its catalog.
///
/// Every method is a pure fold over [`Journal::entries_up_to`]: projecting
/// the same journal prefix twice yields identical results, and cost is
/// O(entries) per call — fine at business scale.
#[derive(Debug, Copy, Clone)]
pub struct Projector<'a> {
    journal: &'a Journal,
    catalog: &'a Catalog,
}

impl<'a> Projector<'a> {
    pub fn new(journal: &'a Journal, catalog: &'a Catalog) -> Self {
        Self { journal, catalog }
    }

    pub fn catalog(&self) -> &'a Catalog {
        self.catalog
    }

    /// Net units on hand: restocked minus sold, up to and including `as_of`.
    pub fn on_hand(&self, item: &ItemName, as_of: NaiveDate) -> i64 {
        let mut net = 0i64;
        for entry in self.journal.entries_up_to(as_of) {
            if entry.item.as_ref() != Some(item) {
                continue;
            }
            let quantity = i64::from(entry.quantity.unwrap_or(0));
            match entry.kind {
                EntryKind::Restock => net += quantity,
                EntryKind::Sale => net -= quantity,
            }
        }
        net
    }

    /// Net stock per item for everything that has ever moved.
    pub fn stock_levels(&self, as_of: NaiveDate) -> BTreeMap<ItemName, i64> {
        let mut levels: BTreeMap<ItemName, i64> = BTreeMap::new();
        for entry in self.journal.entries_up_to(as_of) {
            let Some(item) = &entry.item else { continue };
            let quantity = i64::from(entry.quantity.unwrap_or(0));
            let net = levels.entry(item.clone()).or_default();
            match entry.kind {
                EntryKind::Restock => *net += quantity,
                EntryKind::Sale => *net -= quantity,
            }
        }
        levels
    }

    /// Cash position: sale amounts minus restock amounts.
    pub fn cash_balance(&self, as_of: NaiveDate) -> Money {
        let mut balance = Money::ZERO;
        for entry in self.journal.entries_up_to(as_of) {
            match entry.kind {
                EntryKind::Sale => balance += entry.amount,
                EntryKind::Restock => balance -= entry.amount,
            }
        }
        balance
    }

    /// On-hand stock valued at current catalog unit prices.
    ///
    /// Items that have moved but are missing from the catalog carry no price
    /// and contribute nothing.
    pub fn inventory_value(&self, as_of: NaiveDate) -> Money {
        self.stock_levels(as_of)
            .into_iter()
            .filter_map(|(item, net)| {
                self.catalog
                    .get(&item)
                    .map(|entry| entry.unit_price.times(net))
            })
            .sum()
    }

    /// Best sellers ranked by revenue descending, ties broken by item name
    /// ascending. At most `limit` rows.
    pub fn top_sellers(&self, as_of: NaiveDate, limit: usize) -> Vec<ItemSales> {
        let mut aggregates: BTreeMap<ItemName, (u64, Money)> = BTreeMap::new();
        for entry in self.journal.entries_up_to(as_of) {
            if entry.kind != EntryKind::Sale {
                continue;
            }
            let Some(item) = &entry.item else { continue };
            let (units, revenue) = aggregates.entry(item.clone()).or_insert((0, Money::ZERO));
            *units += u64::from(entry.quantity.unwrap_or(0));
            *revenue += entry.amount;
        }

        let mut rows: Vec<ItemSales> = aggregates
            .into_iter()
            .map(|(item, (units_sold, revenue))| ItemSales {
                item,
                units_sold,
                revenue,
            })
            .collect();

        // Stable sort on revenue keeps the BTreeMap's name order for ties.
        rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        rows.truncate(limit);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use papertrail_catalog::{CatalogItem, Category};
    use papertrail_ledger::EntryDraft;
    use proptest::prelude::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn item(name: &str) -> ItemName {
        ItemName::new(name).unwrap()
    }

    fn catalog() -> Catalog {
        Catalog::new([
            CatalogItem {
                name: item("A4 paper"),
                category: Category::Paper,
                unit_price: Money::from_cents(5),
                reorder_threshold: 100,
            },
            CatalogItem {
                name: item("Envelopes"),
                category: Category::Product,
                unit_price: Money::from_cents(5),
                reorder_threshold: 50,
            },
        ])
        .unwrap()
    }

    fn seeded_journal() -> Journal {
        let mut journal = Journal::new();
        journal
            .append(vec![
                EntryDraft::cash(EntryKind::Sale, Money::from_cents(50_000_00), date("2025-01-01")),
                EntryDraft::restock(item("A4 paper"), 450, Money::from_cents(2250), date("2025-01-01")),
                EntryDraft::restock(item("Envelopes"), 200, Money::from_cents(1000), date("2025-01-01")),
            ])
            .unwrap();
        journal
    }

    #[test]
    fn on_hand_nets_restocks_against_sales() {
        let mut journal = seeded_journal();
        journal
            .append_one(EntryDraft::sale(
                item("A4 paper"),
                200,
                Money::from_cents(1000),
                date("2025-01-03"),
            ))
            .unwrap();

        let catalog = catalog();
        let projector = Projector::new(&journal, &catalog);

        assert_eq!(projector.on_hand(&item("A4 paper"), date("2025-01-02")), 450);
        assert_eq!(projector.on_hand(&item("A4 paper"), date("2025-01-03")), 250);
        assert_eq!(projector.on_hand(&item("Envelopes"), date("2025-01-03")), 200);
    }

    #[test]
    fn cash_balance_ignores_entries_after_the_cutoff() {
        let mut journal = seeded_journal();
        journal
            .append_one(EntryDraft::restock(
                item("A4 paper"),
                500,
                Money::from_cents(2500),
                date("2025-02-01"),
            ))
            .unwrap();

        let catalog = catalog();
        let projector = Projector::new(&journal, &catalog);

        // 50,000.00 - 22.50 - 10.00 as of January.
        assert_eq!(
            projector.cash_balance(date("2025-01-31")),
            Money::from_cents(49_967_50)
        );
        assert_eq!(
            projector.cash_balance(date("2025-02-01")),
            Money::from_cents(49_942_50)
        );
    }

    #[test]
    fn inventory_value_prices_net_stock_at_catalog_rates() {
        let journal = seeded_journal();
        let catalog = catalog();
        let projector = Projector::new(&journal, &catalog);

        // (450 + 200) units at $0.05.
        assert_eq!(
            projector.inventory_value(date("2025-01-01")),
            Money::from_cents(3250)
        );
    }

    #[test]
    fn top_sellers_rank_by_revenue_then_name() {
        let mut journal = seeded_journal();
        journal
            .append(vec![
                EntryDraft::sale(item("Envelopes"), 100, Money::from_cents(500), date("2025-01-02")),
                EntryDraft::sale(item("A4 paper"), 60, Money::from_cents(300), date("2025-01-02")),
                EntryDraft::sale(item("A4 paper"), 40, Money::from_cents(200), date("2025-01-03")),
            ])
            .unwrap();

        let catalog = catalog();
        let projector = Projector::new(&journal, &catalog);
        let top = projector.top_sellers(date("2025-01-31"), 5);

        // Equal revenue ($5.00 each): ties break on name ascending.
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].item, item("A4 paper"));
        assert_eq!(top[0].units_sold, 100);
        assert_eq!(top[0].revenue, Money::from_cents(500));
        assert_eq!(top[1].item, item("Envelopes"));

        assert_eq!(projector.top_sellers(date("2025-01-31"), 1).len(), 1);
    }

    proptest! {
        /// Projecting the same journal prefix twice yields identical results.
        #[test]
        fn projection_is_idempotent(
            quantities in prop::collection::vec(1u32..500, 1..20),
            cutoff_day in 1u32..28,
        ) {
            let mut journal = Journal::new();
            for (i, quantity) in quantities.iter().enumerate() {
                let day = (i % 27) as u32 + 1;
                journal.append_one(EntryDraft::restock(
                    item("A4 paper"),
                    *quantity,
                    Money::from_cents(i64::from(*quantity) * 5),
                    date(&format!("2025-01-{day:02}")),
                )).unwrap();
            }

            let catalog = catalog();
            let projector = Projector::new(&journal, &catalog);
            let as_of = date(&format!("2025-01-{cutoff_day:02}"));

            prop_assert_eq!(
                projector.on_hand(&item("A4 paper"), as_of),
                projector.on_hand(&item("A4 paper"), as_of)
            );
            prop_assert_eq!(projector.cash_balance(as_of), projector.cash_balance(as_of));
            prop_assert_eq!(projector.top_sellers(as_of, 5), projector.top_sellers(as_of, 5));
        }
    }
}
