use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use papertrail_catalog::Catalog;
use papertrail_core::{
    Basket, DeliverySchedule, DomainError, DomainResult, IntegrityError, ItemName, Money,
};
use papertrail_ledger::{EntryDraft, EntryId, EntryKind, Journal};
use papertrail_projection::{FinancialReport, InventoryLine, Projector};
use papertrail_quoting::{Quote, QuoteHistory, quote};

/// Restock suggestion raised when a sale leaves an item at or below its
/// reorder threshold. Advisory only: nothing is ordered automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderAdvisory {
    pub item: ItemName,
    pub on_hand: i64,
    pub recommended_quantity: u32,
}

/// A committed sale: the ledger entries it produced plus any advisories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleOutcome {
    pub entry_ids: Vec<EntryId>,
    pub total_revenue: Money,
    pub advisories: Vec<ReorderAdvisory>,
}

/// A committed restock order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestockOutcome {
    pub entry_id: EntryId,
    pub total_cost: Money,
    /// Supplier-tiered arrival estimate. The ledger entry itself is dated at
    /// the commitment date, so on-hand stock is credited immediately.
    pub delivery_date: NaiveDate,
}

/// Stock position for one item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockStatus {
    pub item: ItemName,
    pub on_hand: i64,
    pub unit_price: Money,
    pub reorder_threshold: u32,
    pub below_threshold: bool,
}

/// Facade over catalog, journal and quote history.
///
/// The journal sits behind one lock: `sell` and `restock` hold the write
/// side across project → validate → append, so an availability or cash check
/// can never race another caller's append. Read-only operations share the
/// read side.
#[derive(Debug)]
pub struct BackOffice {
    catalog: Catalog,
    history: QuoteHistory,
    journal: RwLock<Journal>,
}

impl BackOffice {
    pub fn new(catalog: Catalog, history: QuoteHistory) -> Self {
        Self::with_journal(catalog, history, Journal::new())
    }

    /// Resume over an existing journal (e.g. replayed from durable storage).
    pub fn with_journal(catalog: Catalog, history: QuoteHistory, journal: Journal) -> Self {
        Self {
            catalog,
            history,
            journal: RwLock::new(journal),
        }
    }

    /// Fresh office seeded with an opening cash balance, booked as a pure
    /// cash entry dated `as_of`.
    pub fn with_opening_cash(
        catalog: Catalog,
        history: QuoteHistory,
        opening_cash: Money,
        as_of: NaiveDate,
    ) -> DomainResult<Self> {
        let mut journal = Journal::new();
        journal.append_one(EntryDraft::cash(EntryKind::Sale, opening_cash, as_of))?;
        Ok(Self::with_journal(catalog, history, journal))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn read_journal(&self) -> DomainResult<RwLockReadGuard<'_, Journal>> {
        self.journal
            .read()
            .map_err(|_| IntegrityError::LockPoisoned.into())
    }

    fn write_journal(&self) -> DomainResult<RwLockWriteGuard<'_, Journal>> {
        self.journal
            .write()
            .map_err(|_| IntegrityError::LockPoisoned.into())
    }

    /// Stock position, pricing and threshold for one item.
    pub fn get_stock(&self, item: &ItemName, as_of: NaiveDate) -> DomainResult<StockStatus> {
        let entry = self.catalog.resolve(item)?;
        let journal = self.read_journal()?;
        let on_hand = Projector::new(&journal, &self.catalog).on_hand(item, as_of);

        Ok(StockStatus {
            item: entry.name.clone(),
            on_hand,
            unit_price: entry.unit_price,
            reorder_threshold: entry.reorder_threshold,
            below_threshold: on_hand <= i64::from(entry.reorder_threshold),
        })
    }

    /// Every catalog item with its stock position, in name order.
    pub fn list_inventory(&self, as_of: NaiveDate) -> DomainResult<Vec<InventoryLine>> {
        let journal = self.read_journal()?;
        Ok(Projector::new(&journal, &self.catalog).inventory_lines(as_of))
    }

    /// Generate a quote. Never mutates the ledger; availability shortfalls
    /// are reported on the quote, not enforced.
    pub fn quote(
        &self,
        basket: &Basket,
        as_of: NaiveDate,
        search_terms: &[&str],
    ) -> DomainResult<Quote> {
        let journal = self.read_journal()?;
        let projector = Projector::new(&journal, &self.catalog);
        quote(basket, as_of, &projector, &self.history, search_terms)
    }

    /// Finalize a sale.
    ///
    /// Every line is checked against the projection as it stands before this
    /// sale; any shortage rejects the whole basket. On success one Sale entry
    /// per line is appended atomically, then each sold item is re-projected
    /// for reorder advisories.
    pub fn sell(&self, basket: &Basket, as_of: NaiveDate) -> DomainResult<SaleOutcome> {
        if basket.is_empty() {
            return Err(DomainError::EmptyBasket);
        }
        let basket = basket.normalized();

        let mut journal = self.write_journal()?;

        let mut drafts = Vec::with_capacity(basket.lines().len());
        let mut thresholds = Vec::with_capacity(basket.lines().len());
        let mut total_revenue = Money::ZERO;
        {
            let projector = Projector::new(&journal, &self.catalog);
            for line in basket.lines() {
                if line.quantity == 0 {
                    return Err(IntegrityError::ZeroQuantity.into());
                }
                let entry = self.catalog.resolve(&line.item)?;
                let available = projector.on_hand(&line.item, as_of);
                if available < i64::from(line.quantity) {
                    warn!(
                        item = %line.item,
                        available,
                        requested = line.quantity,
                        "sale rejected: insufficient stock"
                    );
                    return Err(DomainError::InsufficientStock {
                        item: line.item.clone(),
                        available,
                        requested: line.quantity,
                    });
                }

                let amount = entry.unit_price.times(i64::from(line.quantity));
                total_revenue += amount;
                drafts.push(EntryDraft::sale(line.item.clone(), line.quantity, amount, as_of));
                thresholds.push((line.item.clone(), entry.reorder_threshold));
            }
        }

        let entry_ids = journal.append(drafts)?;

        let projector = Projector::new(&journal, &self.catalog);
        let mut advisories = Vec::new();
        for (item, threshold) in thresholds {
            let on_hand = projector.on_hand(&item, as_of);
            if on_hand <= i64::from(threshold) {
                advisories.push(ReorderAdvisory {
                    recommended_quantity: recommended_reorder(threshold, on_hand),
                    item,
                    on_hand,
                });
            }
        }

        info!(
            entries = entry_ids.len(),
            revenue = %total_revenue,
            advisories = advisories.len(),
            "sale committed"
        );

        Ok(SaleOutcome {
            entry_ids,
            total_revenue,
            advisories,
        })
    }

    /// Place a restock order.
    ///
    /// The entry is dated `as_of` — the commitment date — so on-hand stock is
    /// credited immediately; `delivery_date` is the supplier's tiered arrival
    /// estimate.
    pub fn restock(
        &self,
        item: &ItemName,
        quantity: u32,
        as_of: NaiveDate,
    ) -> DomainResult<RestockOutcome> {
        if quantity == 0 {
            return Err(IntegrityError::ZeroQuantity.into());
        }
        let entry = self.catalog.resolve(item)?;
        let total_cost = entry.unit_price.times(i64::from(quantity));

        let mut journal = self.write_journal()?;
        let available = Projector::new(&journal, &self.catalog).cash_balance(as_of);
        if available < total_cost {
            warn!(
                item = %item,
                required = %total_cost,
                available = %available,
                "restock rejected: insufficient funds"
            );
            return Err(DomainError::InsufficientFunds {
                available,
                required: total_cost,
            });
        }

        let entry_id =
            journal.append_one(EntryDraft::restock(item.clone(), quantity, total_cost, as_of))?;
        let delivery_date = DeliverySchedule::SUPPLIER.estimate(as_of, u64::from(quantity));

        info!(
            item = %item,
            quantity,
            cost = %total_cost,
            delivery = %delivery_date,
            "restock committed"
        );

        Ok(RestockOutcome {
            entry_id,
            total_cost,
            delivery_date,
        })
    }

    /// Cash, valuation, total assets, inventory breakdown and top sellers.
    pub fn financial_status(&self, as_of: NaiveDate) -> DomainResult<FinancialReport> {
        let journal = self.read_journal()?;
        Ok(Projector::new(&journal, &self.catalog).financial_report(as_of))
    }
}

/// Suggested reorder size: bring stock back up to twice the threshold, and
/// always at least one unit.
fn recommended_reorder(threshold: u32, on_hand: i64) -> u32 {
    let target = i64::from(threshold) * 2;
    (target - on_hand).max(1).min(i64::from(u32::MAX)) as u32
}
