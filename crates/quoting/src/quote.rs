use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use papertrail_core::{
    Basket, DeliverySchedule, DomainError, DomainResult, IntegrityError, ItemName, Money,
};
use papertrail_projection::Projector;

use crate::history::{QuoteHistory, QuoteRecord};

/// Sales tax applied to every quote subtotal.
pub const TAX_RATE_PERCENT: u32 = 8;

/// How many comparable historical quotes a quote carries.
pub const COMPARABLE_LIMIT: usize = 5;

/// Quote identifier.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteId(Uuid);

impl QuoteId {
    /// New time-ordered identifier (UUIDv7).
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for QuoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// One priced line with an availability advisory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteLine {
    pub item: ItemName,
    pub quantity: u32,
    pub unit_price: Money,
    pub extended: Money,
    /// Stock position when the quote was generated. Advisory only: a
    /// shortage never blocks quoting, only a sale enforces availability.
    pub on_hand: i64,
}

impl QuoteLine {
    pub fn is_short(&self) -> bool {
        self.on_hand < i64::from(self.quantity)
    }
}

/// A priced, dated, delivery-estimated quote. Ephemeral: nothing is written
/// to the ledger until the customer accepts and a sale is finalized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub id: QuoteId,
    pub lines: Vec<QuoteLine>,
    pub subtotal: Money,
    pub tax: Money,
    pub total: Money,
    pub generated_on: NaiveDate,
    pub estimated_delivery: NaiveDate,
    /// Comparable historical quotes, most relevant first. Context for the
    /// caller's rationale; never an input to pricing.
    pub comparables: Vec<QuoteRecord>,
}

/// Price a basket against the catalog as of a date.
///
/// Duplicate item lines are merged; the first unresolved name rejects the
/// whole basket with [`DomainError::UnknownItem`]; an empty basket is
/// rejected outright. Delivery is tiered on the summed basket quantity.
pub fn quote(
    basket: &Basket,
    as_of: NaiveDate,
    projector: &Projector<'_>,
    history: &QuoteHistory,
    search_terms: &[&str],
) -> DomainResult<Quote> {
    if basket.is_empty() {
        return Err(DomainError::EmptyBasket);
    }
    let basket = basket.normalized();

    let mut lines = Vec::with_capacity(basket.lines().len());
    let mut subtotal = Money::ZERO;
    for line in basket.lines() {
        if line.quantity == 0 {
            return Err(IntegrityError::ZeroQuantity.into());
        }
        let entry = projector.catalog().resolve(&line.item)?;
        let extended = entry.unit_price.times(i64::from(line.quantity));
        subtotal += extended;
        lines.push(QuoteLine {
            item: line.item.clone(),
            quantity: line.quantity,
            unit_price: entry.unit_price,
            extended,
            on_hand: projector.on_hand(&line.item, as_of),
        });
    }

    let tax = subtotal.percent_of(TAX_RATE_PERCENT);
    let comparables = history
        .search(search_terms, COMPARABLE_LIMIT)
        .into_iter()
        .cloned()
        .collect();

    Ok(Quote {
        id: QuoteId::new(),
        lines,
        subtotal,
        tax,
        total: subtotal + tax,
        generated_on: as_of,
        estimated_delivery: DeliverySchedule::CUSTOMER.estimate(as_of, basket.total_units()),
        comparables,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use papertrail_catalog::{Catalog, CatalogItem, Category};
    use papertrail_core::BasketLine;
    use papertrail_ledger::{EntryDraft, Journal};

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

    fn stocked_journal() -> Journal {
        let mut journal = Journal::new();
        journal
            .append(vec![
                EntryDraft::restock(item("A4 paper"), 450, Money::from_cents(2250), date("2025-01-01")),
                EntryDraft::restock(item("Envelopes"), 200, Money::from_cents(1000), date("2025-01-01")),
            ])
            .unwrap();
        journal
    }

    fn basket(lines: &[(&str, u32)]) -> Basket {
        lines
            .iter()
            .map(|(name, quantity)| BasketLine::new(item(name), *quantity))
            .collect()
    }

    #[test]
    fn prices_tax_and_delivery_for_a_two_line_basket() {
        let journal = stocked_journal();
        let catalog = catalog();
        let projector = Projector::new(&journal, &catalog);
        let history = QuoteHistory::default();

        let quote = quote(
            &basket(&[("A4 paper", 500), ("Envelopes", 100)]),
            date("2025-03-01"),
            &projector,
            &history,
            &[],
        )
        .unwrap();

        assert_eq!(quote.subtotal, Money::from_cents(3000));
        assert_eq!(quote.tax, Money::from_cents(240));
        assert_eq!(quote.total, Money::from_cents(3240));
        // 600 units falls in the 101-1000 tier: three days out.
        assert_eq!(quote.estimated_delivery, date("2025-03-04"));
        assert!(quote.comparables.is_empty());
    }

    #[test]
    fn shortage_is_advisory_not_blocking() {
        let journal = stocked_journal();
        let catalog = catalog();
        let projector = Projector::new(&journal, &catalog);
        let history = QuoteHistory::default();

        // 500 requested, 450 on hand: the quote still goes out.
        let quote = quote(
            &basket(&[("A4 paper", 500)]),
            date("2025-03-01"),
            &projector,
            &history,
            &[],
        )
        .unwrap();

        assert_eq!(quote.lines[0].on_hand, 450);
        assert!(quote.lines[0].is_short());
    }

    #[test]
    fn duplicate_lines_are_summed_not_rejected() {
        let journal = stocked_journal();
        let catalog = catalog();
        let projector = Projector::new(&journal, &catalog);
        let history = QuoteHistory::default();

        let quote = quote(
            &basket(&[("A4 paper", 300), ("A4 paper", 200)]),
            date("2025-03-01"),
            &projector,
            &history,
            &[],
        )
        .unwrap();

        assert_eq!(quote.lines.len(), 1);
        assert_eq!(quote.lines[0].quantity, 500);
        assert_eq!(quote.subtotal, Money::from_cents(2500));
    }

    #[test]
    fn empty_basket_is_rejected() {
        let journal = Journal::new();
        let catalog = catalog();
        let projector = Projector::new(&journal, &catalog);
        let history = QuoteHistory::default();

        let err = quote(&Basket::default(), date("2025-03-01"), &projector, &history, &[])
            .unwrap_err();
        assert_eq!(err, DomainError::EmptyBasket);
    }

    #[test]
    fn first_unknown_item_rejects_the_whole_basket() {
        let journal = stocked_journal();
        let catalog = catalog();
        let projector = Projector::new(&journal, &catalog);
        let history = QuoteHistory::default();

        let err = quote(
            &basket(&[("A4 paper", 10), ("Glitter paper", 10), ("Cardstock", 10)]),
            date("2025-03-01"),
            &projector,
            &history,
            &[],
        )
        .unwrap_err();

        assert_eq!(
            err,
            DomainError::UnknownItem {
                item: item("Glitter paper")
            }
        );
    }

    #[test]
    fn comparables_come_from_the_corpus_without_touching_price() {
        let journal = stocked_journal();
        let catalog = catalog();
        let projector = Projector::new(&journal, &catalog);

        let record: QuoteRecord = serde_json::from_str(
            r#"{
                "request_text": "A4 paper for a print shop",
                "total_amount": 999999,
                "rationale": "legacy bulk deal",
                "job_type": "printer",
                "order_size": "large",
                "event_type": null,
                "request_date": "2024-11-02"
            }"#,
        )
        .unwrap();
        let history = QuoteHistory::new(vec![record.clone()]);

        let quote = quote(
            &basket(&[("A4 paper", 100)]),
            date("2025-03-01"),
            &projector,
            &history,
            &["print shop"],
        )
        .unwrap();

        assert_eq!(quote.comparables, vec![record]);
        // Price stays catalog-derived despite the pricey comparable.
        assert_eq!(quote.subtotal, Money::from_cents(500));
    }
}
