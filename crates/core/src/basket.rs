//! Requested (item, quantity) baskets.

use serde::{Deserialize, Serialize};

use crate::item::ItemName;

/// One requested line: an item and how many units of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasketLine {
    pub item: ItemName,
    pub quantity: u32,
}

impl BasketLine {
    pub fn new(item: ItemName, quantity: u32) -> Self {
        Self { item, quantity }
    }
}

/// A requested set of lines for a quote or sale.
///
/// Baskets arrive from the intent-routing layer as-is; duplicate item lines
/// are legal and are merged by [`Basket::normalized`] before pricing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Basket {
    lines: Vec<BasketLine>,
}

impl Basket {
    pub fn new(lines: Vec<BasketLine>) -> Self {
        Self { lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn lines(&self) -> &[BasketLine] {
        &self.lines
    }

    /// Sum of all line quantities (drives delivery tiering).
    pub fn total_units(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Merge duplicate item lines by summing quantities.
    ///
    /// First-seen order is preserved so quote lines come back in the order
    /// the customer asked for them.
    pub fn normalized(&self) -> Basket {
        let mut merged: Vec<BasketLine> = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            match merged.iter_mut().find(|l| l.item == line.item) {
                Some(existing) => {
                    existing.quantity = existing.quantity.saturating_add(line.quantity);
                }
                None => merged.push(line.clone()),
            }
        }
        Basket { lines: merged }
    }
}

impl FromIterator<BasketLine> for Basket {
    fn from_iter<I: IntoIterator<Item = BasketLine>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
