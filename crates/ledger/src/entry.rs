use core::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use papertrail_core::{IntegrityError, ItemName, Money};

/// Direction of a ledger entry's goods/cash movement.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    /// Inbound goods, outbound cash.
    Restock,
    /// Outbound goods, inbound cash.
    Sale,
}

/// Ledger entry sequence number, assigned monotonically at append.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct EntryId(pub u64);

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// A not-yet-admitted entry: shape-checked and numbered by
/// [`Journal::append`](crate::Journal::append).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryDraft {
    pub kind: EntryKind,
    /// Absent for pure cash entries (e.g. an opening balance).
    pub item: Option<ItemName>,
    /// Units moved. Required exactly when an item is present.
    pub quantity: Option<u32>,
    /// Total amount moved. Positive; the kind implies the cash direction.
    pub amount: Money,
    /// Calendar date the movement takes effect (not the append time).
    pub effective_date: NaiveDate,
}

impl EntryDraft {
    pub fn sale(item: ItemName, quantity: u32, amount: Money, effective_date: NaiveDate) -> Self {
        Self {
            kind: EntryKind::Sale,
            item: Some(item),
            quantity: Some(quantity),
            amount,
            effective_date,
        }
    }

    pub fn restock(
        item: ItemName,
        quantity: u32,
        amount: Money,
        effective_date: NaiveDate,
    ) -> Self {
        Self {
            kind: EntryKind::Restock,
            item: Some(item),
            quantity: Some(quantity),
            amount,
            effective_date,
        }
    }

    /// Pure cash movement with no goods attached.
    pub fn cash(kind: EntryKind, amount: Money, effective_date: NaiveDate) -> Self {
        Self {
            kind,
            item: None,
            quantity: None,
            amount,
            effective_date,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), IntegrityError> {
        if !self.amount.is_positive() {
            return Err(IntegrityError::NonPositiveAmount(self.amount));
        }
        match (&self.item, self.quantity) {
            (Some(_), None) => Err(IntegrityError::MissingQuantity),
            (Some(_), Some(0)) => Err(IntegrityError::ZeroQuantity),
            (None, Some(_)) => Err(IntegrityError::UnexpectedQuantity),
            _ => Ok(()),
        }
    }
}

/// An admitted, immutable ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub id: EntryId,
    pub kind: EntryKind,
    pub item: Option<ItemName>,
    pub quantity: Option<u32>,
    pub amount: Money,
    pub effective_date: NaiveDate,
}
