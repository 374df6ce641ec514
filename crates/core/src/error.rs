//! Domain error model.

use thiserror::Error;

use crate::item::ItemName;
use crate::money::Money;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Malformed entry shape or other structural defect.
///
/// Unreachable through the public decision procedures, which validate their
/// inputs before building entries. Treat as a fatal guard, not a business
/// outcome.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntegrityError {
    #[error("item name cannot be empty")]
    EmptyItemName,

    #[error("entry amount must be positive (got {0})")]
    NonPositiveAmount(Money),

    #[error("line quantity must be positive")]
    ZeroQuantity,

    #[error("entry with an item reference requires a quantity")]
    MissingQuantity,

    #[error("pure cash entry cannot carry a quantity")]
    UnexpectedQuantity,

    #[error("duplicate catalog item: {0}")]
    DuplicateItem(ItemName),

    #[error("ledger lock poisoned")]
    LockPoisoned,
}

/// Typed rejection returned to the caller.
///
/// Every variant carries enough structure (item, quantities, amounts) for the
/// caller to render an actionable message without re-querying the core. None
/// of these are retried automatically; retry policy belongs to the
/// orchestration layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The request references an item absent from the catalog. Always rejects
    /// the whole call, never a single line.
    #[error("unknown item: {item}")]
    UnknownItem { item: ItemName },

    #[error("basket has no lines")]
    EmptyBasket,

    /// The sale would drive on-hand stock negative.
    #[error("insufficient stock for {item}: {available} available, {requested} requested")]
    InsufficientStock {
        item: ItemName,
        available: i64,
        requested: u32,
    },

    /// The restock would drive the cash balance negative.
    #[error("insufficient funds: {available} available, {required} required")]
    InsufficientFunds { available: Money, required: Money },

    #[error(transparent)]
    Integrity(#[from] IntegrityError),
}

impl DomainError {
    pub fn unknown_item(item: ItemName) -> Self {
        Self::UnknownItem { item }
    }
}
