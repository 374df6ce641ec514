//! Decision engine and external facade.
//!
//! [`BackOffice`] is the closed set of typed operations the routing layer
//! calls into: stock lookups, quoting, and the two ledger-mutating decisions
//! (sell, restock). All business logic lives here or below; callers only
//! classify intents and extract arguments.

pub mod back_office;

pub use back_office::{
    BackOffice, ReorderAdvisory, RestockOutcome, SaleOutcome, StockStatus,
};
