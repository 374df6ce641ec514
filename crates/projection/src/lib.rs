//! Derived, point-in-time views over the journal.
//!
//! Nothing here holds mutable state: every figure is recomputed by folding
//! `Journal::entries_up_to(as_of)`, so a projection can never drift from the
//! movements that produced it.

pub mod projector;
pub mod report;

pub use projector::{ItemSales, Projector};
pub use report::{FinancialReport, InventoryLine};
