//! Append-only transaction ledger.
//!
//! The journal is the sole source of truth for the business: current stock,
//! cash balance and all financial reports are derived from it, never stored
//! alongside it. Entries are immutable once appended; there is no update or
//! delete operation.

pub mod entry;
pub mod journal;

pub use entry::{EntryDraft, EntryId, EntryKind, LedgerEntry};
pub use journal::Journal;
