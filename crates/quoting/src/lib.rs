//! Quote generation.
//!
//! Pricing is always derived from current catalog unit prices, so every quote
//! is reproducible and auditable independent of the historical corpus: the
//! corpus only supplies comparable past quotes as rationale context.

pub mod history;
pub mod quote;

pub use history::{QuoteHistory, QuoteRecord};
pub use quote::{COMPARABLE_LIMIT, Quote, QuoteId, QuoteLine, TAX_RATE_PERCENT, quote};
