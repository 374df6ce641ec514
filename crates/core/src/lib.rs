//! `papertrail-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives shared by the ledger,
//! projection, quoting and decision crates (no infrastructure concerns).

pub mod basket;
pub mod delivery;
pub mod error;
pub mod item;
pub mod money;

pub use basket::{Basket, BasketLine};
pub use delivery::DeliverySchedule;
pub use error::{DomainError, DomainResult, IntegrityError};
pub use item::ItemName;
pub use money::Money;
