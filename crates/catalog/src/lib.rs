//! Item reference data: identity, pricing, reorder thresholds.
//!
//! The catalog is read-only at steady state; it is built once at process
//! start and handed by reference to the projection and decision layers.

pub mod item;

pub use item::{Catalog, CatalogItem, Category};
