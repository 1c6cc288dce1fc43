//! Core records that flow between the listing parsers, the composition algebra
//! and the deck writers:
//!
//! - [`nuclide`] – MCNP (`Z*1000+A`) and ACAB (`Z*10000+A*10+level`) identifiers.
//! - [`cell`] – Cell declarations with signed density and particle importances.
//! - [`material`] – Material declarations, composition kinds and typed densities.
//! - [`transform`] – TR cards reduced to an origin and an orthonormal rotation.
//! - [`inventory`] – Residual-nuclei inventories with metastable bookkeeping.
//! - [`summary`] – Per-cell result tables persisted between runs.

pub mod cell;
pub mod inventory;
pub mod material;
pub mod nuclide;
pub mod summary;
pub mod transform;
