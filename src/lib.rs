//! A pure Rust bridge between MCNP/MCNPX transport listings and the ACAB
//! activation code. It reads geometry and material cards from the input echo
//! of a listing, brings each material to the density of its cell, and writes
//! the fixed-format decks that the collapse and burnup steps expect. Residual
//! nuclei computed by HTAPE3X can be read back and fed into the next run.
//!
//! # Features
//!
//! - **Listing parsing**: Locates the echoed input by its line-number column,
//!   merges continuation lines into cards and unfolds the `<n>i` interval
//!   shorthand
//! - **Geometry**: Rebuilds orthonormal TR transforms from 4, 10, 13 or 14
//!   entry cards, in cosines or degrees
//! - **Composition algebra**: Atomic or mass density targets for atomic or
//!   weight fraction materials, natural element expansion from an embedded
//!   abundance table
//! - **Deck generation**: COLLAPS `COLL.inp`, ACAB `inp.5` and the irradiation
//!   scenario, written field for field
//! - **Residual feeds**: HTAPE3X residual-nuclei sections with metastable-state
//!   bookkeeping
//!
//! # Quick Start
//!
//! [`deck::prepare`] takes one cell with its material and flux and renders all
//! decks for it:
//!
//! ```
//! use mc2acab::compose::AbundanceTable;
//! use mc2acab::deck::{self, CellUnit, DeckConfig, Prepared};
//! use mc2acab::io::listing::{Listing, find_cell, find_material};
//!
//! let listing = Listing::from_text("\
//! 1mcnpx     version 2.7.0
//!     1-       Steel block
//!     2-       10 1 -7.8 -1 imp:n=1
//!     3-       20 0 1 imp:n=0
//!     4-
//!     5-       1 so 10
//!     6-
//!     7-       m1 26000 1.0
//!     8-
//! ");
//!
//! let cell = find_cell(&listing, 10)?;
//! let material = find_material(&listing, cell.material)?;
//! let flux = vec![1.0e-7; 211];
//! let unit = CellUnit {
//!     cell: &cell,
//!     material: &material,
//!     group_flux: &flux,
//!     total_flux: 2.11e-5,
//!     volume: 4188.8,
//!     source: 1.0e13,
//!     feeds: None,
//! };
//!
//! let Prepared::Ready(decks) = deck::prepare(&unit, &DeckConfig::default(), AbundanceTable::embedded())? else {
//!     panic!("cell 10 holds material and sees flux");
//! };
//!
//! // Natural iron is expanded into its four stable isotopes.
//! assert_eq!(decks.isotopes.len(), 4);
//! assert!(decks.collapse.starts_with("12 12\n16\n"));
//! assert!(decks.main.starts_with("Input generated by mc2acab\n"));
//! # Ok::<(), mc2acab::DeckError>(())
//! ```
//!
//! # Module Organization
//!
//! - [`io`]: Readers and writers for every text format (listing, collapse,
//!   scenario, main deck, HTAPE3X residuals, JSON summaries)
//! - [`compose`]: Density conversion and natural element expansion
//! - [`deck`]: Per-cell pipeline and working directories
//!
//! # Data Types
//!
//! - [`CellRecord`]: Cell number, material, signed density and importances
//! - [`MaterialRecord`]: Ordered `(Zaid, fraction)` pairs of an `m` card
//! - [`Zaid`] / [`AcabId`]: Nuclide identifiers of the transport and
//!   activation codes
//! - [`Transform`]: Origin and rotation of a TR card
//! - [`ResidualInventory`]: Per-cell isotope quantities from HTAPE3X
//! - [`CellSummary`]: Persisted results of one activation unit

mod model;

pub mod compose;
pub mod deck;
pub mod io;

pub use model::cell::{CellRecord, Importances, Particle};
pub use model::inventory::{MetastableState, ResidualInventory};
pub use model::material::{Composition, Constituent, Density, MaterialRecord};
pub use model::nuclide::{AcabId, ParseZaidError, Zaid};
pub use model::summary::{CellSummary, ResultRow, ResultTable};
pub use model::transform::{Mat3, Transform, Vec3};

pub use compose::Error as ComposeError;
pub use deck::Error as DeckError;
pub use io::Error as IoError;
