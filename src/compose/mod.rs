//! Composition algebra for material records.
//!
//! Materials come out of the listing as fractions. Before they can feed an
//! activation deck they must be expanded into explicit isotopes
//! ([`unfold_natural`]) and scaled to the atomic densities of the cell that
//! holds them ([`convert_density`]). Both steps draw on an
//! [`AbundanceTable`] of natural isotopic compositions.

mod abundance;
mod density;
mod error;
mod unfold;

pub use abundance::{AbundanceTable, Isotope};
pub use density::{AVOGADRO_BARN, convert_density, implied_mass_density, mass_number};
pub use error::Error;
pub use unfold::unfold_natural;
