//! Reading the input echo embedded in an MCNP/MCNPX output listing.
//!
//! [`Listing`] locates the echoed input by its line-number prefix and splits it
//! into logical [`Card`]s. The sibling modules turn cards into records:
//! cells, materials, TR transforms and the `HISTP` cell list.

pub mod cell;
pub mod interval;
pub mod material;
pub mod reader;
pub mod transform;

pub use cell::{all_cells, cell_from_tokens, find_cell, histp_cells, parse_cell};
pub use interval::{unfold_integer_intervals, unfold_intervals};
pub use material::{MaterialCache, find_material};
pub use reader::{Card, Cards, CodeVersion, EchoLines, Listing, Section, detect_version, tokenize};
pub use transform::{find_transform, parse_transform};
