//! HTAPE3X residual-nuclei output (the feed inventories) and the request deck
//! that asks HTAPE3X for it.

pub mod reader;
pub mod writer;

pub use reader::{open_inventories, read_inventories, read_inventory, read_metastable_states};
pub use writer::{write_composed_request, write_request};
