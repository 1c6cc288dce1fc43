//! The ACAB main input deck (`inp.5`).

pub mod writer;

pub use writer::{MainDeck, write};
