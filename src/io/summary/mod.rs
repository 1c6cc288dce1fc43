//! JSON persistence of per-cell results between runs.

pub mod reader;
pub mod writer;

pub use reader::{load, read};
pub use writer::{save, write};
