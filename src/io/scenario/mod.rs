//! ACAB irradiation scenario (blocks #7 to #13 of the main deck).
//!
//! The scenario is either generated from a [`ScenarioConfig`](crate::io::ScenarioConfig)
//! by the writer or taken verbatim from a user file by the reader.

pub mod reader;
pub mod writer;

pub use reader::{read_scenario, read_scenario_from};
pub use writer::{render, validate, write, write_to_path};
