use crate::io::error::Error;
use std::io::Read;
use std::path::Path;

/// Reads a user-supplied scenario file. The text is passed to the main deck
/// unchanged, so no parsing is attempted.
pub fn read_scenario(path: impl AsRef<Path>) -> Result<String, Error> {
    let path = path.as_ref();
    log::info!("Using scenario file {}", path.display());
    let file = std::fs::File::open(path)?;
    read_scenario_from(file)
}

pub fn read_scenario_from<R: Read>(mut reader: R) -> Result<String, Error> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    if text.trim().is_empty() {
        log::warn!("Scenario text is empty; the main deck will have no irradiation history");
    }
    Ok(text)
}
