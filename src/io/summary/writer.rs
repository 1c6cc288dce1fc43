use crate::io::error::Error;
use crate::model::summary::CellSummary;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Writes the summaries as a pretty-printed JSON array.
pub fn write<W: Write>(mut writer: W, summaries: &[CellSummary]) -> Result<(), Error> {
    serde_json::to_writer_pretty(&mut writer, summaries)?;
    writeln!(writer)?;
    Ok(())
}

pub fn save(path: impl AsRef<Path>, summaries: &[CellSummary]) -> Result<(), Error> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write(&mut writer, summaries)?;
    writer.flush()?;
    log::info!("Saved {} cell summaries to {}", summaries.len(), path.display());
    Ok(())
}
