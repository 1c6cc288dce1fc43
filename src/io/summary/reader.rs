use crate::io::error::Error;
use crate::model::summary::CellSummary;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

pub fn read<R: Read>(reader: R) -> Result<Vec<CellSummary>, Error> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn load(path: impl AsRef<Path>) -> Result<Vec<CellSummary>, Error> {
    let file = File::open(path)?;
    read(BufReader::new(file))
}
