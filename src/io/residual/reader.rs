use crate::io::{Format, error::Error, util::parse_fortran_f64};
use crate::model::inventory::{MetastableState, ResidualInventory};
use crate::model::nuclide::AcabId;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

const CELL_MARKER: &str = "residual nuclei in cell";
const METASTABLE_MARKER: &str = "metastable state";
const METASTABLE_END: &str = "completed";

/// Reads the residual inventory of every cell in `cells`, in that order.
/// A cell listed more than once gets a copy of its inventory in each slot.
///
/// Each inventory is reconciled with the metastable-state table of the same
/// output, so excited levels appear as their own entries and are subtracted
/// from the ground state.
pub fn read_inventories<R: BufRead>(reader: R, cells: &[u32]) -> Result<Vec<ResidualInventory>, Error> {
    let lines = reader
        .lines()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| Error::Io { source: e })?;

    let mut inventories: Vec<Option<ResidualInventory>> = vec![None; cells.len()];
    let mut states = Vec::new();
    let mut current: Option<(Vec<usize>, SectionReader)> = None;
    let mut in_metastable = false;

    for (index, line) in lines.iter().enumerate() {
        let line_no = index + 1;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            continue;
        }

        if in_metastable {
            if let Some(state) = metastable_row(&tokens, line_no)? {
                states.push(state);
            }
            if tokens.last() == Some(&METASTABLE_END) {
                in_metastable = false;
            }
            continue;
        }

        if line.contains(CELL_MARKER) {
            let cell = cell_of_marker(&tokens, line_no)?;
            if let Some((slots, section)) = current.take() {
                log::warn!("Residual section of cell {} has no 'all z' summary", section.inventory.cell);
                store(&mut inventories, &slots, section.finish());
            }
            let slots: Vec<usize> = (0..cells.len()).filter(|&i| cells[i] == cell).collect();
            if !slots.is_empty() {
                log::debug!("Found residual nuclei of cell {cell}");
                current = Some((slots, SectionReader::new(cell)));
            }
            continue;
        }

        if line.contains(METASTABLE_MARKER) {
            log::debug!("Found metastable state table at line {line_no}");
            in_metastable = true;
            continue;
        }

        let finished = match current.as_mut() {
            Some((_, section)) => section.feed(&tokens, line_no)?,
            None => false,
        };
        if finished {
            if let Some((slots, section)) = current.take() {
                store(&mut inventories, &slots, section.finish());
            }
        }
    }
    if let Some((slots, section)) = current {
        store(&mut inventories, &slots, section.finish());
    }

    let states = number_duplicate_levels(states);
    cells
        .iter()
        .zip(inventories)
        .map(|(&cell, inventory)| {
            let mut inventory = inventory.ok_or(Error::ResidualCellNotFound(cell))?;
            inventory.reconcile(&states);
            Ok(inventory)
        })
        .collect()
}

fn store(inventories: &mut [Option<ResidualInventory>], slots: &[usize], inventory: ResidualInventory) {
    for &slot in slots {
        inventories[slot] = Some(inventory.clone());
    }
}

pub fn read_inventory<R: BufRead>(reader: R, cell: u32) -> Result<ResidualInventory, Error> {
    let mut inventories = read_inventories(reader, &[cell])?;
    inventories.pop().ok_or(Error::ResidualCellNotFound(cell))
}

pub fn open_inventories(path: impl AsRef<Path>, cells: &[u32]) -> Result<Vec<ResidualInventory>, Error> {
    let file = File::open(path)?;
    read_inventories(BufReader::new(file), cells)
}

/// Metastable-state rows of an output, levels already disambiguated.
pub fn read_metastable_states<R: BufRead>(reader: R) -> Result<Vec<MetastableState>, Error> {
    let mut states = Vec::new();
    let mut active = false;
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if !active {
            active = line.contains(METASTABLE_MARKER);
            continue;
        }
        if let Some(state) = metastable_row(&tokens, index + 1)? {
            states.push(state);
        }
        if tokens.last() == Some(&METASTABLE_END) {
            break;
        }
    }
    Ok(number_duplicate_levels(states))
}

/// Rows of one `residual nuclei in cell` section up to its `all z` summary.
#[derive(Debug)]
struct SectionReader {
    inventory: ResidualInventory,
    z: Option<u32>,
    done: bool,
}

impl SectionReader {
    fn new(cell: u32) -> Self {
        Self {
            inventory: ResidualInventory::new(cell),
            z: None,
            done: false,
        }
    }

    /// Consumes one line; returns `true` once the section is complete.
    fn feed(&mut self, tokens: &[&str], line: usize) -> Result<bool, Error> {
        if self.done {
            return Ok(tokens.starts_with(&["all", "z"]));
        }
        match tokens {
            ["all", "z", ..] => return Ok(true),
            ["z", "a", ..] => {
                log::warn!(
                    "No residual nuclei tallied in cell {}; its inventory is empty",
                    self.inventory.cell
                );
                self.done = true;
            }
            ["z", "=", z, "n", "=", n, fraction, ..] => {
                let z: u32 = integer(z, line)?;
                let n: u32 = integer(n, line)?;
                self.z = Some(z);
                self.inventory
                    .push(AcabId::new(z, z + n, 0), real(fraction, line)?);
            }
            ["n", "=", n, fraction, ..] => {
                let z = self.z.ok_or_else(|| {
                    Error::parse(Format::Residual, line, "neutron row before any proton row")
                })?;
                let n: u32 = integer(n, line)?;
                self.inventory
                    .push(AcabId::new(z, z + n, 0), real(fraction, line)?);
            }
            _ => {}
        }
        Ok(false)
    }

    fn finish(self) -> ResidualInventory {
        self.inventory
    }
}

fn cell_of_marker(tokens: &[&str], line: usize) -> Result<u32, Error> {
    let last = tokens.last().copied().unwrap_or_default();
    last.parse()
        .map_err(|_| Error::parse(Format::Residual, line, format!("invalid cell number '{last}'")))
}

/// A numeric row `Z A level _ _ fraction`; other rows of the table are ignored.
fn metastable_row(tokens: &[&str], line: usize) -> Result<Option<MetastableState>, Error> {
    let Some(first) = tokens.first() else {
        return Ok(None);
    };
    if parse_fortran_f64(first).is_none() {
        return Ok(None);
    }
    if tokens.len() < 6 {
        return Err(Error::parse(
            Format::Residual,
            line,
            format!("metastable row has {} fields, expected 6", tokens.len()),
        ));
    }
    let z = integer(tokens[0], line)?;
    let a = integer(tokens[1], line)?;
    let mut level = integer(tokens[2], line)?;
    if level == 0 {
        log::warn!("Metastable entry Z={z} A={a} reports level 0; using level 1");
        level = 1;
    }
    Ok(Some(MetastableState::new(z, a, level, real(tokens[5], line)?)))
}

/// Consecutive rows of the same nuclide that do not climb in level are given
/// the next level up, so each excited state keeps a distinct id.
fn number_duplicate_levels(states: Vec<MetastableState>) -> Vec<MetastableState> {
    let mut numbered: Vec<MetastableState> = Vec::with_capacity(states.len());
    for mut state in states {
        if let Some(prev) = numbered.last() {
            if prev.z == state.z && prev.a == state.a && state.level <= prev.level {
                let level = (prev.level + 1).min(AcabId::MAX_LEVEL);
                if level == prev.level {
                    log::warn!(
                        "Metastable entries of Z={} A={} exceed level {}; merging into it",
                        state.z,
                        state.a,
                        AcabId::MAX_LEVEL
                    );
                } else {
                    log::debug!(
                        "Repeated metastable entry Z={} A={} level {}; renumbered as level {level}",
                        state.z,
                        state.a,
                        state.level
                    );
                }
                state.level = level;
            }
        }
        numbered.push(state);
    }
    numbered
}

fn integer(token: &str, line: usize) -> Result<u32, Error> {
    token
        .parse()
        .map_err(|_| Error::parse(Format::Residual, line, format!("invalid integer '{token}'")))
}

fn real(token: &str, line: usize) -> Result<f64, Error> {
    parse_fortran_f64(token)
        .ok_or_else(|| Error::parse(Format::Residual, line, format!("invalid number '{token}'")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    const OUTPUT: &str = "\
1htape3x   version 2.7.0
 distribution of residual nuclei in cell       10

      z =  25   n =  29   2.00000D-03
                n =  30   1.00000D-03
      z =  26   n =  29   4.00000D-03
 all z    7.00000D-03
 distribution of residual nuclei in cell       20
   z  a  no residual nuclei
 all z    0.00000D+00
 distribution of residual nuclei in cell       30
      z =  27   n =  33   5.00000D-04
 all z    5.00000D-04

 metastable state production
   z    a   lev   energy   life    fraction
   25   54    1   0.368   1.2D+00   5.00000D-01
   25   54    1   0.500   3.0D-01   1.00000D-01
   27   60    0   0.058   6.3D+02   2.00000D-01
   99  250    1   0.100   1.0D+00   3.00000D-01
 isomer calculation completed
";

    #[test]
    fn reads_rows_and_reconciles_excited_states() {
        let inv = read_inventory(Cursor::new(OUTPUT), 10).unwrap();
        assert_eq!(inv.cell, 10);

        let ground = inv.get(AcabId::new(25, 54, 0)).unwrap();
        let first = inv.get(AcabId::new(25, 54, 1)).unwrap();
        let second = inv.get(AcabId::new(25, 54, 2)).unwrap();
        assert!(approx_eq(first, 1.0e-3, 1e-15));
        assert!(approx_eq(second, 2.0e-4, 1e-15));
        assert!(approx_eq(ground, 8.0e-4, 1e-15));
        assert!(approx_eq(ground + first + second, 2.0e-3, 1e-15));

        assert!(approx_eq(inv.get(AcabId::new(25, 55, 0)).unwrap(), 1.0e-3, 1e-15));
        assert!(approx_eq(inv.get(AcabId::new(26, 55, 0)).unwrap(), 4.0e-3, 1e-15));
        assert!(approx_eq(inv.total(), 7.0e-3, 1e-15));
        assert_eq!(inv.len(), 5);
    }

    #[test]
    fn several_cells_in_request_order() {
        let inventories = read_inventories(Cursor::new(OUTPUT), &[30, 20, 10]).unwrap();
        let cells: Vec<u32> = inventories.iter().map(|i| i.cell).collect();
        assert_eq!(cells, vec![30, 20, 10]);

        // Level 0 in the table is read as level 1.
        let co = &inventories[0];
        assert!(approx_eq(co.get(AcabId::new(27, 60, 1)).unwrap(), 1.0e-4, 1e-15));
        assert!(approx_eq(co.get(AcabId::new(27, 60, 0)).unwrap(), 4.0e-4, 1e-15));

        assert!(inventories[1].is_empty());
    }

    #[test]
    fn repeated_cell_fills_every_slot() {
        let inventories = read_inventories(Cursor::new(OUTPUT), &[10, 30, 10]).unwrap();
        assert_eq!(inventories.len(), 3);
        assert_eq!(inventories[0], inventories[2]);
        assert_eq!(inventories[2].cell, 10);
        assert_eq!(inventories[2].len(), 5);
    }

    #[test]
    fn missing_cell_is_reported() {
        assert!(matches!(
            read_inventories(Cursor::new(OUTPUT), &[10, 40]),
            Err(Error::ResidualCellNotFound(40))
        ));
    }

    #[test]
    fn metastable_levels_are_disambiguated() {
        let states = read_metastable_states(Cursor::new(OUTPUT)).unwrap();
        let levels: Vec<(u32, u32)> = states.iter().map(|s| (s.a, s.level)).collect();
        assert_eq!(levels, vec![(54, 1), (54, 2), (60, 1), (250, 1)]);
    }

    #[test]
    fn renumbering_stops_at_the_last_level_digit() {
        let states: Vec<_> = (0..11).map(|_| MetastableState::new(25, 54, 1, 0.01)).collect();
        let levels: Vec<u32> = number_duplicate_levels(states).iter().map(|s| s.level).collect();
        assert_eq!(levels, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 9, 9]);
    }

    #[test]
    fn malformed_rows_are_parse_errors() {
        let text = " distribution of residual nuclei in cell 1\n   n =  3   1.0D-01\n all z\n";
        assert!(matches!(
            read_inventory(Cursor::new(text), 1),
            Err(Error::Parse { line: 2, .. })
        ));
    }
}
