use crate::io::error::Error;
use std::io::Write;

/// IOPT=8 (residual nuclei) option card; NPARM is the number of cells.
fn option_card(nparm: usize) -> String {
    let mut fields = vec![0usize; 17];
    fields[0] = 8;
    fields[5] = nparm;
    fields
        .iter()
        .map(usize::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes an HTAPE3X request for the residual nuclei of `cells`.
pub fn write_request<W: Write>(mut writer: W, title: &str, cells: &[u32]) -> Result<(), Error> {
    if cells.is_empty() {
        return Err(Error::validation("a residual request needs at least one cell"));
    }
    let list = cells
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>();

    writeln!(writer, "{}", title)?;
    if let [cell] = cells {
        writeln!(writer, "Residual nuclei in cell {}", cell)?;
    } else {
        writeln!(writer, "Residual nuclei in cells {}", list.join(" "))?;
    }
    writeln!(writer, "{}", option_card(cells.len()))?;
    writeln!(writer, "{}", list.join(","))?;
    Ok(())
}

/// Request for a rotating component: the active cell and the matching cell
/// of the passive sector.
pub fn write_composed_request<W: Write>(
    writer: W,
    title: &str,
    active: u32,
    passive: u32,
) -> Result<(), Error> {
    write_request(writer, title, &[active, passive])
}
