use crate::io::{BurnupConfig, error::Error, util};
use crate::model::inventory::ResidualInventory;
use crate::model::nuclide::AcabId;
use std::io::Write;

/// Upper group boundaries (MeV) of the 24-group output spectrum, closed by 0.
const ENERGY_BOUNDARIES: [&str; 25] = [
    "2.0e+01", "1.4e+01", "1.2e+01", "1.0e+01", "8.0e+00", "6.5e+00", "5.0e+00", "4.0e+00",
    "3.0e+00", "2.5e+00", "2.0e+00", "1.7e+00", "1.4e+00", "1.2e+00", "1.0e+00", "8.0e-01",
    "6.0e-01", "4.0e-01", "3.0e-01", "2.0e-01", "1.0e-01", "5.0e-02", "2.0e-02", "1.0e-02",
    "0.0e+00",
];
const ZERO_SOURCE_LINE: &str = "0.00E+00  0.00E+00  0.00E+00  0.00E+00  0.00E+00  0.00E+00   ";
const OUTPUT_SELECTORS: &str = "0 0 1   0 0 0   0 0 1   0 0 1   0 0 0   0 0 0   ";

const ITMAX_ZERO_FLUX: u32 = 250_000;
const ITMAX: u32 = 900_000;

/// Everything the main deck carries for one cell.
#[derive(Debug, Clone, Copy)]
pub struct MainDeck<'a> {
    /// Total flux (n/cm²·s).
    pub flux: f64,
    /// Cell volume (cm³).
    pub volume: f64,
    /// Initial inventory: ACAB id and atomic density.
    pub isotopes: &'a [(AcabId, f64)],
    /// External isotope feed, already scaled to the solver's units.
    pub feeds: Option<&'a ResidualInventory>,
    /// Scenario blocks, appended verbatim.
    pub scenario: &'a str,
}

impl MainDeck<'_> {
    /// Whether a non-empty feed is attached.
    pub fn has_feeds(&self) -> bool {
        self.feeds.is_some_and(|f| !f.is_empty())
    }
}

pub fn write<W: Write>(mut writer: W, config: &BurnupConfig, deck: &MainDeck) -> Result<(), Error> {
    if deck.isotopes.is_empty() {
        return Err(Error::validation("the main deck needs at least one isotope"));
    }
    if !deck.flux.is_finite() || !deck.volume.is_finite() {
        return Err(Error::validation(format!(
            "flux ({}) and volume ({}) must be finite",
            deck.flux, deck.volume
        )));
    }
    if deck.feeds.is_some_and(ResidualInventory::is_empty) {
        log::warn!("Feed inventory is empty; writing the deck without feeds");
    }

    let feeds = deck.feeds.filter(|f| !f.is_empty());
    let isfed = u32::from(feeds.is_some());
    let itmax = if deck.flux == 0.0 { ITMAX_ZERO_FLUX } else { ITMAX };

    // Block 1
    writeln!(writer, "{}", config.title)?;
    writeln!(writer, "0")?;
    writeln!(
        writer,
        "{} {}  0   1  1 0 2    2 {}    24  1  0  4  1  1  0  1  0  0  0  0 ",
        config.library,
        itmax,
        2 * isfed
    )?;

    // Block 2
    writeln!(writer, "{}     1.0000", util::sci_upper(deck.volume, 6))?;
    writeln!(writer, "1")?;
    writeln!(writer, "{}", deck.isotopes.len())?;
    if let Some(feeds) = feeds {
        writeln!(writer, "{}", feeds.len())?;
    }
    writeln!(writer, "{}", util::chunked(&ENERGY_BOUNDARIES[..], 8, ", "))?;
    writeln!(writer, "{}", ZERO_SOURCE_LINE)?;
    writeln!(writer, "{}", OUTPUT_SELECTORS)?;

    // Blocks 3 to 5
    writeln!(writer, "{}", util::sci_upper(deck.flux, 6))?;
    writeln!(writer, "0 IREST")?;
    writeln!(writer, "< Isotopia")?;
    let ids: Vec<String> = deck.isotopes.iter().map(|(id, _)| id.to_string()).collect();
    writeln!(writer, "{}", util::chunked(&ids, 5, " "))?;
    let densities: Vec<String> = deck.isotopes.iter().map(|(_, n)| util::sci(*n, 6)).collect();
    writeln!(writer, "{}", util::chunked(&densities, 5, " "))?;

    // Block 6
    if let Some(feeds) = feeds {
        let ids: Vec<String> = feeds.ids().map(|id| id.to_string()).collect();
        writeln!(writer, "{}", util::chunked(&ids, 5, ", "))?;
        let quantities: Vec<String> = feeds.quantities().map(|q| util::sci(q, 6)).collect();
        writeln!(writer, "{}", util::chunked(&quantities, 5, ", "))?;
    }

    // Blocks 7 onwards
    writer.write_all(deck.scenario.as_bytes())?;
    Ok(())
}
