use serde::Deserialize;
use std::fmt;

pub mod error;
pub mod util;

pub use error::Error;

pub mod burnup;
pub mod collapse;
pub mod listing;
pub mod residual;
pub mod scenario;
pub mod summary;

/// Cross-section library family; only changes the collapse header length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataLibrary {
    #[default]
    Eaf,
    Other,
}

impl DataLibrary {
    pub fn header_lines(self) -> u32 {
        match self {
            DataLibrary::Eaf => 16,
            DataLibrary::Other => 32,
        }
    }
}

/// Energy group structure handed to COLLAPS.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupStructure {
    /// The 211-group VITAMIN-J+ structure, built into the solver.
    #[default]
    VitaminJPlus,
    /// Explicit bin boundaries in tally order (increasing energy). The last
    /// entry is the tally's closing boundary and is not written.
    Custom { bins: Vec<f64> },
}

impl GroupStructure {
    /// `(ILIB, IESF)` selector pair of the collapse deck.
    pub fn selectors(&self) -> (u32, u32) {
        match self {
            GroupStructure::VitaminJPlus => (12, 12),
            GroupStructure::Custom { .. } => (5, 5),
        }
    }

    pub fn group_count(&self) -> usize {
        match self {
            GroupStructure::VitaminJPlus => 211,
            GroupStructure::Custom { bins } => bins.len().saturating_sub(1),
        }
    }

    pub fn is_standard(&self) -> bool {
        matches!(self, GroupStructure::VitaminJPlus)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct CollapseConfig {
    pub library: DataLibrary,
    pub group_structure: GroupStructure,
    /// Must be set to use a [`GroupStructure::Custom`] structure.
    pub confirm_nonstandard: bool,
}

/// Irradiation history written to the scenario deck.
///
/// `outputs` holds one 0/1 flag for the irradiation step followed by one per
/// cooling time; the first flag is always 0.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Irradiation time in seconds.
    pub irradiation: f64,
    /// Cooling times in seconds, measured from the end of irradiation.
    pub cooling_times: Vec<f64>,
    pub outputs: Vec<u8>,
    /// Block #9 convergence pair.
    pub tolerances: [f64; 2],
}

const HOUR: f64 = 3600.0;
const DAY: f64 = 24.0 * HOUR;
const YEAR: f64 = 365.0 * DAY;

impl ScenarioConfig {
    /// Cooling from 0.1 s to five years, with output from one hour on.
    pub fn standard(irradiation: f64) -> Self {
        Self {
            irradiation,
            cooling_times: vec![
                0.1,
                1.0,
                10.0,
                100.0,
                HOUR,
                DAY,
                7.0 * DAY,
                30.0 * DAY,
                YEAR,
                5.0 * YEAR,
            ],
            outputs: vec![0, 0, 0, 0, 0, 1, 1, 1, 1, 1, 1],
            tolerances: [1.0e-25, 1.0],
        }
    }

    /// Output at the irradiation end is off, and on for every cooling time of an hour or more.
    pub fn with_default_outputs(irradiation: f64, cooling_times: Vec<f64>) -> Self {
        let outputs = std::iter::once(0)
            .chain(cooling_times.iter().map(|&t| u8::from(t >= HOUR)))
            .collect();
        Self {
            irradiation,
            cooling_times,
            outputs,
            tolerances: [1.0e-25, 1.0],
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self::standard(YEAR)
    }
}

/// Parses a comma or blank separated list of cooling times.
pub fn parse_cooling_times(text: &str) -> Result<Vec<f64>, error::Error> {
    let times = text
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(|t| {
            t.parse::<f64>()
                .map_err(|_| error::Error::validation(format!("cooling time '{t}' is not a number")))
        })
        .collect::<Result<Vec<_>, _>>()?;
    if times.is_empty() {
        return Err(error::Error::validation("no cooling times given"));
    }
    Ok(times)
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct BurnupConfig {
    /// First line of `inp.5`.
    pub title: String,
    /// Library selector of the control header.
    pub library: u32,
}

impl Default for BurnupConfig {
    fn default() -> Self {
        Self {
            title: "Input generated by mc2acab".to_string(),
            library: 2232,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Listing,
    Collapse,
    Scenario,
    Burnup,
    Residual,
    Summary,
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Format::Listing => "MCNP listing",
            Format::Collapse => "COLLAPS deck",
            Format::Scenario => "ACAB scenario",
            Format::Burnup => "ACAB input",
            Format::Residual => "HTAPE3X residual",
            Format::Summary => "summary",
        };
        write!(f, "{}", name)
    }
}
