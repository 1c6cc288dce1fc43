use super::error::Error;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::OnceLock;

const DEFAULT_ABUNDANCE_TOML: &str = include_str!("../../resources/natural_abundance.toml");

static DEFAULT_TABLE: OnceLock<AbundanceTable> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Isotope {
    /// Mass number.
    pub a: u32,
    /// Atom fraction in the natural element.
    pub abundance: f64,
}

#[derive(Debug, Clone, Deserialize)]
struct ElementEntry {
    z: u32,
    #[serde(default)]
    symbol: Option<String>,
    isotopes: Vec<Isotope>,
}

#[derive(Debug, Clone, Deserialize)]
struct AbundanceFile {
    #[serde(default)]
    element: Vec<ElementEntry>,
}

/// Natural isotopic composition per element, keyed by atomic number.
///
/// The crate ships a default table; tests and callers with other nuclear data
/// build their own with [`AbundanceTable::from_toml`] or [`AbundanceTable::from_entries`].
#[derive(Debug, Clone, Default)]
pub struct AbundanceTable {
    elements: HashMap<u32, Vec<Isotope>>,
    symbols: HashMap<u32, String>,
}

impl AbundanceTable {
    pub fn from_toml(text: &str) -> Result<Self, Error> {
        let file: AbundanceFile = toml::from_str(text)?;
        let mut table = Self::default();
        for entry in file.element {
            if entry.isotopes.is_empty() {
                return Err(Error::InvalidAbundanceTable(format!(
                    "element Z={} lists no isotopes",
                    entry.z
                )));
            }
            if table.elements.contains_key(&entry.z) {
                return Err(Error::InvalidAbundanceTable(format!(
                    "element Z={} listed twice",
                    entry.z
                )));
            }
            if let Some(symbol) = entry.symbol {
                table.symbols.insert(entry.z, symbol);
            }
            table.elements.insert(entry.z, entry.isotopes);
        }
        Ok(table)
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (u32, Vec<(u32, f64)>)>) -> Self {
        let elements = entries
            .into_iter()
            .map(|(z, isotopes)| {
                let isotopes = isotopes
                    .into_iter()
                    .map(|(a, abundance)| Isotope { a, abundance })
                    .collect();
                (z, isotopes)
            })
            .collect();
        Self {
            elements,
            symbols: HashMap::new(),
        }
    }

    /// The table bundled with the crate.
    pub fn embedded() -> &'static AbundanceTable {
        DEFAULT_TABLE.get_or_init(|| {
            Self::from_toml(DEFAULT_ABUNDANCE_TOML)
                .expect("Failed to parse embedded natural abundance table. This is a library bug.")
        })
    }

    pub fn isotopes(&self, z: u32) -> Result<&[Isotope], Error> {
        self.elements
            .get(&z)
            .map(Vec::as_slice)
            .ok_or(Error::UnknownElement { z })
    }

    pub fn contains(&self, z: u32) -> bool {
        self.elements.contains_key(&z)
    }

    pub fn symbol(&self, z: u32) -> Option<&str> {
        self.symbols.get(&z).map(String::as_str)
    }

    /// Abundance-weighted mean mass number of the natural element.
    pub fn mean_mass_number(&self, z: u32) -> Result<f64, Error> {
        let isotopes = self.isotopes(z)?;
        let total: f64 = isotopes.iter().map(|i| i.abundance).sum();
        let weighted: f64 = isotopes.iter().map(|i| i.a as f64 * i.abundance).sum();
        Ok(weighted / total)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}
