use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One named quantity per nuclide over the output time sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    /// Cooling times (s) of the output sets, one per value column.
    pub times: Vec<f64>,
    pub rows: Vec<ResultRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    pub nuclide: String,
    pub values: Vec<f64>,
}

impl ResultTable {
    pub fn new(times: Vec<f64>) -> Self {
        Self {
            times,
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, nuclide: impl Into<String>, values: Vec<f64>) {
        self.rows.push(ResultRow {
            nuclide: nuclide.into(),
            values,
        });
    }

    /// Column sums, one per time set.
    pub fn totals(&self) -> Vec<f64> {
        let mut totals = vec![0.0; self.times.len()];
        for row in &self.rows {
            for (t, v) in totals.iter_mut().zip(&row.values) {
                *t += v;
            }
        }
        totals
    }
}

/// Results of one activation unit: the cell, its volume and named tables
/// (`decay`, `gamma`, `heat`, `dose`, `mol`, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CellSummary {
    pub cell: u32,
    pub volume: f64,
    #[serde(default)]
    pub tables: BTreeMap<String, ResultTable>,
}

impl CellSummary {
    pub fn new(cell: u32, volume: f64) -> Self {
        Self {
            cell,
            volume,
            tables: BTreeMap::new(),
        }
    }

    pub fn insert_table(&mut self, name: impl Into<String>, table: ResultTable) {
        self.tables.insert(name.into(), table);
    }

    pub fn table(&self, name: &str) -> Option<&ResultTable> {
        self.tables.get(name)
    }
}
