//! Per-cell activation decks.
//!
//! [`prepare`] turns one cell of a transport run into the texts the solver
//! reads: the collapse deck and the main deck with its scenario. The steps are
//!
//! 1. skip void cells and cells without flux,
//! 2. convert a private copy of the material to the cell density,
//! 3. expand natural elements into isotopes,
//! 4. scale the optional residual feed to the source intensity,
//! 5. render the decks.
//!
//! [`workdir`] places a prepared set on disk.

mod config;
mod error;
pub mod workdir;

pub use config::{DeckConfig, ScenarioSource};
pub use error::Error;

use crate::compose::{self, AbundanceTable};
use crate::io::{burnup, collapse, scenario};
use crate::model::cell::CellRecord;
use crate::model::inventory::ResidualInventory;
use crate::model::material::MaterialRecord;
use crate::model::nuclide::AcabId;

/// Atoms per mole used to bring residual feeds to the solver's units.
pub const FEED_SCALE: f64 = 6.023e23;

/// Transport results and geometry of one cell.
#[derive(Debug, Clone, Copy)]
pub struct CellUnit<'a> {
    pub cell: &'a CellRecord,
    /// The material the cell references, as read from the listing.
    pub material: &'a MaterialRecord,
    /// Group flux per source particle in tally order.
    pub group_flux: &'a [f64],
    /// Total flux per source particle.
    pub total_flux: f64,
    pub volume: f64,
    /// Source intensity (particles/s).
    pub source: f64,
    /// Residual nuclei per source particle, from an earlier run.
    pub feeds: Option<&'a ResidualInventory>,
}

/// Deck texts of one cell, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct DeckSet {
    pub cell: u32,
    pub collapse: String,
    pub main: String,
    pub scenario: String,
    /// Initial inventory written to the main deck.
    pub isotopes: Vec<(AcabId, f64)>,
    /// Feed written to the main deck, after scaling.
    pub feeds: Option<ResidualInventory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    VoidMaterial,
    ZeroFlux,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    Ready(DeckSet),
    Skipped { cell: u32, reason: SkipReason },
}

pub fn prepare(
    unit: &CellUnit,
    config: &DeckConfig,
    table: &AbundanceTable,
) -> Result<Prepared, Error> {
    let cell = unit.cell.id;
    let skipped = |reason: SkipReason| -> Result<Prepared, Error> {
        Ok(Prepared::Skipped { cell, reason })
    };

    let Some(target) = unit.cell.target_density() else {
        log::info!("Cell {cell}: void, skipping");
        return skipped(SkipReason::VoidMaterial);
    };
    if unit.material.is_empty() {
        log::info!("Cell {cell}: material m{} is empty, skipping", unit.material.id);
        return skipped(SkipReason::VoidMaterial);
    }
    let flux = unit.total_flux * unit.source;
    if flux == 0.0 {
        log::info!("Cell {cell}: null flux, skipping");
        return skipped(SkipReason::ZeroFlux);
    }

    let mut material = unit.material.clone();
    compose::convert_density(&mut material, target, table)?;
    compose::unfold_natural(&mut material, table);
    let isotopes: Vec<(AcabId, f64)> = material
        .constituents
        .iter()
        .map(|c| (c.zaid.to_acab(), c.fraction))
        .collect();

    let feeds = unit
        .feeds
        .filter(|f| !f.is_empty())
        .map(|f| f.scaled(unit.source / FEED_SCALE));

    let scenario = match &config.scenario {
        ScenarioSource::Generated(sc) => scenario::render(sc, feeds.is_some())?,
        ScenarioSource::External(path) => scenario::read_scenario(path)?,
    };

    let mut collapse_deck = Vec::new();
    collapse::write(&mut collapse_deck, &config.collapse, unit.group_flux, unit.source)?;

    let mut main_deck = Vec::new();
    let main = burnup::MainDeck {
        flux,
        volume: unit.volume,
        isotopes: &isotopes,
        feeds: feeds.as_ref(),
        scenario: &scenario,
    };
    burnup::write(&mut main_deck, &config.burnup, &main)?;

    log::debug!(
        "Cell {cell}: {} isotopes, flux {flux:e}, feeds: {}",
        isotopes.len(),
        feeds.as_ref().map_or(0, ResidualInventory::len)
    );

    Ok(Prepared::Ready(DeckSet {
        cell,
        collapse: String::from_utf8_lossy(&collapse_deck).into_owned(),
        main: String::from_utf8_lossy(&main_deck).into_owned(),
        scenario,
        isotopes,
        feeds,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::nuclide::Zaid;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps * a.abs().max(b.abs())
    }

    fn table() -> AbundanceTable {
        AbundanceTable::from_entries([(26, vec![(54, 0.25), (56, 0.75)])])
    }

    fn iron() -> MaterialRecord {
        MaterialRecord::with_constituents(1, [(Zaid::new(26, 0), 1.0)])
    }

    fn unit<'a>(
        cell: &'a CellRecord,
        material: &'a MaterialRecord,
        flux: &'a [f64],
        feeds: Option<&'a ResidualInventory>,
    ) -> CellUnit<'a> {
        CellUnit {
            cell,
            material,
            group_flux: flux,
            total_flux: flux.iter().sum(),
            volume: 10.0,
            source: 1.0e12,
            feeds,
        }
    }

    fn ready(prepared: Prepared) -> DeckSet {
        match prepared {
            Prepared::Ready(set) => set,
            other => panic!("expected decks, got {other:?}"),
        }
    }

    #[test]
    fn iron_cell_produces_all_decks() {
        let cell = CellRecord::new(5, 1, 0.08);
        let material = iron();
        let flux = vec![1.0e-6; 211];
        let set = ready(prepare(&unit(&cell, &material, &flux, None), &DeckConfig::default(), &table()).unwrap());

        assert_eq!(set.cell, 5);
        let ids: Vec<u32> = set.isotopes.iter().map(|(id, _)| id.raw()).collect();
        assert_eq!(ids, vec![260540, 260560]);
        assert!(approx_eq(set.isotopes[0].1, 0.02, 1e-12));
        assert!(approx_eq(set.isotopes[1].1, 0.06, 1e-12));

        assert!(set.collapse.starts_with("12 12\n16\n0 0 0 0\n-211 0\n1.00000e+06"));
        assert!(set.main.contains("\n2\n2.0e+01, "));
        assert!(set.main.contains("\n260540 260560\n"));
        assert!(set.main.ends_with(&set.scenario));
        assert!(set.scenario.contains("10  10  1  10  1  0  0  0"));
        assert_eq!(set.feeds, None);
    }

    #[test]
    fn material_record_is_left_untouched() {
        let cell = CellRecord::new(5, 1, -7.8);
        let material = iron();
        let flux = vec![1.0; 211];
        prepare(&unit(&cell, &material, &flux, None), &DeckConfig::default(), &table()).unwrap();
        assert_eq!(material.constituents, iron().constituents);
    }

    #[test]
    fn void_and_fluxless_cells_are_skipped() {
        let material = iron();
        let flux = vec![1.0; 211];

        let void = CellRecord::new(3, 0, 0.0);
        assert_eq!(
            prepare(&unit(&void, &material, &flux, None), &DeckConfig::default(), &table()).unwrap(),
            Prepared::Skipped { cell: 3, reason: SkipReason::VoidMaterial }
        );

        let empty = MaterialRecord::new(1);
        let cell = CellRecord::new(4, 1, 0.1);
        assert_eq!(
            prepare(&unit(&cell, &empty, &flux, None), &DeckConfig::default(), &table()).unwrap(),
            Prepared::Skipped { cell: 4, reason: SkipReason::VoidMaterial }
        );

        let dark = vec![0.0; 211];
        assert_eq!(
            prepare(&unit(&cell, &material, &dark, None), &DeckConfig::default(), &table()).unwrap(),
            Prepared::Skipped { cell: 4, reason: SkipReason::ZeroFlux }
        );
    }

    #[test]
    fn feeds_are_scaled_and_switch_on_the_feed_flag() {
        let cell = CellRecord::new(8, 1, 0.1);
        let material = iron();
        let flux = vec![1.0; 211];
        let mut feeds = ResidualInventory::new(8);
        feeds.push(AcabId::new(25, 54, 0), 6.023e-3);

        let set = ready(
            prepare(&unit(&cell, &material, &flux, Some(&feeds)), &DeckConfig::default(), &table())
                .unwrap(),
        );
        let scaled = set.feeds.as_ref().unwrap();
        assert!(approx_eq(scaled.get(AcabId::new(25, 54, 0)).unwrap(), 1.0e-14, 1e-9));
        assert!(set.scenario.contains("10  10  1  10  1  1  0  0"));
        assert!(set.main.contains("\n250540\n1.000000e-14\n"));
    }

    #[test]
    fn external_scenario_is_copied_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.sce");
        std::fs::write(&path, "< custom scenario\n").unwrap();
        let config = DeckConfig {
            scenario: ScenarioSource::External(path),
            ..DeckConfig::default()
        };

        let cell = CellRecord::new(9, 1, 0.1);
        let material = iron();
        let flux = vec![1.0; 211];
        let set = ready(prepare(&unit(&cell, &material, &flux, None), &config, &table()).unwrap());
        assert_eq!(set.scenario, "< custom scenario\n");
        assert!(set.main.ends_with("< Isotopia\n260540 260560\n2.500000e-02 7.500000e-02\n< custom scenario\n"));
    }

    #[test]
    fn unknown_natural_element_fails_density_conversion() {
        let cell = CellRecord::new(2, 1, -1.0);
        let material = MaterialRecord::with_constituents(1, [(Zaid::new(92, 0), 1.0)]);
        let flux = vec![1.0; 211];
        assert!(matches!(
            prepare(&unit(&cell, &material, &flux, None), &DeckConfig::default(), &table()),
            Err(Error::Compose(compose::Error::UnknownElement { z: 92 }))
        ));
    }
}
