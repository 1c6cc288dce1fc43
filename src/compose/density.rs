//! Rescaling a material's fractions to the atomic densities (atoms/barn·cm)
//! of one cell.
//!
//! The conversion depends on two independent facts: how the material's
//! fractions are expressed ([`Composition`]) and how the cell density is
//! given ([`Density`]). [`convert_density`] resolves both once and hands the
//! record to one of four routines.

use super::abundance::AbundanceTable;
use super::error::Error;
use crate::model::material::{Composition, Density, MaterialRecord};
use crate::model::nuclide::Zaid;

/// Avogadro's number over 10²⁴ (barn·cm³ per cm⁻³ conversion).
pub const AVOGADRO_BARN: f64 = 0.6023;

/// Mass number of a constituent, or the natural mean for `A = 0`.
pub fn mass_number(zaid: Zaid, table: &AbundanceTable) -> Result<f64, Error> {
    if zaid.is_natural() {
        table.mean_mass_number(zaid.z())
    } else {
        Ok(zaid.a() as f64)
    }
}

/// Converts `record` in place so every fraction becomes an atomic density.
pub fn convert_density(
    record: &mut MaterialRecord,
    target: Density,
    table: &AbundanceTable,
) -> Result<(), Error> {
    let composition = record
        .composition()
        .ok_or(Error::EmptyComposition { material: record.id })?;
    let has_atomic = record.fractions().any(|f| f > 0.0);
    let has_weight = record.fractions().any(|f| f < 0.0);
    if has_atomic && has_weight {
        return Err(Error::MixedComposition { material: record.id });
    }

    match (composition, target) {
        (Composition::AtomicFraction, Density::Mass(rho)) => atomic_to_mass(record, rho, table),
        (Composition::AtomicFraction, Density::Atomic(n)) => {
            atomic_to_atomic(record, n);
            Ok(())
        }
        (Composition::WeightFraction, Density::Mass(rho)) => weight_to_mass(record, rho, table),
        (Composition::WeightFraction, Density::Atomic(n)) => weight_to_atomic(record, n, table),
    }
}

/// Mass density implied by a record holding atomic densities.
pub fn implied_mass_density(record: &MaterialRecord, table: &AbundanceTable) -> Result<f64, Error> {
    let mut grams = 0.0;
    for c in &record.constituents {
        grams += c.fraction * mass_number(c.zaid, table)?;
    }
    Ok(grams / AVOGADRO_BARN)
}

fn atomic_to_mass(record: &mut MaterialRecord, rho: f64, table: &AbundanceTable) -> Result<(), Error> {
    let mut molar = 0.0;
    for c in &record.constituents {
        molar += mass_number(c.zaid, table)? * c.fraction;
    }
    let factor = rho / (molar / AVOGADRO_BARN);
    for c in &mut record.constituents {
        c.fraction *= factor;
    }
    Ok(())
}

fn atomic_to_atomic(record: &mut MaterialRecord, n: f64) {
    let factor = n / record.total_fraction();
    for c in &mut record.constituents {
        c.fraction *= factor;
    }
}

fn weight_to_mass(record: &mut MaterialRecord, rho: f64, table: &AbundanceTable) -> Result<(), Error> {
    let total = record.total_fraction();
    let masses = masses(record, table)?;
    for (c, a) in record.constituents.iter_mut().zip(masses) {
        let partial_density = c.fraction / total * rho;
        c.fraction = partial_density / (a / AVOGADRO_BARN);
    }
    Ok(())
}

fn weight_to_atomic(record: &mut MaterialRecord, n: f64, table: &AbundanceTable) -> Result<(), Error> {
    let masses = masses(record, table)?;
    for (c, a) in record.constituents.iter_mut().zip(masses) {
        c.fraction /= a;
    }
    let total = record.total_fraction();
    for c in &mut record.constituents {
        c.fraction *= n / total;
    }
    Ok(())
}

fn masses(record: &MaterialRecord, table: &AbundanceTable) -> Result<Vec<f64>, Error> {
    record
        .zaids()
        .map(|z| mass_number(z, table))
        .collect()
}
