use super::abundance::AbundanceTable;
use crate::model::material::{Constituent, MaterialRecord};
use crate::model::nuclide::Zaid;

/// Expands natural-element constituents into their isotopes, in place.
///
/// Each `ZZ000` entry is replaced at its position by one entry per natural
/// isotope carrying `fraction * abundance`. Elements missing from `table`
/// stay as they are and are reported with a warning. Running this on an
/// already expanded record changes nothing.
pub fn unfold_natural(record: &mut MaterialRecord, table: &AbundanceTable) {
    if !record.has_natural_elements() {
        return;
    }

    let mut expanded = Vec::with_capacity(record.constituents.len());
    for c in record.constituents.drain(..) {
        if !c.zaid.is_natural() {
            expanded.push(c);
            continue;
        }
        match table.isotopes(c.zaid.z()) {
            Ok(isotopes) => expanded.extend(isotopes.iter().map(|iso| {
                Constituent::new(Zaid::new(c.zaid.z(), iso.a), c.fraction * iso.abundance)
            })),
            Err(_) => {
                log::warn!(
                    "m{}: no natural abundance data for Z={}, keeping {} unexpanded",
                    record.id,
                    c.zaid.z(),
                    c.zaid
                );
                expanded.push(c);
            }
        }
    }
    record.constituents = expanded;
}
