use super::interval::unfold_intervals;
use super::reader::{Card, Listing, parse_number};
use crate::io::error::Error;
use crate::model::material::MaterialRecord;
use crate::model::nuclide::Zaid;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Reads the `m<id>` card of a listing. Material 0 (void) yields an empty record.
pub fn find_material(listing: &Listing, id: u32) -> Result<MaterialRecord, Error> {
    if id == 0 {
        return Ok(MaterialRecord::new(0));
    }
    let card = listing
        .data_card(&format!("m{id}"))
        .ok_or(Error::MaterialNotFound(id))?;
    material_from_card(id, &card)
}

/// Pairs the tokens after the card name as `(zaid, fraction)`.
///
/// Library suffixes (`.70c`) are dropped and keyword pairs such as
/// `nlib=70c` are skipped.
pub fn material_from_card(id: u32, card: &Card) -> Result<MaterialRecord, Error> {
    let tokens = unfold_intervals(card.tokens.get(1..).unwrap_or_default())?;
    let mut record = MaterialRecord::new(id);

    let mut pairs = tokens.chunks_exact(2);
    for pair in pairs.by_ref() {
        let (key, value) = (&pair[0], &pair[1]);
        let Ok(zaid) = key.parse::<Zaid>() else {
            log::debug!("m{id}: skipping keyword {key}={value}");
            continue;
        };
        let fraction: f64 = parse_number(value, card.line, "material fraction")?;
        record.push(zaid, fraction);
    }
    if let [dangling] = pairs.remainder() {
        log::warn!("m{id}: ignoring unpaired trailing token '{dangling}'");
    }
    Ok(record)
}

/// Materials parsed so far, keyed by material number.
///
/// Lookups take a read lock only; a miss parses the card outside the lock, so
/// two threads missing on the same id may both parse it and the first insert
/// wins. Callers clone the shared record before converting its density.
#[derive(Debug, Default)]
pub struct MaterialCache {
    entries: RwLock<HashMap<u32, Arc<MaterialRecord>>>,
}

impl MaterialCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: u32) -> Option<Arc<MaterialRecord>> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(&id).cloned()
    }

    pub fn get_or_parse(&self, listing: &Listing, id: u32) -> Result<Arc<MaterialRecord>, Error> {
        if let Some(hit) = self.get(id) {
            return Ok(hit);
        }
        let parsed = Arc::new(find_material(listing, id)?);
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        Ok(entries.entry(id).or_insert(parsed).clone())
    }

    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
