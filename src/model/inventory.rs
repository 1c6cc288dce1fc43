use super::nuclide::AcabId;

/// One excited-state row of the residual-nuclei output.
///
/// `fraction` is the share of the ground-state quantity that sits in this
/// level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetastableState {
    pub z: u32,
    pub a: u32,
    pub level: u32,
    pub fraction: f64,
}

impl MetastableState {
    pub fn new(z: u32, a: u32, level: u32, fraction: f64) -> Self {
        Self { z, a, level, fraction }
    }

    pub fn id(&self) -> AcabId {
        AcabId::new(self.z, self.a, self.level)
    }
}

/// Per-cell isotope quantities keyed by ACAB identifier, in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResidualInventory {
    pub cell: u32,
    pub entries: Vec<(AcabId, f64)>,
}

impl ResidualInventory {
    pub fn new(cell: u32) -> Self {
        Self {
            cell,
            entries: Vec::new(),
        }
    }

    /// Adds `quantity` to `id`, appending a new entry when absent.
    pub fn push(&mut self, id: AcabId, quantity: f64) {
        match self.position(id) {
            Some(i) => self.entries[i].1 += quantity,
            None => self.entries.push((id, quantity)),
        }
    }

    pub fn get(&self, id: AcabId) -> Option<f64> {
        self.position(id).map(|i| self.entries[i].1)
    }

    fn position(&self, id: AcabId) -> Option<usize> {
        self.entries.iter().position(|(e, _)| *e == id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = AcabId> + '_ {
        self.entries.iter().map(|(id, _)| *id)
    }

    pub fn quantities(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(_, q)| *q)
    }

    pub fn total(&self) -> f64 {
        self.quantities().sum()
    }

    /// Splits excited-state quantities off their ground states.
    ///
    /// Every excited quantity is computed from the ground-state quantity as it
    /// stood before this call, then all of them are subtracted at once, so the
    /// ground plus its excited levels always sums to the original ground value.
    /// States whose ground isotope is absent from this inventory are ignored.
    pub fn reconcile(&mut self, states: &[MetastableState]) {
        let snapshot: Vec<(AcabId, f64)> = self.entries.clone();
        let ground_of = |id: AcabId| {
            snapshot
                .iter()
                .find(|(e, _)| *e == id)
                .map(|(_, q)| *q)
        };

        let mut excited = Vec::new();
        for state in states {
            let id = state.id();
            if let Some(q0) = ground_of(id.ground()) {
                excited.push((id, q0 * state.fraction));
            }
        }

        for (id, quantity) in excited {
            self.push(id, quantity);
            if let Some(i) = self.position(id.ground()) {
                self.entries[i].1 -= quantity;
            }
        }
    }

    /// Merges every excited level back into its ground state.
    ///
    /// Excited entries without a ground entry are relabelled as the ground state.
    pub fn fold_metastable(&mut self) {
        let mut folded = ResidualInventory::new(self.cell);
        for (id, q) in self.entries.iter().filter(|(id, _)| !id.is_excited()) {
            folded.push(*id, *q);
        }
        for (id, q) in self.entries.iter().filter(|(id, _)| id.is_excited()) {
            folded.push(id.ground(), *q);
        }
        *self = folded;
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            cell: self.cell,
            entries: self.entries.iter().map(|(id, q)| (*id, q * factor)).collect(),
        }
    }
}
