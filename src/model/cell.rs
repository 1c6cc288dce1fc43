use super::material::Density;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Particle {
    Neutron,
    Photon,
    Electron,
    Proton,
    HeavyIon,
}

impl Particle {
    pub const ALL: [Particle; 5] = [
        Particle::Neutron,
        Particle::Photon,
        Particle::Electron,
        Particle::Proton,
        Particle::HeavyIon,
    ];

    /// Maps an MCNP particle designator (`n`, `p`, `e`, `h`, `#`) to a particle.
    pub fn from_designator(designator: char) -> Option<Self> {
        match designator.to_ascii_lowercase() {
            'n' => Some(Particle::Neutron),
            'p' => Some(Particle::Photon),
            'e' => Some(Particle::Electron),
            'h' => Some(Particle::Proton),
            '#' => Some(Particle::HeavyIon),
            _ => None,
        }
    }

    pub fn designator(&self) -> char {
        match self {
            Particle::Neutron => 'n',
            Particle::Photon => 'p',
            Particle::Electron => 'e',
            Particle::Proton => 'h',
            Particle::HeavyIon => '#',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Importances {
    pub neutron: f64,
    pub photon: f64,
    pub electron: f64,
    pub proton: f64,
    pub heavy_ion: f64,
}

impl Default for Importances {
    fn default() -> Self {
        Self {
            neutron: 1.0,
            photon: 1.0,
            electron: 1.0,
            proton: 1.0,
            heavy_ion: 1.0,
        }
    }
}

impl Importances {
    pub fn get(&self, particle: Particle) -> f64 {
        match particle {
            Particle::Neutron => self.neutron,
            Particle::Photon => self.photon,
            Particle::Electron => self.electron,
            Particle::Proton => self.proton,
            Particle::HeavyIon => self.heavy_ion,
        }
    }

    pub fn set(&mut self, particle: Particle, value: f64) {
        let slot = match particle {
            Particle::Neutron => &mut self.neutron,
            Particle::Photon => &mut self.photon,
            Particle::Electron => &mut self.electron,
            Particle::Proton => &mut self.proton,
            Particle::HeavyIon => &mut self.heavy_ion,
        };
        *slot = value;
    }
}

/// One cell declaration of a transport listing.
///
/// `density` keeps the listing's sign convention: negative values are mass
/// densities in g/cm³, positive values atomic densities in atoms/(barn·cm),
/// and zero marks a void cell.
#[derive(Debug, Clone, PartialEq)]
pub struct CellRecord {
    pub id: u32,
    pub material: u32,
    pub density: f64,
    pub importances: Importances,
}

impl CellRecord {
    pub fn new(id: u32, material: u32, density: f64) -> Self {
        Self {
            id,
            material,
            density,
            importances: Importances::default(),
        }
    }

    #[inline]
    pub fn is_void(&self) -> bool {
        self.material == 0
    }

    /// The density as a typed target for composition conversion, `None` for voids.
    pub fn target_density(&self) -> Option<Density> {
        if self.is_void() {
            None
        } else {
            Some(Density::from_signed(self.density))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn designators_roundtrip() {
        for particle in Particle::ALL {
            assert_eq!(
                Particle::from_designator(particle.designator()),
                Some(particle)
            );
        }
        assert_eq!(Particle::from_designator('N'), Some(Particle::Neutron));
        assert_eq!(Particle::from_designator('d'), None);
    }

    #[test]
    fn importances_default_to_one() {
        let mut imp = Importances::default();
        for particle in Particle::ALL {
            assert_eq!(imp.get(particle), 1.0);
        }
        imp.set(Particle::Photon, 0.0);
        assert_eq!(imp.photon, 0.0);
        assert_eq!(imp.neutron, 1.0);
    }

    #[test]
    fn void_cells_have_no_target_density() {
        assert!(CellRecord::new(1, 0, 0.0).target_density().is_none());
        assert_eq!(
            CellRecord::new(2, 3, -7.8).target_density(),
            Some(Density::Mass(7.8))
        );
        assert_eq!(
            CellRecord::new(3, 3, 0.08).target_density(),
            Some(Density::Atomic(0.08))
        );
    }
}
