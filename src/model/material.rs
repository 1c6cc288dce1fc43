use super::nuclide::Zaid;

/// How the fractions of a material declaration are expressed.
///
/// The listing encodes this in the sign of the fractions: positive values are
/// atomic fractions, negative values weight fractions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composition {
    AtomicFraction,
    WeightFraction,
}

/// A signed listing density split into its two meanings.
///
/// Both variants hold a non-negative magnitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Density {
    /// Mass density in g/cm³ (negative in the listing).
    Mass(f64),
    /// Atomic density in atoms/(barn·cm) (non-negative in the listing).
    Atomic(f64),
}

impl Density {
    pub fn from_signed(value: f64) -> Self {
        if value < 0.0 {
            Density::Mass(-value)
        } else {
            Density::Atomic(value)
        }
    }

    pub fn signed(&self) -> f64 {
        match *self {
            Density::Mass(rho) => -rho,
            Density::Atomic(n) => n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constituent {
    pub zaid: Zaid,
    pub fraction: f64,
}

impl Constituent {
    pub fn new(zaid: Zaid, fraction: f64) -> Self {
        Self { zaid, fraction }
    }
}

/// An `m<id>` declaration: ordered `(zaid, fraction)` pairs.
///
/// Equality ignores `id` and compares the zaid and fraction lists after
/// normalizing both sides to a total of ±1.
#[derive(Debug, Clone, Default)]
pub struct MaterialRecord {
    pub id: u32,
    pub constituents: Vec<Constituent>,
}

impl MaterialRecord {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            constituents: Vec::new(),
        }
    }

    pub fn with_constituents(id: u32, pairs: impl IntoIterator<Item = (Zaid, f64)>) -> Self {
        Self {
            id,
            constituents: pairs
                .into_iter()
                .map(|(zaid, fraction)| Constituent::new(zaid, fraction))
                .collect(),
        }
    }

    pub fn push(&mut self, zaid: Zaid, fraction: f64) {
        self.constituents.push(Constituent::new(zaid, fraction));
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.constituents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.constituents.is_empty()
    }

    pub fn zaids(&self) -> impl Iterator<Item = Zaid> + '_ {
        self.constituents.iter().map(|c| c.zaid)
    }

    pub fn fractions(&self) -> impl Iterator<Item = f64> + '_ {
        self.constituents.iter().map(|c| c.fraction)
    }

    pub fn total_fraction(&self) -> f64 {
        self.fractions().sum()
    }

    /// Composition kind inferred from the sign of the fraction total.
    ///
    /// Returns `None` for empty records or fractions summing to zero.
    pub fn composition(&self) -> Option<Composition> {
        let total = self.total_fraction();
        if total > 0.0 {
            Some(Composition::AtomicFraction)
        } else if total < 0.0 {
            Some(Composition::WeightFraction)
        } else {
            None
        }
    }

    pub fn has_natural_elements(&self) -> bool {
        self.zaids().any(Zaid::is_natural)
    }

    /// Rescales the fractions so they sum to +1 (atomic) or -1 (weight).
    pub fn normalize(&mut self) {
        let total = self.total_fraction();
        if total == 0.0 {
            return;
        }
        let sign = total.signum();
        for c in &mut self.constituents {
            c.fraction = c.fraction / total * sign;
        }
    }

    pub fn normalized(&self) -> Self {
        let mut copy = self.clone();
        copy.normalize();
        copy
    }
}

impl PartialEq for MaterialRecord {
    fn eq(&self, other: &Self) -> bool {
        let lhs = self.normalized();
        let rhs = other.normalized();
        lhs.zaids().eq(rhs.zaids()) && lhs.fractions().eq(rhs.fractions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() <= eps
    }

    fn water() -> MaterialRecord {
        MaterialRecord::with_constituents(1, [(Zaid::new(1, 1), 2.0), (Zaid::new(8, 16), 1.0)])
    }

    #[test]
    fn density_sign_convention() {
        assert_eq!(Density::from_signed(-7.8), Density::Mass(7.8));
        assert_eq!(Density::from_signed(0.1), Density::Atomic(0.1));
        assert_eq!(Density::from_signed(0.0), Density::Atomic(0.0));
        assert_eq!(Density::Mass(7.8).signed(), -7.8);
    }

    #[test]
    fn composition_from_fraction_sign() {
        assert_eq!(water().composition(), Some(Composition::AtomicFraction));
        let steel =
            MaterialRecord::with_constituents(2, [(Zaid::new(26, 0), -0.7), (Zaid::new(24, 0), -0.3)]);
        assert_eq!(steel.composition(), Some(Composition::WeightFraction));
        assert!(steel.has_natural_elements());
        assert_eq!(MaterialRecord::new(3).composition(), None);
    }

    #[test]
    fn normalize_keeps_sign() {
        let mut weight =
            MaterialRecord::with_constituents(2, [(Zaid::new(26, 56), -3.0), (Zaid::new(6, 12), -1.0)]);
        weight.normalize();
        assert!(approx_eq(weight.total_fraction(), -1.0, 1e-12));
        assert!(approx_eq(weight.constituents[0].fraction, -0.75, 1e-12));

        let atomic = water().normalized();
        assert!(approx_eq(atomic.total_fraction(), 1.0, 1e-12));
    }

    #[test]
    fn equality_is_scale_invariant_and_order_sensitive() {
        let scaled =
            MaterialRecord::with_constituents(9, [(Zaid::new(1, 1), 4.0), (Zaid::new(8, 16), 2.0)]);
        assert_eq!(water(), scaled);

        let reordered =
            MaterialRecord::with_constituents(1, [(Zaid::new(8, 16), 1.0), (Zaid::new(1, 1), 2.0)]);
        assert_ne!(water(), reordered);
    }
}
