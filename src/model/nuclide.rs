use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid nuclide identifier: '{0}'")]
pub struct ParseZaidError(String);

/// MCNP nuclide identifier, `Z*1000 + A`.
///
/// A mass number of zero stands for the natural element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Zaid(u32);

impl Zaid {
    pub fn new(z: u32, a: u32) -> Self {
        Self(z * 1000 + a)
    }

    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn z(self) -> u32 {
        self.0 / 1000
    }

    #[inline]
    pub fn a(self) -> u32 {
        self.0 % 1000
    }

    #[inline]
    pub fn is_natural(self) -> bool {
        self.a() == 0
    }

    /// Ground-state ACAB identifier of the same nuclide.
    pub fn to_acab(self) -> AcabId {
        AcabId::new(self.z(), self.a(), 0)
    }
}

impl fmt::Display for Zaid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Zaid {
    type Err = ParseZaidError;

    /// Accepts bare identifiers (`26056`) and library-suffixed ones (`26056.70c`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let head = s.split('.').next().unwrap_or_default();
        head.parse::<u32>()
            .map(Zaid)
            .map_err(|_| ParseZaidError(s.to_string()))
    }
}

/// ACAB nuclide identifier, `Z*10000 + A*10 + level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AcabId(u32);

impl AcabId {
    /// Highest excitation level the single level digit can hold.
    pub const MAX_LEVEL: u32 = 9;

    /// Levels above [`Self::MAX_LEVEL`] are clamped to it.
    pub fn new(z: u32, a: u32, level: u32) -> Self {
        Self(z * 10000 + a * 10 + Self::level_digit(level))
    }

    fn level_digit(level: u32) -> u32 {
        if level > Self::MAX_LEVEL {
            log::warn!(
                "Excitation level {level} does not fit the ACAB identifier; using level {}",
                Self::MAX_LEVEL
            );
            Self::MAX_LEVEL
        } else {
            level
        }
    }

    #[inline]
    pub fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub fn z(self) -> u32 {
        self.0 / 10000
    }

    #[inline]
    pub fn a(self) -> u32 {
        (self.0 % 10000) / 10
    }

    #[inline]
    pub fn level(self) -> u32 {
        self.0 % 10
    }

    #[inline]
    pub fn is_excited(self) -> bool {
        self.level() != 0
    }

    pub fn ground(self) -> Self {
        Self(self.0 - self.level())
    }

    pub fn with_level(self, level: u32) -> Self {
        Self(self.ground().0 + Self::level_digit(level))
    }
}

impl fmt::Display for AcabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zaid_components() {
        let fe56 = Zaid::new(26, 56);
        assert_eq!(fe56.raw(), 26056);
        assert_eq!(fe56.z(), 26);
        assert_eq!(fe56.a(), 56);
        assert!(!fe56.is_natural());
        assert!(Zaid::from_raw(26000).is_natural());
    }

    #[test]
    fn zaid_from_str_drops_library_suffix() {
        assert_eq!("26056.70c".parse::<Zaid>().unwrap(), Zaid::new(26, 56));
        assert_eq!("6000".parse::<Zaid>().unwrap(), Zaid::new(6, 0));
        let err = "nlib".parse::<Zaid>().unwrap_err();
        assert_eq!(err.to_string(), "invalid nuclide identifier: 'nlib'");
    }

    #[test]
    fn acab_id_encoding() {
        let co58m = AcabId::new(27, 58, 1);
        assert_eq!(co58m.raw(), 270581);
        assert_eq!(co58m.z(), 27);
        assert_eq!(co58m.a(), 58);
        assert_eq!(co58m.level(), 1);
        assert!(co58m.is_excited());
        assert_eq!(co58m.ground(), AcabId::new(27, 58, 0));
        assert_eq!(co58m.ground().with_level(2).raw(), 270582);
    }

    #[test]
    fn levels_never_carry_into_the_mass_number() {
        assert_eq!(AcabId::new(25, 54, 10).raw(), 250549);
        assert_ne!(AcabId::new(25, 54, 10), AcabId::new(25, 55, 0));
        assert_eq!(AcabId::new(25, 54, 0).with_level(12).a(), 54);
        assert_eq!(AcabId::new(25, 54, 0).with_level(12).level(), AcabId::MAX_LEVEL);
    }

    #[test]
    fn zaid_to_acab_is_ground_state() {
        assert_eq!(Zaid::new(26, 56).to_acab().raw(), 260560);
    }
}
