//! Error types for the composition algebra.

use thiserror::Error;

/// Errors raised while converting or expanding a material composition.
#[derive(Debug, Error)]
pub enum Error {
    /// No natural-abundance data for the element.
    ///
    /// Raised when a natural (`A = 0`) constituent needs a mean mass number.
    #[error("no natural abundance data for element Z={z}")]
    UnknownElement { z: u32 },

    /// The material has no constituents, or its fractions sum to zero, so
    /// its composition kind cannot be told.
    #[error("material m{material} has no usable composition")]
    EmptyComposition { material: u32 },

    /// The material mixes atomic (positive) and weight (negative) fractions.
    #[error("material m{material} mixes atomic and weight fractions")]
    MixedComposition { material: u32 },

    /// The abundance table TOML could not be parsed.
    #[error("failed to parse natural abundance table: {0}")]
    AbundanceTable(#[from] toml::de::Error),

    /// The abundance table parsed but holds inconsistent data.
    #[error("invalid natural abundance table: {0}")]
    InvalidAbundanceTable(String),
}
