use thiserror::Error;

/// Errors surfaced by this crate's public API.
///
/// Core arithmetic never raises for algebraic edge cases (identity, opposite
/// points, doubling a 2-torsion point); these variants are reserved for
/// caller bugs and structural impossibilities (§7 of the specification).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EccError {
    #[error("unknown curve: {name}")]
    UnknownCurve { name: String },

    #[error("point does not satisfy the curve equation")]
    InvalidPoint,

    #[error("no modular inverse exists (inputs are not coprime)")]
    NoModularInverse,

    #[error("koblitz encoding failed: {0}")]
    EncodingError(String),

    #[error("koblitz decoding failed: {0}")]
    DecodingError(String),

    #[error("value out of allowed range: {0}")]
    RangeError(String),
}

pub type Result<T> = std::result::Result<T, EccError>;
