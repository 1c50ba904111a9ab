//! Error type

use thiserror::Error;

/// Curve arithmetic errors.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum Error {
    /// A coordinate was read from the point at infinity.
    #[error("the point at infinity has no affine coordinates")]
    InvalidPointAccess,

    /// The field modulus was even or smaller than 3.
    #[error("curve modulus must be an odd prime")]
    InvalidModulus,

    /// A field element had no inverse modulo the curve's modulus.
    ///
    /// Only reachable with a composite modulus or degenerate curve coefficients.
    #[error("field element is not invertible")]
    NotInvertible,
}

/// Result type with the `ecgroup` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
