//! Curve points in affine coordinates.

use crate::{Error, Result};
use core::fmt;
use num_bigint::BigUint;

/// Point on an elliptic curve in affine coordinates, or the point at infinity.
///
/// Construction performs no on-curve validation; that is the job of the
/// [`CurveGroup`][crate::CurveGroup] the point is used with.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum CurvePoint {
    /// Finite point with affine coordinates.
    Affine {
        /// x-coordinate
        x: BigUint,

        /// y-coordinate
        y: BigUint,
    },

    /// Additive identity of the group a.k.a. the point at infinity.
    Infinity,
}

impl CurvePoint {
    /// Additive identity of the group a.k.a. the point at infinity.
    pub const INFINITY: Self = Self::Infinity;

    /// Create an affine point from its coordinates.
    pub fn new(x: impl Into<BigUint>, y: impl Into<BigUint>) -> Self {
        Self::Affine {
            x: x.into(),
            y: y.into(),
        }
    }

    /// Additive identity of the group.
    pub fn identity() -> Self {
        Self::Infinity
    }

    /// Is this point the point at infinity?
    pub fn is_identity(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    /// Get the x-coordinate.
    pub fn x(&self) -> Result<&BigUint> {
        self.coordinates().map(|(x, _)| x)
    }

    /// Get the y-coordinate.
    pub fn y(&self) -> Result<&BigUint> {
        self.coordinates().map(|(_, y)| y)
    }

    /// Get both affine coordinates.
    pub fn coordinates(&self) -> Result<(&BigUint, &BigUint)> {
        match self {
            Self::Affine { x, y } => Ok((x, y)),
            Self::Infinity => Err(Error::InvalidPointAccess),
        }
    }
}

impl Default for CurvePoint {
    fn default() -> Self {
        Self::Infinity
    }
}

impl fmt::Display for CurvePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Affine { x, y } => write!(f, "({x}, {y})"),
            Self::Infinity => f.write_str("(POINT_AT_INFINITY)"),
        }
    }
}
