//! Domain parameters: a curve together with a generator and its order.

use crate::{CurveForm, CurvePoint, EllipticCurve};
use hex_literal::hex;
use num_bigint::BigUint;
use std::sync::LazyLock;

/// Curve25519 field modulus: 2²⁵⁵ - 19
const CURVE25519_MODULUS: [u8; 32] =
    hex!("7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffed");

/// Curve25519 basepoint order: 2²⁵² + 27742317777372353535851937790883648493
const CURVE25519_ORDER: [u8; 32] =
    hex!("1000000000000000000000000000000014def9dea2f79cd65812631a5cf5d3ed");

/// Curve25519 basepoint y-coordinate (the x-coordinate is 9).
const CURVE25519_GENERATOR_Y: [u8; 32] =
    hex!("20ae19a1b8a086b4e01edd2c7748d14c923d4d7e6d7c61b229e9c5a27eced3d9");

/// Montgomery `a` coefficient of Curve25519.
const CURVE25519_A: u32 = 486662;

static CURVE25519: LazyLock<Domain> = LazyLock::new(|| {
    let curve = EllipticCurve::new(
        CURVE25519_A,
        1u32,
        BigUint::from_bytes_be(&CURVE25519_MODULUS),
        CurveForm::Montgomery,
    );
    let generator = CurvePoint::new(9u32, BigUint::from_bytes_be(&CURVE25519_GENERATOR_Y));
    Domain::new(curve, generator, BigUint::from_bytes_be(&CURVE25519_ORDER))
});

/// Elliptic curve domain parameters.
///
/// Immutable once constructed. The process-wide Curve25519 instance is
/// shared by reference through [`Domain::curve25519`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Domain<G = EllipticCurve> {
    curve: G,
    generator: CurvePoint,
    order: BigUint,
}

impl<G> Domain<G> {
    /// Create domain parameters from a curve, a generator on it and the
    /// generator's order.
    pub fn new(curve: G, generator: CurvePoint, order: BigUint) -> Self {
        Self {
            curve,
            generator,
            order,
        }
    }

    /// Curve the arithmetic is performed on.
    pub fn curve(&self) -> &G {
        &self.curve
    }

    /// Designated base point.
    pub fn generator(&self) -> &CurvePoint {
        &self.generator
    }

    /// Order of the generator.
    pub fn order(&self) -> &BigUint {
        &self.order
    }

    /// Bit length of the generator's order, used to size private scalars.
    pub fn scalar_bits(&self) -> u64 {
        self.order.bits()
    }
}

impl Domain {
    /// Curve25519 in Montgomery form with the RFC 7748 basepoint.
    pub fn curve25519() -> &'static Self {
        &CURVE25519
    }
}
