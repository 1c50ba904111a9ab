//! Curve equations and the affine group law.

use crate::{CurvePoint, Error, Result};
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// Arithmetic exposed by an elliptic curve group.
///
/// Protocol code is written against this trait rather than a concrete
/// engine so alternative arithmetic backends can be swapped in.
pub trait CurveGroup {
    /// Multiply `point` by `scalar`.
    fn scalar_mul(&self, point: &CurvePoint, scalar: &BigUint) -> Result<CurvePoint>;

    /// Does `point` satisfy the curve equation?
    ///
    /// The point at infinity is always a member of the group.
    fn contains(&self, point: &CurvePoint) -> bool;

    /// Encode an integer as its minimal big-endian magnitude.
    ///
    /// Zero encodes as a single `0x00` byte.
    fn encode(&self, n: &BigUint) -> Vec<u8> {
        n.to_bytes_be()
    }

    /// Decode a big-endian magnitude. The empty slice decodes as zero.
    fn decode(&self, bytes: &[u8]) -> BigUint {
        BigUint::from_bytes_be(bytes)
    }
}

/// Form of the curve equation.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum CurveForm {
    /// `b·y² = x³ + a·x² + x`
    Montgomery,

    /// `y² = x³ + a·x + b`
    Weierstrass,
}

/// Elliptic curve over a prime field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct EllipticCurve {
    a: BigUint,
    b: BigUint,
    modulus: BigUint,
    form: CurveForm,
}

impl EllipticCurve {
    /// Create a curve from its equation coefficients and field modulus.
    ///
    /// `modulus` must be an odd prime. Coefficients are reduced modulo it.
    ///
    /// # Panics
    ///
    /// - If `modulus` is even or smaller than 3
    pub fn new(
        a: impl Into<BigUint>,
        b: impl Into<BigUint>,
        modulus: impl Into<BigUint>,
        form: CurveForm,
    ) -> Self {
        match Self::try_new(a, b, modulus, form) {
            Ok(curve) => curve,
            Err(err) => panic!("{err}"),
        }
    }

    /// Fallible variant of [`EllipticCurve::new`].
    ///
    /// Returns [`Error::InvalidModulus`] if `modulus` is even or smaller
    /// than 3. Primality is not checked.
    pub fn try_new(
        a: impl Into<BigUint>,
        b: impl Into<BigUint>,
        modulus: impl Into<BigUint>,
        form: CurveForm,
    ) -> Result<Self> {
        let modulus = modulus.into();
        if modulus < BigUint::from(3u8) || !modulus.bit(0) {
            return Err(Error::InvalidModulus);
        }

        Ok(Self {
            a: a.into() % &modulus,
            b: b.into() % &modulus,
            modulus,
            form,
        })
    }

    /// Coefficient `a` in the curve equation.
    pub fn a(&self) -> &BigUint {
        &self.a
    }

    /// Coefficient `b` in the curve equation.
    pub fn b(&self) -> &BigUint {
        &self.b
    }

    /// Field modulus `p`.
    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Form of the curve equation.
    pub fn form(&self) -> CurveForm {
        self.form
    }

    /// Add two points.
    pub fn add(&self, lhs: &CurvePoint, rhs: &CurvePoint) -> Result<CurvePoint> {
        let ((x1, y1), (x2, y2)) = match (lhs, rhs) {
            (CurvePoint::Infinity, _) => return Ok(rhs.clone()),
            (_, CurvePoint::Infinity) => return Ok(lhs.clone()),
            (CurvePoint::Affine { x: x1, y: y1 }, CurvePoint::Affine { x: x2, y: y2 }) => {
                ((self.reduce(x1), self.reduce(y1)), (self.reduce(x2), self.reduce(y2)))
            }
        };

        if x1 == x2 {
            if self.fadd(&y1, &y2).is_zero() {
                return Ok(CurvePoint::Infinity);
            }
            return self.double_affine(&x1, &y1);
        }

        let lambda = self.fmul(&self.fsub(&y2, &y1), &self.invert(&self.fsub(&x2, &x1))?);
        let x3 = match self.form {
            CurveForm::Montgomery => {
                let t = self.fmul(&self.b, &self.fmul(&lambda, &lambda));
                self.fsub(&self.fsub(&self.fsub(&t, &self.a), &x1), &x2)
            }
            CurveForm::Weierstrass => {
                self.fsub(&self.fsub(&self.fmul(&lambda, &lambda), &x1), &x2)
            }
        };
        let y3 = self.fsub(&self.fmul(&lambda, &self.fsub(&x1, &x3)), &y1);

        Ok(CurvePoint::Affine { x: x3, y: y3 })
    }

    /// Double a point.
    pub fn double(&self, point: &CurvePoint) -> Result<CurvePoint> {
        match point {
            CurvePoint::Infinity => Ok(CurvePoint::Infinity),
            CurvePoint::Affine { x, y } => self.double_affine(&self.reduce(x), &self.reduce(y)),
        }
    }

    /// Negate a point.
    pub fn negate(&self, point: &CurvePoint) -> CurvePoint {
        match point {
            CurvePoint::Infinity => CurvePoint::Infinity,
            CurvePoint::Affine { x, y } => CurvePoint::Affine {
                x: self.reduce(x),
                y: self.fsub(&BigUint::zero(), &self.reduce(y)),
            },
        }
    }

    /// Expects reduced coordinates.
    fn double_affine(&self, x: &BigUint, y: &BigUint) -> Result<CurvePoint> {
        if y.is_zero() {
            return Ok(CurvePoint::Infinity);
        }

        let xx = self.fmul(x, x);
        let three_xx = self.fmul(&BigUint::from(3u8), &xx);
        let two_y = self.fadd(y, y);

        let (lambda, x3) = match self.form {
            CurveForm::Montgomery => {
                // (3x² + 2ax + 1) / 2by
                let two_ax = self.fmul(&self.fadd(&self.a, &self.a), x);
                let num = self.fadd(&self.fadd(&three_xx, &two_ax), &BigUint::one());
                let lambda = self.fmul(&num, &self.invert(&self.fmul(&self.b, &two_y))?);
                let t = self.fmul(&self.b, &self.fmul(&lambda, &lambda));
                let x3 = self.fsub(&self.fsub(&self.fsub(&t, &self.a), x), x);
                (lambda, x3)
            }
            CurveForm::Weierstrass => {
                // (3x² + a) / 2y
                let num = self.fadd(&three_xx, &self.a);
                let lambda = self.fmul(&num, &self.invert(&two_y)?);
                let x3 = self.fsub(&self.fsub(&self.fmul(&lambda, &lambda), x), x);
                (lambda, x3)
            }
        };
        let y3 = self.fsub(&self.fmul(&lambda, &self.fsub(x, &x3)), y);

        Ok(CurvePoint::Affine { x: x3, y: y3 })
    }

    fn reduce(&self, n: &BigUint) -> BigUint {
        n % &self.modulus
    }

    fn fadd(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        (lhs + rhs) % &self.modulus
    }

    fn fsub(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        ((lhs + &self.modulus) - rhs) % &self.modulus
    }

    fn fmul(&self, lhs: &BigUint, rhs: &BigUint) -> BigUint {
        (lhs * rhs) % &self.modulus
    }

    /// Inversion via Fermat's little theorem: `n^(p-2) mod p`.
    fn invert(&self, n: &BigUint) -> Result<BigUint> {
        if n.is_zero() {
            return Err(Error::NotInvertible);
        }

        let exponent = &self.modulus - 2u32;
        let inverse = n.modpow(&exponent, &self.modulus);
        if self.fmul(n, &inverse).is_one() {
            Ok(inverse)
        } else {
            Err(Error::NotInvertible)
        }
    }
}

impl CurveGroup for EllipticCurve {
    /// Montgomery ladder over the affine group law: one addition and one
    /// doubling per scalar bit regardless of the bit's value.
    ///
    /// The underlying big integer arithmetic is not constant-time.
    fn scalar_mul(&self, point: &CurvePoint, scalar: &BigUint) -> Result<CurvePoint> {
        let mut r0 = CurvePoint::Infinity;
        let mut r1 = point.clone();

        for i in (0..scalar.bits()).rev() {
            if scalar.bit(i) {
                r0 = self.add(&r0, &r1)?;
                r1 = self.double(&r1)?;
            } else {
                r1 = self.add(&r0, &r1)?;
                r0 = self.double(&r0)?;
            }
        }

        Ok(match r0 {
            CurvePoint::Affine { x, y } => CurvePoint::Affine {
                x: self.reduce(&x),
                y: self.reduce(&y),
            },
            CurvePoint::Infinity => CurvePoint::Infinity,
        })
    }

    fn contains(&self, point: &CurvePoint) -> bool {
        let (x, y) = match point {
            CurvePoint::Infinity => return true,
            CurvePoint::Affine { x, y } => (x, y),
        };

        if x >= &self.modulus || y >= &self.modulus {
            return false;
        }

        let xx = self.fmul(x, x);
        let xxx = self.fmul(&xx, x);
        let yy = self.fmul(y, y);

        match self.form {
            CurveForm::Montgomery => {
                let rhs = self.fadd(&self.fadd(&xxx, &self.fmul(&self.a, &xx)), x);
                self.fmul(&self.b, &yy) == rhs
            }
            CurveForm::Weierstrass => {
                let rhs = self.fadd(&self.fadd(&xxx, &self.fmul(&self.a, x)), &self.b);
                yy == rhs
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CurveForm, CurveGroup, EllipticCurve};
    use crate::{CurvePoint, Error};
    use num_bigint::BigUint;

    /// `y² = x³ + 2x + 3` over GF(97)
    fn toy_weierstrass() -> EllipticCurve {
        EllipticCurve::new(2u32, 3u32, 97u32, CurveForm::Weierstrass)
    }

    /// `y² = x³ + 3x² + x` over GF(101)
    fn toy_montgomery() -> EllipticCurve {
        EllipticCurve::new(3u32, 1u32, 101u32, CurveForm::Montgomery)
    }

    /// Every affine point of a toy curve, by exhaustive search.
    fn points(curve: &EllipticCurve) -> Vec<CurvePoint> {
        let p = u32::try_from(curve.modulus()).unwrap();
        (0..p)
            .flat_map(|x| (0..p).map(move |y| CurvePoint::new(x, y)))
            .filter(|point| curve.contains(point))
            .collect()
    }

    #[test]
    fn weierstrass_known_addition() {
        let curve = toy_weierstrass();
        let p = CurvePoint::new(3u32, 6u32);
        assert!(curve.contains(&p));

        // 2·(3, 6) = (80, 10) on y² = x³ + 2x + 3 mod 97
        let doubled = curve.double(&p).unwrap();
        assert_eq!(doubled, CurvePoint::new(80u32, 10u32));
        assert_eq!(curve.add(&p, &p).unwrap(), doubled);
        assert!(curve.contains(&doubled));
    }

    #[test]
    fn addition_closes_over_group() {
        for curve in [toy_weierstrass(), toy_montgomery()] {
            let pts = points(&curve);
            assert!(!pts.is_empty());

            for p in pts.iter().take(12) {
                for q in pts.iter().take(12) {
                    let sum = curve.add(p, q).unwrap();
                    assert!(curve.contains(&sum), "{p} + {q} = {sum}");
                    assert_eq!(sum, curve.add(q, p).unwrap());
                }
            }
        }
    }

    #[test]
    fn inverse_sums_to_identity() {
        for curve in [toy_weierstrass(), toy_montgomery()] {
            for p in points(&curve) {
                let neg = curve.negate(&p);
                assert!(curve.contains(&neg));
                assert_eq!(curve.add(&p, &neg).unwrap(), CurvePoint::INFINITY);
            }
        }
    }

    #[test]
    fn identity_is_neutral() {
        let curve = toy_montgomery();
        let p = points(&curve).pop().unwrap();
        assert_eq!(curve.add(&p, &CurvePoint::INFINITY).unwrap(), p);
        assert_eq!(curve.add(&CurvePoint::INFINITY, &p).unwrap(), p);
        assert_eq!(curve.double(&CurvePoint::INFINITY).unwrap(), CurvePoint::INFINITY);
        assert!(curve.contains(&CurvePoint::INFINITY));
    }

    #[test]
    fn scalar_mul_matches_repeated_addition() {
        for curve in [toy_weierstrass(), toy_montgomery()] {
            for p in points(&curve).into_iter().take(5) {
                let mut acc = CurvePoint::INFINITY;
                for k in 0u32..20 {
                    assert_eq!(curve.scalar_mul(&p, &BigUint::from(k)).unwrap(), acc);
                    acc = curve.add(&acc, &p).unwrap();
                }
            }
        }
    }

    #[test]
    fn zero_denominator_is_reported() {
        // b = 0 makes every Montgomery doubling denominator vanish
        let curve = EllipticCurve::new(3u32, 0u32, 101u32, CurveForm::Montgomery);
        let result = curve.double(&CurvePoint::new(5u32, 7u32));
        assert_eq!(result, Err(Error::NotInvertible));
    }

    #[test]
    fn degenerate_modulus_is_rejected() {
        for modulus in [0u32, 1, 2, 4, 100] {
            assert_eq!(
                EllipticCurve::try_new(1u32, 1u32, modulus, CurveForm::Weierstrass),
                Err(Error::InvalidModulus),
                "modulus {modulus}"
            );
        }
        assert!(EllipticCurve::try_new(1u32, 1u32, 3u32, CurveForm::Montgomery).is_ok());
    }

    #[test]
    #[should_panic(expected = "modulus")]
    fn new_panics_on_zero_modulus() {
        EllipticCurve::new(1u32, 1u32, 0u32, CurveForm::Weierstrass);
    }

    #[test]
    fn out_of_range_coordinates_are_not_members() {
        let curve = toy_weierstrass();
        assert!(!curve.contains(&CurvePoint::new(3u32 + 97, 6u32)));
    }

    #[test]
    fn integer_encoding_is_minimal_big_endian() {
        let curve = toy_weierstrass();
        assert_eq!(curve.encode(&BigUint::from(0x0102u32)), vec![0x01, 0x02]);
        assert_eq!(curve.encode(&BigUint::from(0u32)), vec![0x00]);
        assert_eq!(curve.decode(&[0x00, 0x01, 0x02]), BigUint::from(0x0102u32));
        assert_eq!(curve.decode(&[]), BigUint::from(0u32));
    }
}
