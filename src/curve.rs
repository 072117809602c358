//! The curve-arithmetic engine: curve parameters plus `add_points`,
//! `double_point`, `multiply_point`, and `is_point_on_curve`, dispatched
//! through one of two coordinate backends and memoized by the process-wide
//! LRU cache.

use dashu::integer::UBig;

use crate::cache::{self, CacheKey, CacheValue, Op};
use crate::field::{mod_add, mod_mul, mod_sub};
use crate::jacobian::JacobianPoint;
use crate::modular::mmi_cached as mmi;
use crate::point::Point;

/// Coordinate backend used internally during scalar multiplication. Chosen
/// once at curve construction and dispatched once per `multiply_point` call
/// rather than per double-and-add iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Backend {
    Affine,
    Jacobian,
}

/// A short-Weierstrass curve `y^2 = x^3 + ax + b (mod p)` together with a
/// base point `g` of prime order `n` and cofactor `h`.
#[derive(Clone)]
pub struct EllipticCurve {
    pub p: UBig,
    pub a: UBig,
    pub b: UBig,
    pub g: Point,
    pub n: UBig,
    pub h: UBig,
    pub backend: Backend,
    /// Stable value-identity used as the cache key prefix; curves with the
    /// same (p, a, b) are assumed to be the same group for memoization
    /// purposes even if constructed independently.
    identity: String,
}

impl EllipticCurve {
    pub fn new(p: UBig, a: UBig, b: UBig, g: Point, n: UBig, h: UBig, backend: Backend) -> Self {
        let identity = format!("{:x}:{:x}:{:x}", p, a, b);
        EllipticCurve {
            p,
            a,
            b,
            g,
            n,
            h,
            backend,
            identity,
        }
    }

    /// `P + Q`. Returns 𝒪 where the group law requires it; never raises for
    /// identity or opposite-point edge cases.
    pub fn add_points(&self, lhs: &Point, rhs: &Point) -> Point {
        let key = CacheKey::new(&self.identity, Op::Add(lhs.clone(), rhs.clone()));
        cache::global_cache()
            .get_or_insert_with(key, || CacheValue::Point(self.add_points_raw(lhs, rhs)))
            .into_point()
    }

    /// `2P`.
    pub fn double_point(&self, p: &Point) -> Point {
        let key = CacheKey::new(&self.identity, Op::Double(p.clone()));
        cache::global_cache()
            .get_or_insert_with(key, || CacheValue::Point(self.double_point_raw(p)))
            .into_point()
    }

    /// `k*P` via left-to-right double-and-add. `k == 0` yields 𝒪; `k >= n`
    /// is accepted and produces the mathematically correct multiple.
    pub fn multiply_point(&self, k: &UBig, p: &Point) -> Point {
        let key = CacheKey::new(&self.identity, Op::Multiply(k.clone(), p.clone()));
        cache::global_cache()
            .get_or_insert_with(key, || CacheValue::Point(self.multiply_point_raw(k, p)))
            .into_point()
    }

    /// `true` iff `p` satisfies `y^2 = x^3 + ax + b (mod p)`. Always `false`
    /// for 𝒪.
    pub fn is_point_on_curve(&self, point: &Point) -> bool {
        match point {
            Point::Infinity => false,
            Point::Affine(x, y) => {
                let y2 = mod_mul(y, y, &self.p);
                let x2 = mod_mul(x, x, &self.p);
                let x3 = mod_mul(&x2, x, &self.p);
                let rhs = mod_add(&mod_add(&x3, &mod_mul(&self.a, x, &self.p), &self.p), &self.b, &self.p);
                y2 == rhs
            }
        }
    }

    /// Explicit validation entry point (§7, I1): fails with
    /// [`crate::EccError::InvalidPoint`] unless `point` is 𝒪 or satisfies
    /// the curve equation. Unlike [`Self::is_point_on_curve`] this accepts
    /// 𝒪 as valid — I1 states the invariant as "on the curve, or 𝒪".
    /// Core arithmetic does not call this; it assumes the invariant holds
    /// and never validates implicitly.
    pub fn validate_point(&self, point: &Point) -> crate::error::Result<()> {
        if point.is_infinity() || self.is_point_on_curve(point) {
            Ok(())
        } else {
            Err(crate::error::EccError::InvalidPoint)
        }
    }

    fn add_points_raw(&self, lhs: &Point, rhs: &Point) -> Point {
        match self.backend {
            Backend::Affine => self.add_affine(lhs, rhs),
            Backend::Jacobian => {
                let l = JacobianPoint::from_affine(lhs);
                let r = JacobianPoint::from_affine(rhs);
                l.add(&r, &self.p, &self.a).to_affine(&self.p)
            }
        }
    }

    fn double_point_raw(&self, p: &Point) -> Point {
        match self.backend {
            Backend::Affine => self.add_affine(p, p),
            Backend::Jacobian => {
                let j = JacobianPoint::from_affine(p);
                j.double(&self.a, &self.p).to_affine(&self.p)
            }
        }
    }

    fn multiply_point_raw(&self, k: &UBig, p: &Point) -> Point {
        if *k == UBig::from(0u8) || p.is_infinity() {
            return Point::Infinity;
        }

        match self.backend {
            Backend::Affine => {
                let mut result = Point::Infinity;
                for bit in bits_msb_first(k) {
                    result = self.add_affine(&result, &result);
                    if bit {
                        result = self.add_affine(&result, p);
                    }
                }
                result
            }
            Backend::Jacobian => {
                let base = JacobianPoint::from_affine(p);
                let mut result = JacobianPoint::infinity();
                for bit in bits_msb_first(k) {
                    result = result.double(&self.a, &self.p);
                    if bit {
                        result = result.add(&base, &self.p, &self.a);
                    }
                }
                result.to_affine(&self.p)
            }
        }
    }

    /// Affine addition following the reference law in §4.3. Covers `P = Q`
    /// (doubling), `P = O`/`Q = O`, and opposite points (returns 𝒪).
    fn add_affine(&self, lhs: &Point, rhs: &Point) -> Point {
        let (x1, y1) = match lhs {
            Point::Infinity => return rhs.clone(),
            Point::Affine(x, y) => (x, y),
        };
        let (x2, y2) = match rhs {
            Point::Infinity => return lhs.clone(),
            Point::Affine(x, y) => (x, y),
        };

        if x1 == x2 {
            // Same x: either opposite points (y2 == -y1) or P == Q with P
            // on the x-axis (2-torsion, y1 == 0 == -y1 mod p). Both cases
            // collapse to the single check below and yield 𝒪.
            let y2_neg = mod_sub(&self.p, y2, &self.p);
            if y1 == &y2_neg {
                return Point::Infinity;
            }

            // P == Q: use the tangent-line (doubling) formula.
            let lambda = {
                let three_x1_sq = mod_mul(&UBig::from(3u8), &mod_mul(x1, x1, &self.p), &self.p);
                let numerator = mod_add(&three_x1_sq, &self.a, &self.p);
                let denom = mmi(&mod_mul(&UBig::from(2u8), y1, &self.p), &self.p)
                    .expect("2y is invertible for a point not on the x-axis");
                mod_mul(&numerator, &denom, &self.p)
            };
            return self.finish_affine(&lambda, x1, y1, x1);
        }

        let lambda = {
            let numerator = mod_sub(y2, y1, &self.p);
            let denom = mmi(&mod_sub(x2, x1, &self.p), &self.p)
                .expect("x1 != x2 implies x2 - x1 is invertible mod a prime");
            mod_mul(&numerator, &denom, &self.p)
        };
        self.finish_affine(&lambda, x1, y1, x2)
    }

    fn finish_affine(&self, lambda: &UBig, x1: &UBig, y1: &UBig, x2: &UBig) -> Point {
        let lambda2 = mod_mul(lambda, lambda, &self.p);
        let x3 = mod_sub(&mod_sub(&lambda2, x1, &self.p), x2, &self.p);
        let y3 = mod_sub(&mod_mul(lambda, &mod_sub(x1, &x3, &self.p), &self.p), y1, &self.p);
        Point::Affine(x3, y3)
    }
}

/// Most-significant-bit-first iterator over `k`'s binary expansion. The
/// caller handles `k == 0` before reaching this, so the iterator is never
/// consulted for a zero scalar.
fn bits_msb_first(k: &UBig) -> impl Iterator<Item = bool> {
    let bits = k.bit_len();
    let k = k.clone();
    (0..bits).rev().map(move |i| {
        let shifted: UBig = &k >> i;
        shifted & UBig::from(1u8) == UBig::from(1u8)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // y^2 = x^3 + 2x + 3 over GF(97); a small toy curve with known points.
    fn toy_curve(backend: Backend) -> EllipticCurve {
        EllipticCurve::new(
            UBig::from(97u32),
            UBig::from(2u32),
            UBig::from(3u32),
            Point::Affine(UBig::from(3u32), UBig::from(6u32)),
            UBig::from(5u32), // not the true order; fine for arithmetic-only tests
            UBig::from(1u32),
            backend,
        )
    }

    #[test]
    fn generator_is_on_curve_both_backends() {
        for backend in [Backend::Affine, Backend::Jacobian] {
            let curve = toy_curve(backend);
            assert!(curve.is_point_on_curve(&curve.g.clone()));
        }
    }

    #[test]
    fn infinity_is_not_on_curve() {
        let curve = toy_curve(Backend::Affine);
        assert!(!curve.is_point_on_curve(&Point::Infinity));
    }

    #[test]
    fn validate_point_accepts_generator_and_infinity() {
        let curve = toy_curve(Backend::Affine);
        assert!(curve.validate_point(&curve.g.clone()).is_ok());
        assert!(curve.validate_point(&Point::Infinity).is_ok());
    }

    #[test]
    fn validate_point_rejects_off_curve_point() {
        let curve = toy_curve(Backend::Affine);
        let bumped = match curve.g.clone() {
            Point::Affine(x, y) => Point::Affine(x, y + UBig::from(1u8)),
            Point::Infinity => unreachable!(),
        };
        assert_eq!(
            curve.validate_point(&bumped),
            Err(crate::error::EccError::InvalidPoint)
        );
    }

    #[test]
    fn add_infinity_is_identity() {
        let curve = toy_curve(Backend::Affine);
        let g = curve.g.clone();
        assert_eq!(curve.add_points(&g, &Point::Infinity), g);
        assert_eq!(curve.add_points(&Point::Infinity, &g), g);
    }

    #[test]
    fn add_is_commutative() {
        let curve = toy_curve(Backend::Affine);
        let g = curve.g.clone();
        let h = curve.double_point(&g);
        assert_eq!(curve.add_points(&g, &h), curve.add_points(&h, &g));
    }

    #[test]
    fn point_plus_negation_is_infinity() {
        let curve = toy_curve(Backend::Affine);
        let g = curve.g.clone();
        let neg = match &g {
            Point::Affine(x, y) => Point::Affine(x.clone(), mod_sub(&curve.p, y, &curve.p)),
            Point::Infinity => Point::Infinity,
        };
        assert_eq!(curve.add_points(&g, &neg), Point::Infinity);
    }

    #[test]
    fn double_matches_self_addition() {
        let curve = toy_curve(Backend::Affine);
        let g = curve.g.clone();
        assert_eq!(curve.double_point(&g), curve.add_points(&g, &g));
    }

    #[test]
    fn affine_and_jacobian_backends_agree() {
        let affine = toy_curve(Backend::Affine);
        let jacobian = toy_curve(Backend::Jacobian);
        let g = affine.g.clone();

        let two_affine = affine.double_point(&g);
        let two_jacobian = jacobian.double_point(&g);
        assert_eq!(two_affine, two_jacobian);

        let k = UBig::from(9u32);
        assert_eq!(affine.multiply_point(&k, &g), jacobian.multiply_point(&k, &g));
    }

    #[test]
    fn scalar_zero_yields_infinity() {
        let curve = toy_curve(Backend::Affine);
        let g = curve.g.clone();
        assert_eq!(curve.multiply_point(&UBig::from(0u8), &g), Point::Infinity);
    }

    #[test]
    fn multiply_matches_repeated_addition() {
        let curve = toy_curve(Backend::Affine);
        let g = curve.g.clone();
        let mut acc = Point::Infinity;
        for _ in 0..7 {
            acc = curve.add_points(&acc, &g);
        }
        assert_eq!(curve.multiply_point(&UBig::from(7u32), &g), acc);
    }
}
