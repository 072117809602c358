//! Internal Jacobian (projective) coordinate backend: `(X, Y, Z)` represents
//! the affine point `(X/Z^2, Y/Z^3)` when `Z != 0`, and 𝒪 when `Z == 0`.
//! Never exposed to callers — only used inside [`crate::curve::EllipticCurve`].

use dashu::integer::UBig;

use crate::field::{mod_add, mod_mul, mod_sub};
use crate::modular::mmi_cached as mmi;
use crate::point::Point;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct JacobianPoint {
    pub x: UBig,
    pub y: UBig,
    pub z: UBig,
}

impl JacobianPoint {
    pub fn infinity() -> Self {
        JacobianPoint {
            x: UBig::from(1u8),
            y: UBig::from(1u8),
            z: UBig::from(0u8),
        }
    }

    pub fn is_infinity(&self) -> bool {
        self.z == UBig::from(0u8)
    }

    pub fn from_affine(p: &Point) -> Self {
        match p {
            Point::Infinity => Self::infinity(),
            Point::Affine(x, y) => JacobianPoint {
                x: x.clone(),
                y: y.clone(),
                z: UBig::from(1u8),
            },
        }
    }

    /// Converts back to affine coordinates. Exactly one modular inversion is
    /// performed here, versus one per intermediate add/double in the affine
    /// backend.
    pub fn to_affine(&self, p: &UBig) -> Point {
        if self.is_infinity() {
            return Point::Infinity;
        }
        let z_inv = mmi(&self.z, p).expect("curve prime is prime; Z is nonzero mod p");
        let z_inv2 = mod_mul(&z_inv, &z_inv, p);
        let z_inv3 = mod_mul(&z_inv2, &z_inv, p);
        let x = mod_mul(&self.x, &z_inv2, p);
        let y = mod_mul(&self.y, &z_inv3, p);
        Point::Affine(x, y)
    }

    /// Doubling in Jacobian coordinates (Z != 0 case guarded by caller).
    pub fn double(&self, a: &UBig, p: &UBig) -> JacobianPoint {
        if self.is_infinity() {
            return Self::infinity();
        }

        let y2 = mod_mul(&self.y, &self.y, p);
        let s = mod_mul(&mod_mul(&UBig::from(4u8), &self.x, p), &y2, p);

        let x2 = mod_mul(&self.x, &self.x, p);
        let z2 = mod_mul(&self.z, &self.z, p);
        let z4 = mod_mul(&z2, &z2, p);
        let m = mod_add(&mod_mul(&UBig::from(3u8), &x2, p), &mod_mul(a, &z4, p), p);

        let m2 = mod_mul(&m, &m, p);
        let two_s = mod_mul(&UBig::from(2u8), &s, p);
        let x3 = mod_sub(&m2, &two_s, p);

        let y4 = mod_mul(&y2, &y2, p);
        let eight_y4 = mod_mul(&UBig::from(8u8), &y4, p);
        let s_minus_x3 = mod_sub(&s, &x3, p);
        let y3 = mod_sub(&mod_mul(&m, &s_minus_x3, p), &eight_y4, p);

        let z3 = mod_mul(&mod_mul(&UBig::from(2u8), &self.y, p), &self.z, p);

        JacobianPoint { x: x3, y: y3, z: z3 }
    }

    /// Addition in Jacobian coordinates.
    pub fn add(&self, other: &JacobianPoint, p: &UBig, a: &UBig) -> JacobianPoint {
        if self.is_infinity() {
            return other.clone();
        }
        if other.is_infinity() {
            return self.clone();
        }

        let z1_2 = mod_mul(&self.z, &self.z, p);
        let z1_3 = mod_mul(&z1_2, &self.z, p);
        let z2_2 = mod_mul(&other.z, &other.z, p);
        let z2_3 = mod_mul(&z2_2, &other.z, p);

        let u1 = mod_mul(&self.x, &z2_2, p);
        let u2 = mod_mul(&other.x, &z1_2, p);
        let s1 = mod_mul(&self.y, &z2_3, p);
        let s2 = mod_mul(&other.y, &z1_3, p);

        if u1 == u2 {
            if s1 != s2 {
                return Self::infinity();
            }
            return self.double(a, p);
        }

        let h = mod_sub(&u2, &u1, p);
        let r = mod_sub(&s2, &s1, p);

        let h2 = mod_mul(&h, &h, p);
        let h3 = mod_mul(&h2, &h, p);
        let u1_h2 = mod_mul(&u1, &h2, p);

        let r2 = mod_mul(&r, &r, p);
        let two_u1_h2 = mod_mul(&UBig::from(2u8), &u1_h2, p);
        let x3 = mod_sub(&mod_sub(&r2, &h3, p), &two_u1_h2, p);

        let u1_h2_minus_x3 = mod_sub(&u1_h2, &x3, p);
        let s1_h3 = mod_mul(&s1, &h3, p);
        let y3 = mod_sub(&mod_mul(&r, &u1_h2_minus_x3, p), &s1_h3, p);

        let z3 = mod_mul(&mod_mul(&h, &self.z, p), &other.z, p);

        JacobianPoint { x: x3, y: y3, z: z3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infinity_roundtrips() {
        let p = UBig::from(97u32);
        let inf = JacobianPoint::infinity();
        assert!(inf.is_infinity());
        assert_eq!(inf.to_affine(&p), Point::Infinity);
    }

    #[test]
    fn affine_roundtrip_is_identity() {
        let p = UBig::from(97u32);
        let point = Point::Affine(UBig::from(3u32), UBig::from(6u32));
        let j = JacobianPoint::from_affine(&point);
        assert_eq!(j.to_affine(&p), point);
    }
}
