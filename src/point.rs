//! The affine [`Point`] value: either a coordinate pair or the point at
//! infinity (the group identity, 𝒪).

use dashu::integer::UBig;
use std::fmt;

/// A point on an elliptic curve in affine coordinates, or the point at
/// infinity (𝒪).
///
/// Points are immutable values; equality is structural (I1–I5 of the
/// specification rely on this).
#[derive(Clone, PartialEq, Eq, Hash)]
pub enum Point {
    /// The point at infinity — the group identity.
    Infinity,
    /// An affine coordinate pair `(x, y)` with `0 <= x, y < p`.
    Affine(UBig, UBig),
}

impl Point {
    /// Constructs an affine point from optional coordinates. Either
    /// coordinate being absent yields the point at infinity.
    pub fn new(x: Option<UBig>, y: Option<UBig>) -> Self {
        match (x, y) {
            (Some(x), Some(y)) => Point::Affine(x, y),
            _ => Point::Infinity,
        }
    }

    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }

    pub fn x(&self) -> Option<&UBig> {
        match self {
            Point::Affine(x, _) => Some(x),
            Point::Infinity => None,
        }
    }

    pub fn y(&self) -> Option<&UBig> {
        match self {
            Point::Affine(_, y) => Some(y),
            Point::Infinity => None,
        }
    }
}

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Point::Infinity => write!(f, "Point::Infinity"),
            Point::Affine(x, y) => write!(f, "Point({x}, {y})"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_with_missing_coordinate_is_infinity() {
        assert_eq!(Point::new(None, None), Point::Infinity);
        assert_eq!(Point::new(Some(UBig::from(1u8)), None), Point::Infinity);
        assert_eq!(Point::new(None, Some(UBig::from(1u8))), Point::Infinity);
    }

    #[test]
    fn equality_is_structural() {
        let a = Point::Affine(UBig::from(3u8), UBig::from(4u8));
        let b = Point::Affine(UBig::from(3u8), UBig::from(4u8));
        let c = Point::Affine(UBig::from(3u8), UBig::from(5u8));
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(Point::Infinity, Point::Infinity);
    }
}
