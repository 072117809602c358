//! Elliptic-Curve Diffie-Hellman key-pair wrapper and shared-secret
//! derivation.

use dashu::integer::UBig;
use once_cell::sync::OnceCell;

use crate::curve::EllipticCurve;
use crate::error::{EccError, Result};
use crate::point::Point;

/// Wraps a private scalar and lazily derives `Q = d*G`.
/// `compute_shared_secret` does not perform key derivation (KDF); callers
/// are expected to hash the resulting point's x-coordinate themselves.
pub struct Ecdh {
    curve: EllipticCurve,
    private_key: UBig,
    public_key: OnceCell<Point>,
}

impl Ecdh {
    pub fn new(curve: EllipticCurve, private_key: UBig) -> Result<Self> {
        if private_key == UBig::from(0u8) || private_key >= curve.n {
            return Err(EccError::RangeError(
                "private key must be in [1, n-1]".to_string(),
            ));
        }
        Ok(Ecdh {
            curve,
            private_key,
            public_key: OnceCell::new(),
        })
    }

    pub fn public_key(&self) -> &Point {
        self.public_key
            .get_or_init(|| self.curve.multiply_point(&self.private_key, &self.curve.g))
    }

    /// `d * Q_other`, the shared secret point.
    pub fn compute_shared_secret(&self, other_public_key: &Point) -> Point {
        self.curve.multiply_point(&self.private_key, other_public_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;

    #[test]
    fn shared_secret_agrees_both_directions() {
        let curve = registry::lookup("secp192k1", true).unwrap();
        let alice = Ecdh::new(curve.clone(), UBig::from(7u32)).unwrap();
        let bob = Ecdh::new(curve.clone(), UBig::from(21u32)).unwrap();

        let from_alice = alice.compute_shared_secret(bob.public_key());
        let from_bob = bob.compute_shared_secret(alice.public_key());

        assert_eq!(from_alice, from_bob);
    }
}
