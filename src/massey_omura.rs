//! Massey-Omura three-pass commutative-encryption wrapper.
//!
//! Each party holds a private key `e` in `[1, n-1]` and derives
//! `d = e^-1 mod n`. For a message point `M`, the four-step protocol
//! (`first_encryption_step` by the sender, `second_encryption_step` by the
//! receiver, `partial_decryption_step` by each in turn) recovers `M`
//! without either party ever learning the other's key. Step ordering is not
//! enforced by this type; misuse by the caller produces wrong output, never
//! a panic.

use dashu::integer::UBig;
use once_cell::sync::OnceCell;

use crate::curve::EllipticCurve;
use crate::error::{EccError, Result};
use crate::modular::mmi;
use crate::point::Point;

pub struct MasseyOmura {
    curve: EllipticCurve,
    e: UBig,
    d: OnceCell<UBig>,
}

impl MasseyOmura {
    pub fn new(curve: EllipticCurve, private_key: UBig) -> Result<Self> {
        if private_key == UBig::from(0u8) || private_key >= curve.n {
            return Err(EccError::RangeError(
                "private key must be in [1, n-1]".to_string(),
            ));
        }
        Ok(MasseyOmura {
            curve,
            e: private_key,
            d: OnceCell::new(),
        })
    }

    /// `d = e^-1 mod n`, derived once and cached.
    fn d(&self) -> &UBig {
        self.d.get_or_init(|| {
            mmi(&self.e, &self.curve.n).expect("private key is coprime to n for a prime n")
        })
    }

    /// Step 1 (sender): `C1 = e_A * M`.
    pub fn first_encryption_step(&self, message: &Point) -> Point {
        self.curve.multiply_point(&self.e, message)
    }

    /// Step 2 (receiver): `C2 = e_B * C1`.
    pub fn second_encryption_step(&self, ciphertext: &Point) -> Point {
        self.curve.multiply_point(&self.e, ciphertext)
    }

    /// Steps 3 and 4: each party calls this with their own instance to
    /// remove their own encryption layer (`d_X * C = e_Y * M` for the
    /// other party's key, or `M` itself on the final call).
    pub fn partial_decryption_step(&self, ciphertext: &Point) -> Point {
        self.curve.multiply_point(self.d(), ciphertext)
    }
}
