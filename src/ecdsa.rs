//! ECDSA signature generation and verification.

use dashu::integer::UBig;
use once_cell::sync::OnceCell;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::curve::EllipticCurve;
use crate::error::{EccError, Result};
use crate::modular::mmi;
use crate::point::Point;

/// An ECDSA keypair over a given curve. The public key is derived lazily
/// from the private key on first read and cached thereafter (§9: "lazy
/// derived attributes → explicit caches").
pub struct Ecdsa {
    curve: EllipticCurve,
    private_key: UBig,
    public_key: OnceCell<Point>,
}

impl Ecdsa {
    /// `private_key` must be in `[1, n-1]`.
    pub fn new(curve: EllipticCurve, private_key: UBig) -> Result<Self> {
        if private_key == UBig::from(0u8) || private_key >= curve.n {
            return Err(EccError::RangeError(
                "private key must be in [1, n-1]".to_string(),
            ));
        }
        Ok(Ecdsa {
            curve,
            private_key,
            public_key: OnceCell::new(),
        })
    }

    /// `Q = d*G`, computed once and cached.
    pub fn public_key(&self) -> &Point {
        self.public_key
            .get_or_init(|| self.curve.multiply_point(&self.private_key, &self.curve.g))
    }

    /// Signs integer message hash `h`, resampling the nonce until both `r`
    /// and `s` are nonzero.
    pub fn sign(&self, h: &UBig) -> (UBig, UBig) {
        loop {
            let k = sample_nonce(&self.curve.n);

            let r_point = self.curve.multiply_point(&k, &self.curve.g);
            let r = match r_point.x() {
                Some(x) => x % &self.curve.n,
                None => continue,
            };
            if r == UBig::from(0u8) {
                log::debug!("ecdsa nonce produced r = 0; resampling");
                continue;
            }

            let k_inv = match mmi(&k, &self.curve.n) {
                Ok(inv) => inv,
                Err(_) => continue,
            };
            let s = (&k_inv * (h + &r * &self.private_key)) % &self.curve.n;
            if s == UBig::from(0u8) {
                log::debug!("ecdsa nonce produced s = 0; resampling");
                continue;
            }

            return (r, s);
        }
    }

    /// Verifies `(r, s)` against message hash `h` for public key `q`.
    /// Out-of-range `r`/`s` and invalid signatures both return `false`
    /// rather than erroring (§7 policy).
    pub fn verify(curve: &EllipticCurve, q: &Point, h: &UBig, r: &UBig, s: &UBig) -> bool {
        if *r == UBig::from(0u8) || r >= &curve.n || *s == UBig::from(0u8) || s >= &curve.n {
            return false;
        }

        let w = match mmi(s, &curve.n) {
            Ok(w) => w,
            Err(_) => return false,
        };

        let u1 = (h * &w) % &curve.n;
        let u2 = (r * &w) % &curve.n;

        let p1 = curve.multiply_point(&u1, &curve.g);
        let p2 = curve.multiply_point(&u2, q);
        let x = curve.add_points(&p1, &p2);

        match x.x() {
            None => false,
            Some(x) => &(x % &curve.n) == r,
        }
    }
}

/// Samples a nonce uniformly from `[1, n-1]` using the host CSPRNG,
/// rejecting out-of-range draws (rejection sampling keeps the
/// distribution uniform without introducing modulo bias).
fn sample_nonce(n: &UBig) -> UBig {
    let byte_len = (n.bit_len() + 7) / 8;
    let mut rng = OsRng;

    loop {
        let mut bytes = vec![0u8; byte_len];
        rng.fill_bytes(&mut bytes);
        let candidate = UBig::from_be_bytes(&bytes);
        if candidate > UBig::from(0u8) && &candidate < n {
            return candidate;
        }
    }
}
