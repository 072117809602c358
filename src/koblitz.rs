//! Koblitz encoding: deterministic, reversible mapping of a byte string to
//! a point on the curve (plus a small integer witness `j` needed to invert
//! it), and chunked variants for messages longer than the curve's byte
//! budget.

use dashu::integer::fast_div::ConstDivisor;
use dashu::integer::modular::IntoRing;
use dashu::integer::UBig;

use crate::curve::EllipticCurve;
use crate::error::{EccError, Result};
use crate::field::{mod_mul, mod_sub};
use crate::point::Point;

const DEFAULT_ALPHABET_SIZE: u32 = 256;

/// Deterministic encode/decode of byte strings to/from points on a curve
/// with cofactor 1.
pub struct Koblitz {
    curve: EllipticCurve,
}

impl Koblitz {
    /// Wraps a curve for Koblitz encoding. Fails with
    /// [`EccError::EncodingError`] if the curve's cofactor is not 1 (§4.4,
    /// B5), or if the field prime is not `3 mod 4` — the fast square-root
    /// exponentiation this module relies on only holds for those primes.
    /// Among the named curves this excludes `secp224k1` and `secp224r1`,
    /// both `1 mod 4`.
    pub fn new(curve: EllipticCurve) -> Result<Self> {
        if curve.h != UBig::from(1u8) {
            return Err(EccError::EncodingError(
                "koblitz encoding requires cofactor h = 1".to_string(),
            ));
        }
        if &curve.p % UBig::from(4u8) != UBig::from(3u8) {
            return Err(EccError::EncodingError(
                "koblitz encoding requires a field prime congruent to 3 mod 4".to_string(),
            ));
        }
        Ok(Koblitz { curve })
    }

    /// Encodes `message` with the default alphabet size (256), in
    /// unchunked mode.
    pub fn encode(&self, message: &[u8]) -> Result<(Point, u32)> {
        self.encode_with_alphabet(message, DEFAULT_ALPHABET_SIZE)
    }

    pub fn encode_with_alphabet(&self, message: &[u8], alphabet_size: u32) -> Result<(Point, u32)> {
        let m = UBig::from_be_bytes(message);
        let a = UBig::from(alphabet_size);

        for j in 0..=alphabet_size {
            let x = &m * &a + UBig::from(j);
            if x >= self.curve.p {
                log::warn!("koblitz encoding overran the field prime at j = {j}");
                return Err(EccError::EncodingError(
                    "message too large to embed: M*A + j would overrun the field prime".to_string(),
                ));
            }
            let rhs = {
                let x2 = mod_mul(&x, &x, &self.curve.p);
                let x3 = mod_mul(&x2, &x, &self.curve.p);
                (x3 + mod_mul(&self.curve.a, &x, &self.curve.p) + &self.curve.b) % &self.curve.p
            };

            if let Some(y) = mod_sqrt(&rhs, &self.curve.p) {
                return Ok((Point::Affine(x, y), j));
            }
        }

        log::warn!("koblitz encoding exhausted witness search (alphabet size = {alphabet_size})");
        Err(EccError::EncodingError(format!(
            "could not embed message in fewer than {alphabet_size} attempts"
        )))
    }

    /// Decodes a single `(point, j)` pair produced by [`Self::encode`].
    pub fn decode(&self, point: &Point, j: u32) -> Result<Vec<u8>> {
        self.decode_with_alphabet(point, j, DEFAULT_ALPHABET_SIZE)
    }

    pub fn decode_with_alphabet(&self, point: &Point, j: u32, alphabet_size: u32) -> Result<Vec<u8>> {
        let x = point
            .x()
            .ok_or_else(|| EccError::DecodingError("point at infinity has no x-coordinate".to_string()))?;
        let j_big = UBig::from(j);

        if x < &j_big {
            return Err(EccError::DecodingError(
                "x-coordinate is smaller than the witness j".to_string(),
            ));
        }

        let numerator = x - &j_big;
        let a = UBig::from(alphabet_size);
        if &numerator % &a != UBig::from(0u8) {
            return Err(EccError::DecodingError(
                "(x - j) does not divide the alphabet size exactly".to_string(),
            ));
        }

        let mut m = numerator / &a;
        let mut digits = Vec::new();
        if m == UBig::from(0u8) {
            digits.push(0u8);
        }
        while m > UBig::from(0u8) {
            let digit = &m % &a;
            digits.push(u8::try_from(digit).expect("alphabet size fits a byte"));
            m /= &a;
        }
        digits.reverse();
        Ok(digits)
    }

    /// Splits `message` into fixed-size chunks that each fit under the
    /// curve's byte budget and encodes each independently, returning the
    /// sequence of `(point, j)` pairs in order (R2).
    pub fn encode_chunked(&self, message: &[u8]) -> Result<Vec<(Point, u32)>> {
        self.encode_chunked_with_alphabet(message, DEFAULT_ALPHABET_SIZE)
    }

    pub fn encode_chunked_with_alphabet(&self, message: &[u8], alphabet_size: u32) -> Result<Vec<(Point, u32)>> {
        if message.is_empty() {
            // An empty chunk and a single 0x00 byte both encode to M = 0;
            // without a length prefix the decoder cannot tell them apart
            // (decode_with_alphabet's M == 0 case always yields one byte).
            // Reject rather than silently round-tripping to the wrong value.
            return Err(EccError::EncodingError(
                "cannot encode an empty message in chunked mode".to_string(),
            ));
        }
        let chunk_size = self.chunk_size(alphabet_size);
        message
            .chunks(chunk_size)
            .map(|chunk| self.encode_with_alphabet(chunk, alphabet_size))
            .collect()
    }

    /// Decodes a chunked sequence and concatenates the recovered bytes.
    pub fn decode_chunked(&self, pairs: &[(Point, u32)]) -> Result<Vec<u8>> {
        self.decode_chunked_with_alphabet(pairs, DEFAULT_ALPHABET_SIZE)
    }

    pub fn decode_chunked_with_alphabet(&self, pairs: &[(Point, u32)], alphabet_size: u32) -> Result<Vec<u8>> {
        let mut out = Vec::new();
        for (point, j) in pairs {
            out.extend(self.decode_with_alphabet(point, *j, alphabet_size)?);
        }
        Ok(out)
    }

    /// `floor(log_A(p))`, the number of base-`A` digits of the field prime
    /// minus one.
    fn byte_budget(&self, alphabet_size: u32) -> usize {
        let a = UBig::from(alphabet_size);
        let mut value = self.curve.p.clone();
        let mut digits = 0usize;
        while value > UBig::from(0u8) {
            value /= &a;
            digits += 1;
        }
        digits.saturating_sub(1)
    }

    fn chunk_size(&self, alphabet_size: u32) -> usize {
        self.byte_budget(alphabet_size).saturating_sub(1).max(1)
    }
}

/// Square root of `r` modulo `p` for primes with `p ≡ 3 (mod 4)` (true of
/// every SEC curve this crate supports): `y = r^((p+1)/4) mod p`. Returns
/// `None` when `r` is not a quadratic residue. Between `y` and `p - y`, the
/// smaller is returned, fixing encode/decode as a bijection on its domain.
fn mod_sqrt(r: &UBig, p: &UBig) -> Option<UBig> {
    let exponent = (p + UBig::from(1u8)) / UBig::from(4u8);
    let divisor = ConstDivisor::new(p.clone());
    let y = r.clone().into_ring(&divisor).pow(&exponent).residue();

    if mod_mul(&y, &y, p) != r % p {
        return None;
    }

    let y_neg = mod_sub(p, &y, p);
    Some(if y <= y_neg { y } else { y_neg })
}
