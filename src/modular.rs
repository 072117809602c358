//! Modular arithmetic over arbitrary-precision integers: gcd, the extended
//! Euclidean algorithm, and the modular multiplicative inverse.

use dashu::base::Sign;
use dashu::integer::{IBig, UBig};

use crate::cache::{self, CacheKey, CacheValue, Op};
use crate::error::{EccError, Result};

/// Euclidean gcd of two integers. Always non-negative; `gcd(0, 0) == 0`.
pub fn gcd(m: &IBig, n: &IBig) -> UBig {
    let (g, _, _) = egcd(m, n);
    g
}

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` such that `g = gcd(|m|, |n|)` and `m*x + n*y = g`.
/// Handles zero inputs without dividing by zero: if both are zero the loop
/// never executes and `g` is zero.
pub fn egcd(m: &IBig, n: &IBig) -> (UBig, IBig, IBig) {
    let (mut old_r, mut r) = (m.clone(), n.clone());
    let (mut old_s, mut s) = (IBig::from(1), IBig::from(0));
    let (mut old_t, mut t) = (IBig::from(0), IBig::from(1));

    while r != IBig::from(0) {
        let q = &old_r / &r;
        let new_r = &old_r - &q * &r;
        old_r = r;
        r = new_r;

        let new_s = &old_s - &q * &s;
        old_s = s;
        s = new_s;

        let new_t = &old_t - &q * &t;
        old_t = t;
        t = new_t;
    }

    // old_r is gcd(m, n) up to sign; normalize to non-negative and flip the
    // Bezout coefficients to match.
    let (g, x, y) = if old_r.sign() == Sign::Negative {
        (-old_r, -old_s, -old_t)
    } else {
        (old_r, old_s, old_t)
    };

    (UBig::try_from(g).expect("gcd is non-negative by construction"), x, y)
}

/// Modular multiplicative inverse of `a` modulo `m`, in `[0, m)`.
///
/// Fails with [`EccError::NoModularInverse`] when `gcd(a, m) != 1`.
pub fn mmi(a: &UBig, m: &UBig) -> Result<UBig> {
    let a_i = IBig::from(a.clone());
    let m_i = IBig::from(m.clone());
    let (g, x, _) = egcd(&a_i, &m_i);

    if g != UBig::from(1u8) {
        return Err(EccError::NoModularInverse);
    }

    let reduced = ((x % &m_i) + &m_i) % &m_i;
    Ok(UBig::try_from(reduced).expect("reduced into [0, m)"))
}

/// Memoized `mmi`, keyed by the modulus itself rather than a specific
/// curve — the inverse of `a` mod `m` is the same value no matter which
/// curve's arithmetic needed it. Failures (non-coprime inputs) are never
/// cached.
pub(crate) fn mmi_cached(a: &UBig, m: &UBig) -> Result<UBig> {
    let key = CacheKey::new(&format!("mmi:{:x}", m), Op::Mmi(a.clone(), m.clone()));
    let value = cache::global_cache()
        .get_or_try_insert_with(key, || mmi(a, m).map(CacheValue::Scalar))?;
    Ok(value.into_scalar())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ubig(n: u64) -> UBig {
        UBig::from(n)
    }
    fn ibig(n: i64) -> IBig {
        IBig::from(n)
    }

    #[test]
    fn gcd_basic() {
        assert_eq!(gcd(&ibig(48), &ibig(18)), ubig(6));
        assert_eq!(gcd(&ibig(0), &ibig(0)), ubig(0));
        assert_eq!(gcd(&ibig(0), &ibig(5)), ubig(5));
        assert_eq!(gcd(&ibig(17), &ibig(0)), ubig(17));
    }

    #[test]
    fn egcd_bezout_identity_holds() {
        let m = ibig(240);
        let n = ibig(46);
        let (g, x, y) = egcd(&m, &n);
        assert_eq!(g, ubig(2));
        assert_eq!(&m * &x + &n * &y, IBig::from(g));
    }

    #[test]
    fn mmi_known_value() {
        // 3 * 4 = 12 = 1 mod 11
        assert_eq!(mmi(&ubig(3), &ubig(11)).unwrap(), ubig(4));
    }

    #[test]
    fn mmi_no_inverse_when_not_coprime() {
        assert_eq!(mmi(&ubig(4), &ubig(8)), Err(EccError::NoModularInverse));
    }

    #[test]
    fn mmi_cached_matches_uncached() {
        assert_eq!(
            mmi_cached(&ubig(3), &ubig(11)).unwrap(),
            mmi(&ubig(3), &ubig(11)).unwrap()
        );
        assert_eq!(
            mmi_cached(&ubig(4), &ubig(8)),
            Err(EccError::NoModularInverse)
        );
    }

    #[test]
    fn mmi_large_prime_field() {
        // secp256k1 field prime
        let p = UBig::from_str_radix(
            "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
            16,
        )
        .unwrap();
        let a = ubig(7);
        let inv = mmi(&a, &p).unwrap();
        assert_eq!((&a * &inv) % &p, ubig(1));
    }
}
