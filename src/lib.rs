//! Elliptic-curve arithmetic over prime-field short-Weierstrass curves
//! (`y^2 = x^3 + ax + b mod p`), plus four constructions layered on top:
//! ECDSA, Koblitz message-to-point encoding, ECDH, and the Massey-Omura
//! three-pass commutative-encryption protocol.
//!
//! This is an educational/prototype-grade library: no constant-time
//! arithmetic, no point compression, no key serialization formats.
//!
//! # Example
//!
//! ```rust
//! use dashu::integer::UBig;
//! use ecc_curves::{registry, Ecdsa};
//!
//! let curve = registry::lookup("secp192k1", true).unwrap();
//! let ecdsa = Ecdsa::new(curve.clone(), UBig::from(7u32)).unwrap();
//!
//! let h = UBig::from(123457u32);
//! let (r, s) = ecdsa.sign(&h);
//! assert!(Ecdsa::verify(&curve, ecdsa.public_key(), &h, &r, &s));
//! ```

mod cache;
mod curve;
mod ecdh;
mod ecdsa;
mod error;
mod field;
mod jacobian;
mod koblitz;
mod massey_omura;
mod modular;
mod point;
pub mod registry;

pub use curve::{Backend, EllipticCurve};
pub use ecdh::Ecdh;
pub use ecdsa::Ecdsa;
pub use error::{EccError, Result};
pub use koblitz::Koblitz;
pub use massey_omura::MasseyOmura;
pub use modular::{egcd, gcd, mmi};
pub use point::Point;
