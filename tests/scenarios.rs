//! End-to-end scenario tests (S1-S6) exercising the library the way a
//! caller would: curve registry lookup, then one of the four high-level
//! constructions.

use dashu::integer::UBig;
use ecc_curves::{registry, Ecdh, Ecdsa, Koblitz, MasseyOmura, Point};

/// S1: on secp192k1, 2G must equal add(G, G), and both must be on-curve.
#[test]
fn s1_secp192k1_doubling_matches_addition() {
    let curve = registry::lookup("secp192k1", true).unwrap();
    let g = curve.g.clone();

    let doubled = curve.double_point(&g);
    let added = curve.add_points(&g, &g);
    assert_eq!(doubled, added);

    assert!(curve.is_point_on_curve(&g));
    assert!(curve.is_point_on_curve(&doubled));
}

/// S2: ECDSA round-trip on secp192k1 with d = 7, h = 123457, plus the
/// tampered-signature rejections.
#[test]
fn s2_ecdsa_roundtrip_and_tamper_rejection() {
    let curve = registry::lookup("secp192k1", true).unwrap();
    let ecdsa = Ecdsa::new(curve.clone(), UBig::from(7u32)).unwrap();
    let h = UBig::from(123457u32);

    let (r, s) = ecdsa.sign(&h);
    assert!(Ecdsa::verify(&curve, ecdsa.public_key(), &h, &r, &s));

    assert!(!Ecdsa::verify(&curve, ecdsa.public_key(), &h, &r, &(&s + UBig::from(1u8))));
    assert!(!Ecdsa::verify(&curve, ecdsa.public_key(), &h, &r, &UBig::from(0u8)));
    assert!(!Ecdsa::verify(&curve, ecdsa.public_key(), &h, &UBig::from(0u8), &s));
}

/// S3: Koblitz on secp521r1 round-trips a 64-byte message whole, and a
/// 32-byte truncation in chunked mode.
#[test]
fn s3_koblitz_secp521r1_roundtrip() {
    let curve = registry::lookup("secp521r1", true).unwrap();
    let koblitz = Koblitz::new(curve).unwrap();

    let message = b"Lorem ipsum dolor sit amet, consectetur adipiscing elit integer.";
    assert_eq!(message.len(), 64);

    let (point, j) = koblitz.encode(message).unwrap();
    let recovered = koblitz.decode(&point, j).unwrap();
    assert_eq!(recovered, message);

    let truncated = &message[..32];
    let chunks = koblitz.encode_chunked(truncated).unwrap();
    let recovered_chunked = koblitz.decode_chunked(&chunks).unwrap();
    assert_eq!(recovered_chunked, truncated);
}

/// S4: ECDH on secp192k1 with dA = 7, dB = 21: dA*(dB*G) == dB*(dA*G).
#[test]
fn s4_ecdh_agreement_both_directions() {
    let curve = registry::lookup("secp192k1", true).unwrap();
    let alice = Ecdh::new(curve.clone(), UBig::from(7u32)).unwrap();
    let bob = Ecdh::new(curve.clone(), UBig::from(21u32)).unwrap();

    let from_alice = alice.compute_shared_secret(bob.public_key());
    let from_bob = bob.compute_shared_secret(alice.public_key());
    assert_eq!(from_alice, from_bob);
}

/// S5: full Massey-Omura handshake on secp192k1 with Koblitz-encoded
/// "Hello, world!"; the recovered point decodes back to the same message.
#[test]
fn s5_massey_omura_full_handshake_with_koblitz() {
    let curve = registry::lookup("secp192k1", true).unwrap();
    let koblitz = Koblitz::new(curve.clone()).unwrap();
    let (message_point, j) = koblitz.encode(b"Hello, world!").unwrap();

    let sender = MasseyOmura::new(curve.clone(), UBig::from(123456789u64)).unwrap();
    let receiver = MasseyOmura::new(curve, UBig::from(987654321u64)).unwrap();

    let c1 = sender.first_encryption_step(&message_point);
    let c2 = receiver.second_encryption_step(&c1);
    let c3 = sender.partial_decryption_step(&c2);
    let recovered_point = receiver.partial_decryption_step(&c3);

    let recovered = koblitz.decode(&recovered_point, j).unwrap();
    assert_eq!(recovered, b"Hello, world!");
}

/// S6: a point with its y bumped by 1 no longer satisfies the curve
/// equation.
#[test]
fn s6_bumped_y_fails_curve_check() {
    let curve = registry::lookup("secp192k1", true).unwrap();
    let g = curve.g.clone();
    assert!(curve.is_point_on_curve(&g));

    let bumped = match g {
        Point::Affine(x, y) => Point::Affine(x, y + UBig::from(1u8)),
        Point::Infinity => unreachable!("generator is never the point at infinity"),
    };
    assert!(!curve.is_point_on_curve(&bumped));
}
