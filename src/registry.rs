//! Named curve parameter table: lookup by name returns a fully parameterized
//! [`EllipticCurve`] (SEC2 prime-field curves `secp192k1` … `secp521r1`).

use dashu::integer::UBig;

use crate::curve::{Backend, EllipticCurve};
use crate::error::{EccError, Result};
use crate::point::Point;

fn hex(s: &str) -> UBig {
    UBig::from_str_radix(s, 16).expect("hardcoded curve constant is valid hex")
}

fn curve(
    p: &str,
    a: &str,
    b: &str,
    gx: &str,
    gy: &str,
    n: &str,
    h: u32,
    backend: Backend,
) -> EllipticCurve {
    EllipticCurve::new(
        hex(p),
        hex(a),
        hex(b),
        Point::Affine(hex(gx), hex(gy)),
        hex(n),
        UBig::from(h),
        backend,
    )
}

fn secp192k1(backend: Backend) -> EllipticCurve {
    curve(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFEE37",
        "0",
        "3",
        "DB4FF10EC057E9AE26B07D0280B7F4341DA5D1B1EAE06C7D",
        "9B2F2F6D9C5628A7844163D015BE86344082AA88D95E2F9D",
        "FFFFFFFFFFFFFFFFFFFFFFFE26F2FC170F69466A74DEFD8D",
        1,
        backend,
    )
}

fn secp192r1(backend: Backend) -> EllipticCurve {
    curve(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFFFFFFFFFF",
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFFFFFFFFFC",
        "64210519E59C80E70FA7E9AB72243049FEB8DEECC146B9B1",
        "188DA80EB03090F67CBF20EB43A18800F4FF0AFD82FF1012",
        "07192B95FFC8DA78631011ED6B24CDD573F977A11E794811",
        "FFFFFFFFFFFFFFFFFFFFFFFF99DEF836146BC9B1B4D22831",
        1,
        backend,
    )
}

fn secp224k1(backend: Backend) -> EllipticCurve {
    curve(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFE56D",
        "0",
        "5",
        "A1455B334DF099DF30FC28A169A467E9E47075A90F7E650EB6B7A45C",
        "7E089FED7FBA344282CAFBD6F7E319F7C0B0BD59E2CA4BDB556D61A5",
        "010000000000000000000000000001DCE8D2EC6184CAF0A971769FB1F7",
        1,
        backend,
    )
}

fn secp224r1(backend: Backend) -> EllipticCurve {
    curve(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF000000000000000000000001",
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFFFFFFFFFFFFFFFFFE",
        "B4050A850C04B3ABF54132565044B0B7D7BFD8BA270B39432355FFB4",
        "B70E0CBD6BB4BF7F321390B94A03C1D356C21122343280D6115C1D21",
        "BD376388B5F723FB4C22DFE6CD4375A05A07476444D5819985007E34",
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFF16A2E0B8F03E13DD29455C5C2A3D",
        1,
        backend,
    )
}

fn secp256k1(backend: Backend) -> EllipticCurve {
    curve(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFC2F",
        "0",
        "7",
        "79BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798",
        "483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8",
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141",
        1,
        backend,
    )
}

fn secp256r1(backend: Backend) -> EllipticCurve {
    curve(
        "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFF",
        "FFFFFFFF00000001000000000000000000000000FFFFFFFFFFFFFFFFFFFFFFFC",
        "5AC635D8AA3A93E7B3EBBD55769886BC651D06B0CC53B0F63BCE3C3E27D2604B",
        "6B17D1F2E12C4247F8BCE6E563A440F277037D812DEB33A0F4A13945D898C296",
        "4FE342E2FE1A7F9B8EE7EB4A7C0F9E162BCE33576B315ECECBB6406837BF51F5",
        "FFFFFFFF00000000FFFFFFFFFFFFFFFFBCE6FAADA7179E84F3B9CAC2FC632551",
        1,
        backend,
    )
}

fn secp384r1(backend: Backend) -> EllipticCurve {
    curve(
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFF0000000000000000FFFFFFFF",
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEFFFFFFFF0000000000000000FFFFFFFC",
        "B3312FA7E23EE7E4988E056BE3F82D19181D9C6EFE8141120314088F5013875AC656398D8A2ED19D2A85C8EDD3EC2AEF",
        "AA87CA22BE8B05378EB1C71EF320AD746E1D3B628BA79B9859F741E082542A385502F25DBF55296C3A545E3872760AB7",
        "3617DE4A96262C6F5D9E98BF9292DC29F8F41DBD289A147CE9DA3113B5F0B8C00A60B1CE1D7E819D7A431D7C90EA0E5F",
        "FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFC7634D81F4372DDF581A0DB248B0A77AECEC196ACCC52973",
        1,
        backend,
    )
}

fn secp521r1(backend: Backend) -> EllipticCurve {
    curve(
        "01FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFF",
        "01FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFC",
        "0051953EB9618E1C9A1F929A21A0B68540EEA2DA725B99B315F3B8B489918EF109E156193951EC7E937B1652C0BD3BB1BF073573DF883D2C34F1EF451FD46B503F00",
        "00C6858E06B70404E9CD9E3ECB662395B4429C648139053FB521F828AF606B4D3DBAA14B5E77EFE75928FE1DC127A2FFA8DE3348B3C1856A429BF97E7E31C2E5BD66",
        "011839296A789A3BC0045C8A5FB42C7D1BD998F54449579B446817AFBD17273E662C97EE72995EF42640C550B9013FAD0761353C7086A272C24088BE94769FD16650",
        "01FFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFA51868783BF2F966B7FCC0148F709A5D03BB5C9B8899C47AEBB6FB71E91386409",
        1,
        backend,
    )
}

/// Looks up a named SEC curve. `use_projective_coordinates` selects the
/// Jacobian backend when `true` (the default), affine otherwise. Unknown
/// names fail with [`EccError::UnknownCurve`].
pub fn lookup(name: &str, use_projective_coordinates: bool) -> Result<EllipticCurve> {
    let backend = if use_projective_coordinates {
        Backend::Jacobian
    } else {
        Backend::Affine
    };

    let curve = match name {
        "secp192k1" => secp192k1(backend),
        "secp192r1" => secp192r1(backend),
        "secp224k1" => secp224k1(backend),
        "secp224r1" => secp224r1(backend),
        "secp256k1" => secp256k1(backend),
        "secp256r1" => secp256r1(backend),
        "secp384r1" => secp384r1(backend),
        "secp521r1" => secp521r1(backend),
        other => {
            log::warn!("unknown curve name requested: {other}");
            return Err(EccError::UnknownCurve {
                name: other.to_string(),
            });
        }
    };

    log::debug!("resolved curve {name} (backend = {backend:?})");
    Ok(curve)
}
