//! BLS12-381 pairing-group operations (blstrs): hash-to-curve, pairing,
//! compressed point encodings, target-group arithmetic.
//!
//! This module is the codec's only view of the pairing library. It
//! exposes a small closed set of operations over `G1Affine`, `G2Affine`
//! and `Gt`; the pipelines never touch `blstrs` directly, so binding to
//! a different backend only means reimplementing these functions. Every
//! call constructs its own group elements, so concurrent encrypt and
//! decrypt calls never share mutable state.

use blstrs::{Compress, G1Affine, G1Projective, G2Affine, G2Projective, Gt, Scalar};
use group::{Curve, Group};

use shutter_types::{G1Point, G2Point};

use crate::error::CryptoError;

/// Domain separation tag for hashing identity preimages to G1.
///
/// Fixed by the protocol; changing it changes every derived identity.
pub const HASH_TO_CURVE_DST: &[u8] = b"SHUTTER_V01_BLS12381G1_XMD:SHA-256_SSWU_RO_";

/// Hash arbitrary bytes to a G1 point (RFC 9380 hash-to-curve, SSWU
/// random-oracle variant with SHA-256 expansion).
pub fn hash_to_g1(msg: &[u8]) -> G1Affine {
    G1Projective::hash_to_curve(msg, HASH_TO_CURVE_DST, &[]).to_affine()
}

/// Multiply the G2 generator by a scalar.
pub fn g2_generator_mul(scalar: &Scalar) -> G2Affine {
    (G2Projective::generator() * scalar).to_affine()
}

/// Compute the pairing `e(p, q)`, final-exponentiated.
pub fn compute_pairing(p: &G1Affine, q: &G2Affine) -> Gt {
    blstrs::pairing(p, q)
}

/// Raise a target-group element to a scalar power.
///
/// Double-and-square over the bits of the exponent: the accumulator
/// starts at the identity element and picks up the running square on
/// every set bit.
pub fn gt_exp(base: &Gt, exponent: &Scalar) -> Gt {
    let mut acc = Gt::identity();
    let mut sq = *base;
    for byte in exponent.to_bytes_le() {
        for bit in 0..8 {
            if (byte >> bit) & 1 == 1 {
                acc += sq;
            }
            sq = sq.double();
        }
    }
    acc
}

/// Serialize a target-group element (compressed encoding, 288 bytes).
pub fn gt_to_bytes(gt: &Gt) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(288);
    gt.write_compressed(&mut bytes)
        .expect("in-memory serialization should not fail");
    bytes
}

/// Compress a G1 point to its 48-byte wire encoding.
pub fn compress_g1(point: &G1Affine) -> G1Point {
    G1Point(point.to_compressed())
}

/// Decompress a G1 point from bytes, rejecting invalid encodings.
pub fn decompress_g1(bytes: &[u8; 48]) -> Result<G1Affine, CryptoError> {
    Option::from(G1Affine::from_compressed(bytes)).ok_or(CryptoError::InvalidG1Point)
}

/// Compress a G2 point to its 96-byte wire encoding.
pub fn compress_g2(point: &G2Affine) -> G2Point {
    G2Point(point.to_compressed())
}

/// Decompress a G2 point from bytes, rejecting invalid encodings.
pub fn decompress_g2(bytes: &[u8; 96]) -> Result<G2Affine, CryptoError> {
    Option::from(G2Affine::from_compressed(bytes)).ok_or(CryptoError::InvalidG2Point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ff::Field;
    use rand::rngs::OsRng;

    #[test]
    fn test_hash_to_g1_deterministic_and_injective_looking() {
        let p1 = hash_to_g1(b"identity one");
        let p2 = hash_to_g1(b"identity two");
        let p3 = hash_to_g1(b"identity one");

        assert_ne!(p1, p2);
        assert_eq!(p1, p3);
    }

    #[test]
    fn test_g1_compression_round_trip() {
        let point = hash_to_g1(b"round trip");
        let compressed = compress_g1(&point);
        let restored = decompress_g1(&compressed.0).unwrap();
        assert_eq!(point, restored);
    }

    #[test]
    fn test_g2_compression_round_trip() {
        let scalar = Scalar::random(&mut OsRng);
        let point = g2_generator_mul(&scalar);
        let compressed = compress_g2(&point);
        let restored = decompress_g2(&compressed.0).unwrap();
        assert_eq!(point, restored);
    }

    #[test]
    fn test_decompress_rejects_garbage() {
        assert!(decompress_g1(&[0xaa; 48]).is_err());
        assert!(decompress_g2(&[0xaa; 96]).is_err());
    }

    #[test]
    fn test_gt_exp_matches_pairing_bilinearity() {
        // e(P, Q)^r == e(r*P, Q)
        let r = Scalar::random(&mut OsRng);
        let p = hash_to_g1(b"bilinearity");
        let q = g2_generator_mul(&Scalar::random(&mut OsRng));

        let lhs = gt_exp(&compute_pairing(&p, &q), &r);
        let rp = (blstrs::G1Projective::from(p) * r).to_affine();
        let rhs = compute_pairing(&rp, &q);

        assert_eq!(lhs, rhs);
    }

    #[test]
    fn test_gt_exp_zero_is_identity() {
        let p = hash_to_g1(b"zero exponent");
        let q = g2_generator_mul(&Scalar::ONE);
        let gt = compute_pairing(&p, &q);
        assert_eq!(gt_exp(&gt, &Scalar::ZERO), Gt::identity());
    }

    #[test]
    fn test_gt_serialization_is_stable() {
        let p = hash_to_g1(b"stable bytes");
        let q = g2_generator_mul(&Scalar::ONE);
        let gt = compute_pairing(&p, &q);

        let b1 = gt_to_bytes(&gt);
        let b2 = gt_to_bytes(&gt);
        assert_eq!(b1, b2);
        assert_eq!(b1.len(), 288);
    }
}
