//! Core type definitions for the Shutter threshold-encryption codec.
//!
//! This crate provides the shared wire types used across the codec:
//! compressed BLS12-381 point encodings, the identity-preimage helper,
//! and the `0x`-prefixed lowercase hex form used at the system boundary
//! (ciphertexts are stored on-chain as byte arrays and displayed to
//! users as hex strings).

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use thiserror::Error;

/// Errors that can occur when parsing a wire encoding.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid hex encoding")]
    InvalidHex,

    #[error("Invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// Decode a `0x`-prefixed (or bare) hex string into bytes.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, ParseError> {
    let stripped = s.strip_prefix("0x").unwrap_or(s);
    hex::decode(stripped).map_err(|_| ParseError::InvalidHex)
}

/// Encode bytes as a `0x`-prefixed lowercase hex string.
pub fn encode_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

// =========================
// CRYPTOGRAPHIC PRIMITIVES
// =========================

/// Compressed G1 point on BLS12-381 (48 bytes).
///
/// Epoch secret keys released by the threshold system travel in this form.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct G1Point(#[serde_as(as = "[_; 48]")] pub [u8; 48]);

impl G1Point {
    /// The length of the compressed encoding.
    pub const BYTES: usize = 48;

    /// Parse from a `0x`-prefixed hex string.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let bytes = decode_hex(s)?;
        let raw: [u8; Self::BYTES] =
            bytes
                .try_into()
                .map_err(|b: Vec<u8>| ParseError::InvalidLength {
                    expected: Self::BYTES,
                    got: b.len(),
                })?;
        Ok(Self(raw))
    }

    /// Encode as a `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }
}

impl Default for G1Point {
    fn default() -> Self {
        Self([0u8; 48])
    }
}

/// Compressed G2 point on BLS12-381 (96 bytes).
///
/// Eon public keys and the envelope's C1 component travel in this form.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2Point(#[serde_as(as = "[_; 96]")] pub [u8; 96]);

impl G2Point {
    /// The length of the compressed encoding.
    pub const BYTES: usize = 96;

    /// Parse from a `0x`-prefixed hex string.
    pub fn from_hex(s: &str) -> Result<Self, ParseError> {
        let bytes = decode_hex(s)?;
        let raw: [u8; Self::BYTES] =
            bytes
                .try_into()
                .map_err(|b: Vec<u8>| ParseError::InvalidLength {
                    expected: Self::BYTES,
                    got: b.len(),
                })?;
        Ok(Self(raw))
    }

    /// Encode as a `0x`-prefixed hex string.
    pub fn to_hex(&self) -> String {
        encode_hex(&self.0)
    }
}

impl Default for G2Point {
    fn default() -> Self {
        Self([0u8; 96])
    }
}

// =========================
// HELPER FUNCTIONS
// =========================

/// Compute the identity preimage for a registered identity.
///
/// The key-release registry derives identities from a caller-chosen
/// random 32-byte prefix and the 20-byte address of the registrant, so
/// the preimage is simply their concatenation. The codec never
/// interprets these bytes; they are hashed to a curve point as-is.
pub fn identity_preimage(prefix: &[u8; 32], registrant: &[u8; 20]) -> Vec<u8> {
    let mut preimage = Vec::with_capacity(prefix.len() + registrant.len());
    preimage.extend_from_slice(prefix);
    preimage.extend_from_slice(registrant);
    preimage
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let bytes = vec![0x00, 0x01, 0xab, 0xff];
        let encoded = encode_hex(&bytes);
        assert_eq!(encoded, "0x0001abff");
        assert_eq!(decode_hex(&encoded).unwrap(), bytes);
    }

    #[test]
    fn test_decode_hex_accepts_bare_strings() {
        assert_eq!(decode_hex("0001abff").unwrap(), vec![0x00, 0x01, 0xab, 0xff]);
    }

    #[test]
    fn test_decode_hex_rejects_invalid() {
        assert!(matches!(decode_hex("0xzz"), Err(ParseError::InvalidHex)));
    }

    #[test]
    fn test_g1_point_hex_round_trip() {
        let point = G1Point([42u8; 48]);
        let parsed = G1Point::from_hex(&point.to_hex()).unwrap();
        assert_eq!(point, parsed);
    }

    #[test]
    fn test_g2_point_rejects_wrong_length() {
        let result = G2Point::from_hex("0x0102");
        assert!(matches!(
            result,
            Err(ParseError::InvalidLength {
                expected: 96,
                got: 2
            })
        ));
    }

    #[test]
    fn test_identity_preimage_layout() {
        let prefix = [7u8; 32];
        let registrant = [9u8; 20];
        let preimage = identity_preimage(&prefix, &registrant);
        assert_eq!(preimage.len(), 52);
        assert_eq!(&preimage[..32], &prefix);
        assert_eq!(&preimage[32..], &registrant);
    }

    #[test]
    fn test_point_serde_round_trip() {
        let point = G2Point([3u8; 96]);
        let encoded = serde_json::to_string(&point).unwrap();
        let decoded: G2Point = serde_json::from_str(&encoded).unwrap();
        assert_eq!(point, decoded);
    }
}
