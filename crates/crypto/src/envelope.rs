//! The ciphertext envelope: `version(1) ‖ C1(96) ‖ C2(32) ‖ C3(32·n)`.
//!
//! The envelope is the only persisted artifact of the codec. There is
//! no length prefix for C3; its block count is implied by the total
//! length, so any length other than `129 + 32*n` is rejected outright.

use shutter_types::G2Point;

use crate::error::CryptoError;
use crate::pad::BLOCK_SIZE;

/// The only supported envelope version.
pub const VERSION_ID: u8 = 0x3;

const C1_BYTES: usize = G2Point::BYTES;
const C2_START: usize = 1 + C1_BYTES;
const C3_START: usize = C2_START + BLOCK_SIZE;

/// A decoded ciphertext envelope.
///
/// Immutable and self-describing: the version tag is pinned and the
/// block count is carried by `c3.len()`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncryptedMessage {
    /// Ephemeral value `r · G2`, compressed.
    pub c1: G2Point,
    /// `sigma XOR H2(pairing value)`.
    pub c2: [u8; BLOCK_SIZE],
    /// Keystream-masked plaintext blocks.
    pub c3: Vec<[u8; BLOCK_SIZE]>,
}

impl EncryptedMessage {
    /// Serialize into the fixed binary layout.
    pub fn encode(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(C3_START + self.c3.len() * BLOCK_SIZE);
        bytes.push(VERSION_ID);
        bytes.extend_from_slice(&self.c1.0);
        bytes.extend_from_slice(&self.c2);
        for block in &self.c3 {
            bytes.extend_from_slice(block);
        }
        bytes
    }

    /// Deserialize from the fixed binary layout.
    ///
    /// The version byte is checked before anything else, so a foreign
    /// version always surfaces as `InvalidVersion` regardless of the
    /// rest of the bytes.
    pub fn decode(bytes: &[u8]) -> Result<Self, CryptoError> {
        match bytes.first() {
            None => return Err(CryptoError::InvalidEnvelopeLength(0)),
            Some(&VERSION_ID) => {}
            Some(&version) => return Err(CryptoError::InvalidVersion(version)),
        }
        if bytes.len() < C3_START || (bytes.len() - C3_START) % BLOCK_SIZE != 0 {
            return Err(CryptoError::InvalidEnvelopeLength(bytes.len()));
        }

        let mut c1 = [0u8; C1_BYTES];
        c1.copy_from_slice(&bytes[1..C2_START]);

        let mut c2 = [0u8; BLOCK_SIZE];
        c2.copy_from_slice(&bytes[C2_START..C3_START]);

        let c3 = bytes[C3_START..]
            .chunks_exact(BLOCK_SIZE)
            .map(|chunk| {
                let mut block = [0u8; BLOCK_SIZE];
                block.copy_from_slice(chunk);
                block
            })
            .collect();

        Ok(Self {
            c1: G2Point(c1),
            c2,
            c3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(blocks: usize) -> EncryptedMessage {
        EncryptedMessage {
            c1: G2Point([0xc1; 96]),
            c2: [0xc2; 32],
            c3: (0..blocks).map(|i| [i as u8; 32]).collect(),
        }
    }

    #[test]
    fn test_encode_layout() {
        let msg = sample(2);
        let bytes = msg.encode();

        assert_eq!(bytes.len(), 1 + 96 + 32 + 64);
        assert_eq!(bytes[0], VERSION_ID);
        assert!(bytes[1..97].iter().all(|&b| b == 0xc1));
        assert!(bytes[97..129].iter().all(|&b| b == 0xc2));
        assert!(bytes[129..161].iter().all(|&b| b == 0));
        assert!(bytes[161..193].iter().all(|&b| b == 1));
    }

    #[test]
    fn test_decode_round_trip() {
        for blocks in 0..4 {
            let msg = sample(blocks);
            assert_eq!(EncryptedMessage::decode(&msg.encode()).unwrap(), msg);
        }
    }

    #[test]
    fn test_decode_rejects_foreign_version() {
        let mut bytes = sample(1).encode();
        bytes[0] = 0x2;
        assert!(matches!(
            EncryptedMessage::decode(&bytes),
            Err(CryptoError::InvalidVersion(0x2))
        ));
    }

    #[test]
    fn test_version_checked_before_length() {
        // Even a single-byte input with the wrong version reports
        // InvalidVersion, not a length error.
        assert!(matches!(
            EncryptedMessage::decode(&[0x7]),
            Err(CryptoError::InvalidVersion(0x7))
        ));
    }

    #[test]
    fn test_decode_rejects_truncated_envelope() {
        let bytes = sample(1).encode();
        assert!(matches!(
            EncryptedMessage::decode(&bytes[..100]),
            Err(CryptoError::InvalidEnvelopeLength(100))
        ));
    }

    #[test]
    fn test_decode_rejects_ragged_block_region() {
        let mut bytes = sample(1).encode();
        bytes.push(0xee);
        assert!(matches!(
            EncryptedMessage::decode(&bytes),
            Err(CryptoError::InvalidEnvelopeLength(162))
        ));
    }

    #[test]
    fn test_decode_rejects_empty_input() {
        assert!(matches!(
            EncryptedMessage::decode(&[]),
            Err(CryptoError::InvalidEnvelopeLength(0))
        ));
    }
}
