//! Length-revealing padding to the 32-byte block boundary.
//!
//! PKCS-style: `pad_len = 32 - (len % 32)`, every added byte carries
//! `pad_len`, and a message already on the boundary still gains one
//! full padding block. Unpadding trusts only the final byte; it does
//! not check that all `pad_len` trailing bytes match. That weaker
//! validation is part of the wire format: ciphertexts already committed
//! on-chain were produced against it, so strengthening the check would
//! change which envelopes are accepted.

use crate::error::CryptoError;

/// Block size of the hash-based stream cipher, in bytes.
pub const BLOCK_SIZE: usize = 32;

/// Pad a message and split it into 32-byte blocks.
pub fn pad_and_split(bytes: &[u8]) -> Vec<[u8; BLOCK_SIZE]> {
    let pad_len = BLOCK_SIZE - (bytes.len() % BLOCK_SIZE);
    let mut padded = bytes.to_vec();
    padded.resize(bytes.len() + pad_len, pad_len as u8);

    padded
        .chunks_exact(BLOCK_SIZE)
        .map(|chunk| {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            block
        })
        .collect()
}

/// Strip the padding from decrypted data.
///
/// Reads the final byte as the padding length and validates only that
/// it lies in `1..=32`.
pub fn unpad(bytes: &[u8]) -> Result<Vec<u8>, CryptoError> {
    let pad_len = *bytes
        .last()
        .ok_or(CryptoError::InvalidPadding(None))? as usize;
    if pad_len == 0 || pad_len > BLOCK_SIZE {
        return Err(CryptoError::InvalidPadding(Some(pad_len as u8)));
    }
    Ok(bytes[..bytes.len() - pad_len].to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pad_short_message() {
        let blocks = pad_and_split(b"hello");
        assert_eq!(blocks.len(), 1);
        assert_eq!(&blocks[0][..5], b"hello");
        // 27 bytes of padding, each carrying the value 27.
        assert!(blocks[0][5..].iter().all(|&b| b == 27));
    }

    #[test]
    fn test_pad_aligned_message_gains_full_block() {
        let blocks = pad_and_split(&[7u8; 32]);
        assert_eq!(blocks.len(), 2);
        assert!(blocks[1].iter().all(|&b| b == 32));
    }

    #[test]
    fn test_pad_empty_message() {
        let blocks = pad_and_split(&[]);
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].iter().all(|&b| b == 32));
    }

    #[test]
    fn test_unpad_round_trip() {
        for len in 0..100 {
            let message: Vec<u8> = (0..len).map(|i| i as u8).collect();
            let padded: Vec<u8> = pad_and_split(&message).concat();
            assert_eq!(unpad(&padded).unwrap(), message, "length {}", len);
        }
    }

    #[test]
    fn test_unpad_rejects_zero_length() {
        let mut data = [1u8; 32];
        data[31] = 0;
        assert!(matches!(
            unpad(&data),
            Err(CryptoError::InvalidPadding(Some(0)))
        ));
    }

    #[test]
    fn test_unpad_rejects_oversized_length() {
        let mut data = [1u8; 32];
        data[31] = 33;
        assert!(matches!(
            unpad(&data),
            Err(CryptoError::InvalidPadding(Some(33)))
        ));
    }

    #[test]
    fn test_unpad_rejects_empty_input() {
        assert!(matches!(unpad(&[]), Err(CryptoError::InvalidPadding(None))));
    }

    #[test]
    fn test_unpad_trusts_only_final_byte() {
        // Corrupt a middle padding byte; the weaker validation still
        // accepts the data (wire-compatible behavior).
        let mut padded: Vec<u8> = pad_and_split(b"hi").concat();
        padded[10] = 0xff;
        assert_eq!(unpad(&padded).unwrap(), b"hi");
    }
}
