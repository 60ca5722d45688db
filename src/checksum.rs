//! CRC-8 used on every checksummed TEE501 frame.
//!
//! Polynomial 0x31, initial value 0xFF, MSB first, no final XOR. The vendor
//! calls this the "One-Wire" CRC-8; the same parameters are used by
//! Sensirion-style command sensors.

use crc::{Algorithm, Crc};

/// CRC-8 parameters for TEE501 frames
pub const CRC_8_TEE501: Algorithm<u8> = Algorithm {
    width: 8,
    poly: 0x31,
    init: 0xff,
    refin: false,
    refout: false,
    xorout: 0x00,
    check: 0xf7,
    residue: 0x00,
};

const CRC8: Crc<u8> = Crc::<u8>::new(&CRC_8_TEE501);

/// Compute the checksum over `data`.
/// Pass a subslice (`&buf[start..end]`) to checksum part of a frame.
pub fn crc8(data: &[u8]) -> u8 {
    CRC8.checksum(data)
}

/// Split a received frame into its payload and trailing CRC byte and check them.
///
/// Returns the payload on success, or `(expected, received)` on mismatch.
/// An empty frame has no CRC byte and is reported as a mismatch against 0.
pub fn verify(frame: &[u8]) -> Result<&[u8], (u8, u8)> {
    match frame.split_last() {
        Some((&received, payload)) => {
            let expected = crc8(payload);
            if expected == received {
                Ok(payload)
            } else {
                Err((expected, received))
            }
        }
        None => Err((crc8(&[]), 0)),
    }
}
