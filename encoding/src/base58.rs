// SPDX-License-Identifier: CC0-1.0

//! Base58 and Base58Check, with leading-zero-byte preservation.

use alloc::string::String;
use alloc::vec::Vec;

use multicoin_hashes::bin_dbl_sha256;

use crate::base::BASE58_ALPHABET;
use crate::biguint::BigUint;
use crate::Error;

/// Encodes `data` as Base58, emitting one leading `'1'` per leading
/// `0x00` byte in `data` (the alphabet's zero digit).
pub fn encode(data: &[u8]) -> String {
    let leading_zeros = data.iter().take_while(|&&b| b == 0).count();
    let n = BigUint::from_bytes_be(data);
    let digits = n.to_radix_str(58, BASE58_ALPHABET, 0);

    let mut out = Vec::with_capacity(leading_zeros + digits.len());
    out.resize(leading_zeros, BASE58_ALPHABET[0]);
    out.extend_from_slice(&digits);
    // SAFETY: every byte pushed comes from BASE58_ALPHABET, which is ASCII.
    String::from_utf8(out).expect("base58 alphabet is ASCII")
}

/// Decodes a Base58 string back into bytes, emitting one leading `0x00`
/// byte per leading `'1'` character.
pub fn decode(s: &str) -> Result<Vec<u8>, Error> {
    let leading_ones = s.bytes().take_while(|&b| b == BASE58_ALPHABET[0]).count();
    let n = BigUint::from_radix_str(s, 58, BASE58_ALPHABET).ok_or(Error::InvalidEncoding)?;
    let body = n.to_bytes_be(0);

    let mut out = Vec::with_capacity(leading_ones + body.len());
    out.resize(leading_ones, 0u8);
    out.extend_from_slice(&body);
    Ok(out)
}

/// Encodes `payload` as Base58Check: `Base58(payload || checksum)` where
/// `checksum` is the first 4 bytes of `dbl_sha256(payload)`.
pub fn check_encode(payload: &[u8]) -> String {
    let checksum = bin_dbl_sha256(payload);
    let mut buf = Vec::with_capacity(payload.len() + 4);
    buf.extend_from_slice(payload);
    buf.extend_from_slice(&checksum[..4]);
    encode(&buf)
}

/// Decodes a Base58Check string, verifying the checksum, and returns the
/// payload (without the trailing 4-byte checksum).
pub fn check_decode(s: &str) -> Result<Vec<u8>, Error> {
    let raw = decode(s)?;
    if raw.len() < 4 {
        return Err(Error::InvalidEncoding);
    }
    let (payload, checksum) = raw.split_at(raw.len() - 4);
    let expected = bin_dbl_sha256(payload);
    if checksum != &expected[..4] {
        return Err(Error::InvalidEncoding);
    }
    Ok(payload.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_with_leading_zero_bytes() {
        let data = [0x00, 0x00, 0x01, 0x02, 0x03];
        let s = encode(&data);
        assert!(s.starts_with("11"));
        assert_eq!(decode(&s).unwrap(), data);
    }

    #[test]
    fn check_roundtrip() {
        let payload = [0x00u8; 21];
        let s = check_encode(&payload);
        assert_eq!(check_decode(&s).unwrap(), payload);
    }

    #[test]
    fn check_rejects_corrupted_checksum() {
        let payload = [1u8, 2, 3, 4, 5];
        let mut s = check_encode(&payload);
        // Flip the last character, which is part of the checksum tail.
        let last = s.pop().unwrap();
        let replacement = if last == BASE58_ALPHABET[0] as char {
            BASE58_ALPHABET[1] as char
        } else {
            BASE58_ALPHABET[0] as char
        };
        s.push(replacement);
        assert!(check_decode(&s).is_err());
    }

    #[test]
    fn known_vector() {
        // 25-byte P2PKH payload (version 0x00 + 20-byte hash) for a
        // well-known all-zero hash, used only to pin the checksum logic.
        let mut payload = [0u8; 21];
        payload[0] = 0x00;
        let s = check_encode(&payload);
        assert_eq!(s, "1111111111111111111114oLvT2");
    }
}
