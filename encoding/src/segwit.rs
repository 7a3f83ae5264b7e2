// SPDX-License-Identifier: CC0-1.0

//! Segwit Bech32 (BIP173) and Bech32m (BIP350) address encoding.
//!
//! A thin wrapper over the `bech32` crate's `segwit` module, which
//! already implements the witness-version-dependent checksum constant
//! (plain Bech32 for v0, Bech32m for v1+) and the 8-bit-to-5-bit word
//! packing this encoding needs.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use bech32::Hrp;

use crate::Error;

/// Encodes a segwit witness program as a Bech32 (version 0) or Bech32m
/// (version 1+, per BIP350) address.
pub fn segwit_encode(hrp: &str, witver: u8, program: &[u8]) -> Result<String, Error> {
    let hrp = Hrp::parse(hrp).map_err(|_| Error::InvalidEncoding)?;
    let fe = bech32::Fe32::try_from(witver).map_err(|_| Error::InvalidEncoding)?;
    bech32::segwit::encode(hrp, fe, program).map_err(|_| Error::InvalidEncoding)
}

/// Decodes a segwit Bech32/Bech32m address, returning
/// `(hrp, witness_version, witness_program)`.
pub fn segwit_decode(s: &str) -> Result<(String, u8, Vec<u8>), Error> {
    let (hrp, witver, program) =
        bech32::segwit::decode(s).map_err(|_| Error::InvalidEncoding)?;
    Ok((hrp.to_string(), witver.to_u8(), program))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segwit_v0_p2wpkh_roundtrip() {
        let program = [0u8; 20];
        let addr = segwit_encode("bc", 0, &program).unwrap();
        let (hrp, witver, decoded) = segwit_decode(&addr).unwrap();
        assert_eq!(hrp, "bc");
        assert_eq!(witver, 0);
        assert_eq!(decoded, program);
    }

    #[test]
    fn known_bip173_vector() {
        // BIP173 test vector: witness version 0 program of 20 zero bytes.
        let addr = segwit_encode("bc", 0, &[0u8; 20]).unwrap();
        assert_eq!(addr, "bc1qqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqqq9e75rs");
    }

    #[test]
    fn rejects_mixed_case() {
        let addr = segwit_encode("bc", 0, &[0u8; 20]).unwrap();
        let mut mixed = addr.clone();
        // Flip the case of a single character to violate the mixed-case rule.
        let idx = mixed.len() - 1;
        let c = mixed.as_bytes()[idx] as char;
        let flipped = if c.is_ascii_lowercase() {
            c.to_ascii_uppercase()
        } else {
            c.to_ascii_lowercase()
        };
        mixed.replace_range(idx..idx + 1, &flipped.to_string());
        assert!(segwit_decode(&mixed).is_err());
    }

    #[test]
    fn rejects_bad_checksum() {
        let mut addr = segwit_encode("bc", 0, &[1u8; 20]).unwrap();
        let last = addr.pop().unwrap();
        let replacement = if last == 'q' { 'p' } else { 'q' };
        addr.push(replacement);
        assert!(segwit_decode(&addr).is_err());
    }

    #[test]
    fn rejects_out_of_range_witness_version() {
        assert!(bech32::Fe32::try_from(17u8).is_err());
    }

    #[test]
    fn v1_uses_bech32m() {
        let program = [0u8; 32];
        let addr = segwit_encode("bc", 1, &program).unwrap();
        let (hrp, witver, decoded) = segwit_decode(&addr).unwrap();
        assert_eq!(hrp, "bc");
        assert_eq!(witver, 1);
        assert_eq!(decoded, program);
    }
}
