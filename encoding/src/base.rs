// SPDX-License-Identifier: CC0-1.0

//! Generic base conversion between bases 2, 10, 16, 58, and 256.
//!
//! Mirrors the historical `changebase`/`encode`/`decode` trio: values in
//! base 256 are raw byte strings, values in every other supported base
//! are ASCII digit strings using a fixed per-base alphabet.

use alloc::string::String;
use alloc::vec::Vec;

use crate::biguint::BigUint;
use crate::Error;

/// The Base58 alphabet (Bitcoin's), omitting `0`, `O`, `I`, and `l` to
/// avoid visual ambiguity.
pub const BASE58_ALPHABET: &[u8; 58] =
    b"123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";
const HEX_ALPHABET: &[u8; 16] = b"0123456789abcdef";
const DEC_ALPHABET: &[u8; 10] = b"0123456789";
const BIN_ALPHABET: &[u8; 2] = b"01";

fn alphabet_for(base: u32) -> Option<&'static [u8]> {
    match base {
        2 => Some(BIN_ALPHABET),
        10 => Some(DEC_ALPHABET),
        16 => Some(HEX_ALPHABET),
        58 => Some(BASE58_ALPHABET),
        _ => None,
    }
}

/// A value in one of the supported bases: a byte string for base 256,
/// an ASCII digit string otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Based {
    Bytes(Vec<u8>),
    Text(String),
}

impl Based {
    fn into_biguint(self, base: u32) -> Result<BigUint, Error> {
        match (base, self) {
            (256, Based::Bytes(b)) => Ok(BigUint::from_bytes_be(&b)),
            (256, Based::Text(_)) => Err(Error::InvalidEncoding),
            (b, Based::Text(s)) => {
                let alphabet = alphabet_for(b).ok_or(Error::InvalidEncoding)?;
                BigUint::from_radix_str(&s, b, alphabet).ok_or(Error::InvalidEncoding)
            }
            (_, Based::Bytes(_)) => Err(Error::InvalidEncoding),
        }
    }

    /// Unwraps a `Based::Bytes`, for base-256 results.
    pub fn into_bytes(self) -> Result<Vec<u8>, Error> {
        match self {
            Based::Bytes(b) => Ok(b),
            Based::Text(_) => Err(Error::InvalidEncoding),
        }
    }

    /// Unwraps a `Based::Text`, for text-base results.
    pub fn into_text(self) -> Result<String, Error> {
        match self {
            Based::Text(s) => Ok(s),
            Based::Bytes(_) => Err(Error::InvalidEncoding),
        }
    }
}

/// Encodes a non-negative integer in the given base, zero-padded on the
/// left so the output has at least `minlen` digits (or bytes, for base
/// 256).
pub fn encode(n: &BigUint, base: u32, minlen: usize) -> Result<Based, Error> {
    if base == 256 {
        Ok(Based::Bytes(n.to_bytes_be(minlen)))
    } else {
        let alphabet = alphabet_for(base).ok_or(Error::InvalidEncoding)?;
        let digits = n.to_radix_str(base, alphabet, minlen);
        Ok(Based::Text(
            String::from_utf8(digits).map_err(|_| Error::InvalidEncoding)?,
        ))
    }
}

/// Decodes a value (as produced by [`encode`]) in the given base back
/// into an integer.
pub fn decode(value: Based, base: u32) -> Result<BigUint, Error> {
    value.into_biguint(base)
}

/// Reinterprets `value` (encoded in base `from`) as a value in base
/// `to`, zero-padded on the left to `minlen` digits/bytes.
///
/// Invariant: `decode(changebase(encode(n, from, 0), from, to, 0), to) == n`
/// for every `n` and every pair of supported bases.
pub fn changebase(value: Based, from: u32, to: u32, minlen: usize) -> Result<Based, Error> {
    let n = decode(value, from)?;
    encode(&n, to, minlen)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changebase_concrete_vectors() {
        // [prebase, preval, postbase, postval]
        let cases: &[(u32, Based, u32, Based)] = &[
            (
                10,
                Based::Text("65535".into()),
                16,
                Based::Text("ffff".into()),
            ),
            (
                16,
                Based::Text("deadbeef".into()),
                10,
                Based::Text("3735928559".into()),
            ),
            (10, Based::Text("0".into()), 16, Based::Text("".into())),
            (
                256,
                Based::Bytes(b"34567".to_vec()),
                10,
                Based::Text("219919234615".into()),
            ),
            (10, Based::Text("444".into()), 16, Based::Text("1bc".into())),
            (
                256,
                Based::Bytes(vec![0x03, 0x04, 0x05, 0x06, 0x07]),
                10,
                Based::Text("12952339975".into()),
            ),
            (
                16,
                Based::Text("3132333435".into()),
                256,
                Based::Bytes(b"12345".to_vec()),
            ),
        ];
        for (from, preval, to, postval) in cases {
            let got = changebase(preval.clone(), *from, *to, 0).unwrap();
            assert_eq!(&got, postval);
        }
    }

    #[test]
    fn decode_encode_roundtrip_property() {
        let values: &[u64] = &[0, 1, 255, 256, 65535, 123456789, u32::MAX as u64];
        let bases = [2u32, 10, 16, 58, 256];
        for &v in values {
            let n = BigUint::from_bytes_be(&v.to_be_bytes());
            for &from in &bases {
                for &to in &bases {
                    let encoded_from = encode(&n, from, 0).unwrap();
                    let changed = changebase(encoded_from, from, to, 0).unwrap();
                    let decoded = decode(changed, to).unwrap();
                    assert_eq!(decoded, n, "roundtrip failed from={from} to={to}");
                }
            }
        }
    }
}
