// SPDX-License-Identifier: CC0-1.0

//! Hash functions used by the multicoin core.
//!
//! This crate wraps the RustCrypto hash primitives (`sha2`, `ripemd`,
//! `hmac`, `pbkdf2`) behind the small set of free functions the rest of
//! the workspace needs: SHA-256, double-SHA-256, RIPEMD-160, HASH160,
//! HMAC-SHA-512, and PBKDF2-HMAC-SHA-512.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use hmac::{Hmac, Mac};
use ripemd::Ripemd160;
use sha2::{Digest, Sha256, Sha512};

/// Output of [`sha256`].
pub type Sha256Hash = [u8; 32];
/// Output of [`hash160`].
pub type Hash160 = [u8; 20];
/// Output of [`hmac_sha512`].
pub type Hmac512Tag = [u8; 64];

/// Computes `SHA256(data)`.
#[inline]
pub fn sha256(data: &[u8]) -> Sha256Hash {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes `SHA256(SHA256(data))`, Bitcoin's standard double hash.
#[inline]
pub fn bin_dbl_sha256(data: &[u8]) -> Sha256Hash {
    sha256(&sha256(data))
}

/// Computes `RIPEMD160(data)`.
#[inline]
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Computes `HASH160(data) = RIPEMD160(SHA256(data))`, used throughout
/// Bitcoin for address and script-hash derivation.
#[inline]
pub fn hash160(data: &[u8]) -> Hash160 {
    ripemd160(&sha256(data))
}

/// Computes `HMAC-SHA512(key, msg)`.
#[inline]
pub fn hmac_sha512(key: &[u8], msg: &[u8]) -> Hmac512Tag {
    let mut mac = Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(msg);
    mac.finalize().into_bytes().into()
}

/// Output of [`hmac_sha256`].
pub type Hmac256Tag = [u8; 32];

/// Computes `HMAC-SHA256(key, msg)`, used by RFC 6979 deterministic
/// nonce generation.
#[inline]
pub fn hmac_sha256(key: &[u8], msg: &[u8]) -> Hmac256Tag {
    let mut mac = Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length");
    mac.update(msg);
    mac.finalize().into_bytes().into()
}

/// Computes `PBKDF2-HMAC-SHA512(password, salt, iterations, dklen)`.
///
/// Used by BIP39 seed derivation with `iterations = 2048` and `dklen = 64`.
#[cfg(feature = "alloc")]
pub fn pbkdf2_hmac_sha512(password: &[u8], salt: &[u8], iterations: u32, dklen: usize) -> Vec<u8> {
    let mut out = alloc::vec![0u8; dklen];
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, iterations, &mut out);
    out
}

/// Computes `PBKDF2-HMAC-SHA512(password, salt, iterations)` into a
/// caller-provided buffer, for no_std callers without an allocator.
pub fn pbkdf2_hmac_sha512_into(password: &[u8], salt: &[u8], iterations: u32, out: &mut [u8]) {
    pbkdf2::pbkdf2_hmac::<Sha512>(password, salt, iterations, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    #[test]
    fn sha256_empty() {
        assert_eq!(
            sha256(b""),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn sha256_abc() {
        assert_eq!(
            sha256(b"abc"),
            hex!("ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad")
        );
    }

    #[test]
    fn dbl_sha256_matches_double_application() {
        let data = b"hello world";
        assert_eq!(bin_dbl_sha256(data), sha256(&sha256(data)));
    }

    #[test]
    fn ripemd160_empty() {
        assert_eq!(
            ripemd160(b""),
            hex!("9c1185a5c5e9fc54612808977ee8f548b2258d31")
        );
    }

    #[test]
    fn hash160_matches_ripemd_of_sha256() {
        let data = b"satoshi";
        assert_eq!(hash160(data), ripemd160(&sha256(data)));
    }

    #[test]
    fn hmac_sha512_rfc4231_case1() {
        // RFC 4231 test case 1.
        let key = hex!("0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b");
        let data = b"Hi There";
        let expected = hex!(
            "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cdedaa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
        );
        assert_eq!(hmac_sha512(&key, data), expected);
    }

    #[test]
    fn hmac_sha256_rfc4231_case1() {
        // RFC 4231 test case 1.
        let key = hex!("0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b0b");
        let data = b"Hi There";
        let expected = hex!("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7");
        assert_eq!(hmac_sha256(&key, data), expected);
    }

    #[test]
    fn pbkdf2_hmac_sha512_is_deterministic() {
        let out1 = pbkdf2_hmac_sha512(b"mnemonic-words", b"mnemonicpassphrase", 2048, 64);
        let out2 = pbkdf2_hmac_sha512(b"mnemonic-words", b"mnemonicpassphrase", 2048, 64);
        assert_eq!(out1, out2);
        assert_eq!(out1.len(), 64);
    }
}
