// SPDX-License-Identifier: CC0-1.0

//! Base conversion, Base58Check, and Bech32 encoding for the multicoin
//! core.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod base;
mod base58;
mod biguint;
mod segwit;

pub use base::{changebase, decode, encode, Based, BASE58_ALPHABET};
pub use base58::{
    check_decode as base58check_decode, check_encode as base58check_encode,
    decode as base58_decode, encode as base58_encode,
};
pub use biguint::BigUint;
pub use segwit::{segwit_decode, segwit_encode};

/// Errors produced by this crate's encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed Base58, Base58Check checksum mismatch, Bech32 checksum
    /// mismatch, or otherwise invalid encoded text.
    InvalidEncoding,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::InvalidEncoding => f.write_str("invalid encoding"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
