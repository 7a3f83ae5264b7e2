// SPDX-License-Identifier: CC0-1.0

//! Secret and public key wrappers over `secp256k1`, plus WIF encoding.
//!
//! Curve arithmetic itself (point addition, scalar multiplication, field
//! and scalar reduction) is delegated entirely to the `secp256k1` crate
//! rather than reimplemented here; this module only adds the
//! Bitcoin-specific surface on top: compressed/uncompressed
//! serialization, the `divide` operation used by a handful of legacy
//! wallet recovery schemes, and Wallet Import Format encoding.

use alloc::string::String;
use alloc::vec::Vec;

use secp256k1::{PublicKey as Secp256PublicKey, Scalar, Secp256k1, SecretKey as Secp256SecretKey};

use crate::Error;

/// A secp256k1 secret key: a scalar in `[1, n)`.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct SecretKey(pub(crate) Secp256SecretKey);

impl SecretKey {
    /// Parses a 32-byte big-endian scalar. Fails if it is zero or `>= n`.
    pub fn from_bytes(bytes: &[u8; 32]) -> Result<Self, Error> {
        Secp256SecretKey::from_slice(bytes)
            .map(SecretKey)
            .map_err(Error::from)
    }

    /// Returns the 32-byte big-endian scalar.
    pub fn to_bytes(&self) -> [u8; 32] {
        self.0.secret_bytes()
    }

    /// Derives the corresponding public key (`privtopub`).
    pub fn public_key(&self) -> PublicKey {
        let secp = Secp256k1::new();
        PublicKey(Secp256PublicKey::from_secret_key(&secp, &self.0))
    }

    /// Adds another scalar modulo the curve order.
    pub fn add_scalar(&self, other: &SecretKey) -> Result<Self, Error> {
        let tweak = Scalar::from_be_bytes(other.to_bytes()).map_err(|_| Error::from(secp256k1::Error::InvalidTweak))?;
        self.0
            .add_tweak(&tweak)
            .map(SecretKey)
            .map_err(Error::from)
    }

    /// Multiplies by another scalar modulo the curve order.
    pub fn mul_scalar(&self, other: &SecretKey) -> Result<Self, Error> {
        let tweak = Scalar::from_be_bytes(other.to_bytes()).map_err(|_| Error::from(secp256k1::Error::InvalidTweak))?;
        self.0
            .mul_tweak(&tweak)
            .map(SecretKey)
            .map_err(Error::from)
    }

    /// Encodes as Wallet Import Format: `base58check(prefix || key ||
    /// [0x01 if compressed])`.
    pub fn to_wif(&self, prefix: u8, compressed: bool) -> String {
        let mut payload = Vec::with_capacity(34);
        payload.push(prefix);
        payload.extend_from_slice(&self.to_bytes());
        if compressed {
            payload.push(0x01);
        }
        multicoin_encoding::base58check_encode(&payload)
    }

    /// Decodes Wallet Import Format, returning the key, whether it
    /// encodes a compressed public key, and the version prefix found.
    pub fn from_wif(s: &str) -> Result<(Self, bool, u8), Error> {
        let payload = multicoin_encoding::base58check_decode(s)?;
        if payload.len() != 33 && payload.len() != 34 {
            return Err(Error::InvalidKey("WIF payload has the wrong length"));
        }
        let prefix = payload[0];
        let compressed = payload.len() == 34;
        if compressed && payload[33] != 0x01 {
            return Err(Error::InvalidKey("WIF compression flag byte must be 0x01"));
        }
        let mut raw = [0u8; 32];
        raw.copy_from_slice(&payload[1..33]);
        Ok((SecretKey::from_bytes(&raw)?, compressed, prefix))
    }
}

/// A secp256k1 public key, stored in its uncompressed form internally
/// and serialized either way on request.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct PublicKey(pub(crate) Secp256PublicKey);

impl PublicKey {
    /// Parses a compressed (33-byte) or uncompressed (65-byte) public key.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        Secp256PublicKey::from_slice(bytes)
            .map(PublicKey)
            .map_err(Error::from)
    }

    /// Serializes in compressed (33-byte) form.
    pub fn to_compressed(&self) -> [u8; 33] {
        self.0.serialize()
    }

    /// Serializes in uncompressed (65-byte) form.
    pub fn to_uncompressed(&self) -> [u8; 65] {
        self.0.serialize_uncompressed()
    }

    /// Adds another public key (elliptic curve point addition).
    pub fn add(&self, other: &PublicKey) -> Result<Self, Error> {
        self.0
            .combine(&other.0)
            .map(PublicKey)
            .map_err(Error::from)
    }

    /// Multiplies this point by a scalar.
    pub fn multiply(&self, scalar: &SecretKey) -> Result<Self, Error> {
        let secp = Secp256k1::new();
        let tweak = Scalar::from_be_bytes(scalar.to_bytes())
            .map_err(|_| Error::from(secp256k1::Error::InvalidTweak))?;
        self.0
            .mul_tweak(&secp, &tweak)
            .map(PublicKey)
            .map_err(Error::from)
    }

    /// Divides this point by a scalar: `multiply(self, k^-1 mod n)`.
    pub fn divide(&self, scalar: &SecretKey) -> Result<Self, Error> {
        let inv = scalar_inverse(&scalar.0)?;
        self.multiply(&SecretKey(inv))
    }
}

/// Computes the modular inverse of a secret-key-encoded scalar modulo
/// the group order `n`, via Fermat's little theorem (`a^(n-2) mod n`).
///
/// `secp256k1::SecretKey` has no `n`-arithmetic of its own beyond
/// add/mul tweaks, so the inverse is built from repeated `mul_tweak`
/// using the binary expansion of `n - 2`.
fn scalar_inverse(key: &Secp256SecretKey) -> Result<Secp256SecretKey, Error> {
    // n - 2, where n is the secp256k1 group order.
    const N_MINUS_2: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48,
        0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x3f,
    ];
    let mut one_bytes = [0u8; 32];
    one_bytes[31] = 1;
    let mut result = Secp256SecretKey::from_slice(&one_bytes).expect("1 is a valid scalar");

    // Left-to-right square-and-multiply: key^(n-2) mod n == key^-1 mod n.
    for byte in N_MINUS_2 {
        for bit in (0..8).rev() {
            let result_scalar = Scalar::from_be_bytes(result.secret_bytes())
                .map_err(|_| Error::from(secp256k1::Error::InvalidTweak))?;
            result = result.mul_tweak(&result_scalar).map_err(Error::from)?;
            if (byte >> bit) & 1 == 1 {
                let key_scalar = Scalar::from_be_bytes(key.secret_bytes())
                    .map_err(|_| Error::from(secp256k1::Error::InvalidTweak))?;
                result = result.mul_tweak(&key_scalar).map_err(Error::from)?;
            }
        }
    }
    Ok(result)
}
