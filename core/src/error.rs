// SPDX-License-Identifier: CC0-1.0

//! The error taxonomy for the multicoin core.
//!
//! Every fallible public operation returns `Result<T, Error>`. The core
//! never logs; failures are always surfaced to the caller (see
//! `spec.md` §7), including cryptographic internal failures such as
//! `IL >= n` during BIP32 child key derivation, so callers can decide
//! whether to retry with the next index.

use thiserror::Error;

/// Errors produced by the multicoin core.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    /// Malformed Base58, Base58Check checksum, Bech32 checksum, or hex.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(&'static str),

    /// Scalar out of `[1, n)`, malformed pubkey bytes, or a
    /// decompression `x` whose `y^2` is a non-residue.
    #[error("invalid key: {0}")]
    InvalidKey(&'static str),

    /// Non-DER signature, `r`/`s` out of range, `s` not low when
    /// required, or failed verification.
    #[error("invalid signature: {0}")]
    InvalidSignature(&'static str),

    /// A scriptPubKey that cannot be classified into a known template.
    #[error("unsupported script: {0}")]
    UnsupportedScript(&'static str),

    /// A well-formed script using an opcode or shape this core does not
    /// model (e.g. non-minimal pushes encountered where rejected).
    #[error("invalid script: {0}")]
    InvalidScript(&'static str),

    /// Truncated stream, impossible varint, witness flag without a
    /// matching stack, or a script/witness length that overruns the
    /// buffer.
    #[error("invalid transaction: {0}")]
    InvalidTransaction(&'static str),

    /// Hardened child key derivation requested on a public-only node,
    /// `IL >= n`, or the resulting child key is zero / the identity
    /// point.
    #[error("invalid derivation: {0}")]
    InvalidDerivation(&'static str),

    /// The coin symbol is not present in the coin parameter table.
    #[error("unknown coin: {0}")]
    UnknownCoin(&'static str),

    /// The requested feature (e.g. segwit) is disabled for this coin's
    /// parameters.
    #[error("unsupported feature: {0}")]
    UnsupportedFeature(&'static str),
}

impl From<multicoin_encoding::Error> for Error {
    fn from(_: multicoin_encoding::Error) -> Self {
        Error::InvalidEncoding("base58/bech32 decode failed")
    }
}

impl From<secp256k1::Error> for Error {
    fn from(e: secp256k1::Error) -> Self {
        match e {
            secp256k1::Error::IncorrectSignature => {
                Error::InvalidSignature("ECDSA verification failed")
            }
            secp256k1::Error::InvalidSecretKey => Error::InvalidKey("secret key out of range"),
            secp256k1::Error::InvalidPublicKey => Error::InvalidKey("malformed public key"),
            _ => Error::InvalidKey("secp256k1 operation failed"),
        }
    }
}
