// SPDX-License-Identifier: CC0-1.0

//! Electrum v1 legacy wallet key derivation: the historic, pre-BIP32
//! scheme that treats a seed directly as the master private scalar and
//! derives each numbered key as an offset from it.
//!
//! Kept for historic-wallet-recovery compatibility only; new wallets
//! should use [`crate::bip32`]. Electrum v1 always used uncompressed
//! public keys, so every address derived here hashes the 65-byte
//! uncompressed form.
//!
//! This core takes the seed as the master scalar directly, with no
//! iterated-hash stretching step: a 32-byte seed is used as-is; a
//! longer seed (e.g. the 64-byte output of [`crate::bip39::mnemonic_to_seed`])
//! is folded to 32 bytes with a single `SHA256`. That single fold is
//! this core's own extension for variable-length input, not a
//! historic-wallet compatibility behavior — it isn't exercised by any
//! known-answer vector.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use crate::address;
use crate::key::{PublicKey, SecretKey};
use crate::Error;

fn master_key_from_seed(seed: &[u8]) -> Result<SecretKey, Error> {
    let scalar = if seed.len() == 32 {
        let mut buf = [0u8; 32];
        buf.copy_from_slice(seed);
        buf
    } else {
        multicoin_hashes::sha256(seed)
    };
    SecretKey::from_bytes(&scalar)
        .map_err(|_| Error::InvalidDerivation("electrum seed is zero or >= curve order"))
}

/// The 64-byte master public key (`X || Y`, no leading format byte)
/// derived from a wallet seed.
pub fn electrum_mpk(seed: &[u8]) -> Result<[u8; 64], Error> {
    let master = master_key_from_seed(seed)?;
    let uncompressed = master.public_key().to_uncompressed();
    let mut mpk = [0u8; 64];
    mpk.copy_from_slice(&uncompressed[1..]);
    Ok(mpk)
}

fn offset_for(mpk: &[u8; 64], n: u32, for_change: u32) -> Result<SecretKey, Error> {
    let preimage = format!("{}:{}:", n, for_change);
    let mut data = Vec::with_capacity(preimage.len() + 64);
    data.extend_from_slice(preimage.as_bytes());
    data.extend_from_slice(mpk);
    let digest = multicoin_hashes::bin_dbl_sha256(&data);
    SecretKey::from_bytes(&digest)
        .map_err(|_| Error::InvalidDerivation("electrum offset hash out of curve-order range"))
}

/// Derives the numbered private key for a wallet seed directly.
pub fn electrum_privkey(seed: &[u8], n: u32, for_change: u32) -> Result<SecretKey, Error> {
    let master = master_key_from_seed(seed)?;
    let mpk = electrum_mpk(seed)?;
    let offset = offset_for(&mpk, n, for_change)?;
    master.add_scalar(&offset)
}

/// Derives the numbered public key from a previously-computed master
/// public key, without needing the seed (or any private key material).
pub fn electrum_pubkey(mpk: &[u8; 64], n: u32, for_change: u32) -> Result<PublicKey, Error> {
    let offset = offset_for(mpk, n, for_change)?;
    let mut uncompressed = [0u8; 65];
    uncompressed[0] = 0x04;
    uncompressed[1..].copy_from_slice(mpk);
    let master_pub = PublicKey::from_bytes(&uncompressed)?;
    master_pub.add(&offset.public_key())
}

/// Derives the numbered legacy `P2PKH` address from a wallet seed.
pub fn electrum_address_from_seed(
    seed: &[u8],
    n: u32,
    for_change: u32,
    magicbyte: u8,
) -> Result<String, Error> {
    let priv_key = electrum_privkey(seed, n, for_change)?;
    let hash = multicoin_hashes::hash160(&priv_key.public_key().to_uncompressed());
    Ok(address::p2pkh_addr(&hash, magicbyte))
}

/// Derives the numbered legacy `P2PKH` address from a master public key.
pub fn electrum_address_from_mpk(
    mpk: &[u8; 64],
    n: u32,
    for_change: u32,
    magicbyte: u8,
) -> Result<String, Error> {
    let pub_key = electrum_pubkey(mpk, n, for_change)?;
    let hash = multicoin_hashes::hash160(&pub_key.to_uncompressed());
    Ok(address::p2pkh_addr(&hash, magicbyte))
}
