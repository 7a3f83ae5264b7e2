// SPDX-License-Identifier: CC0-1.0

//! BIP32 hierarchical deterministic key derivation: master key
//! generation from a seed, hardened and non-hardened child key
//! derivation, and `xprv`/`xpub` serialization with per-coin version
//! bytes.

use alloc::string::String;
use alloc::vec::Vec;

use crate::key::{PublicKey, SecretKey};
use crate::Error;

const HARDENED_OFFSET: u32 = 0x8000_0000;

/// An extended key: either private (with its implied public key) or
/// public-only, plus the chain code and derivation metadata needed to
/// derive further children.
#[derive(Clone)]
pub struct ExtKey {
    pub depth: u8,
    pub parent_fingerprint: [u8; 4],
    pub child_number: u32,
    pub chain_code: [u8; 32],
    pub private_key: Option<SecretKey>,
    pub public_key: PublicKey,
}

impl ExtKey {
    /// Whether `index` denotes a hardened child (`>= 2^31`).
    pub fn is_hardened(index: u32) -> bool {
        index >= HARDENED_OFFSET
    }

    /// Derives the master extended key from a seed, per BIP32: `I =
    /// HMAC-SHA512(key = "Bitcoin seed", data = seed)`, `IL` is the
    /// master secret key and `IR` the master chain code.
    pub fn master_from_seed(seed: &[u8]) -> Result<Self, Error> {
        let i = multicoin_hashes::hmac_sha512(b"Bitcoin seed", seed);
        let (il, ir) = i.split_at(32);
        let mut il_arr = [0u8; 32];
        il_arr.copy_from_slice(il);
        let private_key = SecretKey::from_bytes(&il_arr)
            .map_err(|_| Error::InvalidDerivation("master IL is zero or >= curve order"))?;
        let public_key = private_key.public_key();
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);
        Ok(ExtKey {
            depth: 0,
            parent_fingerprint: [0u8; 4],
            child_number: 0,
            chain_code,
            private_key: Some(private_key),
            public_key,
        })
    }

    fn fingerprint(&self) -> [u8; 4] {
        let hash = multicoin_hashes::hash160(&self.public_key.to_compressed());
        let mut fp = [0u8; 4];
        fp.copy_from_slice(&hash[..4]);
        fp
    }

    /// Derives child `index`. Hardened indices (`>= 2^31`) require a
    /// private parent key.
    pub fn derive_child(&self, index: u32) -> Result<Self, Error> {
        let hardened = Self::is_hardened(index);
        let mut data = Vec::with_capacity(37);
        if hardened {
            let sk = self
                .private_key
                .as_ref()
                .ok_or(Error::InvalidDerivation("hardened derivation needs a private key"))?;
            data.push(0u8);
            data.extend_from_slice(&sk.to_bytes());
        } else {
            data.extend_from_slice(&self.public_key.to_compressed());
        }
        data.extend_from_slice(&index.to_be_bytes());

        let i = multicoin_hashes::hmac_sha512(&self.chain_code, &data);
        let (il, ir) = i.split_at(32);
        let mut il_arr = [0u8; 32];
        il_arr.copy_from_slice(il);
        let il_key = SecretKey::from_bytes(&il_arr)
            .map_err(|_| Error::InvalidDerivation("child IL is zero or >= curve order; retry with index + 1"))?;

        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(ir);

        let (private_key, public_key) = match &self.private_key {
            Some(parent_sk) => {
                let child_sk = parent_sk.add_scalar(&il_key)?;
                let child_pk = child_sk.public_key();
                (Some(child_sk), child_pk)
            }
            None => {
                let child_pk = il_key.public_key().add(&self.public_key)?;
                (None, child_pk)
            }
        };

        Ok(ExtKey {
            depth: self
                .depth
                .checked_add(1)
                .ok_or(Error::InvalidDerivation("derivation depth overflowed u8"))?,
            parent_fingerprint: self.fingerprint(),
            child_number: index,
            chain_code,
            private_key,
            public_key,
        })
    }

    /// Derives a full path such as `m/0'/1/2'/2/1000000000`, where a
    /// trailing `'` or `h` marks a hardened index.
    pub fn derive_path(&self, path: &[u32]) -> Result<Self, Error> {
        let mut node = self.clone();
        for &index in path {
            node = node.derive_child(index)?;
        }
        Ok(node)
    }

    /// Drops the private key, leaving a public-only extended key that
    /// can still derive non-hardened children.
    pub fn neuter(&self) -> Self {
        ExtKey {
            depth: self.depth,
            parent_fingerprint: self.parent_fingerprint,
            child_number: self.child_number,
            chain_code: self.chain_code,
            private_key: None,
            public_key: self.public_key,
        }
    }

    fn serialize(&self, version: u32, key_bytes: &[u8; 33]) -> String {
        let mut payload = Vec::with_capacity(78);
        payload.extend_from_slice(&version.to_be_bytes());
        payload.push(self.depth);
        payload.extend_from_slice(&self.parent_fingerprint);
        payload.extend_from_slice(&self.child_number.to_be_bytes());
        payload.extend_from_slice(&self.chain_code);
        payload.extend_from_slice(key_bytes);
        multicoin_encoding::base58check_encode(&payload)
    }

    /// Serializes as an extended private key (`xprv`-style), using the
    /// given 4-byte version prefix.
    pub fn to_xprv(&self, version: u32) -> Result<String, Error> {
        let sk = self
            .private_key
            .as_ref()
            .ok_or(Error::InvalidDerivation("no private key to serialize as xprv"))?;
        let mut key_bytes = [0u8; 33];
        key_bytes[1..].copy_from_slice(&sk.to_bytes());
        Ok(self.serialize(version, &key_bytes))
    }

    /// Serializes as an extended public key (`xpub`-style), using the
    /// given 4-byte version prefix.
    pub fn to_xpub(&self, version: u32) -> String {
        self.serialize(version, &self.public_key.to_compressed())
    }

    /// Parses an `xprv`/`xpub`-style extended key, returning the
    /// decoded node and the 4-byte version prefix found.
    pub fn parse(s: &str) -> Result<(Self, u32), Error> {
        let payload = multicoin_encoding::base58check_decode(s)?;
        if payload.len() != 78 {
            return Err(Error::InvalidEncoding("extended key payload is not 78 bytes"));
        }
        let version = u32::from_be_bytes([payload[0], payload[1], payload[2], payload[3]]);
        let depth = payload[4];
        let mut parent_fingerprint = [0u8; 4];
        parent_fingerprint.copy_from_slice(&payload[5..9]);
        let child_number = u32::from_be_bytes([payload[9], payload[10], payload[11], payload[12]]);
        let mut chain_code = [0u8; 32];
        chain_code.copy_from_slice(&payload[13..45]);
        let key_bytes = &payload[45..78];

        let (private_key, public_key) = if key_bytes[0] == 0x00 {
            let mut raw = [0u8; 32];
            raw.copy_from_slice(&key_bytes[1..]);
            let sk = SecretKey::from_bytes(&raw)?;
            let pk = sk.public_key();
            (Some(sk), pk)
        } else {
            let pk = PublicKey::from_bytes(key_bytes)?;
            (None, pk)
        };

        Ok((
            ExtKey {
                depth,
                parent_fingerprint,
                child_number,
                chain_code,
                private_key,
                public_key,
            },
            version,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_from_seed_is_deterministic() {
        let seed = [0x5eu8; 32];
        let a = ExtKey::master_from_seed(&seed).unwrap();
        let b = ExtKey::master_from_seed(&seed).unwrap();
        assert_eq!(a.private_key.unwrap().to_bytes(), b.private_key.unwrap().to_bytes());
    }

    #[test]
    fn hardened_child_requires_private_key() {
        let seed = [0x01u8; 16];
        let master = ExtKey::master_from_seed(&seed).unwrap();
        let neutered = master.neuter();
        assert!(neutered.derive_child(0 | HARDENED_OFFSET).is_err());
        assert!(neutered.derive_child(0).is_ok());
    }

    #[test]
    fn private_and_neutered_derivation_agree_on_public_key() {
        let seed = [0x02u8; 16];
        let master = ExtKey::master_from_seed(&seed).unwrap();
        let child_priv = master.derive_child(7).unwrap();
        let child_pub = master.neuter().derive_child(7).unwrap();
        assert_eq!(child_priv.public_key, child_pub.public_key);
    }

    #[test]
    fn bip32_test_vector_1_path_0h() {
        // BIP32 test vector 1, seed 000102030405060708090a0b0c0d0e0f.
        let seed = hex_literal::hex!("000102030405060708090a0b0c0d0e0f");
        let master = ExtKey::master_from_seed(&seed).unwrap();
        assert_eq!(
            master.to_xprv(0x0488_ADE4).unwrap(),
            "xprv9s21ZrQH143K3QTDL4LXw2F7HEK3wJUD2nW2nRk4stbPy6cq3jPPqjiChkVvvNKmPGJxWUtg6LnF5kejMRNNU3TGtRBeJgk33yuGBxrMPHi"
        );
        assert_eq!(
            master.to_xpub(0x0488_B21E),
            "xpub661MyMwAqRbcFtXgS5sYJABqqG9YLmC4Q1Rdap9gSE8NqtwybGhePY2gZ29ESFjqJoCu1Rupje8YtGqsefD265TMg7usUDFdp6W1EGMcet8"
        );

        let child = master.derive_child(0 | HARDENED_OFFSET).unwrap();
        assert_eq!(child.depth, 1);
        assert_eq!(child.parent_fingerprint, master.fingerprint());
        assert_eq!(
            child.to_xprv(0x0488_ADE4).unwrap(),
            "xprv9uHRZZhk6KAJC1avXpDAp4MDc3sQKNxDiPvvkX8Br5ngLNv1TxvUxt4cV1rGL5hj6KCesnDYUhd7oWgT11eZG7XnxHrnYeSvkzY7d2bhkJ7"
        );
        assert_eq!(
            child.to_xpub(0x0488_B21E),
            "xpub68Gmy5EdvgibQVfPdqkBBCHxA5htiqg55crXYuXoQRKfDBFA1WEjWgP6LHhwBZeNK1VTsfTFUHCdrfp1bgwQ9xv5ski8PX9rL2dZXvgGDnw"
        );
    }

    #[test]
    fn xprv_xpub_roundtrip() {
        let seed = [0x09u8; 32];
        let master = ExtKey::master_from_seed(&seed).unwrap();
        let xprv = master.to_xprv(0x0488_ADE4).unwrap();
        let (parsed, version) = ExtKey::parse(&xprv).unwrap();
        assert_eq!(version, 0x0488_ADE4);
        assert_eq!(parsed.private_key.unwrap().to_bytes(), master.private_key.unwrap().to_bytes());

        let xpub = master.to_xpub(0x0488_B21E);
        let (parsed_pub, _) = ExtKey::parse(&xpub).unwrap();
        assert!(parsed_pub.private_key.is_none());
        assert_eq!(parsed_pub.public_key, master.public_key);
    }
}
