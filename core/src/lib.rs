// SPDX-License-Identifier: CC0-1.0

//! Multi-coin Bitcoin-family cryptography and transaction core.
//!
//! This crate implements the cryptographic and data-format layer
//! shared by Bitcoin-family coins: secp256k1 keys and ECDSA, BIP32 and
//! Electrum v1 key derivation, BIP39 seed derivation, scripts and
//! addresses, and transaction (de)serialization and signing. It
//! performs no network I/O, holds no on-disk wallet state, and does
//! not estimate fees or validate full consensus rules — callers supply
//! UTXO values and previous scriptPubKeys themselves.

extern crate alloc;

pub mod address;
pub mod bip32;
pub mod bip39;
pub mod coins;
pub mod ecdsa;
pub mod electrum;
mod error;
pub mod key;
pub mod script;
pub mod sighash;
pub mod sign;
pub mod transaction;
mod varint;

pub use coins::CoinParams;
pub use error::Error;
pub use key::{PublicKey, SecretKey};
pub use script::Script;
pub use transaction::{Transaction, TxInput, TxOutput};

use alloc::string::String;
use alloc::vec::Vec;

/// A coin-bound facade bundling a [`CoinParams`] with the operations
/// that depend on it: address formatting, WIF encoding, and the
/// signing helpers that need a coin's version bytes.
///
/// Operations that don't depend on coin parameters — raw ECDSA,
/// script parsing, transaction (de)serialization, BIP32/BIP39 math —
/// live as free functions in their own modules and take no `Coin`.
#[derive(Debug, Clone, Copy)]
pub struct Coin {
    pub params: CoinParams,
}

impl Coin {
    pub fn new(params: CoinParams) -> Self {
        Coin { params }
    }

    pub fn by_symbol(symbol: &str) -> Result<Self, Error> {
        coins::by_symbol(symbol).map(Coin::new)
    }

    /// `privtoaddr`: the legacy `P2PKH` address for a private key.
    pub fn privtoaddr(&self, key: &SecretKey) -> String {
        let hash = multicoin_hashes::hash160(&key.public_key().to_compressed());
        address::p2pkh_addr(&hash, self.params.magicbyte)
    }

    /// The `P2SH`-wrapped `P2WPKH` address for a private key. Fails if
    /// this coin has no segwit support.
    pub fn privtop2wpkh_p2sh(&self, key: &SecretKey) -> Result<String, Error> {
        if !self.params.segwit_supported {
            return Err(Error::UnsupportedFeature("segwit is not enabled for this coin"));
        }
        let hash = multicoin_hashes::hash160(&key.public_key().to_compressed());
        Ok(address::p2wpkh_in_p2sh_addr(&hash, self.params.script_magicbyte))
    }

    /// The native segwit `P2WPKH` Bech32 address for a private key.
    /// Fails if this coin has no segwit support.
    pub fn privtop2wpkh(&self, key: &SecretKey) -> Result<String, Error> {
        let hrp = self
            .params
            .segwit_hrp
            .ok_or(Error::UnsupportedFeature("segwit is not enabled for this coin"))?;
        let hash = multicoin_hashes::hash160(&key.public_key().to_compressed());
        address::p2wpkh_addr(&hash, hrp)
    }

    pub fn wif_encode(&self, key: &SecretKey, compressed: bool) -> String {
        key.to_wif(self.params.wif_prefix, compressed)
    }

    pub fn wif_decode(&self, wif: &str) -> Result<(SecretKey, bool), Error> {
        let (key, compressed, prefix) = SecretKey::from_wif(wif)?;
        if prefix != self.params.wif_prefix {
            return Err(Error::InvalidKey("WIF prefix does not match this coin"));
        }
        Ok((key, compressed))
    }

    pub fn scripttoaddr(&self, script_bytes: &[u8]) -> Result<String, Error> {
        address::script_to_addr(
            script_bytes,
            self.params.magicbyte,
            self.params.script_magicbyte,
            self.params.segwit_hrp,
        )
    }

    pub fn addrtoscript(&self, addr: &str) -> Result<Script, Error> {
        address::addr_to_script(
            addr,
            self.params.magicbyte,
            self.params.script_magicbyte,
            self.params.segwit_hrp,
        )
    }

    pub fn p2sh_scriptaddr(&self, redeem_script: &Script) -> String {
        address::p2sh_scriptaddr(redeem_script, self.params.script_magicbyte)
    }

    /// The Electrum v1 legacy address for a wallet seed at index `n`.
    pub fn electrum_address(&self, seed: &[u8], n: u32, for_change: u32) -> Result<String, Error> {
        electrum::electrum_address_from_seed(seed, n, for_change, self.params.magicbyte)
    }

    /// Builds an unsigned transaction from a set of inputs (each an
    /// outpoint to spend) and outputs (each an address and value).
    pub fn mktx(
        &self,
        inputs: &[(  [u8; 32], u32 )],
        outputs: &[(String, u64)],
    ) -> Result<Transaction, Error> {
        let mut tx = Transaction::new(1, 0);
        for &(txid, vout) in inputs {
            tx.inputs.push(TxInput::new(txid, vout));
        }
        for (addr, value) in outputs {
            let script_pubkey = self.addrtoscript(addr)?.serialize();
            tx.outputs.push(TxOutput {
                value: *value,
                script_pubkey,
            });
        }
        Ok(tx)
    }

    /// Signs input `index`, inferring its signing path from the
    /// previous output's scriptPubKey: legacy `P2PKH`, native `P2WPKH`
    /// (using `value`), or `P2SH`-wrapped `P2WPKH` (also using
    /// `value`, and requiring `key` to match the wrapped redeem
    /// script).
    pub fn sign(
        &self,
        tx: &mut Transaction,
        index: usize,
        key: &SecretKey,
        prev_script_pubkey: &[u8],
        value: u64,
    ) -> Result<(), Error> {
        sign::sign_input(tx, index, key, prev_script_pubkey, value, sighash::SIGHASH_ALL)
    }

    /// Signs every input of `tx` as a legacy `P2PKH` spend with
    /// parallel key and scriptCode slices. Inputs spending `P2WPKH` or
    /// `P2SH`-`P2WPKH` outputs need [`Coin::sign`] called per input
    /// instead, since those need each input's value.
    pub fn signall(
        &self,
        tx: &mut Transaction,
        keys: &[SecretKey],
        script_codes: &[Vec<u8>],
    ) -> Result<(), Error> {
        sign::sign_all_p2pkh(tx, keys, script_codes, sighash::SIGHASH_ALL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn privtoaddr_uses_coin_magicbyte() {
        let key = SecretKey::from_bytes(&[0x5au8; 32]).unwrap();
        let btc = Coin::by_symbol("BTC").unwrap();
        let dash = Coin::by_symbol("DASH").unwrap();
        assert_ne!(btc.privtoaddr(&key), dash.privtoaddr(&key));
    }

    #[test]
    fn wif_roundtrip_through_coin() {
        let key = SecretKey::from_bytes(&[0x5bu8; 32]).unwrap();
        let btc = Coin::by_symbol("BTC").unwrap();
        let wif = btc.wif_encode(&key, true);
        let (decoded, compressed) = btc.wif_decode(&wif).unwrap();
        assert_eq!(decoded, key);
        assert!(compressed);
    }

    #[test]
    fn wif_from_wrong_coin_is_rejected() {
        let key = SecretKey::from_bytes(&[0x5cu8; 32]).unwrap();
        let btc = Coin::by_symbol("BTC").unwrap();
        let dash = Coin::by_symbol("DASH").unwrap();
        let wif = btc.wif_encode(&key, true);
        assert!(dash.wif_decode(&wif).is_err());
    }

    #[test]
    fn mktx_and_sign_roundtrip() {
        let btc = Coin::by_symbol("BTC").unwrap();
        let key = SecretKey::from_bytes(&[0x5du8; 32]).unwrap();
        let addr = btc.privtoaddr(&key);
        let mut tx = btc
            .mktx(&[([0x01u8; 32], 0)], &[(addr.clone(), 100_000)])
            .unwrap();
        let hash = multicoin_hashes::hash160(&key.public_key().to_compressed());
        let script_code = script::p2pkh_script(&hash).serialize();
        btc.sign(&mut tx, 0, &key, &script_code, 0).unwrap();
        sign::verify_tx_input(&tx, 0, &script_code, 0, false).unwrap();
    }

    #[test]
    fn sign_dispatches_p2wpkh_in_p2sh_through_coin_facade() {
        let btc = Coin::by_symbol("BTC").unwrap();
        let key = SecretKey::from_bytes(&[0x5fu8; 32]).unwrap();
        let addr = btc.privtop2wpkh_p2sh(&key).unwrap();
        let mut tx = btc
            .mktx(&[([0x02u8; 32], 0)], &[(addr.clone(), 90_000)])
            .unwrap();
        let prev_script_pubkey = btc.addrtoscript(&addr).unwrap().serialize();
        btc.sign(&mut tx, 0, &key, &prev_script_pubkey, 100_000).unwrap();
        assert!(!tx.inputs[0].script_sig.is_empty());
        assert_eq!(tx.inputs[0].witness.len(), 2);
        sign::verify_tx_input(&tx, 0, &[], 100_000, true).unwrap();
    }

    #[test]
    fn segwit_disabled_coin_rejects_p2wpkh() {
        let dash = Coin::by_symbol("DASH").unwrap();
        let key = SecretKey::from_bytes(&[0x5eu8; 32]).unwrap();
        assert!(dash.privtop2wpkh(&key).is_err());
        assert!(dash.privtop2wpkh_p2sh(&key).is_err());
    }
}
