// SPDX-License-Identifier: CC0-1.0

//! Address <-> script conversions: Base58Check `P2PKH`/`P2SH` and
//! Bech32 segwit addresses, plus the multisig redeem-script-to-address
//! helper (`p2sh_scriptaddr`).
//!
//! These functions take the coin's version bytes and segwit HRP
//! explicitly rather than a `CoinParams` reference, so that the
//! encoding logic has no dependency on the coin table itself.

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use crate::script::{self, Script, ScriptTemplate};
use crate::Error;

/// Builds the Base58Check address for a `P2PKH` (pay-to-pubkey-hash)
/// output from its hash160.
pub fn p2pkh_addr(hash160: &[u8; 20], magicbyte: u8) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(magicbyte);
    payload.extend_from_slice(hash160);
    multicoin_encoding::base58check_encode(&payload)
}

/// Builds the Base58Check address for a `P2SH` (pay-to-script-hash)
/// output from its hash160.
pub fn p2sh_addr(hash160: &[u8; 20], script_magicbyte: u8) -> String {
    let mut payload = Vec::with_capacity(21);
    payload.push(script_magicbyte);
    payload.extend_from_slice(hash160);
    multicoin_encoding::base58check_encode(&payload)
}

/// Builds a segwit v0 `P2WPKH` Bech32 address.
pub fn p2wpkh_addr(hash160: &[u8; 20], hrp: &str) -> Result<String, Error> {
    multicoin_encoding::segwit_encode(hrp, 0, hash160).map_err(Error::from)
}

/// Builds the `P2SH`-wrapped `P2WPKH` address: the redeem script is
/// `OP_0 <hash160(pubkey)>`, and the address is the `P2SH` of its hash160.
pub fn p2wpkh_in_p2sh_addr(
    pubkey_hash160: &[u8; 20],
    script_magicbyte: u8,
) -> String {
    let redeem_script = script::p2wpkh_script(pubkey_hash160);
    let redeem_bytes = redeem_script.serialize();
    let redeem_hash = multicoin_hashes::hash160(&redeem_bytes);
    p2sh_addr(&redeem_hash, script_magicbyte)
}

/// Converts a scriptPubKey to its address, recognizing `P2PKH`,
/// `P2SH`, and `P2WPKH` templates.
pub fn script_to_addr(
    script_bytes: &[u8],
    magicbyte: u8,
    script_magicbyte: u8,
    segwit_hrp: Option<&str>,
) -> Result<String, Error> {
    let script = Script::deserialize(script_bytes)?;
    match script.classify()? {
        ScriptTemplate::P2pkh(hash) => Ok(p2pkh_addr(&hash, magicbyte)),
        ScriptTemplate::P2sh(hash) => Ok(p2sh_addr(&hash, script_magicbyte)),
        ScriptTemplate::P2wpkh(hash) => {
            let hrp = segwit_hrp.ok_or(Error::UnsupportedFeature("segwit disabled for this coin"))?;
            p2wpkh_addr(&hash, hrp)
        }
    }
}

/// Converts an address back to its scriptPubKey, recognizing
/// Base58Check `P2PKH`/`P2SH` and Bech32 `P2WPKH` forms.
pub fn addr_to_script(
    addr: &str,
    magicbyte: u8,
    script_magicbyte: u8,
    segwit_hrp: Option<&str>,
) -> Result<Script, Error> {
    if let Some(hrp) = segwit_hrp {
        if let Ok((decoded_hrp, witver, program)) = multicoin_encoding::segwit_decode(addr) {
            if decoded_hrp == hrp && witver == 0 && program.len() == 20 {
                let mut h = [0u8; 20];
                h.copy_from_slice(&program);
                return Ok(script::p2wpkh_script(&h));
            }
            return Err(Error::InvalidEncoding("segwit address HRP or program mismatch"));
        }
    }
    let payload = multicoin_encoding::base58check_decode(addr)?;
    if payload.len() != 21 {
        return Err(Error::InvalidEncoding("decoded address payload is not 21 bytes"));
    }
    let version = payload[0];
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    if version == magicbyte {
        Ok(script::p2pkh_script(&hash))
    } else if version == script_magicbyte {
        Ok(script::p2sh_script(&hash))
    } else {
        Err(Error::InvalidEncoding("address version byte matches neither P2PKH nor P2SH"))
    }
}

/// Computes the `P2SH` address of a redeem script directly
/// (`p2sh_scriptaddr`): `P2SH(hash160(script))`.
pub fn p2sh_scriptaddr(redeem_script: &Script, script_magicbyte: u8) -> String {
    let bytes = redeem_script.serialize();
    let hash = multicoin_hashes::hash160(&bytes);
    p2sh_addr(&hash, script_magicbyte)
}

/// Returns the hex encoding of a script, matching the conventional
/// human-readable form used when printing redeem scripts.
pub fn script_hex(script: &Script) -> String {
    let bytes = script.serialize();
    bytes.iter().map(|b| alloc::format!("{:02x}", b)).collect::<String>()
}

#[cfg(test)]
mod tests {
    use super::*;

    const BITCOIN_MAGICBYTE: u8 = 0x00;
    const BITCOIN_SCRIPT_MAGICBYTE: u8 = 0x05;

    #[test]
    fn p2pkh_all_zero_hash_matches_known_burn_address() {
        let addr = p2pkh_addr(&[0u8; 20], BITCOIN_MAGICBYTE);
        assert_eq!(addr, "1111111111111111111114oLvT2");
    }

    #[test]
    fn p2pkh_roundtrip_through_script() {
        let hash = [0x01u8; 20];
        let addr = p2pkh_addr(&hash, BITCOIN_MAGICBYTE);
        let script = addr_to_script(&addr, BITCOIN_MAGICBYTE, BITCOIN_SCRIPT_MAGICBYTE, None).unwrap();
        let back = script_to_addr(&script.serialize(), BITCOIN_MAGICBYTE, BITCOIN_SCRIPT_MAGICBYTE, None).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn p2sh_roundtrip_through_script() {
        let hash = [0x02u8; 20];
        let addr = p2sh_addr(&hash, BITCOIN_SCRIPT_MAGICBYTE);
        let script = addr_to_script(&addr, BITCOIN_MAGICBYTE, BITCOIN_SCRIPT_MAGICBYTE, None).unwrap();
        let back = script_to_addr(&script.serialize(), BITCOIN_MAGICBYTE, BITCOIN_SCRIPT_MAGICBYTE, None).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn p2wpkh_roundtrip_with_hrp() {
        let hash = [0x03u8; 20];
        let addr = p2wpkh_addr(&hash, "bc").unwrap();
        let script = addr_to_script(&addr, BITCOIN_MAGICBYTE, BITCOIN_SCRIPT_MAGICBYTE, Some("bc")).unwrap();
        let back = script_to_addr(&script.serialize(), BITCOIN_MAGICBYTE, BITCOIN_SCRIPT_MAGICBYTE, Some("bc")).unwrap();
        assert_eq!(back, addr);
    }

    #[test]
    fn p2wpkh_in_p2sh_matches_manual_construction() {
        let hash = [0x04u8; 20];
        let wrapped = p2wpkh_in_p2sh_addr(&hash, BITCOIN_SCRIPT_MAGICBYTE);
        let redeem = script::p2wpkh_script(&hash);
        let expected = p2sh_scriptaddr(&redeem, BITCOIN_SCRIPT_MAGICBYTE);
        assert_eq!(wrapped, expected);
    }
}
