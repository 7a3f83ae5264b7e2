// SPDX-License-Identifier: CC0-1.0

//! Assembling signatures into scriptSigs and witnesses: single-key
//! `P2PKH`/`P2WPKH` signing, multisig signature collection, and input
//! verification.

use alloc::vec::Vec;

use crate::ecdsa::{self, Digest};
use crate::key::{PublicKey, SecretKey};
use crate::script::{Op, Script, ScriptTemplate};
use crate::sighash::{self, SIGHASH_ALL};
use crate::transaction::Transaction;
use crate::Error;

/// Signs input `index` by inferring its signing path from the previous
/// output's scriptPubKey: `P2PKH` gets a legacy `<sig> <pubkey>`
/// scriptSig, native `P2WPKH` gets an empty scriptSig and a
/// `[sig, pubkey]` witness, and `P2SH` is assumed to wrap a `P2WPKH`
/// redeem script matching `priv_key` — its hash160 is checked against
/// the `P2SH` hash before signing.
pub fn sign_input(
    tx: &mut Transaction,
    index: usize,
    priv_key: &SecretKey,
    prev_script_pubkey: &[u8],
    value: u64,
    sighash_type: u32,
) -> Result<(), Error> {
    let template = Script::deserialize(prev_script_pubkey)?.classify()?;
    match template {
        ScriptTemplate::P2pkh(_) => {
            sign_p2pkh_input(tx, index, priv_key, prev_script_pubkey, sighash_type)
        }
        ScriptTemplate::P2wpkh(_) => {
            sign_p2wpkh_input(tx, index, priv_key, value, sighash_type)
        }
        ScriptTemplate::P2sh(p2sh_hash) => {
            let redeem_hash =
                multicoin_hashes::hash160(&crate::script::p2wpkh_script(
                    &multicoin_hashes::hash160(&priv_key.public_key().to_compressed()),
                )
                .serialize());
            if redeem_hash != p2sh_hash {
                return Err(Error::InvalidKey(
                    "signing key does not match this P2SH-P2WPKH output",
                ));
            }
            sign_p2wpkh_in_p2sh_input(tx, index, priv_key, value, sighash_type)
        }
    }
}

/// Signs input `index` of a legacy (non-segwit) `P2PKH` spend in
/// place, setting its scriptSig to `<sig> <pubkey>`.
pub fn sign_p2pkh_input(
    tx: &mut Transaction,
    index: usize,
    priv_key: &SecretKey,
    script_code: &[u8],
    sighash_type: u32,
) -> Result<(), Error> {
    let digest = sighash::legacy_sighash(tx, index, script_code, sighash_type)?;
    let mut sig = ecdsa::sign_der(&Digest(digest), priv_key)?;
    sig.push(sighash_type as u8);
    let pubkey = priv_key.public_key().to_compressed().to_vec();
    let script_sig = Script::new().push_data(sig).push_data(pubkey);
    tx.inputs[index].script_sig = script_sig.serialize();
    Ok(())
}

/// Signs input `index` of a `P2WPKH` spend in place, setting its
/// witness stack to `[<sig>, <pubkey>]` and clearing its scriptSig.
pub fn sign_p2wpkh_input(
    tx: &mut Transaction,
    index: usize,
    priv_key: &SecretKey,
    value: u64,
    sighash_type: u32,
) -> Result<(), Error> {
    let hash160 = multicoin_hashes::hash160(&priv_key.public_key().to_compressed());
    let script_code = crate::script::p2pkh_script(&hash160).serialize();
    let digest = sighash::bip143_sighash(tx, index, &script_code, value, sighash_type)?;
    let mut sig = ecdsa::sign_der(&Digest(digest), priv_key)?;
    sig.push(sighash_type as u8);
    let pubkey = priv_key.public_key().to_compressed().to_vec();
    tx.inputs[index].script_sig = Vec::new();
    tx.inputs[index].witness = alloc::vec![sig, pubkey];
    Ok(())
}

/// Signs input `index` of a `P2SH`-wrapped `P2WPKH` spend in place,
/// setting its scriptSig to a single push of the `OP_0 <hash160(pubkey)>`
/// redeem script and its witness stack to `[<sig>, <pubkey>]`.
pub fn sign_p2wpkh_in_p2sh_input(
    tx: &mut Transaction,
    index: usize,
    priv_key: &SecretKey,
    value: u64,
    sighash_type: u32,
) -> Result<(), Error> {
    let hash160 = multicoin_hashes::hash160(&priv_key.public_key().to_compressed());
    let redeem_script = crate::script::p2wpkh_script(&hash160);
    let redeem_bytes = redeem_script.serialize();
    let script_code = crate::script::p2pkh_script(&hash160).serialize();
    let digest = sighash::bip143_sighash(tx, index, &script_code, value, sighash_type)?;
    let mut sig = ecdsa::sign_der(&Digest(digest), priv_key)?;
    sig.push(sighash_type as u8);
    let pubkey = priv_key.public_key().to_compressed().to_vec();
    tx.inputs[index].script_sig = Script::new().push_data(redeem_bytes).serialize();
    tx.inputs[index].witness = alloc::vec![sig, pubkey];
    Ok(())
}

/// Signs every input of `tx` as a `P2PKH` spend, given parallel slices
/// of private keys and scriptCodes (one pair per input).
pub fn sign_all_p2pkh(
    tx: &mut Transaction,
    keys: &[SecretKey],
    script_codes: &[Vec<u8>],
    sighash_type: u32,
) -> Result<(), Error> {
    if keys.len() != tx.inputs.len() || script_codes.len() != tx.inputs.len() {
        return Err(Error::InvalidTransaction(
            "sign_all_p2pkh needs one key and scriptCode per input",
        ));
    }
    for i in 0..tx.inputs.len() {
        sign_p2pkh_input(tx, i, &keys[i], &script_codes[i], sighash_type)?;
    }
    Ok(())
}

/// Produces one DER signature (with the sighash type byte appended)
/// for a multisig input, without assembling the final scriptSig —
/// callers collect `m` of these from `m`-of-`n` signers before calling
/// [`apply_multisignatures`].
pub fn multisign(
    tx: &Transaction,
    index: usize,
    redeem_script: &[u8],
    priv_key: &SecretKey,
    sighash_type: u32,
) -> Result<Vec<u8>, Error> {
    let digest = sighash::legacy_sighash(tx, index, redeem_script, sighash_type)?;
    let mut sig = ecdsa::sign_der(&Digest(digest), priv_key)?;
    sig.push(sighash_type as u8);
    Ok(sig)
}

/// Assembles a bare or `P2SH`-wrapped multisig scriptSig from
/// previously collected signatures:
/// `OP_0 <sig>... <redeem_script>`.
///
/// The leading `OP_0` is not a push of real data — it works around
/// `OP_CHECKMULTISIG`'s off-by-one stack bug, which always pops one
/// extra item before checking signatures.
pub fn apply_multisignatures(
    tx: &mut Transaction,
    index: usize,
    redeem_script: &[u8],
    signatures: &[Vec<u8>],
) -> Result<(), Error> {
    let mut script = Script::new().push_opcode(crate::script::OP_0);
    for sig in signatures {
        script = script.push_data(sig.clone());
    }
    script = script.push_data(redeem_script.to_vec());
    tx.inputs[index].script_sig = script.serialize();
    Ok(())
}

/// Verifies the signature carried in a signed `P2PKH` or `P2WPKH`
/// input against the output it claims to spend.
pub fn verify_tx_input(
    tx: &Transaction,
    index: usize,
    script_pubkey: &[u8],
    value: u64,
    is_witness: bool,
) -> Result<(), Error> {
    let input = tx
        .inputs
        .get(index)
        .ok_or(Error::InvalidTransaction("verify input index out of range"))?;

    let (sig_with_type, pubkey_bytes) = if is_witness {
        if input.witness.len() != 2 {
            return Err(Error::InvalidTransaction("P2WPKH witness must have 2 items"));
        }
        (input.witness[0].clone(), input.witness[1].clone())
    } else {
        let script_sig = Script::deserialize(&input.script_sig)?;
        match script_sig.0.as_slice() {
            [Op::Push(sig), Op::Push(pubkey)] => (sig.clone(), pubkey.clone()),
            _ => return Err(Error::InvalidScript("expected <sig> <pubkey> scriptSig")),
        }
    };

    if sig_with_type.is_empty() {
        return Err(Error::InvalidSignature("empty signature"));
    }
    let sighash_type = *sig_with_type.last().unwrap() as u32;
    let der = &sig_with_type[..sig_with_type.len() - 1];
    let pubkey = PublicKey::from_bytes(&pubkey_bytes)?;

    let digest = if is_witness {
        let hash160 = multicoin_hashes::hash160(&pubkey_bytes);
        let script_code = crate::script::p2pkh_script(&hash160).serialize();
        sighash::bip143_sighash(tx, index, &script_code, value, sighash_type)?
    } else {
        sighash::legacy_sighash(tx, index, script_pubkey, sighash_type)?
    };

    ecdsa::verify_der(&Digest(digest), der, &pubkey)
}
