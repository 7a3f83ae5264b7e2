// SPDX-License-Identifier: CC0-1.0

//! Signature hash algorithms: the legacy pre-BIP141 algorithm and the
//! BIP143 witness v0 algorithm, including the `SIGHASH_ANYONECANPAY`,
//! `SIGHASH_NONE`, and `SIGHASH_SINGLE` flag combinations.

use alloc::vec::Vec;

use crate::transaction::{TxOutput, Transaction};
use crate::varint;
use crate::Error;

pub const SIGHASH_ALL: u32 = 0x01;
pub const SIGHASH_NONE: u32 = 0x02;
pub const SIGHASH_SINGLE: u32 = 0x03;
pub const SIGHASH_ANYONECANPAY: u32 = 0x80;

fn base_type(sighash_type: u32) -> u32 {
    sighash_type & 0x1f
}

fn anyone_can_pay(sighash_type: u32) -> bool {
    sighash_type & SIGHASH_ANYONECANPAY != 0
}

/// Computes the legacy (pre-segwit) signature hash for input `index`,
/// given the scriptCode of the output it spends.
///
/// Returns the BIP62-documented degenerate value `0x00..01` (as a
/// 32-byte big-endian-looking constant, least significant byte set)
/// when `SIGHASH_SINGLE` is requested for an input with no
/// corresponding output — the historic quirk every implementation
/// must reproduce for consensus compatibility.
pub fn legacy_sighash(
    tx: &Transaction,
    index: usize,
    script_code: &[u8],
    sighash_type: u32,
) -> Result<[u8; 32], Error> {
    if index >= tx.inputs.len() {
        return Err(Error::InvalidTransaction("sighash input index out of range"));
    }
    let base = base_type(sighash_type);
    if base == SIGHASH_SINGLE && index >= tx.outputs.len() {
        let mut degenerate = [0u8; 32];
        degenerate[0] = 1;
        return Ok(degenerate);
    }

    let mut working = tx.clone();
    for (i, input) in working.inputs.iter_mut().enumerate() {
        input.script_sig = if i == index { script_code.to_vec() } else { Vec::new() };
        input.witness = Vec::new();
    }

    if base == SIGHASH_NONE {
        working.outputs.clear();
        for (i, input) in working.inputs.iter_mut().enumerate() {
            if i != index {
                input.sequence = 0;
            }
        }
    } else if base == SIGHASH_SINGLE {
        working.outputs.truncate(index + 1);
        for output in working.outputs.iter_mut().take(index) {
            output.value = u64::MAX;
            output.script_pubkey = Vec::new();
        }
        for (i, input) in working.inputs.iter_mut().enumerate() {
            if i != index {
                input.sequence = 0;
            }
        }
    }

    if anyone_can_pay(sighash_type) {
        let only = working.inputs[index].clone();
        working.inputs = alloc::vec![only];
    }

    let mut preimage = working.serialize_legacy();
    preimage.extend_from_slice(&sighash_type.to_le_bytes());
    Ok(multicoin_hashes::bin_dbl_sha256(&preimage))
}

fn serialize_output(output: &TxOutput) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(&output.value.to_le_bytes());
    varint::encode(output.script_pubkey.len() as u64, &mut out);
    out.extend_from_slice(&output.script_pubkey);
    out
}

/// Computes the BIP143 witness v0 signature hash for input `index`.
///
/// `script_code` is the scriptCode for the output being spent (for a
/// plain `P2WPKH` input this is the `P2PKH`-shaped script over the same
/// hash160, not the two-byte `OP_0 <hash>` scriptPubKey itself).
pub fn bip143_sighash(
    tx: &Transaction,
    index: usize,
    script_code: &[u8],
    value: u64,
    sighash_type: u32,
) -> Result<[u8; 32], Error> {
    let input = tx
        .inputs
        .get(index)
        .ok_or(Error::InvalidTransaction("sighash input index out of range"))?;
    let base = base_type(sighash_type);
    let anyone = anyone_can_pay(sighash_type);

    let hash_prevouts = if anyone {
        [0u8; 32]
    } else {
        let mut buf = Vec::with_capacity(tx.inputs.len() * 36);
        for inp in &tx.inputs {
            buf.extend_from_slice(&inp.prev_txid);
            buf.extend_from_slice(&inp.prev_vout.to_le_bytes());
        }
        multicoin_hashes::bin_dbl_sha256(&buf)
    };

    let hash_sequence = if !anyone && base != SIGHASH_SINGLE && base != SIGHASH_NONE {
        let mut buf = Vec::with_capacity(tx.inputs.len() * 4);
        for inp in &tx.inputs {
            buf.extend_from_slice(&inp.sequence.to_le_bytes());
        }
        multicoin_hashes::bin_dbl_sha256(&buf)
    } else {
        [0u8; 32]
    };

    let hash_outputs = if base != SIGHASH_SINGLE && base != SIGHASH_NONE {
        let mut buf = Vec::new();
        for out in &tx.outputs {
            buf.extend_from_slice(&serialize_output(out));
        }
        multicoin_hashes::bin_dbl_sha256(&buf)
    } else if base == SIGHASH_SINGLE && index < tx.outputs.len() {
        multicoin_hashes::bin_dbl_sha256(&serialize_output(&tx.outputs[index]))
    } else {
        [0u8; 32]
    };

    let mut preimage = Vec::new();
    preimage.extend_from_slice(&tx.version.to_le_bytes());
    preimage.extend_from_slice(&hash_prevouts);
    preimage.extend_from_slice(&hash_sequence);
    preimage.extend_from_slice(&input.prev_txid);
    preimage.extend_from_slice(&input.prev_vout.to_le_bytes());
    varint::encode(script_code.len() as u64, &mut preimage);
    preimage.extend_from_slice(script_code);
    preimage.extend_from_slice(&value.to_le_bytes());
    preimage.extend_from_slice(&input.sequence.to_le_bytes());
    preimage.extend_from_slice(&hash_outputs);
    preimage.extend_from_slice(&tx.locktime.to_le_bytes());
    preimage.extend_from_slice(&sighash_type.to_le_bytes());

    Ok(multicoin_hashes::bin_dbl_sha256(&preimage))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script;
    use crate::transaction::TxInput;

    fn sample_tx() -> Transaction {
        let mut tx = Transaction::new(1, 0);
        tx.inputs.push(TxInput::new([0x11u8; 32], 0));
        tx.inputs.push(TxInput::new([0x22u8; 32], 1));
        tx.outputs.push(TxOutput {
            value: 100_000,
            script_pubkey: script::p2pkh_script(&[0xaa; 20]).serialize(),
        });
        tx.outputs.push(TxOutput {
            value: 200_000,
            script_pubkey: script::p2pkh_script(&[0xbb; 20]).serialize(),
        });
        tx
    }

    #[test]
    fn legacy_all_is_deterministic_and_depends_on_script_code() {
        let tx = sample_tx();
        let script_code = script::p2pkh_script(&[0xcc; 20]).serialize();
        let h1 = legacy_sighash(&tx, 0, &script_code, SIGHASH_ALL).unwrap();
        let h2 = legacy_sighash(&tx, 0, &script_code, SIGHASH_ALL).unwrap();
        assert_eq!(h1, h2);
        let other_script = script::p2pkh_script(&[0xdd; 20]).serialize();
        let h3 = legacy_sighash(&tx, 0, &other_script, SIGHASH_ALL).unwrap();
        assert_ne!(h1, h3);
    }

    #[test]
    fn legacy_single_out_of_range_returns_degenerate_hash() {
        let mut tx = sample_tx();
        tx.inputs.push(TxInput::new([0x33u8; 32], 2));
        let script_code = script::p2pkh_script(&[0xcc; 20]).serialize();
        let h = legacy_sighash(&tx, 2, &script_code, SIGHASH_SINGLE).unwrap();
        let mut expected = [0u8; 32];
        expected[0] = 1;
        assert_eq!(h, expected);
    }

    #[test]
    fn bip143_depends_on_value() {
        let tx = sample_tx();
        let script_code = script::p2pkh_script(&[0xcc; 20]).serialize();
        let h1 = bip143_sighash(&tx, 0, &script_code, 100_000, SIGHASH_ALL).unwrap();
        let h2 = bip143_sighash(&tx, 0, &script_code, 999_999, SIGHASH_ALL).unwrap();
        assert_ne!(h1, h2);
    }

    #[test]
    fn bip143_anyonecanpay_ignores_other_inputs() {
        let tx_a = sample_tx();
        let mut tx_b = sample_tx();
        tx_b.inputs[1].prev_vout = 99;
        let script_code = script::p2pkh_script(&[0xcc; 20]).serialize();
        let flags = SIGHASH_ALL | SIGHASH_ANYONECANPAY;
        let h_a = bip143_sighash(&tx_a, 0, &script_code, 100_000, flags).unwrap();
        let h_b = bip143_sighash(&tx_b, 0, &script_code, 100_000, flags).unwrap();
        assert_eq!(h_a, h_b);
    }
}
