// SPDX-License-Identifier: CC0-1.0

//! Transaction (de)serialization: legacy format and BIP141/BIP144
//! segregated witness format, `txid`/`wtxid` computation, and varint
//! plumbing via [`crate::varint`].

use alloc::string::String;
use alloc::vec::Vec;

use crate::script::Script;
use crate::varint;
use crate::Error;

const SEGWIT_MARKER: u8 = 0x00;
const SEGWIT_FLAG: u8 = 0x01;

/// A transaction input: the outpoint it spends, its scriptSig, its
/// sequence number, and (if this is a segwit transaction) its witness
/// stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxInput {
    /// The previous transaction's id, in wire byte order (the reverse
    /// of the conventional big-endian display hex).
    pub prev_txid: [u8; 32],
    pub prev_vout: u32,
    pub script_sig: Vec<u8>,
    pub sequence: u32,
    pub witness: Vec<Vec<u8>>,
}

impl TxInput {
    pub fn new(prev_txid: [u8; 32], prev_vout: u32) -> Self {
        TxInput {
            prev_txid,
            prev_vout,
            script_sig: Vec::new(),
            sequence: 0xffff_ffff,
            witness: Vec::new(),
        }
    }
}

/// A transaction output: its value in satoshis and its scriptPubKey.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxOutput {
    pub value: u64,
    pub script_pubkey: Vec<u8>,
}

/// A full Bitcoin-family transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub version: i32,
    pub inputs: Vec<TxInput>,
    pub outputs: Vec<TxOutput>,
    pub locktime: u32,
}

impl Transaction {
    pub fn new(version: i32, locktime: u32) -> Self {
        Transaction {
            version,
            inputs: Vec::new(),
            outputs: Vec::new(),
            locktime,
        }
    }

    fn has_witness(&self) -> bool {
        self.inputs.iter().any(|i| !i.witness.is_empty())
    }

    /// Serializes the transaction. Uses the BIP141/BIP144 witness
    /// format (marker/flag plus per-input witness stacks) whenever any
    /// input carries witness data, and the legacy format otherwise.
    pub fn serialize(&self) -> Vec<u8> {
        let witness = self.has_witness();
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_le_bytes());
        if witness {
            out.push(SEGWIT_MARKER);
            out.push(SEGWIT_FLAG);
        }
        varint::encode(self.inputs.len() as u64, &mut out);
        for input in &self.inputs {
            out.extend_from_slice(&input.prev_txid);
            out.extend_from_slice(&input.prev_vout.to_le_bytes());
            varint::encode(input.script_sig.len() as u64, &mut out);
            out.extend_from_slice(&input.script_sig);
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }
        varint::encode(self.outputs.len() as u64, &mut out);
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            varint::encode(output.script_pubkey.len() as u64, &mut out);
            out.extend_from_slice(&output.script_pubkey);
        }
        if witness {
            for input in &self.inputs {
                varint::encode(input.witness.len() as u64, &mut out);
                for item in &input.witness {
                    varint::encode(item.len() as u64, &mut out);
                    out.extend_from_slice(item);
                }
            }
        }
        out.extend_from_slice(&self.locktime.to_le_bytes());
        out
    }

    /// Serializes the legacy, witness-stripped form used by `txid`
    /// computation and legacy sighash.
    pub fn serialize_legacy(&self) -> Vec<u8> {
        let mut out = Vec::new();
        out.extend_from_slice(&self.version.to_le_bytes());
        varint::encode(self.inputs.len() as u64, &mut out);
        for input in &self.inputs {
            out.extend_from_slice(&input.prev_txid);
            out.extend_from_slice(&input.prev_vout.to_le_bytes());
            varint::encode(input.script_sig.len() as u64, &mut out);
            out.extend_from_slice(&input.script_sig);
            out.extend_from_slice(&input.sequence.to_le_bytes());
        }
        varint::encode(self.outputs.len() as u64, &mut out);
        for output in &self.outputs {
            out.extend_from_slice(&output.value.to_le_bytes());
            varint::encode(output.script_pubkey.len() as u64, &mut out);
            out.extend_from_slice(&output.script_pubkey);
        }
        out.extend_from_slice(&self.locktime.to_le_bytes());
        out
    }

    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let mut i = 0usize;
        let version = read_i32(bytes, &mut i)?;
        let mut witness = false;
        if bytes.get(i) == Some(&SEGWIT_MARKER) {
            let flag = *bytes
                .get(i + 1)
                .ok_or(Error::InvalidTransaction("truncated segwit flag"))?;
            if flag != SEGWIT_FLAG {
                return Err(Error::InvalidTransaction("unsupported segwit flag"));
            }
            witness = true;
            i += 2;
        }
        let input_count = varint::decode(bytes, &mut i)?;
        let mut inputs = Vec::with_capacity(input_count as usize);
        for _ in 0..input_count {
            let mut prev_txid = [0u8; 32];
            prev_txid.copy_from_slice(read(bytes, &mut i, 32)?);
            let prev_vout = read_u32(bytes, &mut i)?;
            let script_len = varint::decode(bytes, &mut i)? as usize;
            let script_sig = read(bytes, &mut i, script_len)?.to_vec();
            let sequence = read_u32(bytes, &mut i)?;
            inputs.push(TxInput {
                prev_txid,
                prev_vout,
                script_sig,
                sequence,
                witness: Vec::new(),
            });
        }
        let output_count = varint::decode(bytes, &mut i)?;
        let mut outputs = Vec::with_capacity(output_count as usize);
        for _ in 0..output_count {
            let value = read_u64(bytes, &mut i)?;
            let script_len = varint::decode(bytes, &mut i)? as usize;
            let script_pubkey = read(bytes, &mut i, script_len)?.to_vec();
            outputs.push(TxOutput { value, script_pubkey });
        }
        if witness {
            for input in inputs.iter_mut() {
                let item_count = varint::decode(bytes, &mut i)?;
                let mut stack = Vec::with_capacity(item_count as usize);
                for _ in 0..item_count {
                    let len = varint::decode(bytes, &mut i)? as usize;
                    stack.push(read(bytes, &mut i, len)?.to_vec());
                }
                input.witness = stack;
            }
        }
        let locktime = read_u32(bytes, &mut i)?;
        if i != bytes.len() {
            return Err(Error::InvalidTransaction("trailing bytes after locktime"));
        }
        Ok(Transaction {
            version,
            inputs,
            outputs,
            locktime,
        })
    }

    /// The transaction id: double-SHA256 of the legacy serialization,
    /// in wire byte order (matching `prev_txid`, not display order).
    pub fn txid(&self) -> [u8; 32] {
        multicoin_hashes::bin_dbl_sha256(&self.serialize_legacy())
    }

    /// The witness transaction id: double-SHA256 of the full
    /// (possibly witness-carrying) serialization.
    pub fn wtxid(&self) -> [u8; 32] {
        multicoin_hashes::bin_dbl_sha256(&self.serialize())
    }

    /// The conventional big-endian display form of `txid`.
    pub fn txid_hex(&self) -> String {
        reversed_hex(&self.txid())
    }

    /// Parses an output's scriptPubKey into a structured [`Script`].
    pub fn output_script(&self, index: usize) -> Result<Script, Error> {
        let output = self
            .outputs
            .get(index)
            .ok_or(Error::InvalidTransaction("output index out of range"))?;
        Script::deserialize(&output.script_pubkey)
    }
}

fn reversed_hex(bytes: &[u8; 32]) -> String {
    bytes.iter().rev().map(|b| alloc::format!("{:02x}", b)).collect()
}

fn read<'a>(bytes: &'a [u8], i: &mut usize, len: usize) -> Result<&'a [u8], Error> {
    if *i + len > bytes.len() {
        return Err(Error::InvalidTransaction("read overruns transaction buffer"));
    }
    let slice = &bytes[*i..*i + len];
    *i += len;
    Ok(slice)
}

fn read_u32(bytes: &[u8], i: &mut usize) -> Result<u32, Error> {
    let b = read(bytes, i, 4)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

fn read_i32(bytes: &[u8], i: &mut usize) -> Result<i32, Error> {
    read_u32(bytes, i).map(|v| v as i32)
}

fn read_u64(bytes: &[u8], i: &mut usize) -> Result<u64, Error> {
    let b = read(bytes, i, 8)?;
    let mut arr = [0u8; 8];
    arr.copy_from_slice(b);
    Ok(u64::from_le_bytes(arr))
}
