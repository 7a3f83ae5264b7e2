// SPDX-License-Identifier: CC0-1.0

//! Bitcoin script: opcode constants, minimal-pushdata serialization,
//! and the handful of templates (`P2PKH`, `P2SH`, `P2WPKH`, bare and
//! wrapped multisig) this core constructs and recognizes.

use alloc::vec::Vec;

use crate::Error;

pub const OP_0: u8 = 0x00;
pub const OP_PUSHDATA1: u8 = 0x4c;
pub const OP_PUSHDATA2: u8 = 0x4d;
pub const OP_PUSHDATA4: u8 = 0x4e;
pub const OP_1NEGATE: u8 = 0x4f;
pub const OP_1: u8 = 0x51;
pub const OP_16: u8 = 0x60;
pub const OP_DUP: u8 = 0x76;
pub const OP_EQUAL: u8 = 0x87;
pub const OP_EQUALVERIFY: u8 = 0x88;
pub const OP_HASH160: u8 = 0xa9;
pub const OP_CHECKSIG: u8 = 0xac;
pub const OP_CHECKMULTISIG: u8 = 0xae;

/// One element of a parsed script: either an opcode with no inline
/// data, or a data push (including the `OP_0`/`OP_1`..`OP_16` small
/// integer pushes, which carry no payload bytes of their own).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Op {
    /// A non-push opcode.
    Opcode(u8),
    /// A data push, with the exact bytes pushed to the stack.
    Push(Vec<u8>),
}

/// An ordered sequence of script operations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Script(pub Vec<Op>);

impl Script {
    pub fn new() -> Self {
        Script(Vec::new())
    }

    pub fn push_opcode(mut self, op: u8) -> Self {
        self.0.push(Op::Opcode(op));
        self
    }

    pub fn push_data(mut self, data: Vec<u8>) -> Self {
        self.0.push(Op::Push(data));
        self
    }

    /// Serializes to the raw script byte string, using the minimal
    /// pushdata opcode for every data push.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for op in &self.0 {
            match op {
                Op::Opcode(code) => out.push(*code),
                Op::Push(data) => push_minimal(&mut out, data),
            }
        }
        out
    }

    /// Parses a raw script byte string, rejecting non-minimal pushes
    /// and truncated push lengths.
    pub fn deserialize(bytes: &[u8]) -> Result<Self, Error> {
        let mut ops = Vec::new();
        let mut i = 0usize;
        while i < bytes.len() {
            let opcode = bytes[i];
            i += 1;
            match opcode {
                0x01..=0x4b => {
                    let len = opcode as usize;
                    let data = take(bytes, &mut i, len)?;
                    ops.push(Op::Push(data));
                }
                OP_PUSHDATA1 => {
                    let len = take(bytes, &mut i, 1)?[0] as usize;
                    if len <= 0x4b {
                        return Err(Error::InvalidScript("non-minimal OP_PUSHDATA1"));
                    }
                    let data = take(bytes, &mut i, len)?;
                    ops.push(Op::Push(data));
                }
                OP_PUSHDATA2 => {
                    let raw = take(bytes, &mut i, 2)?;
                    let len = u16::from_le_bytes([raw[0], raw[1]]) as usize;
                    if len <= 0xff {
                        return Err(Error::InvalidScript("non-minimal OP_PUSHDATA2"));
                    }
                    let data = take(bytes, &mut i, len)?;
                    ops.push(Op::Push(data));
                }
                OP_PUSHDATA4 => {
                    let raw = take(bytes, &mut i, 4)?;
                    let len = u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]) as usize;
                    if len <= 0xffff {
                        return Err(Error::InvalidScript("non-minimal OP_PUSHDATA4"));
                    }
                    let data = take(bytes, &mut i, len)?;
                    ops.push(Op::Push(data));
                }
                other => ops.push(Op::Opcode(other)),
            }
        }
        Ok(Script(ops))
    }

    /// Interprets `OP_0`/`OP_1`..`OP_16` as small integers, for parsing
    /// multisig `m`-of-`n` threshold scripts.
    pub fn small_int(op: &Op) -> Option<u8> {
        match op {
            Op::Opcode(OP_0) => Some(0),
            Op::Opcode(code @ OP_1..=OP_16) => Some(code - OP_1 + 1),
            _ => None,
        }
    }

    /// The opcode encoding a small integer `0..=16`.
    pub fn small_int_opcode(n: u8) -> Op {
        if n == 0 {
            Op::Opcode(OP_0)
        } else {
            Op::Opcode(OP_1 + n - 1)
        }
    }
}

fn take(bytes: &[u8], i: &mut usize, len: usize) -> Result<Vec<u8>, Error> {
    if *i + len > bytes.len() {
        return Err(Error::InvalidTransaction("script push overruns buffer"));
    }
    let data = bytes[*i..*i + len].to_vec();
    *i += len;
    Ok(data)
}

fn push_minimal(out: &mut Vec<u8>, data: &[u8]) {
    let len = data.len();
    if len <= 0x4b {
        out.push(len as u8);
    } else if len <= 0xff {
        out.push(OP_PUSHDATA1);
        out.push(len as u8);
    } else if len <= 0xffff {
        out.push(OP_PUSHDATA2);
        out.extend_from_slice(&(len as u16).to_le_bytes());
    } else {
        out.push(OP_PUSHDATA4);
        out.extend_from_slice(&(len as u32).to_le_bytes());
    }
    out.extend_from_slice(data);
}

/// Builds a standard `P2PKH` scriptPubKey:
/// `OP_DUP OP_HASH160 <hash160> OP_EQUALVERIFY OP_CHECKSIG`.
pub fn p2pkh_script(hash160: &[u8; 20]) -> Script {
    Script::new()
        .push_opcode(OP_DUP)
        .push_opcode(OP_HASH160)
        .push_data(hash160.to_vec())
        .push_opcode(OP_EQUALVERIFY)
        .push_opcode(OP_CHECKSIG)
}

/// Builds a standard `P2SH` scriptPubKey: `OP_HASH160 <hash160>
/// OP_EQUAL`.
pub fn p2sh_script(hash160: &[u8; 20]) -> Script {
    Script::new()
        .push_opcode(OP_HASH160)
        .push_data(hash160.to_vec())
        .push_opcode(OP_EQUAL)
}

/// Builds a segwit v0 P2WPKH scriptPubKey: `OP_0 <hash160>`.
pub fn p2wpkh_script(hash160: &[u8; 20]) -> Script {
    Script::new()
        .push_opcode(OP_0)
        .push_data(hash160.to_vec())
}

/// Builds an `m`-of-`n` bare multisig redeem script:
/// `OP_m <pubkey>... OP_n OP_CHECKMULTISIG`.
pub fn multisig_script(m: u8, pubkeys: &[Vec<u8>]) -> Result<Script, Error> {
    let n = pubkeys.len();
    if m == 0 || (m as usize) > n || n > 16 {
        return Err(Error::InvalidScript("multisig m/n out of range 1..=16"));
    }
    let mut script = Script::new().push_opcode(
        match Script::small_int_opcode(m) {
            Op::Opcode(code) => code,
            Op::Push(_) => unreachable!(),
        },
    );
    for pk in pubkeys {
        script = script.push_data(pk.clone());
    }
    let n_op = match Script::small_int_opcode(n as u8) {
        Op::Opcode(code) => code,
        Op::Push(_) => unreachable!(),
    };
    Ok(script.push_opcode(n_op).push_opcode(OP_CHECKMULTISIG))
}

/// The scriptPubKey templates this core recognizes when deciding how
/// to sign an input. A `P2sh` match only identifies the output as
/// pay-to-script-hash; it does not by itself say what the redeem
/// script is — callers that sign `P2SH`-wrapped `P2WPKH` inputs rebuild
/// the redeem script from the signing key and check its hash against
/// the one named here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptTemplate {
    P2pkh([u8; 20]),
    P2sh([u8; 20]),
    P2wpkh([u8; 20]),
}

impl Script {
    /// Recognizes a scriptPubKey as one of the `P2PKH`, `P2SH`, or
    /// native `P2WPKH` templates.
    pub fn classify(&self) -> Result<ScriptTemplate, Error> {
        match self.0.as_slice() {
            [Op::Opcode(OP_DUP), Op::Opcode(OP_HASH160), Op::Push(hash), Op::Opcode(OP_EQUALVERIFY), Op::Opcode(OP_CHECKSIG)]
                if hash.len() == 20 =>
            {
                let mut h = [0u8; 20];
                h.copy_from_slice(hash);
                Ok(ScriptTemplate::P2pkh(h))
            }
            [Op::Opcode(OP_HASH160), Op::Push(hash), Op::Opcode(OP_EQUAL)] if hash.len() == 20 => {
                let mut h = [0u8; 20];
                h.copy_from_slice(hash);
                Ok(ScriptTemplate::P2sh(h))
            }
            [Op::Opcode(OP_0), Op::Push(program)] if program.len() == 20 => {
                let mut h = [0u8; 20];
                h.copy_from_slice(program);
                Ok(ScriptTemplate::P2wpkh(h))
            }
            _ => Err(Error::UnsupportedScript("unrecognized scriptPubKey template")),
        }
    }
}
