// SPDX-License-Identifier: CC0-1.0

//! RFC 6979 deterministic ECDSA signing, verification, and public key
//! recovery over secp256k1.
//!
//! Signing, verification, DER encode/decode, and recovery-id math are
//! all delegated to the `secp256k1` crate, which already implements
//! RFC 6979 nonce generation and BIP62 low-`S` normalization
//! internally; this module adds the Bitcoin wire conventions on top:
//! compact 64-byte `r || s` signatures, the legacy `v ∈ {27..=34}`
//! recovery-id encoding used by `signmessage`/`verifymessage`, and the
//! transaction-level `ecdsa_tx_*` helpers that hash a sighash before
//! signing.

use alloc::vec::Vec;

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId, Signature};
use secp256k1::{Message, Secp256k1};

use crate::key::{PublicKey, SecretKey};
use crate::Error;

/// A 32-byte message digest to be signed or verified. Callers are
/// expected to have already applied the appropriate sighash or
/// double-SHA256 hashing; this type performs no hashing itself.
pub struct Digest(pub [u8; 32]);

fn to_message(digest: &Digest) -> Result<Message, Error> {
    Message::from_digest_slice(&digest.0).map_err(Error::from)
}

/// Produces a deterministic (RFC 6979) ECDSA signature in compact
/// `r || s` form (64 bytes), with `S` normalized to the lower half of
/// the curve order per BIP62.
pub fn sign_raw(digest: &Digest, key: &SecretKey) -> Result<[u8; 64], Error> {
    let secp = Secp256k1::signing_only();
    let msg = to_message(digest)?;
    let sig = secp.sign_ecdsa(&msg, &key.0);
    Ok(sig.serialize_compact())
}

/// Produces a DER-encoded deterministic ECDSA signature.
pub fn sign_der(digest: &Digest, key: &SecretKey) -> Result<Vec<u8>, Error> {
    let secp = Secp256k1::signing_only();
    let msg = to_message(digest)?;
    let sig = secp.sign_ecdsa(&msg, &key.0);
    Ok(sig.serialize_der().to_vec())
}

/// Produces a recoverable signature: compact `r || s` plus a recovery
/// id in `0..=3`.
pub fn sign_recoverable(digest: &Digest, key: &SecretKey) -> Result<([u8; 64], i32), Error> {
    let secp = Secp256k1::signing_only();
    let msg = to_message(digest)?;
    let sig = secp.sign_ecdsa_recoverable(&msg, &key.0);
    let (recid, compact) = sig.serialize_compact();
    Ok((compact, recid.to_i32()))
}

/// Verifies a compact `r || s` signature against a public key.
pub fn verify_raw(digest: &Digest, sig: &[u8; 64], pubkey: &PublicKey) -> Result<(), Error> {
    let secp = Secp256k1::verification_only();
    let msg = to_message(digest)?;
    let signature = Signature::from_compact(sig).map_err(Error::from)?;
    secp.verify_ecdsa(&msg, &signature, &pubkey.0)
        .map_err(Error::from)
}

/// Verifies a DER-encoded signature against a public key.
pub fn verify_der(digest: &Digest, sig: &[u8], pubkey: &PublicKey) -> Result<(), Error> {
    let secp = Secp256k1::verification_only();
    let msg = to_message(digest)?;
    let signature = Signature::from_der(sig).map_err(Error::from)?;
    secp.verify_ecdsa(&msg, &signature, &pubkey.0)
        .map_err(Error::from)
}

/// Recovers the public key that produced a compact recoverable
/// signature over the given digest.
pub fn recover(digest: &Digest, sig: &[u8; 64], recovery_id: i32) -> Result<PublicKey, Error> {
    let secp = Secp256k1::verification_only();
    let msg = to_message(digest)?;
    let recid = RecoveryId::from_i32(recovery_id).map_err(Error::from)?;
    let recoverable = RecoverableSignature::from_compact(sig, recid).map_err(Error::from)?;
    let pk = secp.recover_ecdsa(&msg, &recoverable).map_err(Error::from)?;
    Ok(PublicKey(pk))
}

/// Encodes a recovery id in the legacy `v` convention used by
/// `signmessage`: `27 + recid + (4 if compressed else 0)`.
pub fn legacy_v(recovery_id: i32, compressed: bool) -> u8 {
    27 + recovery_id as u8 + if compressed { 4 } else { 0 }
}

/// Decodes a legacy `v` byte into `(recovery_id, compressed)`.
pub fn decode_legacy_v(v: u8) -> Result<(i32, bool), Error> {
    if !(27..=34).contains(&v) {
        return Err(Error::InvalidSignature("recovery v out of range 27..=34"));
    }
    let compressed = v >= 31;
    let base = if compressed { v - 4 } else { v };
    Ok(((base - 27) as i32, compressed))
}

/// secp256k1's group order `n`, big-endian.
const CURVE_ORDER: [u8; 32] = [
    0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xfe,
    0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36, 0x41, 0x41,
];

/// Subtracts `b` from `a`, both 32-byte big-endian, assuming `a >= b`.
fn be_sub(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut borrow = 0i16;
    for i in (0..32).rev() {
        let diff = a[i] as i16 - b[i] as i16 - borrow;
        if diff < 0 {
            out[i] = (diff + 256) as u8;
            borrow = 1;
        } else {
            out[i] = diff as u8;
            borrow = 0;
        }
    }
    out
}

/// RFC 6979's `bits2octets`: reduces a hash value mod the curve order
/// when it's already the same bit length as the order (true here,
/// since both are 256 bits), so it can be folded into an HMAC key
/// alongside the private scalar.
fn bits2octets(hash: &[u8; 32]) -> [u8; 32] {
    if *hash >= CURVE_ORDER {
        be_sub(hash, &CURVE_ORDER)
    } else {
        *hash
    }
}

/// Computes the RFC 6979 deterministic nonce `k` for a 32-byte message
/// digest and private scalar, expressed as the big-endian bytes the
/// algorithm's HMAC-DRBG produces once it lands inside `[1, n)`.
///
/// `sign_raw`/`sign_der` never call this — they delegate nonce
/// generation to the `secp256k1` crate's own RFC 6979 implementation,
/// which produces the same value but has no way to report it back to
/// the caller. This standalone copy exists only so the published RFC
/// 6979 test vectors (keyed by an arbitrary 32-byte scalar, not
/// necessarily a valid secp256k1 private key) can be checked directly.
pub fn deterministic_k(msg_hash: &[u8; 32], priv_bytes: &[u8; 32]) -> [u8; 32] {
    let h1 = bits2octets(msg_hash);

    let mut v = [0x01u8; 32];
    let mut k = [0x00u8; 32];

    let mut data = Vec::with_capacity(32 + 1 + 32 + 32);
    data.extend_from_slice(&v);
    data.push(0x00);
    data.extend_from_slice(priv_bytes);
    data.extend_from_slice(&h1);
    k = multicoin_hashes::hmac_sha256(&k, &data);
    v = multicoin_hashes::hmac_sha256(&k, &v);

    data.clear();
    data.extend_from_slice(&v);
    data.push(0x01);
    data.extend_from_slice(priv_bytes);
    data.extend_from_slice(&h1);
    k = multicoin_hashes::hmac_sha256(&k, &data);
    v = multicoin_hashes::hmac_sha256(&k, &v);

    loop {
        v = multicoin_hashes::hmac_sha256(&k, &v);
        if v != [0u8; 32] && v < CURVE_ORDER {
            return v;
        }
        data.clear();
        data.extend_from_slice(&v);
        data.push(0x00);
        k = multicoin_hashes::hmac_sha256(&k, &data);
        v = multicoin_hashes::hmac_sha256(&k, &v);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_and_verify_roundtrip() {
        let key = SecretKey::from_bytes(&[0x11; 32]).unwrap();
        let digest = Digest([0x22; 32]);
        let sig = sign_raw(&digest, &key).unwrap();
        let pubkey = key.public_key();
        verify_raw(&digest, &sig, &pubkey).unwrap();
    }

    #[test]
    fn recover_matches_signer_pubkey() {
        let key = SecretKey::from_bytes(&[0x33; 32]).unwrap();
        let digest = Digest([0x44; 32]);
        let (sig, recid) = sign_recoverable(&digest, &key).unwrap();
        let recovered = recover(&digest, &sig, recid).unwrap();
        assert_eq!(recovered, key.public_key());
    }

    #[test]
    fn legacy_v_roundtrip() {
        for recid in 0..4 {
            for compressed in [false, true] {
                let v = legacy_v(recid, compressed);
                let (decoded_recid, decoded_compressed) = decode_legacy_v(v).unwrap();
                assert_eq!(decoded_recid, recid);
                assert_eq!(decoded_compressed, compressed);
            }
        }
    }

    #[test]
    fn rfc6979_vector_zero() {
        // For message hash h = SHA256("0") and priv = encode(0, 256, 32)
        // (32 zero bytes), k must equal 32783320859482229023646250050688
        // 645858316445811207841524283044428614360139869. priv = 0 is not
        // a usable secp256k1 private key, so this exercises
        // `deterministic_k` directly rather than going through
        // `sign_raw`/a `SecretKey`.
        let digest = multicoin_hashes::sha256(b"0");
        let priv_bytes = [0u8; 32];
        let k = deterministic_k(&digest, &priv_bytes);
        let expected =
            hex_literal::hex!("487ab3b9b831a0a439036815b299567ca10f97b1ffd6d8fdf01f1554dcd8885d");
        assert_eq!(k, expected);
    }

    #[test]
    fn rfc6979_vectors_one_and_two() {
        // Same corpus, priv = encode(i, 256, 32) for i = 1, 2, hashing
        // the ASCII decimal digit "1"/"2" rather than the integer.
        let cases: [(u8, &[u8], [u8; 32]); 2] = [
            (
                1,
                b"1",
                hex_literal::hex!(
                    "f24af0377e1b27fbebae63b3bec9b249b5bb0b0ba975896dbf35d79b189d19d3"
                ),
            ),
            (
                2,
                b"2",
                hex_literal::hex!(
                    "9165e4c79e832d82445a50a4a4ec563001e682d6142a5bd6664a0ac25d8759b0"
                ),
            ),
        ];
        for (i, msg, expected) in cases {
            let digest = multicoin_hashes::sha256(msg);
            let mut priv_bytes = [0u8; 32];
            priv_bytes[31] = i;
            assert_eq!(deterministic_k(&digest, &priv_bytes), expected);
        }
    }
}
