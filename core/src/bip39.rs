// SPDX-License-Identifier: CC0-1.0

//! BIP39 mnemonic-to-seed derivation.
//!
//! This core treats the mnemonic words as an opaque passphrase-
//! equivalent byte string: it does not validate word-list membership,
//! reproduce a wordlist, or verify the embedded checksum. Seed
//! derivation is the only operation offered.

use alloc::string::String;

use zeroize::Zeroize;

const PBKDF2_ITERATIONS: u32 = 2048;
const SEED_LEN: usize = 64;

/// Derives the 64-byte BIP39 seed from a mnemonic phrase and an
/// optional passphrase, via `PBKDF2-HMAC-SHA512(password = NFKD(
/// mnemonic), salt = "mnemonic" || NFKD(passphrase), iterations =
/// 2048)`.
///
/// Callers are responsible for any Unicode normalization; this
/// function hashes the bytes given to it verbatim.
pub fn mnemonic_to_seed(mnemonic: &str, passphrase: &str) -> [u8; SEED_LEN] {
    let mut salt = String::with_capacity(8 + passphrase.len());
    salt.push_str("mnemonic");
    salt.push_str(passphrase);
    let mut derived = multicoin_hashes::pbkdf2_hmac_sha512(
        mnemonic.as_bytes(),
        salt.as_bytes(),
        PBKDF2_ITERATIONS,
        SEED_LEN,
    );
    let mut seed = [0u8; SEED_LEN];
    seed.copy_from_slice(&derived);
    derived.zeroize();
    salt.zeroize();
    seed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_is_deterministic_and_depends_on_passphrase() {
        let mnemonic = "shield industry dose drink true aerobic dose crumble orient skate doctor spike";
        let seed_no_pass = mnemonic_to_seed(mnemonic, "");
        let seed_no_pass_again = mnemonic_to_seed(mnemonic, "");
        assert_eq!(seed_no_pass, seed_no_pass_again);

        let seed_with_pass = mnemonic_to_seed(mnemonic, "TREZOR");
        assert_ne!(seed_no_pass, seed_with_pass);
        assert_eq!(seed_no_pass.len(), 64);
    }

    #[test]
    fn different_mnemonics_give_different_seeds() {
        let seed_a = mnemonic_to_seed("abandon abandon abandon", "");
        let seed_b = mnemonic_to_seed("abandon abandon ability", "");
        assert_ne!(seed_a, seed_b);
    }

    #[test]
    fn literal_vector_empty_passphrase() {
        let mnemonic =
            "shield industry dose token network define slow under omit castle dinosaur afford";
        let seed = mnemonic_to_seed(mnemonic, "");
        let expected = hex_literal::hex!(
            "e1a252dd56d1ed84dd8264e7d6dc4949a47f285bc4ae6d0c8ae8461b36d6abda7d02a43e033d83ae26149038cd631055f9e72e3c727e4c75b4ffe5d18e584f55"
        );
        assert_eq!(seed, expected);
    }
}
