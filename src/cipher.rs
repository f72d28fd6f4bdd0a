//! The AES-128 block cipher primitive.
//!
//! This is the only place this crate touches a block cipher directly. It generates a single
//! 128-bit ciphertext block from a single 128-bit key using AES-128 (see
//! [FIPS-197](https://en.wikipedia.org/wiki/FIPS_197)), via the
//! [aes](https://crates.io/crates/aes) crate. No mode, no padding, no IV: the Milenage kernel
//! builds its own chaining out of XORs and rotations around this single primitive.

use aes::cipher::{BlockEncrypt, KeyInit};
use aes::Aes128;

/// Encrypts one 128-bit block under one 128-bit key with AES-128.
///
/// This is `E` in 3GPP TS 35.206: a pure, deterministic function with no side effects. Calling it
/// twice with the same arguments yields byte-identical output.
pub fn e(key: &[u8; 16], block: &[u8; 16]) -> [u8; 16] {
    let cipher = Aes128::new(key.into());

    let mut out = *block;

    cipher.encrypt_block((&mut out).into());

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    /// FIPS-197 Appendix C.1 AES-128 known-answer test.
    #[test]
    fn fips197_known_answer() {
        let key = [
            0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d,
            0x0e, 0x0f,
        ];
        let plain = [
            0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd,
            0xee, 0xff,
        ];
        let expected = [
            0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4,
            0xc5, 0x5a,
        ];

        assert_eq!(e(&key, &plain), expected);
    }

    #[test]
    fn deterministic() {
        let key = [0xAA; 16];
        let block = [0x55; 16];

        assert_eq!(e(&key, &block), e(&key, &block));
    }
}
