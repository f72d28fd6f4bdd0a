//! Sequence-number (SQN) arithmetic and wire encoding.
//!
//! A SQN is logically a 48-bit unsigned integer, partitioned into a 43-bit SEQ counter (the high
//! bits) and a 5-bit IND field (the low bits) used by the USIM to tolerate limited reordering
//! across serving nodes. This module only ever advances SEQ; IND handling is left to the caller
//! (see [`IndPolicy`](crate::config::IndPolicy)).

use crate::error::AkaError;

/// The largest representable SEQ value: `2^43 - 1`.
const MAX_SEQ: u64 = (1u64 << 43) - 1;

/// Encodes a 48-bit SQN value as 6 big-endian bytes, per the wire/storage representation in §3.
pub fn encode_sqn(value: u64) -> [u8; 6] {
    let be = value.to_be_bytes();
    let mut out = [0u8; 6];
    out.copy_from_slice(&be[2..8]);
    out
}

/// Decodes 6 big-endian bytes into a 48-bit SQN value.
pub fn decode_sqn(bytes: &[u8; 6]) -> u64 {
    let mut be = [0u8; 8];
    be[2..8].copy_from_slice(bytes);
    u64::from_be_bytes(be)
}

/// Splits a SQN value into its SEQ (43 bits) and IND (5 bits) components.
pub fn split(value: u64) -> (u64, u8) {
    (value >> 5, (value & 0x1F) as u8)
}

/// Combines a SEQ counter and an IND field back into a SQN value.
///
/// IND is masked to 5 bits; callers must not rely on out-of-range bits surviving the round trip.
pub fn combine(seq: u64, ind: u8) -> u64 {
    (seq << 5) | (ind & 0x1F) as u64
}

/// Advances `value`'s SEQ component by one, preserving its IND component.
///
/// Fails with [`AkaError::SqnExhausted`] if SEQ would overflow its 43-bit range.
pub fn next(value: u64) -> Result<u64, AkaError> {
    let (_, ind) = split(value);
    next_with_ind(value, ind)
}

/// Advances `value`'s SEQ component by one, using the supplied `ind` for the fresh SQN instead of
/// preserving the stored one.
///
/// This implements the §9 IND-allocation open extension: an embedder may hand out distinct IND
/// values per serving node without touching any other part of this crate's contract.
pub fn next_with_ind(value: u64, ind: u8) -> Result<u64, AkaError> {
    let (seq, _) = split(value);

    if seq >= MAX_SEQ {
        return Err(AkaError::SqnExhausted);
    }

    Ok(combine(seq + 1, ind))
}
