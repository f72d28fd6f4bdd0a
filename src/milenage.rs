//! The Milenage kernel.
//!
//! This implements the Milenage algorithm set from 3GPP TS 35.206: the five normal-path output
//! functions {MAC-A, RES, CK, IK, AK} (f1, f2, f3, f4, f5) and the two resynchronization functions
//! {MAC-S, AK*} (f1*, f5*), all built around a single AES-128 block cipher invocation per output
//! (see [`crate::cipher::e`]).
//!
//! The names of each intermediate value (TEMP, OUT1..OUT5, c1..c5, r1..r5) match 3GPP TS 35.206
//! Annex 3 so the derivation can be checked line by line against the specification.

use crate::cipher::e;
use crate::error::AkaError;

/// `c1..c5` from TS 35.206 Annex 3: single-bit-set 128-bit constants XORed in before each of the
/// five AES-128 invocations that produce OUT1..OUT5.
const C1: [u8; 16] = [0u8; 16];
const C2: [u8; 16] = {
    let mut c = [0u8; 16];
    c[15] = 1;
    c
};
const C3: [u8; 16] = {
    let mut c = [0u8; 16];
    c[15] = 2;
    c
};
const C4: [u8; 16] = {
    let mut c = [0u8; 16];
    c[15] = 4;
    c
};
const C5: [u8; 16] = {
    let mut c = [0u8; 16];
    c[15] = 8;
    c
};

/// `r1..r5` from TS 35.206 Annex 3: the left-rotation amount, in bits, applied before each of the
/// five AES-128 invocations.
const R1: u32 = 64;
const R2: u32 = 0;
const R3: u32 = 32;
const R4: u32 = 64;
const R5: u32 = 96;

/// The normal-path Milenage outputs: MAC-A, RES, CK, IK, and the anonymity key AK.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalOutputs {
    pub mac_a: [u8; 8],
    pub res: [u8; 8],
    pub ck: [u8; 16],
    pub ik: [u8; 16],
    pub ak: [u8; 6],
}

/// The resynchronization-path Milenage outputs: MAC-S and the resync anonymity key AK*.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResyncOutputs {
    pub mac_s: [u8; 8],
    pub ak_star: [u8; 6],
}

/// Cyclic left-rotation of a 128-bit value, represented big-endian, by `bits` bits.
///
/// `bits` is always one of the fixed `r1..r5` constants in practice, but the rotation is
/// implemented generally over the full 0..128 range for clarity and testability.
fn rotate_left_128(value: &[u8; 16], bits: u32) -> [u8; 16] {
    let bits = bits % 128;

    if bits == 0 {
        return *value;
    }

    let high = (value[0] as u128) << 120
        | (value[1] as u128) << 112
        | (value[2] as u128) << 104
        | (value[3] as u128) << 96
        | (value[4] as u128) << 88
        | (value[5] as u128) << 80
        | (value[6] as u128) << 72
        | (value[7] as u128) << 64
        | (value[8] as u128) << 56
        | (value[9] as u128) << 48
        | (value[10] as u128) << 40
        | (value[11] as u128) << 32
        | (value[12] as u128) << 24
        | (value[13] as u128) << 16
        | (value[14] as u128) << 8
        | (value[15] as u128);

    high.rotate_left(bits).to_be_bytes()
}

fn xor16(a: &[u8; 16], b: &[u8; 16]) -> [u8; 16] {
    let mut out = [0u8; 16];
    for i in 0..16 {
        out[i] = a[i] ^ b[i];
    }
    out
}

/// `SQN || AMF || SQN || AMF`, the 16-byte input to the `rot_r1` step of OUT1.
fn sqn_amf_sqn_amf(sqn: &[u8; 6], amf: &[u8; 2]) -> [u8; 16] {
    let mut out = [0u8; 16];
    out[0..6].copy_from_slice(sqn);
    out[6..8].copy_from_slice(amf);
    out[8..14].copy_from_slice(sqn);
    out[14..16].copy_from_slice(amf);
    out
}

/// Computes `TEMP = E(K, RAND ⊕ OPc)`, the shared intermediate value every OUTn derivation XORs
/// back in.
fn temp(k: &[u8; 16], opc: &[u8; 16], rand: &[u8; 16]) -> [u8; 16] {
    e(k, &xor16(rand, opc))
}

/// OUT1 is the only output that adds an extra `TEMP` term into the AES input (per TS 35.206
/// Annex 3: `E(K, rot_r1(SQN‖AMF‖SQN‖AMF ⊕ OPc) ⊕ TEMP ⊕ c1) ⊕ OPc`); every other output is
/// `E(K, rot_r(TEMP ⊕ OPc) ⊕ c) ⊕ OPc` with no separate TEMP XOR — see [`out_from_temp`].
fn out1(k: &[u8; 16], opc: &[u8; 16], temp: &[u8; 16], sqn: &[u8; 6], amf: &[u8; 2]) -> [u8; 16] {
    let rotated = rotate_left_128(&xor16(&sqn_amf_sqn_amf(sqn, amf), opc), R1);
    let inner = xor16(&xor16(&rotated, temp), &C1);
    xor16(&e(k, &inner), opc)
}

/// OUT2..OUT5: `E(K, rot_r(TEMP ⊕ OPc) ⊕ c) ⊕ OPc`. Unlike OUT1, `TEMP` only ever appears inside
/// the rotated term, never XORed in a second time.
fn out_from_temp(k: &[u8; 16], opc: &[u8; 16], temp: &[u8; 16], r: u32, c: &[u8; 16]) -> [u8; 16] {
    let rotated = rotate_left_128(&xor16(temp, opc), r);
    let inner = xor16(&rotated, c);
    xor16(&e(k, &inner), opc)
}

/// Computes the normal-path outputs {MAC-A, RES, CK, IK, AK} from (K, OPc, RAND, SQN, AMF).
///
/// Running this twice with identical inputs yields byte-identical outputs (§8 invariant 2).
pub fn compute_normal(
    k: &[u8; 16],
    opc: &[u8; 16],
    rand: &[u8; 16],
    sqn: &[u8; 6],
    amf: &[u8; 2],
) -> Result<NormalOutputs, AkaError> {
    let temp = temp(k, opc, rand);

    let out1 = out1(k, opc, &temp, sqn, amf);
    let out2 = out_from_temp(k, opc, &temp, R2, &C2);
    let out3 = out_from_temp(k, opc, &temp, R3, &C3);
    let out4 = out_from_temp(k, opc, &temp, R4, &C4);

    let mut mac_a = [0u8; 8];
    mac_a.copy_from_slice(&out1[0..8]);

    let mut res = [0u8; 8];
    res.copy_from_slice(&out2[8..16]);

    let mut ak = [0u8; 6];
    ak.copy_from_slice(&out2[0..6]);

    Ok(NormalOutputs {
        mac_a,
        res,
        ck: out3,
        ik: out4,
        ak,
    })
}

/// Computes the resynchronization-path outputs {MAC-S, AK*} from (K, OPc, RAND, SQN_MS).
///
/// `AMF` is fixed to `0x0000` per the f1* definition (TS 35.206 §4.1); `sqn_ms` should be the
/// recovered SQN_MS when verifying MAC-S, or any syntactically valid placeholder (zero is
/// acceptable) when this call is only used to extract AK* — AK* (from OUT5) depends solely on
/// K, OPc, and RAND.
pub fn compute_resync(
    k: &[u8; 16],
    opc: &[u8; 16],
    rand: &[u8; 16],
    sqn_ms: &[u8; 6],
) -> Result<ResyncOutputs, AkaError> {
    const RESYNC_AMF: [u8; 2] = [0x00, 0x00];

    let temp = temp(k, opc, rand);

    let out1 = out1(k, opc, &temp, sqn_ms, &RESYNC_AMF);
    let out5 = out_from_temp(k, opc, &temp, R5, &C5);

    let mut mac_s = [0u8; 8];
    mac_s.copy_from_slice(&out1[8..16]);

    let mut ak_star = [0u8; 6];
    ak_star.copy_from_slice(&out5[0..6]);

    Ok(ResyncOutputs { mac_s, ak_star })
}
