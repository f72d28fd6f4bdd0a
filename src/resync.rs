//! The resynchronization engine: recovers SQN_MS from an AUTS token, verifies MAC-S in constant
//! time, and re-enters vector issuance seeded with the recovered sequence number.

use crate::autn::parse_auts;
use crate::entropy::EntropySource;
use crate::error::AkaError;
use crate::milenage;
use crate::sqn;
use crate::subscriber::Subscriber;
use crate::vector::{AuthVector, VectorGenerator};
use subtle::ConstantTimeEq;

/// A zero-sized orchestration point for the resynchronization protocol branch (§4.6).
#[derive(Debug, Default, Clone, Copy)]
pub struct ResyncEngine;

impl ResyncEngine {
    /// Verifies `auts` against `sub` and, on success, issues a fresh vector as if `sub`'s stored
    /// SQN were the recovered SQN_MS.
    ///
    /// `rand` is the RAND the USIM used to produce `auts`, not a fresh challenge; the fresh
    /// vector this returns samples its own new RAND from `entropy` (§4.6 step 6). On a MAC-S
    /// mismatch this returns [`AkaError::ResyncAuthFailure`] and never touches the store through
    /// any side channel — the caller simply does not persist `next_sqn`.
    pub fn resync(
        sub: &Subscriber,
        rand: [u8; 16],
        auts: [u8; 14],
        entropy: &dyn EntropySource,
    ) -> Result<(AuthVector, u64), AkaError> {
        let (sqn_xor_ak_star, mac_s_received) = parse_auts(&auts);

        // AK* (from OUT5) depends only on K, OPc, RAND; the SQN placeholder below is
        // syntactically required but cryptographically inert.
        let placeholder_sqn = [0u8; 6];
        let ak_star_outputs =
            milenage::compute_resync(sub.k.as_bytes(), sub.opc.as_bytes(), &rand, &placeholder_sqn)?;

        let mut sqn_ms_bytes = [0u8; 6];
        for i in 0..6 {
            sqn_ms_bytes[i] = sqn_xor_ak_star[i] ^ ak_star_outputs.ak_star[i];
        }

        let expected = milenage::compute_resync(sub.k.as_bytes(), sub.opc.as_bytes(), &rand, &sqn_ms_bytes)?;

        if expected.mac_s.ct_eq(&mac_s_received).unwrap_u8() != 1 {
            log::warn!("resync MAC-S mismatch for imsi={}", sub.imsi);
            return Err(AkaError::ResyncAuthFailure);
        }

        let sqn_ms = sqn::decode_sqn(&sqn_ms_bytes);

        log::info!("resync succeeded for imsi={}", sub.imsi);

        let mut fresh_rand = [0u8; 16];
        entropy.fill(&mut fresh_rand).map_err(|e| {
            log::error!("entropy failure completing resync for imsi={}: {e}", sub.imsi);
            e
        })?;

        let next_sqn = sqn::next(sqn_ms).map_err(|e| {
            log::error!("sqn space exhausted completing resync for imsi={}: {e}", sub.imsi);
            e
        })?;

        let vector = VectorGenerator::vector_for_sqn(sub, &fresh_rand, next_sqn)?;

        Ok((vector, next_sqn))
    }
}
