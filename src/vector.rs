//! The vector generator: orchestrates RAND sampling, SQN increment, the Milenage kernel, and AUTN
//! assembly into the quintet a mobile-network authentication center consumes.

use crate::autn::{build_autn, Autn};
use crate::entropy::EntropySource;
use crate::error::AkaError;
use crate::milenage;
use crate::sqn;
use crate::subscriber::Subscriber;

/// The transient result of a vector-issuance request: RAND, AUTN, XRES, CK, IK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthVector {
    pub rand: [u8; 16],
    pub autn: Autn,
    pub xres: [u8; 8],
    pub ck: [u8; 16],
    pub ik: [u8; 16],
}

/// A zero-sized orchestration point for normal vector issuance (§4.5). `Send + Sync` by
/// construction, since it holds no fields; an embedder is free to call its associated functions
/// directly without wrapping it in anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct VectorGenerator;

impl VectorGenerator {
    /// Issues a fresh vector for `sub`, preserving its stored IND.
    ///
    /// Returns the vector together with the `next_sqn` the caller must durably persist — this
    /// function never touches a store itself (§4.5 side-effect policy).
    pub fn generate(sub: &Subscriber, entropy: &dyn EntropySource) -> Result<(AuthVector, u64), AkaError> {
        Self::generate_with_ind(sub, entropy, None)
    }

    /// As [`Self::generate`], but the caller supplies the IND for the next SQN instead of
    /// preserving the stored one (the §9 open extension; `None` behaves exactly like
    /// [`Self::generate`]).
    pub fn generate_with_ind(
        sub: &Subscriber,
        entropy: &dyn EntropySource,
        ind_override: Option<u8>,
    ) -> Result<(AuthVector, u64), AkaError> {
        let mut rand = [0u8; 16];

        entropy.fill(&mut rand).map_err(|e| {
            log::error!("entropy failure issuing vector for imsi={}: {e}", sub.imsi);
            e
        })?;

        let next_sqn = match ind_override {
            Some(ind) => sqn::next_with_ind(sub.sqn, ind),
            None => sqn::next(sub.sqn),
        }
        .map_err(|e| {
            log::error!("sqn space exhausted issuing vector for imsi={}: {e}", sub.imsi);
            e
        })?;

        let vector = Self::vector_for_sqn(sub, &rand, next_sqn)?;

        log::info!("issued vector for imsi={}", sub.imsi);

        Ok((vector, next_sqn))
    }

    /// Builds the quintet for an already-decided `(rand, sqn)` pair.
    ///
    /// Shared by [`Self::generate_with_ind`] and [`crate::resync::ResyncEngine::resync`], which
    /// re-enters vector issuance at a recovered SQN rather than the stored one.
    pub(crate) fn vector_for_sqn(sub: &Subscriber, rand: &[u8; 16], sqn_value: u64) -> Result<AuthVector, AkaError> {
        let sqn_bytes = sqn::encode_sqn(sqn_value);
        let amf_bytes = sub.amf.to_be_bytes();

        let outputs = milenage::compute_normal(sub.k.as_bytes(), sub.opc.as_bytes(), rand, &sqn_bytes, &amf_bytes)?;

        let autn = build_autn(&sqn_bytes, &outputs.ak, &amf_bytes, &outputs.mac_a);

        Ok(AuthVector {
            rand: *rand,
            autn,
            xres: outputs.res,
            ck: outputs.ck,
            ik: outputs.ik,
        })
    }
}
