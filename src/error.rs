//! Crate-wide error taxonomy.
//!
//! Every fallible operation in this crate returns [`AkaError`]. No variant carries key material
//! (K, OPc, CK, IK, AK) or their hex forms in its `Display` output — only enough context (an IMSI,
//! a byte length, a field name) to act on without an audit log.

use thiserror::Error;

/// The single error type returned by every fallible operation in this crate.
#[derive(Debug, Error)]
pub enum AkaError {
    /// Hex, length, or JSON shape invalid at the wire boundary.
    #[error("malformed input: {0}")]
    InputMalformed(String),

    /// The subscriber store has no record for the requested IMSI.
    #[error("subscriber unknown")]
    SubscriberUnknown,

    /// The injected entropy source failed to produce randomness.
    #[error("entropy source failed: {0}")]
    EntropyFailure(String),

    /// MAC-S did not match during AUTS verification. Carries no detail beyond the fact of
    /// mismatch; anything more specific belongs in an audit log, not in this error.
    #[error("resynchronization authentication failed")]
    ResyncAuthFailure,

    /// The SQN's SEQ component would overflow its 43-bit range.
    #[error("sequence number space exhausted")]
    SqnExhausted,

    /// The subscriber store failed to read or write.
    #[error("subscriber store error: {0}")]
    StoreError(String),

    /// An invariant internal to the Milenage kernel was violated. This indicates a bug in this
    /// crate, never a caller input problem.
    #[error("internal cryptographic invariant violated: {0}")]
    CryptoInternal(String),
}

/// The HTTP status code an embedding boundary should map each error kind to.
///
/// This crate does not depend on any HTTP framework; `status_hint` is provided so an embedder
/// does not have to re-derive §6/§7's response-code table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusHint {
    /// 400
    BadRequest,
    /// 404
    NotFound,
    /// 500
    InternalError,
}

impl AkaError {
    /// Maps this error to the response-code class the specification assigns it.
    pub fn status_hint(&self) -> StatusHint {
        match self {
            AkaError::InputMalformed(_) => StatusHint::BadRequest,
            AkaError::SubscriberUnknown => StatusHint::NotFound,
            AkaError::EntropyFailure(_)
            | AkaError::ResyncAuthFailure
            | AkaError::SqnExhausted
            | AkaError::StoreError(_)
            | AkaError::CryptoInternal(_) => StatusHint::InternalError,
        }
    }
}
