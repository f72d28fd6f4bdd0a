//! Injectable entropy sources.
//!
//! §9's design note retires the implicit process-global PRNG in favor of a handle passed into the
//! vector generator: production code gets [`OsEntropy`] (a CSPRNG), test code gets a deterministic
//! source so RAND is reproducible across the scenarios in §8.

use crate::error::AkaError;
use rand::RngCore;

/// A source of cryptographically-meaningful random bytes.
///
/// Implementations must never silently fall back to a non-CSPRNG; if randomness cannot be
/// obtained, [`fill`](EntropySource::fill) returns [`AkaError::EntropyFailure`].
pub trait EntropySource {
    /// Fills `out` with random bytes.
    fn fill(&self, out: &mut [u8]) -> Result<(), AkaError>;
}

/// The production entropy source: the operating system's CSPRNG via [`rand::rngs::OsRng`].
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, out: &mut [u8]) -> Result<(), AkaError> {
        rand::rngs::OsRng.try_fill_bytes(out).map_err(|e| AkaError::EntropyFailure(e.to_string()))
    }
}

/// A deterministic entropy source that always returns the same fixed bytes.
///
/// Intended for tests that need a reproducible RAND (e.g. the S3 resync scenario in §8, which
/// exercises RAND = 16 zero bytes).
#[derive(Debug, Clone)]
pub struct FixedEntropy {
    bytes: Vec<u8>,
}

impl FixedEntropy {
    /// Creates a source that always yields `bytes` (cycled if the requested fill is longer).
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        FixedEntropy { bytes: bytes.into() }
    }
}

impl EntropySource for FixedEntropy {
    fn fill(&self, out: &mut [u8]) -> Result<(), AkaError> {
        if self.bytes.is_empty() {
            return Err(AkaError::EntropyFailure("fixed entropy source is empty".into()));
        }

        for (i, slot) in out.iter_mut().enumerate() {
            *slot = self.bytes[i % self.bytes.len()];
        }

        Ok(())
    }
}

/// A deterministic entropy source that emits a distinct, incrementing byte pattern per call, so a
/// test can tell successive RAND samples apart.
#[derive(Debug, Default)]
pub struct CountingEntropy {
    calls: std::sync::atomic::AtomicU8,
}

impl EntropySource for CountingEntropy {
    fn fill(&self, out: &mut [u8]) -> Result<(), AkaError> {
        let call = self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        for (i, slot) in out.iter_mut().enumerate() {
            *slot = call.wrapping_add(i as u8);
        }
        Ok(())
    }
}

/// An entropy source that always fails, for exercising [`crate::error::AkaError::EntropyFailure`]
/// propagation without depending on OS RNG actually breaking.
#[derive(Debug, Default, Clone, Copy)]
pub struct FailingEntropy;

impl EntropySource for FailingEntropy {
    fn fill(&self, _out: &mut [u8]) -> Result<(), AkaError> {
        Err(AkaError::EntropyFailure("simulated entropy outage".into()))
    }
}
