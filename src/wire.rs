//! Hex codec and serde envelope types for the §6 wire shapes.
//!
//! This module is transport-agnostic: it depends only on `serde`/`serde_json`/`hex`, never on an
//! HTTP framework. An embedding binary serializes/deserializes against these types and calls into
//! [`crate::vector::VectorGenerator`]/[`crate::resync::ResyncEngine`] itself.

use crate::error::AkaError;
use serde::{Deserialize, Serialize};

/// Decodes a hex string into exactly `N` bytes.
///
/// Hex parsing is case-insensitive. Odd length, non-hex characters, or a decoded length other
/// than `expected_len` (which must equal `N`) all fail with [`AkaError::InputMalformed`] — never
/// with key material echoed back in the message.
pub fn decode_hex_exact<const N: usize>(s: &str, expected_len: usize) -> Result<[u8; N], AkaError> {
    if s.len() % 2 != 0 {
        return Err(AkaError::InputMalformed(format!(
            "odd-length hex string (expected {expected_len} bytes)"
        )));
    }

    let bytes = hex::decode(s)
        .map_err(|_| AkaError::InputMalformed(format!("invalid hex characters (expected {expected_len} bytes)")))?;

    if bytes.len() != expected_len || bytes.len() != N {
        return Err(AkaError::InputMalformed(format!(
            "expected {expected_len} bytes, got {}",
            bytes.len()
        )));
    }

    let mut out = [0u8; N];
    out.copy_from_slice(&bytes);
    Ok(out)
}

/// Lowercase hex encoding, per §6's emit rule.
pub fn encode_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// The raw JSON shape of a vector-issuance request body: `{}`, empty, or `{"rand": ..., "auts":
/// ...}`.
///
/// `deny_unknown_fields` keeps an object with an unrecognized key (e.g. `{"foo":1}`) from
/// silently deserializing to `rand=None, auts=None` and routing to [`VectorRequestKind::Normal`]
/// — it surfaces as [`AkaError::InputMalformed`] instead, per the §9 strict-shape rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VectorRequest {
    #[serde(default)]
    pub rand: Option<String>,
    #[serde(default)]
    pub auts: Option<String>,
}

/// The discriminated, decoded form of a vector-issuance request.
#[derive(Debug, Clone)]
pub enum VectorRequestKind {
    Normal,
    Resync { rand: [u8; 16], auts: [u8; 14] },
}

impl VectorRequest {
    /// Applies §6's resync discriminator: both fields present and non-empty => resync; neither
    /// present => normal; exactly one present => malformed.
    pub fn into_kind(self) -> Result<VectorRequestKind, AkaError> {
        let rand = self.rand.filter(|s| !s.is_empty());
        let auts = self.auts.filter(|s| !s.is_empty());

        match (rand, auts) {
            (None, None) => Ok(VectorRequestKind::Normal),
            (Some(rand), Some(auts)) => Ok(VectorRequestKind::Resync {
                rand: decode_hex_exact::<16>(&rand, 16)?,
                auts: decode_hex_exact::<14>(&auts, 14)?,
            }),
            _ => Err(AkaError::InputMalformed(
                "exactly one of rand/auts present; both or neither is required".into(),
            )),
        }
    }
}

/// Parses a raw HTTP request body into a [`VectorRequestKind`].
///
/// Implements the §9 Open Question's stricter rule: an empty body or a literal `{}` is normal
/// issuance; anything else is parsed as JSON and run through [`VectorRequest::into_kind`].
pub fn parse_vector_request(body: &str) -> Result<VectorRequestKind, AkaError> {
    let trimmed = body.trim();

    if trimmed.is_empty() || trimmed == "{}" {
        return Ok(VectorRequestKind::Normal);
    }

    let req: VectorRequest = serde_json::from_str(trimmed)
        .map_err(|e| AkaError::InputMalformed(format!("invalid request body: {e}")))?;

    req.into_kind()
}

/// The JSON shape of a successful vector-issuance response: five lowercase-hex fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorResponse {
    pub rand: String,
    pub autn: String,
    pub xres: String,
    pub ck: String,
    pub ik: String,
}

impl VectorResponse {
    pub fn from_vector(vector: &crate::vector::AuthVector) -> Self {
        VectorResponse {
            rand: encode_hex(&vector.rand),
            autn: encode_hex(&vector.autn),
            xres: encode_hex(&vector.xres),
            ck: encode_hex(&vector.ck),
            ik: encode_hex(&vector.ik),
        }
    }
}
