//! A small typed configuration surface for the operator-tunable values named in §9.
//!
//! The transport/store configuration (listen address, DB DSN, TLS material) is the embedding
//! binary's concern; this crate only owns the two knobs its own algorithms branch on.

use std::env;

/// How the next SQN's IND field is chosen.
///
/// §9 retains IND-preservation as the default but allows an embedder to hand out a fresh IND per
/// serving node without touching any other contract (see [`crate::sqn::next_with_ind`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndPolicy {
    /// Preserve the stored IND across an issuance. The default.
    Preserve,
    /// The caller supplies the IND for the next SQN explicitly.
    CallerSupplied,
}

impl Default for IndPolicy {
    fn default() -> Self {
        IndPolicy::Preserve
    }
}

/// Operator-tunable configuration for the AKA core.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AkaConfig {
    /// The AMF to use for a subscriber record that doesn't carry its own, in 4 hex chars
    /// (`AKA_DEFAULT_AMF`).
    pub default_amf: u16,
    /// The IND allocation policy (`AKA_IND_POLICY`).
    pub ind_policy: IndPolicy,
}

impl Default for AkaConfig {
    fn default() -> Self {
        AkaConfig {
            default_amf: 0x8000,
            ind_policy: IndPolicy::Preserve,
        }
    }
}

impl AkaConfig {
    /// Loads configuration from the environment, falling back to defaults for anything absent or
    /// unparsable. Fallbacks are logged at `debug` level, never `warn`/`error` — an unset operator
    /// knob is expected, not a fault.
    pub fn from_env() -> Self {
        let default_amf = env::var("AKA_DEFAULT_AMF")
            .ok()
            .and_then(|s| u16::from_str_radix(s.trim(), 16).ok())
            .unwrap_or_else(|| {
                log::debug!("AKA_DEFAULT_AMF unset or invalid; defaulting to 0x8000");
                0x8000
            });

        let ind_policy = match env::var("AKA_IND_POLICY").ok().as_deref() {
            Some("caller-supplied") => IndPolicy::CallerSupplied,
            Some("preserve") => IndPolicy::Preserve,
            Some(other) => {
                log::debug!("unrecognized AKA_IND_POLICY {other:?}; defaulting to preserve");
                IndPolicy::Preserve
            }
            None => IndPolicy::Preserve,
        };

        AkaConfig { default_amf, ind_policy }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_spec_default_amf_and_preserve_policy() {
        let cfg = AkaConfig::default();
        assert_eq!(cfg.default_amf, 0x8000);
        assert_eq!(cfg.ind_policy, IndPolicy::Preserve);
    }
}
