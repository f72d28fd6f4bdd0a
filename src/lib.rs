//! The authentication-vector issuance core of a 3GPP AKA home-environment server.
//!
//! Given a subscriber's long-term secret material this crate produces the quintet (RAND, AUTN,
//! XRES, CK, IK) a mobile-network authentication center hands to the serving network, and — when
//! a USIM reports sequence-number desynchronization — recovers the mobile's sequence counter from
//! an AUTS token and issues a fresh vector in its place.
//!
//! What lives here is the AKA cryptographic state machine: Milenage ([`milenage`]), SQN
//! arithmetic ([`sqn`]), AUTN/AUTS framing ([`autn`]), the [`vector`] generator, and the
//! [`resync`] engine, all bit-exact against 3GPP TS 35.206 / 33.102. The HTTP transport, the
//! subscriber persistence engine, and the IP allowlist are an embedder's concern; this crate only
//! specifies the [`subscriber::SubscriberStore`] trait they implement and the [`wire`] types they
//! serialize against.
//!
//! ```
//! use aka_auc::entropy::FixedEntropy;
//! use aka_auc::subscriber::{SecretKey, Subscriber};
//! use aka_auc::vector::VectorGenerator;
//!
//! let sub = Subscriber {
//!     imsi: "001010000000001".into(),
//!     k: SecretKey::new([0x11; 16]),
//!     opc: SecretKey::new([0x22; 16]),
//!     sqn: 0x20,
//!     amf: 0x8000,
//!     created_at: 0,
//! };
//!
//! let entropy = FixedEntropy::new(vec![0u8; 16]);
//! let (vector, next_sqn) = VectorGenerator::generate(&sub, &entropy).unwrap();
//!
//! assert_eq!(next_sqn, 0x40);
//! assert_eq!(vector.rand.len(), 16);
//! ```

pub mod autn;
pub mod cipher;
pub mod config;
pub mod entropy;
pub mod error;
pub mod milenage;
pub mod resync;
pub mod sqn;
pub mod subscriber;
pub mod vector;
pub mod wire;

pub use config::{AkaConfig, IndPolicy};
pub use error::{AkaError, StatusHint};
pub use resync::ResyncEngine;
pub use subscriber::{SecretKey, Subscriber, SubscriberStore};
pub use vector::{AuthVector, VectorGenerator};
