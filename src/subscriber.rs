//! The subscriber record and the store interface the core depends on.

use crate::error::AkaError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;
use zeroize::Zeroizing;

/// A 128-bit secret byte buffer (K/Ki, OPc) that zeroes its backing memory on drop and never
/// implements a `Debug`/`Display` that exposes its bytes.
///
/// §3 forbids logging these fields; wrapping them in a type with no byte-revealing formatter makes
/// that a compile-time property rather than a code-review convention.
#[derive(Clone)]
pub struct SecretKey(Zeroizing<[u8; 16]>);

impl SecretKey {
    /// Wraps a raw 16-byte secret.
    pub fn new(bytes: [u8; 16]) -> Self {
        SecretKey(Zeroizing::new(bytes))
    }

    /// Borrows the secret bytes for the duration of a kernel call.
    pub fn as_bytes(&self) -> &[u8; 16] {
        &self.0
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SecretKey(..)")
    }
}

/// A subscriber record, keyed by IMSI.
///
/// `k` and `opc` are [`SecretKey`]s and therefore never render their bytes through `{:?}`; `sqn`
/// and `amf` are plain operational fields.
#[derive(Debug, Clone)]
pub struct Subscriber {
    pub imsi: String,
    pub k: SecretKey,
    pub opc: SecretKey,
    /// The 48-bit SQN last issued for this subscriber, as a plain integer (see [`crate::sqn`]).
    pub sqn: u64,
    pub amf: u16,
    pub created_at: u64,
}

/// The hex-stringed JSON shape of a subscriber record described in §6, used for the
/// subscriber-management CRUD surface and for loading/persisting via a store backed by a
/// human-readable database column.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberDto {
    pub imsi: String,
    pub ki: String,
    pub opc: String,
    pub sqn: String,
    pub amf: String,
    pub created_at: u64,
}

impl SubscriberDto {
    /// Converts this DTO into a [`Subscriber`], validating hex lengths per §6's hex encoding rule.
    pub fn into_subscriber(self) -> Result<Subscriber, AkaError> {
        Ok(Subscriber {
            imsi: self.imsi,
            k: SecretKey::new(crate::wire::decode_hex_exact(&self.ki, 16)?),
            opc: SecretKey::new(crate::wire::decode_hex_exact(&self.opc, 16)?),
            sqn: crate::sqn::decode_sqn(&crate::wire::decode_hex_exact(&self.sqn, 6)?),
            amf: u16::from_be_bytes(crate::wire::decode_hex_exact(&self.amf, 2)?),
            created_at: self.created_at,
        })
    }

    /// Converts a [`Subscriber`] into this DTO, emitting lowercase hex per §6.
    pub fn from_subscriber(sub: &Subscriber) -> Self {
        SubscriberDto {
            imsi: sub.imsi.clone(),
            ki: hex::encode(sub.k.as_bytes()),
            opc: hex::encode(sub.opc.as_bytes()),
            sqn: hex::encode(crate::sqn::encode_sqn(sub.sqn)),
            amf: hex::encode(sub.amf.to_be_bytes()),
            created_at: sub.created_at,
        }
    }
}

/// The narrow persistence contract the vector-issuance core depends on, plus the administrative
/// CRUD surface (§4.7) that the core itself never calls.
///
/// Implementations are expected to serialize concurrent `store_sqn` calls for the same IMSI; the
/// core performs no locking of its own (§5).
pub trait SubscriberStore {
    /// Loads a subscriber by IMSI, or `None` if unknown.
    fn load(&self, imsi: &str) -> Result<Option<Subscriber>, AkaError>;

    /// Atomically updates the stored SQN for `imsi`.
    fn store_sqn(&self, imsi: &str, new_sqn: u64) -> Result<(), AkaError>;

    /// Administrative: inserts or replaces a subscriber record.
    fn create(&self, sub: Subscriber) -> Result<(), AkaError>;

    /// Administrative: replaces an existing subscriber record in full.
    fn update(&self, sub: Subscriber) -> Result<(), AkaError>;

    /// Administrative: removes a subscriber record.
    fn delete(&self, imsi: &str) -> Result<(), AkaError>;

    /// Administrative: lists all known IMSIs.
    fn list(&self) -> Result<Vec<String>, AkaError>;
}

/// An in-memory [`SubscriberStore`], for tests and for embedders bootstrapping a real store.
///
/// `store_sqn` takes the per-IMSI mutex, demonstrating the compare-and-set discipline §5
/// recommends: a concurrent issuance for the same IMSI is serialized rather than racing.
#[derive(Default)]
pub struct InMemoryStore {
    subscribers: Mutex<HashMap<String, Subscriber>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        InMemoryStore { subscribers: Mutex::new(HashMap::new()) }
    }
}

impl SubscriberStore for InMemoryStore {
    fn load(&self, imsi: &str) -> Result<Option<Subscriber>, AkaError> {
        let guard = self.subscribers.lock().map_err(|_| AkaError::StoreError("poisoned lock".into()))?;
        Ok(guard.get(imsi).cloned())
    }

    fn store_sqn(&self, imsi: &str, new_sqn: u64) -> Result<(), AkaError> {
        let mut guard = self.subscribers.lock().map_err(|_| AkaError::StoreError("poisoned lock".into()))?;
        match guard.get_mut(imsi) {
            Some(sub) => {
                sub.sqn = new_sqn;
                Ok(())
            }
            None => Err(AkaError::SubscriberUnknown),
        }
    }

    fn create(&self, sub: Subscriber) -> Result<(), AkaError> {
        let mut guard = self.subscribers.lock().map_err(|_| AkaError::StoreError("poisoned lock".into()))?;
        guard.insert(sub.imsi.clone(), sub);
        Ok(())
    }

    fn update(&self, sub: Subscriber) -> Result<(), AkaError> {
        self.create(sub)
    }

    fn delete(&self, imsi: &str) -> Result<(), AkaError> {
        let mut guard = self.subscribers.lock().map_err(|_| AkaError::StoreError("poisoned lock".into()))?;
        guard.remove(imsi);
        Ok(())
    }

    fn list(&self) -> Result<Vec<String>, AkaError> {
        let guard = self.subscribers.lock().map_err(|_| AkaError::StoreError("poisoned lock".into()))?;
        Ok(guard.keys().cloned().collect())
    }
}
