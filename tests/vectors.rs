//! The seed scenarios from §8 of the specification, run end to end against the public API.

use aka_auc::entropy::{CountingEntropy, FixedEntropy};
use aka_auc::milenage;
use aka_auc::resync::ResyncEngine;
use aka_auc::sqn;
use aka_auc::subscriber::{InMemoryStore, SecretKey, Subscriber, SubscriberStore};
use aka_auc::vector::VectorGenerator;
use aka_auc::wire::VectorResponse;
use aka_auc::AkaError;

/// Initializes `env_logger` once per test binary (multiple calls are harmless; the second and
/// later are ignored) so the `log::info!`/`log::warn!`/`log::error!` calls this crate's vector
/// generator and resync engine make on success/failure paths are visible when a run sets
/// `RUST_LOG` and passes `--nocapture`, instead of being silently dropped.
fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn hex16(s: &str) -> [u8; 16] {
    let v = hex::decode(s).unwrap();
    v.try_into().unwrap()
}

fn hex6(s: &str) -> [u8; 6] {
    let v = hex::decode(s).unwrap();
    v.try_into().unwrap()
}

fn s1_subscriber() -> Subscriber {
    Subscriber {
        imsi: "001010000000001".into(),
        k: SecretKey::new(hex16("00112233445566778899aabbccddeeff")),
        opc: SecretKey::new(hex16("000102030405060708090a0b0c0d0e0f")),
        sqn: sqn::decode_sqn(&hex6("000000000020")),
        amf: 0x8000,
        created_at: 0,
    }
}

/// S1 — normal issuance; stored SQN increments by 0x20 and the response shape is well-formed.
#[test]
fn s1_normal_issuance() {
    init_logging();

    let store = InMemoryStore::new();
    store.create(s1_subscriber()).unwrap();

    let sub = store.load("001010000000001").unwrap().unwrap();
    let entropy = FixedEntropy::new(vec![0xAB; 16]);

    let (vector, next_sqn) = VectorGenerator::generate(&sub, &entropy).unwrap();
    store.store_sqn("001010000000001", next_sqn).unwrap();

    let response = VectorResponse::from_vector(&vector);
    assert_eq!(response.rand.len(), 32);
    assert_eq!(response.autn.len(), 32);
    assert_eq!(response.xres.len(), 16);
    assert_eq!(response.ck.len(), 32);
    assert_eq!(response.ik.len(), 32);

    let persisted = store.load("001010000000001").unwrap().unwrap();
    assert_eq!(sqn::encode_sqn(persisted.sqn), [0x00, 0x00, 0x00, 0x00, 0x00, 0x40]);
}

/// 3GPP TS 35.207 Annex 4 "Test Set 1" — published Milenage known-answer vectors, checked through
/// the public `compute_normal` entry point only, independent of anything `Subscriber`/
/// `VectorGenerator` assembles on top of it.
#[test]
fn ts_35_207_test_set_1_through_the_public_kernel_entry_point() {
    let k = hex16("465b5ce8b199b49faa5f0a2ee238a6bc");
    let opc = hex16("cd63cb71954a9f4e48a5994e37a02baf");
    let rand = hex16("23553cbe9637a89d218ae64dae47bf35");
    let sqn = hex6("ff9bb4d0b607");
    let amf = [0xb9, 0xb9];

    let out = milenage::compute_normal(&k, &opc, &rand, &sqn, &amf).unwrap();

    assert_eq!(out.mac_a, hex16_prefix8("4a9ffac354dfafb3"));
    assert_eq!(out.res, hex16_prefix8("a54211d5e3ba50bf"));
    assert_eq!(out.ck, hex16("b40ba9a3c58b2a05bbf0d987b21bf8cb"));
    assert_eq!(out.ik, hex16("f769bcd751044604127672711c6d3441"));
    assert_eq!(out.ak, hex6("aa689c648370"));
}

fn hex16_prefix8(s: &str) -> [u8; 8] {
    let v = hex::decode(s).unwrap();
    v.try_into().unwrap()
}

/// S2 — AUTN structural check: AMF bytes 6..7 and SQN recovered through AK.
#[test]
fn s2_autn_structural_check() {
    let sub = s1_subscriber();
    let entropy = FixedEntropy::new(vec![0xAB; 16]);

    let (vector, next_sqn) = VectorGenerator::generate(&sub, &entropy).unwrap();

    assert_eq!(&vector.autn[6..8], &[0x80, 0x00]);

    let outputs = milenage::compute_normal(
        sub.k.as_bytes(),
        sub.opc.as_bytes(),
        &vector.rand,
        &sqn::encode_sqn(next_sqn),
        &sub.amf.to_be_bytes(),
    )
    .unwrap();

    let mut recovered_sqn = [0u8; 6];
    for i in 0..6 {
        recovered_sqn[i] = vector.autn[i] ^ outputs.ak[i];
    }
    assert_eq!(recovered_sqn, [0x00, 0x00, 0x00, 0x00, 0x00, 0x40]);
}

fn usim_emits_auts(sub: &Subscriber, rand: [u8; 16], sqn_ms: u64) -> [u8; 14] {
    let sqn_ms_bytes = sqn::encode_sqn(sqn_ms);
    let outputs = milenage::compute_resync(sub.k.as_bytes(), sub.opc.as_bytes(), &rand, &sqn_ms_bytes).unwrap();

    let mut sqn_xor_ak_star = [0u8; 6];
    for i in 0..6 {
        sqn_xor_ak_star[i] = sqn_ms_bytes[i] ^ outputs.ak_star[i];
    }

    aka_auc::autn::build_auts(&sqn_xor_ak_star, &outputs.mac_s)
}

/// S3 — resync success: USIM at SQN 0x280 resyncs a subscriber stored at 0x140; the store ends up
/// at next(0x280) = 0x2a0.
#[test]
fn s3_resync_success() {
    init_logging();

    let store = InMemoryStore::new();
    let mut sub = s1_subscriber();
    sub.sqn = sqn::decode_sqn(&hex6("000000000140"));
    store.create(sub.clone()).unwrap();

    let rand = [0u8; 16];
    let sqn_ms = sqn::decode_sqn(&hex6("000000000280"));
    let auts = usim_emits_auts(&sub, rand, sqn_ms);

    let entropy = FixedEntropy::new(vec![0x77; 16]);
    let (_, next_sqn) = ResyncEngine::resync(&sub, rand, auts, &entropy).unwrap();
    store.store_sqn(&sub.imsi, next_sqn).unwrap();

    let persisted = store.load(&sub.imsi).unwrap().unwrap();
    assert_eq!(sqn::encode_sqn(persisted.sqn), [0x00, 0x00, 0x00, 0x00, 0x02, 0xa0]);
}

/// S4 — resync MAC-S failure: flipping AUTS's final byte fails verification and the store is left
/// untouched.
#[test]
fn s4_resync_mac_s_failure_leaves_store_unchanged() {
    init_logging();

    let store = InMemoryStore::new();
    let mut sub = s1_subscriber();
    sub.sqn = sqn::decode_sqn(&hex6("000000000140"));
    store.create(sub.clone()).unwrap();

    let rand = [0u8; 16];
    let sqn_ms = sqn::decode_sqn(&hex6("000000000280"));
    let mut auts = usim_emits_auts(&sub, rand, sqn_ms);
    auts[13] ^= 0xFF;

    let entropy = FixedEntropy::new(vec![0x77; 16]);
    let result = ResyncEngine::resync(&sub, rand, auts, &entropy);
    assert!(matches!(result, Err(AkaError::ResyncAuthFailure)));

    let persisted = store.load(&sub.imsi).unwrap().unwrap();
    assert_eq!(sqn::encode_sqn(persisted.sqn), [0x00, 0x00, 0x00, 0x00, 0x01, 0x40]);
}

/// S5 — kernel determinism: the same (K, OPc, RAND, SQN, AMF) always yields the same outputs.
#[test]
fn s5_kernel_determinism() {
    let sub = s1_subscriber();
    let rand = [0u8; 16];
    let sqn_bytes = hex6("000000000040");
    let amf = sub.amf.to_be_bytes();

    let a = milenage::compute_normal(sub.k.as_bytes(), sub.opc.as_bytes(), &rand, &sqn_bytes, &amf).unwrap();
    let b = milenage::compute_normal(sub.k.as_bytes(), sub.opc.as_bytes(), &rand, &sqn_bytes, &amf).unwrap();

    assert_eq!(a, b);
}

/// S6 — subscriber unknown: no record, no mutation.
#[test]
fn s6_subscriber_unknown() {
    let store = InMemoryStore::new();
    assert!(store.load("999999999999999").unwrap().is_none());
    assert!(store.list().unwrap().is_empty());
}

/// Invariant 1, run over several successive issuances rather than just one pair.
#[test]
fn invariant_sqn_advances_by_one_seq_step_per_issuance() {
    let store = InMemoryStore::new();
    store.create(s1_subscriber()).unwrap();
    let entropy = CountingEntropy::default();

    let mut previous = s1_subscriber().sqn;
    for _ in 0..5 {
        let sub = store.load("001010000000001").unwrap().unwrap();
        let (_, next_sqn) = VectorGenerator::generate(&sub, &entropy).unwrap();
        store.store_sqn("001010000000001", next_sqn).unwrap();

        assert_eq!(next_sqn - previous, 1 << 5);
        previous = next_sqn;
    }
}
