//! # Reconciliation Flows
//!
//! Two parties, each holding a large set of transaction ids, exchange
//! fixed-size summaries and recover their symmetric difference.
//!
//! ## Flow Tested:
//!
//! 1. **Summarize**: each party builds a filter and encodes it for transport
//! 2. **Exchange**: encoded bytes cross the (simulated) transport
//! 3. **Reconcile**: each party subtracts the peer summary and peels
//! 4. **Consistency**: one side's `remaining` is the other side's `missing`

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use ibf_reconciliation::{
        BincodeCodec, FilterCodec, Ibf, IbfConfig, IbfConfigBuilder, IbfError, JsonCodec,
        KeySource, ReconciliationService, SetReconciliationApi, StaticKeys,
    };

    use crate::integration::init_tracing;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    /// Random 256-bit transaction ids
    fn tx_ids(rng: &mut StdRng, n: usize) -> Vec<Vec<u8>> {
        (0..n).map(|_| rng.gen::<[u8; 32]>().to_vec()).collect()
    }

    /// Two parties sharing `common` ids, each with its own extra ids
    fn parties(
        seed: u64,
        common: usize,
        only_a: usize,
        only_b: usize,
    ) -> (Vec<Vec<u8>>, Vec<Vec<u8>>, HashSet<Vec<u8>>, HashSet<Vec<u8>>) {
        let mut rng = StdRng::seed_from_u64(seed);
        let shared = tx_ids(&mut rng, common);
        let a_extra = tx_ids(&mut rng, only_a);
        let b_extra = tx_ids(&mut rng, only_b);

        let a: Vec<_> = shared.iter().chain(&a_extra).cloned().collect();
        let b: Vec<_> = shared.iter().chain(&b_extra).cloned().collect();
        (
            a,
            b,
            a_extra.into_iter().collect(),
            b_extra.into_iter().collect(),
        )
    }

    fn set(keys: Vec<Vec<u8>>) -> HashSet<Vec<u8>> {
        keys.into_iter().collect()
    }

    // =============================================================================
    // INTEGRATION TESTS: TWO-PARTY EXCHANGE
    // =============================================================================

    #[test]
    fn test_both_parties_learn_the_same_difference() {
        init_tracing();
        let (a_keys, b_keys, only_a, only_b) = parties(7, 10_000, 60, 45);
        let config = IbfConfig::with_bucket_count(1024).unwrap();
        let alice = ReconciliationService::new(BincodeCodec, config.clone()).unwrap();
        let bob = ReconciliationService::new(BincodeCodec, config).unwrap();

        let alice_source = StaticKeys::new(a_keys);
        let bob_source = StaticKeys::new(b_keys);
        let alice_filter = alice.build_filter(&alice_source).unwrap();
        let bob_filter = bob.build_filter(&bob_source).unwrap();

        // Transport: only the encoded summaries cross the wire
        let to_bob = alice.codec().encode(&alice_filter).unwrap();
        let to_alice = bob.codec().encode(&bob_filter).unwrap();

        let alice_view = alice.reconcile(&alice_filter, &to_alice).unwrap();
        let bob_view = bob.reconcile(&bob_filter, &to_bob).unwrap();

        assert_eq!(set(alice_view.remaining.clone()), only_a);
        assert_eq!(set(alice_view.missing.clone()), only_b);
        assert_eq!(set(bob_view.remaining), set(alice_view.missing));
        assert_eq!(set(bob_view.missing), set(alice_view.remaining));
    }

    #[test]
    fn test_identical_sets_reconcile_to_nothing() {
        init_tracing();
        let (a_keys, _, _, _) = parties(8, 5_000, 0, 0);
        let svc =
            ReconciliationService::new(JsonCodec, IbfConfig::with_bucket_count(128).unwrap())
                .unwrap();
        let source = StaticKeys::new(a_keys);

        let local = svc.build_filter(&source).unwrap();
        let summary = svc.summarize(&source).unwrap();
        let diff = svc.reconcile(&local, &summary).unwrap();

        assert!(diff.is_empty());
        assert_eq!(diff.rounds, 0);
    }

    #[test]
    fn test_summary_size_is_independent_of_set_size() {
        let svc = ReconciliationService::new(BincodeCodec, IbfConfig::default()).unwrap();
        let mut rng = StdRng::seed_from_u64(9);

        let small = svc
            .summarize(&StaticKeys::new(tx_ids(&mut rng, 10)))
            .unwrap();
        let large = svc
            .summarize(&StaticKeys::new(tx_ids(&mut rng, 50_000)))
            .unwrap();

        assert_eq!(small.len(), large.len());
    }

    #[test]
    fn test_more_buckets_decode_larger_differences() {
        init_tracing();
        let (a_keys, b_keys, only_a, only_b) = parties(10, 2_000, 150, 150);

        let attempt = |bucket_count: usize| {
            let config = IbfConfigBuilder::new()
                .bucket_count(bucket_count)
                .build()
                .unwrap();
            let mut a = Ibf::with_config(config.clone()).unwrap();
            let mut b = Ibf::with_config(config).unwrap();
            for key in &a_keys {
                a.add(key).unwrap();
            }
            for key in &b_keys {
                b.add(key).unwrap();
            }
            a.subtract(&b).unwrap();
            a.decode()
        };

        let small = attempt(64);
        let large = attempt(2048);

        let failed = small.expect_err("300 differences overflow 64 buckets");
        assert!(failed.residual_buckets > 0);

        let diff = large.expect("300 differences fit in 2048 buckets");
        assert_eq!(set(diff.remaining), only_a);
        assert_eq!(set(diff.missing), only_b);
    }

    #[test]
    fn test_partial_results_of_failed_decode_are_genuine() {
        init_tracing();
        let (a_keys, b_keys, only_a, only_b) = parties(11, 1_000, 200, 200);
        let svc =
            ReconciliationService::new(BincodeCodec, IbfConfig::with_bucket_count(128).unwrap())
                .unwrap();

        let local = svc.build_filter(&StaticKeys::new(a_keys)).unwrap();
        let summary = svc.summarize(&StaticKeys::new(b_keys)).unwrap();

        match svc.reconcile(&local, &summary) {
            Err(IbfError::DecodeFailed(failed)) => {
                for key in &failed.partial.remaining {
                    assert!(only_a.contains(key), "{} is not local-only", hex::encode(key));
                }
                for key in &failed.partial.missing {
                    assert!(only_b.contains(key), "{} is not peer-only", hex::encode(key));
                }
            }
            other => panic!("expected an inconclusive decode, got {:?}", other),
        }
    }

    #[test]
    fn test_wire_formats_are_not_interchangeable() {
        let svc = ReconciliationService::new(BincodeCodec, IbfConfig::default()).unwrap();
        let local = svc.build_filter(&StaticKeys::default()).unwrap();
        let json_summary = JsonCodec.encode(&local).unwrap();

        let result = svc.reconcile(&local, &json_summary);

        assert!(matches!(result, Err(IbfError::SerializationError(_))));
    }

    #[test]
    fn test_key_source_keys_feed_the_filter_unchanged() {
        let mut rng = StdRng::seed_from_u64(12);
        let keys = tx_ids(&mut rng, 5);
        let source = StaticKeys::new(keys.clone());
        let svc = ReconciliationService::new(BincodeCodec, IbfConfig::default()).unwrap();

        let mut filter = svc.build_filter(&source).unwrap();
        let diff = filter.decode().unwrap();

        assert_eq!(set(diff.remaining), set(source.keys().unwrap()));
        assert_eq!(set(keys), set(source.keys().unwrap()));
    }
}
