//! Property tests for the commit protocol's sequential-history invariant:
//! a run of uncontended, sequentially-committed writes is always read back
//! as the last one committed, for any sequence of values and any `K`.

use proptest::prelude::*;

use pkto_concurrency::Runtime;

proptest! {
    #[test]
    fn sequential_commits_read_back_as_the_last_one(
        values in proptest::collection::vec(any::<i64>(), 1..32),
        k in 1usize..8,
    ) {
        let rt: Runtime<i64> = Runtime::with_k(1, k);
        for v in &values {
            let mut writer = rt.tbegin(None).unwrap();
            rt.write(&mut writer, 0.into(), *v);
            rt.try_commit(writer).unwrap();
        }

        let mut reader = rt.tbegin(None).unwrap();
        let seen = rt.read(&mut reader, 0.into()).unwrap();
        rt.try_commit(reader).unwrap();

        prop_assert_eq!(seen, *values.last().unwrap());
    }

    /// `version_count` tracks evictions correctly regardless of `K`: it never
    /// exceeds `N * K` and never drops below `N`.
    #[test]
    fn version_count_stays_within_bounds(
        writes in 0usize..64,
        k in 1usize..6,
    ) {
        let rt: Runtime<i64> = Runtime::with_k(1, k);
        for i in 0..writes {
            let mut writer = rt.tbegin(None).unwrap();
            rt.write(&mut writer, 0.into(), i as i64);
            rt.try_commit(writer).unwrap();
        }
        prop_assert!(rt.version_count() >= 1);
        prop_assert!(rt.version_count() <= k as u64);
    }
}
