pub mod rb;

/// Ordered map interface.
///
/// - Keys are unique.
/// - `insert` overwrites the existing value and returns the old one.
/// - `remove` of an absent key is a no-op returning `None`.
/// - `lower_bound` returns the smallest `(k, v)` with `k >= key`.
pub trait OrderedMap {
    type Key: Ord;
    type Value;

    fn new() -> Self;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, key: &Self::Key) -> Option<&Self::Value>;

    fn insert(&mut self, key: Self::Key, value: Self::Value) -> Option<Self::Value>;

    fn remove(&mut self, key: &Self::Key) -> Option<Self::Value>;

    fn lower_bound(&self, key: &Self::Key) -> Option<(&Self::Key, &Self::Value)>;
}

pub use rb::{Color, InvariantViolation, Iter, NodeRef, RbTreeMap};

#[cfg(test)]
pub(crate) fn init_test_logger() {
    // Several tests race to install the logger; only the first one wins.
    let _ = simplelog::TestLogger::init(simplelog::LevelFilter::Debug, simplelog::Config::default());
}

#[cfg(test)]
mod tests {
    use super::OrderedMap;
    use super::{RbTreeMap, init_test_logger};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::collections::BTreeMap;

    fn oracle_lower_bound(map: &BTreeMap<u64, u64>, key: u64) -> Option<(u64, u64)> {
        map.range(key..).next().map(|(&k, &v)| (k, v))
    }

    fn check_basic<M: OrderedMap<Key = u64, Value = u64>>() {
        let mut map = M::new();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.get(&0), None);
        assert_eq!(map.lower_bound(&0), None);
        assert_eq!(map.remove(&0), None);

        assert_eq!(map.insert(1, 10), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1).copied(), Some(10));
        assert_eq!(map.lower_bound(&0).map(|(k, v)| (*k, *v)), Some((1, 10)));
        assert_eq!(map.lower_bound(&1).map(|(k, v)| (*k, *v)), Some((1, 10)));
        assert_eq!(map.lower_bound(&2), None);

        assert_eq!(map.insert(1, 99), Some(10));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get(&1).copied(), Some(99));

        assert_eq!(map.remove(&1), Some(99));
        assert_eq!(map.len(), 0);
        assert_eq!(map.get(&1), None);
        assert_eq!(map.lower_bound(&0), None);
    }

    fn check_bounds_edges<M: OrderedMap<Key = u64, Value = u64>>() {
        let mut map = M::new();
        let keys = [0, 1, u64::MAX - 1, u64::MAX];
        let mut oracle = BTreeMap::new();
        for (i, &k) in keys.iter().enumerate() {
            assert_eq!(map.insert(k, i as u64), None);
            oracle.insert(k, i as u64);
        }

        for query in [0, 1, 2, u64::MAX - 1, u64::MAX] {
            let got = map.lower_bound(&query).map(|(k, v)| (*k, *v));
            assert_eq!(got, oracle_lower_bound(&oracle, query), "query={query}");
        }
    }

    fn check_random<M: OrderedMap<Key = u64, Value = u64>>(key_space: u64) {
        let mut rng = StdRng::seed_from_u64(0xDEAD_BEEF_CAFE_BABE);
        let mut map = M::new();
        let mut oracle = BTreeMap::new();

        const OPS: usize = 20_000;
        for _ in 0..OPS {
            let roll = rng.random_range(0..100);
            let key = rng.random_range(0..key_space);
            if roll < 35 {
                let value = rng.random();
                assert_eq!(map.insert(key, value), oracle.insert(key, value));
            } else if roll < 55 {
                assert_eq!(map.remove(&key), oracle.remove(&key));
            } else if roll < 80 {
                assert_eq!(map.get(&key).copied(), oracle.get(&key).copied());
            } else {
                let got = map.lower_bound(&key).map(|(k, v)| (*k, *v));
                assert_eq!(got, oracle_lower_bound(&oracle, key));
            }

            assert_eq!(map.len(), oracle.len());
            if !oracle.is_empty() {
                let any = rng.random_range(0..oracle.len());
                let (&ok, &ov) = oracle.iter().nth(any).unwrap();
                assert_eq!(map.get(&ok).copied(), Some(ov));
            }
        }
    }

    #[test]
    fn basic() {
        check_basic::<RbTreeMap<u64, u64>>();
    }

    #[test]
    fn bounds_edges() {
        check_bounds_edges::<RbTreeMap<u64, u64>>();
    }

    #[test]
    fn random_dense_keys() {
        init_test_logger();
        check_random::<RbTreeMap<u64, u64>>(512);
    }

    #[test]
    fn random_sparse_keys() {
        check_random::<RbTreeMap<u64, u64>>(u64::MAX);
    }

    #[test]
    fn iteration_matches_oracle() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut map = RbTreeMap::new();
        let mut oracle = BTreeMap::new();
        for _ in 0..2_000 {
            let key: u64 = rng.random_range(0..600);
            if rng.random_bool(0.7) {
                map.insert(key, key ^ 0xFF);
                oracle.insert(key, key ^ 0xFF);
            } else {
                map.delete(&key);
                oracle.remove(&key);
            }
        }
        assert!(map.iter().eq(oracle.iter()));
        assert!(map.iter().rev().eq(oracle.iter().rev()));
        assert!(map.validate().is_ok());
    }
}
