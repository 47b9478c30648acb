//! Deterministic bean hash codes
//!
//! Provides [`HashCode`], a 32-bit structural hash that is stable across
//! processes, and [`HashCache`] for memoizing it on immutable beans.
//!
//! # Combination
//! - Root beans seed with [`type_seed`] of their bean name
//! - Each property folds in as `hash * 31 + hash(property)`
//! - Derived levels seed with [`DERIVED_SEED`] and XOR the parent's hash

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI32, Ordering};

/// Multiplier for polynomial combination
pub const PRIME: i32 = 31;

/// Seed for the properties added by a derived bean level
pub const DERIVED_SEED: i32 = 7;

/// Hash contribution of an absent value
pub const NULL_HASH: i32 = 0;

/// Structural 32-bit hash code
///
/// # Contract
/// - Values that compare equal must return the same code
/// - Deterministic: no per-process randomness
pub trait HashCode {
    /// Compute the hash code
    fn hash_code(&self) -> i32;
}

/// Hash of a string as UTF-16 code units, `s[0]*31^(n-1) + ... + s[n-1]`
#[must_use]
pub fn string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |hash, unit| hash.wrapping_mul(PRIME).wrapping_add(i32::from(unit)))
}

/// Seed for a root bean's hash, derived from its bean name
#[inline]
#[must_use]
pub fn type_seed(bean_name: &str) -> i32 {
    string_hash(bean_name)
}

/// Fold one property into a running hash
#[inline]
#[must_use]
pub fn fold<T: HashCode + ?Sized>(hash: i32, value: &T) -> i32 {
    hash.wrapping_mul(PRIME).wrapping_add(value.hash_code())
}

impl HashCode for str {
    fn hash_code(&self) -> i32 {
        string_hash(self)
    }
}

impl HashCode for String {
    fn hash_code(&self) -> i32 {
        string_hash(self)
    }
}

impl HashCode for bool {
    fn hash_code(&self) -> i32 {
        if *self {
            1231
        } else {
            1237
        }
    }
}

impl HashCode for i32 {
    fn hash_code(&self) -> i32 {
        *self
    }
}

impl HashCode for i64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_possible_wrap)]
    fn hash_code(&self) -> i32 {
        let bits = *self as u64;
        (bits ^ (bits >> 32)) as i32
    }
}

impl HashCode for f64 {
    #[allow(clippy::cast_possible_wrap)]
    fn hash_code(&self) -> i32 {
        (self.to_bits() as i64).hash_code()
    }
}

impl<T: HashCode> HashCode for Option<T> {
    fn hash_code(&self) -> i32 {
        self.as_ref().map_or(NULL_HASH, HashCode::hash_code)
    }
}

impl<T: HashCode> HashCode for [T] {
    fn hash_code(&self) -> i32 {
        self.iter().fold(1i32, |hash, item| fold(hash, item))
    }
}

impl<T: HashCode> HashCode for Vec<T> {
    fn hash_code(&self) -> i32 {
        self.as_slice().hash_code()
    }
}

impl<V: HashCode> HashCode for BTreeMap<String, V> {
    fn hash_code(&self) -> i32 {
        self.iter().fold(0i32, |hash, (key, value)| {
            hash.wrapping_add(key.hash_code() ^ value.hash_code())
        })
    }
}

impl<T: HashCode + ?Sized> HashCode for &T {
    fn hash_code(&self) -> i32 {
        (**self).hash_code()
    }
}

/// Memoized hash code slot for immutable beans
///
/// `0` means "not yet computed". Concurrent first access may compute the
/// value more than once; the computation is pure, so every thread stores
/// the same result.
///
/// The cache never takes part in equality: two caches always compare equal,
/// so beans holding one can derive `PartialEq`.
#[derive(Debug, Default)]
pub struct HashCache(AtomicI32);

impl HashCache {
    /// Create an empty cache
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(AtomicI32::new(0))
    }

    /// Return the cached hash, computing and storing it on first access
    #[inline]
    pub fn get_or_compute(&self, compute: impl FnOnce() -> i32) -> i32 {
        let cached = self.0.load(Ordering::Relaxed);
        if cached != 0 {
            return cached;
        }
        let hash = compute();
        self.0.store(hash, Ordering::Relaxed);
        hash
    }

    /// Check if a hash has been stored
    #[inline]
    #[must_use]
    pub fn is_computed(&self) -> bool {
        self.0.load(Ordering::Relaxed) != 0
    }
}

impl Clone for HashCache {
    fn clone(&self) -> Self {
        Self(AtomicI32::new(self.0.load(Ordering::Relaxed)))
    }
}

impl PartialEq for HashCache {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for HashCache {}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn string_hash_matches_known_values() {
        assert_eq!(string_hash(""), 0);
        assert_eq!(string_hash("a"), 97);
        assert_eq!(string_hash("fieldFinal"), 553_434_268);
        assert_eq!(string_hash("middleName"), -818_219_584);
        assert_eq!(string_hash("codeCounts"), -1_383_758_447);
    }

    #[test]
    fn long_hash_folds_high_bits() {
        assert_eq!(0i64.hash_code(), 0);
        assert_eq!(1i64.hash_code(), 1);
        assert_eq!((1i64 << 32).hash_code(), 1);
        assert_eq!((-1i64).hash_code(), 0);
    }

    #[test]
    fn bool_hash() {
        assert_eq!(true.hash_code(), 1231);
        assert_eq!(false.hash_code(), 1237);
    }

    #[test]
    fn option_none_is_null_hash() {
        let none: Option<String> = None;
        assert_eq!(none.hash_code(), NULL_HASH);
        assert_eq!(Some("a".to_string()).hash_code(), 97);
    }

    #[test]
    fn list_hash_is_ordered() {
        let ab = vec!["a".to_string(), "b".to_string()];
        let ba = vec!["b".to_string(), "a".to_string()];
        assert_eq!(ab.hash_code(), (31 + 97) * 31 + 98);
        assert_ne!(ab.hash_code(), ba.hash_code());
        assert_eq!(Vec::<String>::new().hash_code(), 1);
    }

    #[test]
    fn map_hash_is_order_insensitive_sum() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), 1i32);
        map.insert("b".to_string(), 2i32);
        assert_eq!(map.hash_code(), (97 ^ 1) + (98 ^ 2));
    }

    #[test]
    fn fold_multiplies_then_adds() {
        assert_eq!(fold(7, &3i32), 7 * 31 + 3);
        assert_eq!(fold(i32::MAX, &1i32), i32::MAX.wrapping_mul(31).wrapping_add(1));
    }

    #[test]
    fn cache_computes_once() {
        let cache = HashCache::new();
        assert!(!cache.is_computed());
        assert_eq!(cache.get_or_compute(|| 42), 42);
        assert!(cache.is_computed());
        assert_eq!(cache.get_or_compute(|| 99), 42);
    }

    #[test]
    fn cache_zero_is_recomputed() {
        let cache = HashCache::new();
        assert_eq!(cache.get_or_compute(|| 0), 0);
        assert_eq!(cache.get_or_compute(|| 0), 0);
        assert!(!cache.is_computed());
    }

    #[test]
    fn cache_clone_keeps_value_and_is_always_equal() {
        let cache = HashCache::new();
        cache.get_or_compute(|| 5);
        let cloned = cache.clone();
        assert_eq!(cloned.get_or_compute(|| 6), 5);
        assert_eq!(HashCache::new(), cache);
    }

    proptest! {
        #[test]
        fn prop_string_hash_deterministic(s in ".*") {
            prop_assert_eq!(string_hash(&s), string_hash(&s.clone()));
        }

        #[test]
        fn prop_i64_in_i32_range_matches_value(v in 0i64..=i64::from(i32::MAX)) {
            #[allow(clippy::cast_possible_truncation)]
            let expected = v as i32;
            prop_assert_eq!(v.hash_code(), expected);
        }
    }
}
