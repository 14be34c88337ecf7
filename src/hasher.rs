//! Key hashing for `ChainedHashTable`.
//!
//! A table never hashes keys on its own. It asks a `KeyHasher<K>` for a
//! `u64` and reduces that modulo its capacity. Three hashers are provided:
//!
//! - `IdentityHash`: integer keys hash to themselves, so the bucket index is
//!   exactly `key mod capacity`. This is the default.
//! - `HashFn`: wraps any `Fn(&K) -> u64` closure.
//! - `BuildHasherHash`: adapts a `core::hash::BuildHasher` (hashbrown's
//!   default builder unless told otherwise) for arbitrary `K: Hash`.

use core::fmt;
use core::hash::{BuildHasher, Hash};

/// Produces the raw hash of a key. The table reduces it modulo its
/// capacity to pick a bucket.
///
/// Implementations must be deterministic: equal keys must produce equal
/// hashes for as long as they live in a table.
pub trait KeyHasher<K: ?Sized> {
    fn hash_key(&self, key: &K) -> u64;
}

/// Integer types usable with `IdentityHash`.
///
/// Unsigned values map to themselves. Signed values are reinterpreted as
/// their two's-complement bit pattern after sign extension to 64 bits, so
/// non-negative keys still map to themselves.
pub trait IntegerKey {
    fn to_hash(&self) -> u64;
}

macro_rules! integer_key_unsigned {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntegerKey for $t {
                #[inline]
                fn to_hash(&self) -> u64 {
                    *self as u64
                }
            }
        )*
    };
}

macro_rules! integer_key_signed {
    ($($t:ty),* $(,)?) => {
        $(
            impl IntegerKey for $t {
                #[inline]
                fn to_hash(&self) -> u64 {
                    *self as i64 as u64
                }
            }
        )*
    };
}

integer_key_unsigned!(u8, u16, u32, u64, usize);
integer_key_signed!(i8, i16, i32, i64, isize);

/// `hash(key) = key`; the table then computes `key mod capacity`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IdentityHash;

impl<K: IntegerKey + ?Sized> KeyHasher<K> for IdentityHash {
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        key.to_hash()
    }
}

/// Hashes keys with a user-supplied closure.
#[derive(Clone, Copy)]
pub struct HashFn<F>(pub F);

impl<F> fmt::Debug for HashFn<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("HashFn(..)")
    }
}

impl<K: ?Sized, F> KeyHasher<K> for HashFn<F>
where
    F: Fn(&K) -> u64,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        (self.0)(key)
    }
}

/// Adapts a `BuildHasher` so any `K: Hash` can live in a table.
#[derive(Debug, Default, Clone)]
pub struct BuildHasherHash<S = hashbrown::hash_map::DefaultHashBuilder>(pub S);

impl<S> BuildHasherHash<S> {
    pub fn new(build_hasher: S) -> Self {
        BuildHasherHash(build_hasher)
    }
}

impl<K, S> KeyHasher<K> for BuildHasherHash<S>
where
    K: Hash + ?Sized,
    S: BuildHasher,
{
    #[inline]
    fn hash_key(&self, key: &K) -> u64 {
        self.0.hash_one(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::RandomState;

    #[test]
    fn identity_maps_non_negative_integers_to_themselves() {
        assert_eq!(IdentityHash.hash_key(&0u8), 0);
        assert_eq!(IdentityHash.hash_key(&11u32), 11);
        assert_eq!(IdentityHash.hash_key(&u64::MAX), u64::MAX);
        assert_eq!(IdentityHash.hash_key(&13i32), 13);
        assert_eq!(IdentityHash.hash_key(&42usize), 42);
    }

    #[test]
    fn identity_sign_extends_negative_integers() {
        assert_eq!(IdentityHash.hash_key(&-1i8), u64::MAX);
        assert_eq!(IdentityHash.hash_key(&-1i64), u64::MAX);
        assert_eq!(IdentityHash.hash_key(&-2i32), u64::MAX - 1);
    }

    #[test]
    fn hash_fn_calls_the_closure() {
        let h = HashFn(|s: &str| s.len() as u64);
        assert_eq!(h.hash_key("abc"), 3);
        assert_eq!(h.hash_key(""), 0);
        assert_eq!(format!("{:?}", h), "HashFn(..)");
    }

    /// Equal keys hash equally under one builder instance; that is all the
    /// table relies on.
    #[test]
    fn build_hasher_is_deterministic_per_instance() {
        let h: BuildHasherHash = BuildHasherHash::default();
        assert_eq!(h.hash_key("key"), h.hash_key(&"key".to_string()[..]));

        let r = BuildHasherHash::new(RandomState::new());
        assert_eq!(r.hash_key(&(1u8, 'x')), r.hash_key(&(1u8, 'x')));
    }
}
