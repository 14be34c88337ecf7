//! chained-hashtable: a separate-chaining hash table with explicit
//! resizing and collision accounting, plus a driver that measures how
//! collisions behave as the bucket count changes.
//!
//! Internal Design:
//!
//! Summary
//! - `ChainedHashTable<K, V, H>` owns a `Vec` of buckets; each bucket is a
//!   `Vec` of entries kept in insertion order.
//! - A key's bucket is `hasher.hash_key(&key) % capacity`. The default
//!   `IdentityHash` makes that `key mod capacity` for integer keys.
//! - `experiment` builds many small tables and aggregates
//!   `count_collisions()` per capacity.
//!
//! Constraints
//! - Capacity is at least one bucket, 16 by default, and only changes
//!   through `resize`. There is no load-factor growth.
//! - `insert` allows duplicate keys; `insert_or_assign` does not create
//!   them. Lookups, `erase`, and `insert_or_assign` act on the first match
//!   in chain order.
//! - Failures are `Result` values and leave the table unchanged. A missing
//!   key is `None`, `false`, or `0`, never an error.
//!
//! Hasher and rehashing invariants
//! - Each entry caches its `u64` hash. `resize` reduces the cached hash by
//!   the new capacity and never calls the hasher, so the hasher only needs
//!   to be deterministic between insertion and lookup.
//! - Lookups compare the cached hash before calling `K: PartialEq`.
//!
//! Copy semantics
//! - `Clone` duplicates every bucket. `clone_from` adopts the source's
//!   capacity, so a clone-assigned table is indistinguishable from a fresh
//!   clone.
//!
//! Threading
//! - No interior mutability and no locking. Mutation needs `&mut`, so
//!   callers sharing a table across threads must bring their own lock.

pub mod chained_table;
mod chained_table_proptest;
pub mod error;
pub mod experiment;
pub mod hasher;

// Public surface
pub use chained_table::{BucketView, ChainedHashTable, DEFAULT_CAPACITY};
pub use error::{ConfigError, TableError};
pub use experiment::{run_experiment, CapacityReport, ExperimentConfig, ExperimentReport};
pub use hasher::{BuildHasherHash, HashFn, IdentityHash, IntegerKey, KeyHasher};
