//! Aliases for the hash-map type used by this crate.

pub use hashbrown::hash_map::Entry;

/// The hash-map type used by this crate.
pub type HashMap<K, V> = hashbrown::HashMap<K, V>;
