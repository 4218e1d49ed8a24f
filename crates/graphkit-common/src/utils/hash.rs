//! Hash map alias used for algorithm bookkeeping.
//!
//! Distance tables, timestamps and parent maps are hot and never iterated
//! in an order that matters, so they use hashbrown with aHash instead of the
//! SipHash-based std map. Anything whose iteration order is
//! observable goes through an ordered container instead.

use ahash::RandomState;

/// Fast hash map for algorithm state.
pub type FastHashMap<K, V> = hashbrown::HashMap<K, V, RandomState>;

/// Creates an empty [`FastHashMap`] sized for `capacity` entries.
#[must_use]
pub fn map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    FastHashMap::with_capacity_and_hasher(capacity, RandomState::new())
}
