//! chained-dict: a single-threaded key/value dictionary using separate
//! chaining, with a bucket array that doubles or halves on load-factor
//! thresholds.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a small chained hash table whose resize behavior is fully
//!   determined by `(count, capacity)` so it can be asserted exactly.
//! - Layers:
//!   - Table<K, V>: contiguous array of buckets, each a `Vec` of entries
//!     in insertion order. Knows nothing about counts or policies.
//!   - ResizePolicy: pure decision function, `Grow`, `Shrink` or `Keep`.
//!   - Dictionary<K, V, S>: public API; hashes keys, keeps `count`, and
//!     consults the policy after every mutating call.
//!
//! Constraints
//! - Single-threaded; all mutation goes through `&mut self`, no locking.
//! - Keys are unique; `associate` on a present key replaces the value in
//!   place.
//! - `capacity` is always positive and starts at 10 unless configured.
//! - Lookups never resize.
//!
//! Resize policy
//! - Checked after every `associate` and every `remove`, including updates
//!   and removals of absent keys.
//! - Grow to `2 * capacity` when `count > 50` and `count / capacity > 10`.
//! - Shrink to `capacity / 2` when `count > 50` and `count / capacity < 5`.
//! - At most one rebuild per call. A table with 50 or fewer entries never
//!   resizes.
//! - No hysteresis: right after a grow the load factor sits just above 5,
//!   so removing a handful of entries halves the table again. Churn that
//!   repeatedly crosses both bands pays a full rebuild on each crossing.
//!
//! Hasher and rehashing invariants
//! - Each entry stores the `u64` hash computed at insertion, and the bucket
//!   index is always `hash % capacity` with the live capacity. A rebuild
//!   recomputes the index from the stored hash; `K: Hash` is never invoked
//!   during a rebuild.
//! - The default hasher is `RandomState`, seeded once per dictionary.
//!   [`FixedState`] gives identical bucket layouts across runs.
//!
//! Failure model
//! - Missing keys are `None`, never errors.
//! - A zero initial capacity is rejected at construction.
//! - Allocation failure during a rebuild is fatal, like any `Vec` growth.
//!   Every new bucket is allocated at its final length before any entry
//!   moves, so the relocation loop itself never allocates.
//!
//! Notes and non-goals
//! - Iteration order is bucket order and changes across resizes.
//! - No concurrent access and no persistence.

mod dictionary;
mod dictionary_proptest;
mod error;
mod policy;
mod table;

// Public surface
pub use dictionary::{
    Dictionary, FixedState, IntoIter, Iter, IterMut, Keys, TableStats, Values, ValuesMut,
    DEFAULT_CAPACITY,
};
pub use error::{CapacityError, InvariantError, PolicyError};
pub use policy::{Resize, ResizePolicy};
