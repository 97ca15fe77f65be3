//! Load-factor driven resize policy.
//!
//! A check is a pure function of `(count, capacity)`. Both directions are
//! gated on `count > min_count`, so a small dictionary keeps its initial
//! capacity no matter how skewed its chains are.
//!
//! Load factors are compared without division: `count / capacity > g` is
//! `count > g * capacity` and `count / capacity < s` is
//! `count < s * capacity` over the reals, and both sides are integers here.
//!
//! There is no hysteresis between the bands. With the defaults a table that
//! just grew to `2C` sits at a load factor just above 5, so removing a
//! handful of entries halves it again. Churn that keeps crossing both bands
//! pays one full rebuild per crossing.

use crate::error::PolicyError;

/// Outcome of one policy check.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Resize {
    Grow,
    Shrink,
    Keep,
}

impl Resize {
    /// Capacity the table should be rebuilt at. `None` for `Keep`, and for
    /// a decision that cannot change the capacity (shrinking a single
    /// bucket, growing a saturated one).
    pub fn target(self, capacity: usize) -> Option<usize> {
        let next = match self {
            Resize::Grow => capacity.saturating_mul(2),
            Resize::Shrink => (capacity / 2).max(1),
            Resize::Keep => return None,
        };
        (next != capacity).then_some(next)
    }
}

/// Thresholds consulted after every `associate` and `remove`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ResizePolicy {
    min_count: usize,
    grow_above: usize,
    shrink_below: usize,
}

impl ResizePolicy {
    /// No resize happens while `count <= DEFAULT_MIN_COUNT`.
    pub const DEFAULT_MIN_COUNT: usize = 50;
    /// Grow once the load factor is strictly above this.
    pub const DEFAULT_GROW_ABOVE: usize = 10;
    /// Shrink once the load factor is strictly below this.
    pub const DEFAULT_SHRINK_BELOW: usize = 5;

    pub fn new(
        min_count: usize,
        grow_above: usize,
        shrink_below: usize,
    ) -> Result<Self, PolicyError> {
        if grow_above == 0 {
            return Err(PolicyError::ZeroGrowThreshold);
        }
        if shrink_below >= grow_above {
            return Err(PolicyError::OverlappingThresholds {
                grow_above,
                shrink_below,
            });
        }
        Ok(Self {
            min_count,
            grow_above,
            shrink_below,
        })
    }

    pub fn min_count(&self) -> usize {
        self.min_count
    }
    pub fn grow_above(&self) -> usize {
        self.grow_above
    }
    pub fn shrink_below(&self) -> usize {
        self.shrink_below
    }

    /// Decide what a table holding `count` entries in `capacity` buckets
    /// should do. `capacity` must be positive.
    pub fn check(&self, count: usize, capacity: usize) -> Resize {
        debug_assert!(capacity > 0);
        if count <= self.min_count {
            return Resize::Keep;
        }
        if count > self.grow_above.saturating_mul(capacity) {
            Resize::Grow
        } else if count < self.shrink_below.saturating_mul(capacity) {
            Resize::Shrink
        } else {
            Resize::Keep
        }
    }
}

impl Default for ResizePolicy {
    fn default() -> Self {
        Self {
            min_count: Self::DEFAULT_MIN_COUNT,
            grow_above: Self::DEFAULT_GROW_ABOVE,
            shrink_below: Self::DEFAULT_SHRINK_BELOW,
        }
    }
}
