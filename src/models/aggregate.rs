/// Fused partial aggregate over one field: minimum, maximum and running
/// sum with sample count, maintained in a single fold.
///
/// `merge` is associative and commutative with `EMPTY` as identity: any
/// partitioning of the input and any merge order produce identical results.
/// Arithmetic is exact. Sums widen to i64, which holds ~9.2e13 five-digit
/// samples before overflow; the mean is derived only at presentation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldAccumulator {
    min: i32,
    max: i32,
    sum: i64,
    count: u64,
}

impl FieldAccumulator {
    /// No samples observed. Identity for `merge` on both sides.
    pub const EMPTY: FieldAccumulator = FieldAccumulator {
        min: i32::MAX,
        max: i32::MIN,
        sum: 0,
        count: 0,
    };

    pub fn single(value: i32) -> Self {
        Self {
            min: value,
            max: value,
            sum: value as i64,
            count: 1,
        }
    }

    pub fn observe(self, value: i32) -> Self {
        self.merge(Self::single(value))
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
            sum: self.sum + other.sum,
            count: self.count + other.count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn sum(&self) -> i64 {
        self.sum
    }

    /// Smallest observed value, None until a sample is observed.
    pub fn min(&self) -> Option<i32> {
        if self.is_empty() {
            None
        } else {
            Some(self.min)
        }
    }

    /// Largest observed value, None until a sample is observed.
    pub fn max(&self) -> Option<i32> {
        if self.is_empty() {
            None
        } else {
            Some(self.max)
        }
    }

    /// Arithmetic mean in stored (tenths) units, None until a sample is
    /// observed.
    pub fn mean(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.sum as f64 / self.count as f64)
        }
    }
}

impl Default for FieldAccumulator {
    fn default() -> Self {
        Self::EMPTY
    }
}
