use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of candidate pool indices
///
/// Iteration yields indices in ascending pool order, which keeps selection
/// deterministic for a given pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidateSet {
    bits: BitVec,
}

impl CandidateSet {
    /// Create a set with no candidates present
    pub fn new(pool_size: usize) -> Self {
        Self {
            bits: bitvec![0; pool_size],
        }
    }

    /// Create a set containing every candidate
    pub fn all(pool_size: usize) -> Self {
        Self {
            bits: bitvec![1; pool_size],
        }
    }

    /// Build a set from candidate indices; out-of-range indices are ignored
    pub fn from_indices(pool_size: usize, indices: impl IntoIterator<Item = usize>) -> Self {
        let mut set = Self::new(pool_size);
        for index in indices {
            set.insert(index);
        }
        set
    }

    /// Size of the pool this set ranges over
    pub fn pool_size(&self) -> usize {
        self.bits.len()
    }

    /// Insert a candidate index
    pub fn insert(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    /// Test candidate membership
    pub fn contains(&self, index: usize) -> bool {
        self.bits.get(index).as_deref() == Some(&true)
    }

    /// Intersect this set with another in-place
    pub fn intersect_with(&mut self, other: &Self) {
        self.bits &= &other.bits;
    }

    /// Create a new set containing the intersection
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = self.clone();
        result.intersect_with(other);
        result
    }

    /// Test if no candidates are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count candidates in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// Candidate indices in ascending order
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.iter_ones()
    }

    /// Extract all candidate indices as a vector
    pub fn to_vec(&self) -> Vec<usize> {
        self.iter().collect()
    }
}

impl fmt::Display for CandidateSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CandidateSet({} candidates: {:?})", self.count(), self.to_vec())
    }
}
