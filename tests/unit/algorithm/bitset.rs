//! Tests for `CandidateSet` membership, intersection and ordering

#[cfg(test)]
mod tests {
    use greedymosaic::algorithm::bitset::CandidateSet;

    // Verifies a new set is empty
    // Verified by initializing all bits to one
    #[test]
    fn test_new_set_empty() {
        let set = CandidateSet::new(10);
        assert!(set.is_empty());
        assert_eq!(set.count(), 0);
        assert_eq!(set.pool_size(), 10);
    }

    // Tests the full set contains every index
    // Verified by initializing all bits to zero
    #[test]
    fn test_all() {
        let set = CandidateSet::all(4);
        assert_eq!(set.to_vec(), vec![0, 1, 2, 3]);
    }

    // Tests insertion, membership and out-of-range indices
    // Verified by removing the bounds check in insert
    #[test]
    fn test_insert_and_contains() {
        let mut set = CandidateSet::new(5);
        set.insert(3);
        set.insert(99);
        assert!(set.contains(3));
        assert!(!set.contains(2));
        assert!(!set.contains(99));
        assert_eq!(set.count(), 1);
    }

    // Tests intersection keeps common indices in ascending order
    // Verified by changing intersection to union
    #[test]
    fn test_intersection() {
        let a = CandidateSet::from_indices(10, [7, 1, 3, 5]);
        let b = CandidateSet::from_indices(10, [3, 5, 7, 9]);
        assert_eq!(a.intersection(&b).to_vec(), vec![3, 5, 7]);

        let mut c = a.clone();
        c.intersect_with(&CandidateSet::from_indices(10, [0]));
        assert!(c.is_empty());
    }

    // Tests display lists members
    // Verified by printing the pool size instead of the count
    #[test]
    fn test_display() {
        let set = CandidateSet::from_indices(8, [2, 4]);
        assert_eq!(set.to_string(), "CandidateSet(2 candidates: [2, 4])");
    }
}
