//! Tests for the height-balanced grouping of stitch sources
//!
//! Weighted greedy grouping is the only policy. These tests pin its exact
//! partitions so a change of policy shows up as a failure here.

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use stitchslice::layout::grouping::{balance_groups, normalized_weight};

    fn sizes(groups: &[std::ops::Range<usize>]) -> Vec<usize> {
        groups.iter().map(ExactSizeIterator::len).collect()
    }

    // Tests heights are scaled to the 1000 pixel reference width
    // Verified by dividing by height instead of width
    #[test]
    fn test_normalized_weight() {
        assert!((normalized_weight(500, 1000) - 2000.0).abs() < 1e-9);
        assert!((normalized_weight(2000, 500) - 250.0).abs() < 1e-9);
        assert!(normalized_weight(0, 500).abs() < 1e-9);
    }

    // Tests ten equal weights split into three groups as 3, 3, 4
    // Verified by closing groups once the target is reached instead of when overshooting
    #[test]
    fn test_equal_weights_into_three() {
        let groups = balance_groups(&[1.0; 10], 3);

        assert_eq!(groups, vec![0..3, 3..6, 6..10]);
    }

    // Tests a heavy first source gets its own group
    // Verified by always adding the first two sources together
    #[test]
    fn test_heavy_source_isolated() {
        let groups = balance_groups(&[100.0, 1.0, 1.0, 1.0], 3);

        assert_eq!(groups, vec![0..1, 1..3, 3..4]);
    }

    // Tests groups close early so every remaining group gets a source
    // Verified by removing the forced close
    #[test]
    fn test_forced_close_keeps_group_count() {
        let groups = balance_groups(&[1.0, 1.0, 1.0, 100.0], 3);

        assert_eq!(groups, vec![0..2, 2..3, 3..4]);
    }

    // Tests group counts are clamped to the source count and at least one
    // Verified by returning empty groups when count exceeds sources
    #[test]
    fn test_group_count_clamped() {
        assert_eq!(balance_groups(&[5.0, 5.0], 0), vec![0..2]);
        assert_eq!(sizes(&balance_groups(&[5.0; 4], 10)), vec![1, 1, 1, 1]);
        assert!(balance_groups(&[], 3).is_empty());
    }

    // Tests zero weights from unreadable headers still land in a group
    // Verified by skipping zero-weight sources
    #[test]
    fn test_zero_weights_are_kept() {
        let groups = balance_groups(&[0.0, 0.0, 0.0], 2);

        assert_eq!(groups.len(), 2);
        assert_eq!(sizes(&groups).iter().sum::<usize>(), 3);
    }

    // Tests every partition is contiguous, ordered and complete
    // Verified by starting each group at the previous start
    #[test]
    fn test_partitions_are_contiguous() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let count = rng.random_range(1..30);
            let weights: Vec<f64> = (0..count).map(|_| rng.random_range(0.0..5000.0)).collect();
            let group_count = rng.random_range(1..8);

            let groups = balance_groups(&weights, group_count);

            assert_eq!(groups.len(), group_count.min(count));
            assert_eq!(groups.first().map(|g| g.start), Some(0));
            assert_eq!(groups.last().map(|g| g.end), Some(count));
            assert!(groups.iter().all(|g| !g.is_empty()));
            assert!(groups.windows(2).all(|pair| pair[0].end == pair[1].start));
        }
    }
}
