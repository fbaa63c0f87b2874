//! Partition an ordered source list into contiguous, height-balanced groups
//!
//! Each source weighs its height as if scaled to a common reference width.
//! Sources are walked in order and added to the open group while that moves
//! its weight closer to `total / groups`; otherwise the group is closed. The
//! last group takes whatever remains, and a group is also closed early when
//! the remaining sources would otherwise not cover the remaining groups.

use crate::io::configuration::REFERENCE_WIDTH;
use std::ops::Range;

/// Height of a `width` by `height` source scaled to the reference width
pub fn normalized_weight(width: u32, height: u32) -> f64 {
    if width == 0 {
        return 0.0;
    }
    f64::from(height) * REFERENCE_WIDTH / f64::from(width)
}

/// Split `weights` into `min(group_count, weights.len())` contiguous index ranges
///
/// A `group_count` of zero is treated as one. Every index lands in exactly
/// one range and ranges are returned in input order.
pub fn balance_groups(weights: &[f64], group_count: usize) -> Vec<Range<usize>> {
    let total = weights.len();
    if total == 0 {
        return Vec::new();
    }
    let group_count = group_count.clamp(1, total);
    let target = weights.iter().sum::<f64>() / group_count as f64;

    let mut groups = Vec::with_capacity(group_count);
    let mut start = 0;
    let mut accumulated = 0.0;

    for (index, weight) in weights.iter().copied().enumerate() {
        let groups_left = group_count - groups.len();
        let remaining = total - index;
        if index > start && groups_left > 1 {
            let must_close = remaining < groups_left;
            let closer = (target - (accumulated + weight)).abs() < (target - accumulated).abs();
            if must_close || !closer {
                groups.push(start..index);
                start = index;
                accumulated = 0.0;
            }
        }
        accumulated += weight;
    }
    groups.push(start..total);
    groups
}
