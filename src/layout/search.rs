//! Content-aware boundary search
//!
//! An evenly spaced cut through a tall screenshot tends to bisect text or
//! UI elements. Each candidate line near the even target is scored by the
//! summed per-channel variance of its 1-pixel strip plus a linear penalty
//! for drifting away from the target, and the lowest score wins.

use crate::io::configuration::{DISTANCE_WEIGHT, MIN_SEARCH_RADIUS, SEARCH_RADIUS_FRACTION};
use crate::layout::cuts::SliceDirection;
use crate::raster::image::{RasterImage, Rect};
use crate::raster::statistics::region_busyness;

/// Inclusive range of candidate cut positions around a target
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CutWindow {
    /// Evenly spaced position the search is anchored to
    pub target: f64,
    /// First candidate position
    pub start: i64,
    /// Last candidate position
    pub end: i64,
}

impl CutWindow {
    /// Window `[floor(target - radius), floor(target + radius)]` clamped to `[lower, upper]`
    pub fn around(target: f64, radius: f64, lower: i64, upper: i64) -> Self {
        let start = ((target - radius).floor() as i64).max(lower);
        let end = ((target + radius).floor() as i64).min(upper);
        Self { target, start, end }
    }

    /// Whether no candidate survives the clamping
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }
}

/// Search radius for pieces spaced `spacing` pixels apart
pub fn search_radius(spacing: f64) -> f64 {
    MIN_SEARCH_RADIUS.max((spacing * SEARCH_RADIUS_FRACTION).floor())
}

/// Busyness of the cut line at `position`; infinite outside the image
pub fn solidity_score(image: &RasterImage, direction: SliceDirection, position: i64) -> f64 {
    let Ok(pos) = u32::try_from(position) else {
        return f64::INFINITY;
    };
    let strip = match direction {
        SliceDirection::Horizontal if pos < image.height() => {
            Rect::new(0, pos, image.width(), pos + 1)
        }
        SliceDirection::Vertical if pos < image.width() => {
            Rect::new(pos, 0, pos + 1, image.height())
        }
        _ => return f64::INFINITY,
    };
    strip
        .ok()
        .and_then(|rect| region_busyness(image, rect))
        .unwrap_or(f64::INFINITY)
}

/// Solidity plus the distance penalty relative to `target`
pub fn cut_score(
    image: &RasterImage,
    direction: SliceDirection,
    position: i64,
    target: f64,
) -> f64 {
    DISTANCE_WEIGHT.mul_add(
        (position as f64 - target).abs(),
        solidity_score(image, direction, position),
    )
}

/// Lowest-scoring position in `window`, scanning upward so the lowest position wins ties
///
/// Returns `None` only when the window is empty or every candidate is
/// outside the image.
pub fn find_best_cut(
    image: &RasterImage,
    direction: SliceDirection,
    window: CutWindow,
) -> Option<u32> {
    let mut best: Option<(i64, f64)> = None;
    for position in window.start..=window.end {
        let score = cut_score(image, direction, position, window.target);
        if !score.is_finite() {
            continue;
        }
        if best.is_none_or(|(_, lowest)| score < lowest) {
            best = Some((position, score));
        }
    }
    best.and_then(|(position, score)| {
        log::debug!(
            "cut near {:.1} -> {position} (score {score:.3})",
            window.target
        );
        u32::try_from(position).ok()
    })
}
