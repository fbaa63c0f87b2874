//! Shared raster-buffer abstractions
//!
//! This module contains the in-memory image model used by every operation:
//! - Decoded bitmaps with mode, resolution and frames
//! - Checked pixel rectangles, crop, resize and paste
//! - Per-channel statistics over pixel regions

/// Decoded bitmap model and geometric operations
pub mod image;
/// Per-channel variance statistics
pub mod statistics;

pub use image::{PixelMode, RasterImage, Rect, Resolution};
