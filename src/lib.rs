//! Stitching several images into sheets and slicing one image into pieces
//!
//! The layout engine composes and partitions raster buffers, with an
//! optional content-aware search that moves cut lines onto visually quiet
//! rows or columns. The constrained encoder writes JPEG, PNG or PDF output
//! under an advisory size ceiling by searching the lossy quality range.

#![forbid(unsafe_code)]

/// Codecs, quality search and PDF assembly
pub mod encode;
/// Decoding, errors, configuration and the command-line surface
pub mod io;
/// Composition, cut geometry and grouping
pub mod layout;
/// Entry points returning a success flag plus message
pub mod ops;
/// In-memory raster model and pixel statistics
pub mod raster;

pub use io::error::{Result, SpliceError};
pub use ops::Outcome;
