//! Entry points returning a success flag plus message
//!
//! Each operation validates its request, decodes what it needs, drives the
//! layout engine and the constrained encoder, and folds every per-item
//! problem into one [`Outcome`]. Nothing here returns an error.

/// Background execution of entry points
pub mod job;
/// Multi-page PDF merge
pub mod merge;
/// Output file and folder names
pub mod naming;
/// Outcome type and batch aggregation
pub mod outcome;
/// Linear and grid slicing
pub mod slice;
/// Stitching into sheets
pub mod stitch;

pub use job::{Job, spawn};
pub use merge::{MergeRequest, merge_to_pdf};
pub use outcome::Outcome;
pub use slice::{GridSliceRequest, SliceRequest, slice_grid, slice_linear};
pub use stitch::{StitchRequest, stitch};
