//! Layout engine: composing sheets and partitioning images
//!
//! This module contains the geometry side of every operation:
//! - Vertical, horizontal and grid composition
//! - Linear and grid cut geometry
//! - Content-aware boundary search
//! - Balanced grouping of stitch sources

/// Linear and grid cut geometry
pub mod cuts;
/// Height-balanced grouping of stitch sources
pub mod grouping;
/// Content-aware boundary search
pub mod search;
/// Sheet composition
pub mod stitch;

pub use cuts::{CutPoints, GridCell, SliceDirection};
pub use stitch::StitchLayout;
