pub mod merge;
pub mod slice;
pub mod stitch;
