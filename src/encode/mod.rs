//! Constrained encoder: codecs, size-targeting search and document output

/// Encode dispatch per codec and file output
pub mod encoder;
/// Output formats and resolved codecs
pub mod format;
/// PDF assembly around JPEG page streams
pub mod pdf;
/// Shared quality search under a byte budget
pub mod quality;

pub use encoder::{encode, encode_to_budget};
pub use format::{Codec, OutputFormat};
pub use quality::EncodedArtifact;
