//! Input/output surfaces: decoding, errors, configuration and the CLI

/// Command-line interface and batch driver
pub mod cli;
/// Encoder, layout and display constants
pub mod configuration;
/// Crate error type
pub mod error;
/// Decoding sources into raster images
pub mod image;
/// Batch progress display
pub mod progress;
/// Numeric-aware ordering of input paths
pub mod sort;
