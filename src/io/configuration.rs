//! Encoder, layout and display constants

// Constrained encoder qualities
/// Quality used when no size ceiling is set, and the first attempt when one is
pub const DEFAULT_QUALITY: u8 = 95;
/// Lowest quality the size search may settle on
pub const MIN_SEARCH_QUALITY: u8 = 5;
/// Highest quality the size search tries after the first attempt fails
pub const MAX_SEARCH_QUALITY: u8 = 90;
/// Bytes per kilobyte when converting a size ceiling
pub const BYTES_PER_KB: u64 = 1024;

// Content-aware cut search
/// Smallest search radius in pixels around an evenly spaced target
pub const MIN_SEARCH_RADIUS: f64 = 50.0;
/// Search radius as a fraction of the even piece spacing
pub const SEARCH_RADIUS_FRACTION: f64 = 0.4;
/// Score penalty per pixel of drift from the evenly spaced target
pub const DISTANCE_WEIGHT: f64 = 0.1;

// Grouping
/// Width every source is normalized to before comparing heights
pub const REFERENCE_WIDTH: f64 = 1000.0;

// Document output
/// Page resolution for single-image PDFs when the source carries none
pub const PDF_FALLBACK_DPI: f64 = 72.0;
/// Page resolution for merged PDFs when the source carries none
pub const MERGE_FALLBACK_DPI: f64 = 100.0;
/// Points per inch in PDF user space
pub const POINTS_PER_INCH: f64 = 72.0;

// Canvas
/// Background fill for stitched canvases and blank grid cells
pub const BACKGROUND: [u8; 3] = [255, 255, 255];

// Naming
/// Digits used for 1-based slice and grid indices
pub const INDEX_WIDTH: usize = 2;
/// Date format embedded in stitched output names
pub const STITCH_DATE_FORMAT: &str = "%Y%m%d";

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
