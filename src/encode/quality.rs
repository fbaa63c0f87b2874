//! Size-targeting quality search shared by every lossy codec
//!
//! The routine first tries the default quality and accepts it if it already
//! fits. Otherwise it binary-searches the integer quality range for the
//! highest setting whose output fits the byte budget, assuming output size
//! grows with quality. If nothing fits, the lowest quality tried is kept as
//! a best effort.

use crate::io::configuration::{DEFAULT_QUALITY, MAX_SEARCH_QUALITY, MIN_SEARCH_QUALITY};

/// Encoded bytes together with how they were produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedArtifact {
    /// Serialized output
    pub bytes: Vec<u8>,
    /// Quality setting used; `None` for lossless codecs
    pub quality: Option<u8>,
    /// Whether the bytes satisfy the requested budget (always true without one)
    pub within_budget: bool,
    /// Number of encodes performed to pick this artifact
    pub attempts: u32,
}

impl EncodedArtifact {
    /// Artifact from a single encode with no budget to meet
    pub const fn unconstrained(bytes: Vec<u8>, quality: Option<u8>) -> Self {
        Self {
            bytes,
            quality,
            within_budget: true,
            attempts: 1,
        }
    }

    /// Size in bytes
    pub const fn size(&self) -> u64 {
        self.bytes.len() as u64
    }
}

/// Initial quality and search bounds for [`search_quality`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QualityRange {
    /// Quality tried first and accepted unchanged when it fits
    pub initial: u8,
    /// Lowest quality searched
    pub min: u8,
    /// Highest quality searched
    pub max: u8,
}

impl Default for QualityRange {
    fn default() -> Self {
        Self {
            initial: DEFAULT_QUALITY,
            min: MIN_SEARCH_QUALITY,
            max: MAX_SEARCH_QUALITY,
        }
    }
}

/// Highest-quality encode whose size is at most `budget` bytes
///
/// `encode` maps a quality to encoded bytes and is called once for the initial quality
/// plus at most `ceil(log2(max - min + 1))` times during the search.
///
/// # Errors
///
/// Propagates the first error returned by `encode`
pub fn search_quality<F, E>(
    budget: u64,
    range: QualityRange,
    mut encode: F,
) -> Result<EncodedArtifact, E>
where
    F: FnMut(u8) -> Result<Vec<u8>, E>,
{
    let first = encode(range.initial)?;
    let mut attempts = 1;
    log::debug!(
        "initial quality {} -> {} bytes (budget {budget})",
        range.initial,
        first.len()
    );
    if first.len() as u64 <= budget {
        return Ok(EncodedArtifact {
            bytes: first,
            quality: Some(range.initial),
            within_budget: true,
            attempts,
        });
    }

    let mut low = i32::from(range.min);
    let mut high = i32::from(range.max);
    let mut best: Option<(u8, Vec<u8>)> = None;
    let mut lowest_tried: Option<(u8, Vec<u8>)> = None;

    while low <= high {
        let mid = i32::midpoint(low, high);
        let quality = mid as u8;
        let bytes = encode(quality)?;
        attempts += 1;
        log::debug!("quality {quality} -> {} bytes", bytes.len());

        if bytes.len() as u64 <= budget {
            best = Some((quality, bytes));
            low = mid + 1;
        } else {
            if lowest_tried.as_ref().is_none_or(|(q, _)| quality < *q) {
                lowest_tried = Some((quality, bytes));
            }
            high = mid - 1;
        }
    }

    let within_budget = best.is_some();
    let (quality, bytes) = match (best, lowest_tried) {
        (Some(found), _) => found,
        (None, Some(fallback)) => fallback,
        // Empty range: keep the first encode rather than encode again
        (None, None) => (range.initial, first),
    };
    Ok(EncodedArtifact {
        bytes,
        quality: Some(quality),
        within_budget,
        attempts,
    })
}
