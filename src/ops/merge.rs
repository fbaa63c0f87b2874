//! `merge_to_pdf` entry point: every frame of every source becomes one page

use crate::encode::encoder::{budget_bytes, encode_jpeg};
use crate::encode::pdf::{PdfPage, write_document};
use crate::encode::quality::{QualityRange, search_quality};
use crate::io::configuration::{DEFAULT_QUALITY, MERGE_FALLBACK_DPI};
use crate::io::error::{AtPath, Result, SpliceError, file_system};
use crate::io::image::decode_path;
use crate::ops::outcome::Outcome;
use crate::raster::image::{RasterImage, Resolution};
use std::path::PathBuf;

/// Parameters of one merge invocation
#[derive(Debug, Clone)]
pub struct MergeRequest {
    /// Sources in page order
    pub sources: Vec<PathBuf>,
    /// Document to create or replace
    pub output_path: PathBuf,
    /// Advisory size ceiling per page image in KB
    pub page_ceiling_kb: Option<u64>,
}

/// Merge the request's sources into a single PDF
///
/// Multi-frame sources contribute one page per frame. Undecodable sources
/// are skipped and listed in the message.
pub fn merge_to_pdf(request: &MergeRequest) -> Outcome {
    run(request).unwrap_or_else(Outcome::from)
}

fn run(request: &MergeRequest) -> Result<Outcome> {
    if request.sources.is_empty() {
        return Err(SpliceError::EmptyInput {
            reason: "no images selected".to_string(),
        });
    }

    let mut pages = Vec::new();
    let mut skipped = Vec::new();
    for path in &request.sources {
        match decode_path(path) {
            Ok(image) => {
                for frame in image.into_frames() {
                    pages.push(page_for(&frame, request.page_ceiling_kb).at_path(path)?);
                }
            }
            Err(error) => {
                log::warn!("skipping {}: {error}", path.display());
                skipped.push(path.display().to_string());
            }
        }
    }

    if pages.is_empty() {
        return Err(SpliceError::EmptyInput {
            reason: "no valid images to merge".to_string(),
        });
    }

    if let Some(parent) = request.output_path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system(parent, "create output directory", e))?;
    }
    let bytes = write_document(&pages).at_path(&request.output_path)?;
    std::fs::write(&request.output_path, &bytes)
        .map_err(|e| file_system(&request.output_path, "write output", e))?;
    log::info!(
        "wrote {} ({} pages, {} bytes)",
        request.output_path.display(),
        pages.len(),
        bytes.len()
    );

    let name = request
        .output_path
        .file_name()
        .map_or_else(String::new, |n| n.to_string_lossy().into_owned());
    let merged = format!("Successfully merged {} images into {name}", pages.len());
    if skipped.is_empty() {
        return Ok(Outcome::success(merged));
    }
    Ok(Outcome::success(format!(
        "{merged}. Skipped {} input(s): {}",
        skipped.len(),
        skipped.join("; ")
    )))
}

/// JPEG page for one frame, searched down to `ceiling_kb` when given
///
/// # Errors
///
/// Returns `Encode` if the JPEG encoder fails
pub fn page_for(frame: &RasterImage, ceiling_kb: Option<u64>) -> Result<PdfPage> {
    let rgb = frame.to_rgb8();
    let jpeg = match budget_bytes(ceiling_kb) {
        Some(budget) => {
            search_quality(budget, QualityRange::default(), |quality| {
                encode_jpeg(&rgb, quality, None)
            })?
            .bytes
        }
        None => encode_jpeg(&rgb, DEFAULT_QUALITY, None)?,
    };
    Ok(PdfPage {
        jpeg,
        width: rgb.width(),
        height: rgb.height(),
        resolution: frame
            .resolution()
            .unwrap_or(Resolution::uniform(MERGE_FALLBACK_DPI)),
    })
}
