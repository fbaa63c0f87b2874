//! Constrained encoder: serialize a raster under an optional size ceiling
//!
//! JPEG and PDF output run the shared quality search when a ceiling is set.
//! PNG is always written at maximum compression and ignores the ceiling,
//! since a lossless codec cannot trade quality for size.

use crate::encode::format::{Codec, OutputFormat};
use crate::encode::pdf::{PdfPage, write_document};
use crate::encode::quality::{EncodedArtifact, QualityRange, search_quality};
use crate::io::configuration::{BYTES_PER_KB, DEFAULT_QUALITY, PDF_FALLBACK_DPI};
use crate::io::error::{AtPath, Result, file_system};
use crate::raster::image::{RasterImage, Resolution};
use image::codecs::jpeg::{JpegEncoder, PixelDensity, PixelDensityUnit};
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{DynamicImage, RgbImage};
use std::borrow::Cow;
use std::path::Path;

/// Byte budget for a ceiling in kilobytes; zero or absent means unlimited
pub fn budget_bytes(ceiling_kb: Option<u64>) -> Option<u64> {
    ceiling_kb
        .filter(|&kb| kb > 0)
        .map(|kb| kb.saturating_mul(BYTES_PER_KB))
}

/// Baseline JPEG at `quality`, carrying `density` in the JFIF header when given
///
/// # Errors
///
/// Returns `Encode` if the JPEG encoder fails
pub fn encode_jpeg(rgb: &RgbImage, quality: u8, density: Option<Resolution>) -> Result<Vec<u8>> {
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, quality);
    if let Some((x, y)) = density.and_then(|dpi| dpi.as_jfif_density()) {
        encoder.set_pixel_density(PixelDensity {
            density: (x, y),
            unit: PixelDensityUnit::Inches,
        });
    }
    rgb.write_with_encoder(encoder)?;
    Ok(bytes)
}

/// PNG at maximum compression, keeping the source channels
///
/// # Errors
///
/// Returns `Encode` if the PNG encoder fails
pub fn encode_png(image: &RasterImage) -> Result<Vec<u8>> {
    let pixels = match image.pixels() {
        DynamicImage::ImageRgb32F(_) | DynamicImage::ImageRgba32F(_) => {
            Cow::Owned(DynamicImage::ImageRgba8(image.pixels().to_rgba8()))
        }
        other => Cow::Borrowed(other),
    };
    let mut bytes = Vec::new();
    let encoder =
        PngEncoder::new_with_quality(&mut bytes, CompressionType::Best, FilterType::Adaptive);
    pixels.write_with_encoder(encoder)?;
    Ok(bytes)
}

/// Single-page PDF whose page embeds a JPEG at `quality`
///
/// # Errors
///
/// Returns `Encode` or `Pdf` if either stage fails
pub fn encode_pdf_page(rgb: &RgbImage, quality: u8, resolution: Resolution) -> Result<Vec<u8>> {
    let page = PdfPage {
        jpeg: encode_jpeg(rgb, quality, None)?,
        width: rgb.width(),
        height: rgb.height(),
        resolution,
    };
    write_document(std::slice::from_ref(&page))
}

/// Serialize `image` with `codec`, meeting `ceiling_kb` where the codec allows
///
/// # Errors
///
/// Returns `Encode` or `Pdf` when the underlying codec fails. An unreachable
/// ceiling is not an error: the lowest-quality attempt is returned with
/// `within_budget` unset.
pub fn encode_to_budget(
    image: &RasterImage,
    ceiling_kb: Option<u64>,
    codec: Codec,
) -> Result<EncodedArtifact> {
    let budget = budget_bytes(ceiling_kb);
    match codec {
        Codec::Png => Ok(EncodedArtifact::unconstrained(encode_png(image)?, None)),
        Codec::Jpeg => {
            let rgb = image.to_rgb8();
            let density = image.resolution();
            constrained(budget, |quality| encode_jpeg(&rgb, quality, density))
        }
        Codec::Pdf => {
            let rgb = image.to_rgb8();
            let resolution = image
                .resolution()
                .unwrap_or(Resolution::uniform(PDF_FALLBACK_DPI));
            constrained(budget, |quality| encode_pdf_page(&rgb, quality, resolution))
        }
    }
}

fn constrained<F>(budget: Option<u64>, mut encode: F) -> Result<EncodedArtifact>
where
    F: FnMut(u8) -> Result<Vec<u8>>,
{
    match budget {
        None => Ok(EncodedArtifact::unconstrained(
            encode(DEFAULT_QUALITY)?,
            Some(DEFAULT_QUALITY),
        )),
        Some(limit) => search_quality(limit, QualityRange::default(), encode),
    }
}

/// Encode `image` in `format` under `ceiling_kb` and write it to `path`
///
/// # Errors
///
/// Returns `Encode`/`Pdf` for codec failures and `FileSystem` if the file
/// cannot be written. Existing files at `path` are replaced.
pub fn encode(
    image: &RasterImage,
    path: &Path,
    ceiling_kb: Option<u64>,
    format: OutputFormat,
) -> Result<EncodedArtifact> {
    let codec = format.codec();
    let artifact = encode_to_budget(image, ceiling_kb, codec).at_path(path)?;
    std::fs::write(path, &artifact.bytes).map_err(|e| file_system(path, "write output", e))?;

    if !artifact.within_budget {
        log::warn!(
            "{} exceeds {} KB even at quality {}; kept best effort ({} bytes)",
            path.display(),
            ceiling_kb.unwrap_or_default(),
            artifact.quality.unwrap_or_default(),
            artifact.size()
        );
    } else if ceiling_kb.is_some() && !codec.honors_ceiling() {
        log::debug!("size ceiling ignored for lossless {}", path.display());
    }
    log::info!(
        "wrote {} ({} bytes, {})",
        path.display(),
        artifact.size(),
        artifact
            .quality
            .map_or_else(|| "lossless".to_string(), |q| format!("quality {q}"))
    );
    Ok(artifact)
}
