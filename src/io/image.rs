//! Source decoding with a process-wide size policy and metadata sniffing
//!
//! Resolution and palette information are read straight from the PNG chunk
//! stream or the JFIF header, since the pixel decoders drop them. JPEGs whose
//! JFIF header carries no physical unit fall back to the EXIF resolution
//! tags, which is where cameras and phones record it.

use crate::io::error::{Result, SpliceError, file_system};
use crate::raster::image::{PixelMode, RasterImage, Resolution};
use exif::{In, Rational, Tag, Value};
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, ImageFormat, ImageReader, Limits};
use std::io::Cursor;
use std::path::Path;
use std::sync::OnceLock;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];
const PNG_INDEXED_COLOR_TYPE: u8 = 3;
const METERS_PER_INCH: f64 = 0.0254;
const CM_PER_INCH: f64 = 2.54;
const EXIF_UNIT_INCH: u32 = 2;
const EXIF_UNIT_CM: u32 = 3;

/// Memory guard applied to every decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DecodePolicy {
    /// No dimension or allocation limit; very large scans are expected
    #[default]
    Unlimited,
    /// Refuse decodes that would allocate more than `max_alloc` bytes
    Bounded {
        /// Allocation ceiling in bytes
        max_alloc: u64,
    },
}

static DECODE_POLICY: OnceLock<DecodePolicy> = OnceLock::new();

/// Fix the decode policy for the rest of the process
///
/// # Errors
///
/// Returns `AlreadyConfigured` when a policy was set before
pub fn init_decode_policy(policy: DecodePolicy) -> Result<()> {
    DECODE_POLICY
        .set(policy)
        .map_err(|_rejected| SpliceError::AlreadyConfigured {
            setting: "decode policy",
        })
}

/// Active decode policy, `Unlimited` unless initialized otherwise
pub fn decode_policy() -> DecodePolicy {
    DECODE_POLICY.get().copied().unwrap_or_default()
}

/// Decode the image at `path`, keeping every animation frame
///
/// # Errors
///
/// Returns `FileSystem` if the file cannot be read and `Decode` if its
/// contents are not a supported image
pub fn decode_path(path: &Path) -> Result<RasterImage> {
    let bytes = std::fs::read(path).map_err(|e| file_system(path, "read source", e))?;
    decode_bytes(&bytes).map_err(|source| SpliceError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode an in-memory encoded image
///
/// # Errors
///
/// Returns the codec error when the bytes are not a supported image
pub fn decode_bytes(bytes: &[u8]) -> image::ImageResult<RasterImage> {
    let mut reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format()?;
    apply_policy(&mut reader, decode_policy());
    let format = reader.format();
    let pixels = reader.decode()?;

    let mut raster = RasterImage::new(pixels).with_resolution(sniff_resolution(bytes));
    if png_is_indexed(bytes) || format == Some(ImageFormat::Gif) {
        raster = raster.with_mode(PixelMode::Indexed);
    }
    if format == Some(ImageFormat::Gif) {
        let frames = gif_frames(bytes)?;
        raster = raster.with_extra_frames(frames.into_iter().skip(1).collect());
    }
    Ok(raster)
}

/// Read only the header to get `(width, height)`
///
/// # Errors
///
/// Returns `Decode` when the header cannot be parsed
pub fn header_dimensions(path: &Path) -> Result<(u32, u32)> {
    image::image_dimensions(path).map_err(|source| SpliceError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_policy<R>(reader: &mut ImageReader<R>, policy: DecodePolicy)
where
    R: std::io::BufRead + std::io::Seek,
{
    match policy {
        DecodePolicy::Unlimited => reader.no_limits(),
        DecodePolicy::Bounded { max_alloc } => {
            let mut limits = Limits::default();
            limits.max_alloc = Some(max_alloc);
            reader.limits(limits);
        }
    }
}

fn gif_frames(bytes: &[u8]) -> image::ImageResult<Vec<DynamicImage>> {
    let decoder = GifDecoder::new(Cursor::new(bytes))?;
    let frames = decoder.into_frames().collect_frames()?;
    Ok(frames
        .into_iter()
        .map(|frame| DynamicImage::ImageRgba8(frame.into_buffer()))
        .collect())
}

/// Resolution stored in a PNG `pHYs` chunk, a JFIF header or JPEG EXIF tags
pub fn sniff_resolution(bytes: &[u8]) -> Option<Resolution> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        png_resolution(bytes)
    } else if bytes.starts_with(&[0xFF, 0xD8]) {
        jfif_resolution(bytes).or_else(|| exif_resolution(bytes))
    } else {
        None
    }
}

fn png_resolution(bytes: &[u8]) -> Option<Resolution> {
    let data = png_chunk(bytes, *b"pHYs")?;
    let x = be_u32(data.get(0..4)?)?;
    let y = be_u32(data.get(4..8)?)?;
    // Unit 1 is pixels per meter; unit 0 only carries an aspect ratio
    (*data.get(8)? == 1 && x > 0 && y > 0).then(|| Resolution {
        x: f64::from(x) * METERS_PER_INCH,
        y: f64::from(y) * METERS_PER_INCH,
    })
}

fn png_is_indexed(bytes: &[u8]) -> bool {
    bytes.starts_with(&PNG_SIGNATURE)
        && png_chunk(bytes, *b"IHDR")
            .and_then(|ihdr| ihdr.get(9).copied())
            .is_some_and(|color_type| color_type == PNG_INDEXED_COLOR_TYPE)
}

// Walks chunks up to the first IDAT; metadata chunks must precede it
fn png_chunk(bytes: &[u8], kind: [u8; 4]) -> Option<&[u8]> {
    let mut offset = PNG_SIGNATURE.len();
    loop {
        let length = be_u32(bytes.get(offset..offset + 4)?)? as usize;
        let chunk_type = bytes.get(offset + 4..offset + 8)?;
        let data = bytes.get(offset + 8..offset + 8 + length)?;
        if chunk_type == kind.as_slice() {
            return Some(data);
        }
        if chunk_type == b"IDAT".as_slice() {
            return None;
        }
        offset += 12 + length;
    }
}

fn jfif_resolution(bytes: &[u8]) -> Option<Resolution> {
    let header = bytes.get(2..11)?;
    if !header.starts_with(&[0xFF, 0xE0]) || !header.ends_with(b"JFIF\0") {
        return None;
    }
    let units = *bytes.get(13)?;
    let x = f64::from(be_u16(bytes.get(14..16)?)?);
    let y = f64::from(be_u16(bytes.get(16..18)?)?);
    if x <= 0.0 || y <= 0.0 {
        return None;
    }
    match units {
        1 => Some(Resolution { x, y }),
        2 => Some(Resolution {
            x: x * CM_PER_INCH,
            y: y * CM_PER_INCH,
        }),
        _ => None,
    }
}

fn exif_resolution(bytes: &[u8]) -> Option<Resolution> {
    let exif = exif::Reader::new()
        .read_from_container(&mut Cursor::new(bytes))
        .ok()?;
    let axis = |tag: Tag| match &exif.get_field(tag, In::PRIMARY)?.value {
        Value::Rational(values) => values.first().map(Rational::to_f64),
        _ => None,
    };
    let x = axis(Tag::XResolution)?;
    let y = axis(Tag::YResolution)?;
    if !(x.is_finite() && y.is_finite() && x > 0.0 && y > 0.0) {
        return None;
    }
    // Inches unless the unit tag says otherwise
    let unit = exif
        .get_field(Tag::ResolutionUnit, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .unwrap_or(EXIF_UNIT_INCH);
    match unit {
        EXIF_UNIT_INCH => Some(Resolution { x, y }),
        EXIF_UNIT_CM => Some(Resolution {
            x: x * CM_PER_INCH,
            y: y * CM_PER_INCH,
        }),
        _ => None,
    }
}

fn be_u32(bytes: &[u8]) -> Option<u32> {
    Some(u32::from_be_bytes(bytes.try_into().ok()?))
}

fn be_u16(bytes: &[u8]) -> Option<u16> {
    Some(u16::from_be_bytes(bytes.try_into().ok()?))
}
