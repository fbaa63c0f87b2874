//! Decoded bitmap with pixel mode, resolution metadata and frame sequence
//!
//! All geometry goes through explicit [`Rect`] values validated against the
//! image bounds, so crops can never be empty or reach outside the buffer.

use crate::io::configuration::BACKGROUND;
use crate::io::error::{Result, invalid_geometry};
use image::imageops::{self, FilterType};
use image::{ColorType, DynamicImage, Rgb, RgbImage};

/// Pixel layout of a decoded source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelMode {
    /// Single luminance channel
    Grayscale,
    /// Three color channels
    Rgb,
    /// Three color channels plus alpha
    Rgba,
    /// Palette source, expanded to RGB or RGBA samples on decode
    Indexed,
}

impl PixelMode {
    /// Mode implied by a decoded buffer's color type
    pub const fn from_color(color: ColorType) -> Self {
        match color {
            ColorType::L8 | ColorType::L16 => Self::Grayscale,
            ColorType::La8
            | ColorType::La16
            | ColorType::Rgba8
            | ColorType::Rgba16
            | ColorType::Rgba32F => Self::Rgba,
            _ => Self::Rgb,
        }
    }
}

/// Embedded resolution in dots per inch
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Horizontal dots per inch
    pub x: f64,
    /// Vertical dots per inch
    pub y: f64,
}

impl Resolution {
    /// Same density on both axes
    pub const fn uniform(dpi: f64) -> Self {
        Self { x: dpi, y: dpi }
    }

    /// Densities rounded for a JFIF header, if both fit
    pub fn as_jfif_density(&self) -> Option<(u16, u16)> {
        let fits = |v: f64| v.is_finite() && v >= 1.0 && v <= f64::from(u16::MAX);
        (fits(self.x) && fits(self.y)).then(|| (self.x.round() as u16, self.y.round() as u16))
    }
}

/// Pixel rectangle with exclusive right and bottom edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// First column inside the rectangle
    pub left: u32,
    /// First row inside the rectangle
    pub top: u32,
    /// First column past the rectangle
    pub right: u32,
    /// First row past the rectangle
    pub bottom: u32,
}

impl Rect {
    /// Build a rectangle, rejecting empty or inverted spans
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` when `left >= right` or `top >= bottom`
    pub fn new(left: u32, top: u32, right: u32, bottom: u32) -> Result<Self> {
        if left >= right || top >= bottom {
            return Err(invalid_geometry(
                "rect",
                &format!("({left}, {top}, {right}, {bottom})"),
                &"rectangle must have positive width and height",
            ));
        }
        Ok(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    /// Horizontal extent
    pub const fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Vertical extent
    pub const fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Check the rectangle lies inside a `width` by `height` image
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right <= width && self.bottom <= height
    }
}

/// In-memory decoded bitmap owned by a single operation
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: DynamicImage,
    mode: PixelMode,
    resolution: Option<Resolution>,
    extra_frames: Vec<DynamicImage>,
}

impl RasterImage {
    /// Wrap a decoded buffer, deriving the mode from its color type
    pub fn new(pixels: DynamicImage) -> Self {
        let mode = PixelMode::from_color(pixels.color());
        Self {
            pixels,
            mode,
            resolution: None,
            extra_frames: Vec::new(),
        }
    }

    /// Override the recorded pixel mode
    #[must_use]
    pub const fn with_mode(mut self, mode: PixelMode) -> Self {
        self.mode = mode;
        self
    }

    /// Attach embedded resolution metadata
    #[must_use]
    pub const fn with_resolution(mut self, resolution: Option<Resolution>) -> Self {
        self.resolution = resolution;
        self
    }

    /// Attach frames that follow the first one in a multi-frame source
    #[must_use]
    pub fn with_extra_frames(mut self, frames: Vec<DynamicImage>) -> Self {
        self.extra_frames = frames;
        self
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Recorded pixel mode
    pub const fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Embedded resolution, if the source carried one
    pub const fn resolution(&self) -> Option<Resolution> {
        self.resolution
    }

    /// Underlying pixel buffer of the first frame
    pub const fn pixels(&self) -> &DynamicImage {
        &self.pixels
    }

    /// Number of frames including the first
    pub const fn frame_count(&self) -> usize {
        1 + self.extra_frames.len()
    }

    /// Split into one image per frame, each keeping mode and resolution
    pub fn into_frames(self) -> Vec<Self> {
        let Self {
            pixels,
            mode,
            resolution,
            extra_frames,
        } = self;
        std::iter::once(pixels)
            .chain(extra_frames)
            .map(|frame| Self {
                pixels: frame,
                mode,
                resolution,
                extra_frames: Vec::new(),
            })
            .collect()
    }

    /// Copy out the pixels inside `rect`
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` when the rectangle reaches outside the image
    pub fn crop(&self, rect: Rect) -> Result<Self> {
        if !rect.fits_within(self.width(), self.height()) {
            return Err(invalid_geometry(
                "rect",
                &format!(
                    "({}, {}, {}, {})",
                    rect.left, rect.top, rect.right, rect.bottom
                ),
                &format!(
                    "rectangle exceeds image bounds {}x{}",
                    self.width(),
                    self.height()
                ),
            ));
        }
        Ok(self.derive(
            self.pixels
                .crop_imm(rect.left, rect.top, rect.width(), rect.height()),
        ))
    }

    /// Resize to exact dimensions with a Lanczos filter
    #[must_use]
    pub fn resize_exact(&self, width: u32, height: u32) -> Self {
        if width == self.width() && height == self.height() {
            return self.clone();
        }
        self.derive(
            self.pixels
                .resize_exact(width.max(1), height.max(1), FilterType::Lanczos3),
        )
    }

    /// Resize to `width`, keeping the aspect ratio; no-op when already that wide
    #[must_use]
    pub fn resize_to_width(&self, width: u32) -> Self {
        if width == self.width() {
            return self.clone();
        }
        let height = scaled_extent(self.height(), width, self.width());
        self.resize_exact(width, height)
    }

    /// Resize to `height`, keeping the aspect ratio; no-op when already that tall
    #[must_use]
    pub fn resize_to_height(&self, height: u32) -> Self {
        if height == self.height() {
            return self.clone();
        }
        let width = scaled_extent(self.width(), height, self.height());
        self.resize_exact(width, height)
    }

    /// Drop alpha and expand gray or palette samples to three 8-bit channels
    pub fn to_rgb8(&self) -> RgbImage {
        self.pixels.to_rgb8()
    }

    fn derive(&self, pixels: DynamicImage) -> Self {
        Self {
            pixels,
            mode: self.mode,
            resolution: self.resolution,
            extra_frames: Vec::new(),
        }
    }
}

/// Scale `extent` by `numerator / denominator`, truncating like integer pixel math
pub fn scaled_extent(extent: u32, numerator: u32, denominator: u32) -> u32 {
    if denominator == 0 {
        return extent.max(1);
    }
    let scaled = u64::from(extent) * u64::from(numerator) / u64::from(denominator);
    u32::try_from(scaled).unwrap_or(u32::MAX).max(1)
}

/// White opaque RGB canvas
pub fn blank_canvas(width: u32, height: u32) -> RgbImage {
    RgbImage::from_pixel(width, height, Rgb(BACKGROUND))
}

/// Copy `source` onto `canvas` with its top-left corner at (`x`, `y`), ignoring alpha
pub fn paste(canvas: &mut RgbImage, source: &RasterImage, x: u32, y: u32) {
    imageops::replace(canvas, &source.to_rgb8(), i64::from(x), i64::from(y));
}
