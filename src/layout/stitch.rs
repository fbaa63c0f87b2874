//! Composition of several images into one sheet

use crate::io::error::{Result, SpliceError, invalid_geometry};
use crate::raster::image::{RasterImage, blank_canvas, paste};
use image::DynamicImage;

/// Arrangement of a stitched sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StitchLayout {
    /// Stacked top to bottom, each image centered horizontally
    Vertical,
    /// Side by side, every image scaled to the tallest height
    Horizontal,
    /// Row-major cells sized after the first image
    Grid {
        /// Number of cell rows
        rows: u32,
        /// Number of cell columns
        cols: u32,
    },
}

impl StitchLayout {
    /// Mode name embedded in output file names
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::Grid { .. } => "grid",
        }
    }

    /// Whether the layout places images into fixed cells
    pub const fn is_grid(self) -> bool {
        matches!(self, Self::Grid { .. })
    }
}

/// Compose `images` into one canvas, then scale it to `target_width` if given
///
/// # Errors
///
/// Returns `EmptyInput` for an empty list and `InvalidGeometry` for a grid
/// with zero rows or columns, or for a sheet too large to address
pub fn compose(
    images: &[RasterImage],
    layout: StitchLayout,
    target_width: Option<u32>,
) -> Result<RasterImage> {
    if images.is_empty() {
        return Err(SpliceError::EmptyInput {
            reason: "no images to stitch".to_string(),
        });
    }

    let canvas = match layout {
        StitchLayout::Vertical => stack_vertical(images)?,
        StitchLayout::Horizontal => stack_horizontal(images)?,
        StitchLayout::Grid { rows, cols } => fill_grid(images, rows, cols)?,
    };

    Ok(match target_width {
        Some(width) if width > 0 => canvas.resize_to_width(width),
        _ => canvas,
    })
}

fn stack_vertical(images: &[RasterImage]) -> Result<RasterImage> {
    let width = images.iter().map(RasterImage::width).max().unwrap_or(1);
    let height = total_extent("height", images.iter().map(RasterImage::height))?;

    let mut canvas = blank_canvas(width, height);
    let mut y = 0;
    for image in images {
        paste(&mut canvas, image, (width - image.width()) / 2, y);
        y += image.height();
    }
    Ok(finish(canvas, images))
}

fn stack_horizontal(images: &[RasterImage]) -> Result<RasterImage> {
    let height = images.iter().map(RasterImage::height).max().unwrap_or(1);
    let resized: Vec<RasterImage> = images
        .iter()
        .map(|image| image.resize_to_height(height))
        .collect();
    let width = total_extent("width", resized.iter().map(RasterImage::width))?;

    let mut canvas = blank_canvas(width, height);
    let mut x = 0;
    for image in &resized {
        paste(&mut canvas, image, x, 0);
        x += image.width();
    }
    Ok(finish(canvas, images))
}

fn fill_grid(images: &[RasterImage], rows: u32, cols: u32) -> Result<RasterImage> {
    if rows == 0 || cols == 0 {
        return Err(invalid_geometry(
            "grid",
            &format!("{rows}x{cols}"),
            &"rows and cols must be positive",
        ));
    }
    let Some(reference) = images.first() else {
        return Err(SpliceError::EmptyInput {
            reason: "no images to stitch".to_string(),
        });
    };
    let (cell_width, cell_height) = (reference.width(), reference.height());

    let Some(width) = cell_width.checked_mul(cols) else {
        return Err(grid_overflow("cols", cols, cell_width));
    };
    let Some(height) = cell_height.checked_mul(rows) else {
        return Err(grid_overflow("rows", rows, cell_height));
    };

    let mut canvas = blank_canvas(width, height);
    let cells = (0..rows).flat_map(|row| (0..cols).map(move |col| (row, col)));
    for (image, (row, col)) in images.iter().zip(cells) {
        let fitted = image.resize_exact(cell_width, cell_height);
        paste(&mut canvas, &fitted, col * cell_width, row * cell_height);
    }
    Ok(finish(canvas, images))
}

fn grid_overflow(parameter: &'static str, count: u32, cell: u32) -> SpliceError {
    invalid_geometry(
        parameter,
        &count,
        &format!("{count} cells of {cell} pixels overflow"),
    )
}

fn total_extent(parameter: &'static str, mut extents: impl Iterator<Item = u32>) -> Result<u32> {
    extents
        .try_fold(0_u32, u32::checked_add)
        .ok_or_else(|| invalid_geometry(parameter, &"sum of sources", &"overflows the sheet"))
}

// The sheet inherits the first source's resolution metadata
fn finish(canvas: image::RgbImage, images: &[RasterImage]) -> RasterImage {
    RasterImage::new(DynamicImage::ImageRgb8(canvas))
        .with_resolution(images.first().and_then(RasterImage::resolution))
}
