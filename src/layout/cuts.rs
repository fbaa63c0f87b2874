//! Cut geometry for linear and grid slicing

use crate::io::error::{Result, invalid_geometry};
use crate::layout::search::{CutWindow, find_best_cut, search_radius};
use crate::raster::image::{RasterImage, Rect};
use clap::ValueEnum;

/// Orientation of the cut lines in a linear slice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum SliceDirection {
    /// Horizontal cut lines; pieces are stacked rows spanning the full width
    #[default]
    Horizontal,
    /// Vertical cut lines; pieces are side-by-side columns spanning the full height
    Vertical,
}

impl SliceDirection {
    /// Length of the axis the cut offsets run along
    pub fn axis_length(self, image: &RasterImage) -> u32 {
        match self {
            Self::Horizontal => image.height(),
            Self::Vertical => image.width(),
        }
    }

    /// Rectangle covering `[start, end)` along the cut axis
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` for an empty span
    pub fn segment_rect(self, image: &RasterImage, start: u32, end: u32) -> Result<Rect> {
        match self {
            Self::Horizontal => Rect::new(0, start, image.width(), end),
            Self::Vertical => Rect::new(start, 0, end, image.height()),
        }
    }

    /// Lowercase label used in messages
    pub const fn label(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Strictly increasing offsets from 0 to the axis length
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutPoints {
    offsets: Vec<u32>,
}

impl CutPoints {
    /// Sort and deduplicate offsets, then check they span `[0, length]`
    ///
    /// # Errors
    ///
    /// Returns `InvalidGeometry` if the first offset is not 0, the last is not
    /// `length`, or fewer than two distinct offsets remain
    pub fn new(mut offsets: Vec<u32>, length: u32) -> Result<Self> {
        offsets.sort_unstable();
        offsets.dedup();
        let spans = offsets.first() == Some(&0) && offsets.last() == Some(&length);
        if !spans || offsets.len() < 2 {
            return Err(invalid_geometry(
                "cut points",
                &format!("{offsets:?}"),
                &format!("offsets must run from 0 to {length}"),
            ));
        }
        Ok(Self { offsets })
    }

    /// All offsets including both edges
    pub fn offsets(&self) -> &[u32] {
        &self.offsets
    }

    /// Interior boundaries only
    pub fn interior(&self) -> &[u32] {
        let end = self.offsets.len().saturating_sub(1);
        self.offsets.get(1..end).unwrap_or(&[])
    }

    /// Consecutive `(start, end)` spans, never empty
    pub fn segments(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.offsets.windows(2).filter_map(|pair| match pair {
            [start, end] if end > start => Some((*start, *end)),
            _ => None,
        })
    }

    /// Number of segments
    pub const fn segment_count(&self) -> usize {
        self.offsets.len() - 1
    }
}

/// Cut offsets splitting `image` into `count` pieces along `direction`
///
/// Boundaries sit at `floor(i * length / count)`. In content-aware mode each
/// one moves to the quietest line within the search radius, clamped so that
/// every piece keeps at least one pixel.
///
/// # Errors
///
/// Returns `InvalidGeometry` when `count` is zero or exceeds the axis length
pub fn linear_cuts(
    image: &RasterImage,
    count: u32,
    direction: SliceDirection,
    content_aware: bool,
) -> Result<CutPoints> {
    let length = direction.axis_length(image);
    if count == 0 || count > length {
        return Err(invalid_geometry(
            "count",
            &count,
            &format!("must be between 1 and the axis length {length}"),
        ));
    }

    let spacing = f64::from(length) / f64::from(count);
    let radius = search_radius(spacing);
    let mut offsets = Vec::with_capacity(count as usize + 1);
    offsets.push(0);

    let mut previous = 0_i64;
    for i in 1..count {
        let naive = (u64::from(i) * u64::from(length) / u64::from(count)) as u32;
        let position = if content_aware {
            let target = f64::from(i) * spacing;
            let lower = previous + 1;
            let upper = i64::from(length) - i64::from(count - i);
            let window = CutWindow::around(target, radius, lower, upper);
            find_best_cut(image, direction, window).unwrap_or(naive)
        } else {
            naive
        };
        offsets.push(position);
        previous = i64::from(position);
    }

    offsets.push(length);
    CutPoints::new(offsets, length)
}

/// One cell of a grid slice with 0-based indices
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCell {
    /// Row index from the top
    pub row: u32,
    /// Column index from the left
    pub col: u32,
    /// Pixel rectangle of the cell
    pub rect: Rect,
}

/// Row-major cells tiling a `width` by `height` image into `rows` by `cols`
///
/// Cell starts are `floor(i * extent / n)`; the last row and column end on
/// the image edge so rounding never leaves a gap.
///
/// # Errors
///
/// Returns `InvalidGeometry` when rows or cols is zero or larger than the
/// matching image extent
pub fn grid_cells(width: u32, height: u32, rows: u32, cols: u32) -> Result<Vec<GridCell>> {
    if rows == 0 || rows > height {
        return Err(invalid_geometry(
            "rows",
            &rows,
            &format!("must be between 1 and the image height {height}"),
        ));
    }
    if cols == 0 || cols > width {
        return Err(invalid_geometry(
            "cols",
            &cols,
            &format!("must be between 1 and the image width {width}"),
        ));
    }

    let edge = |i: u32, n: u32, extent: u32| -> u32 {
        if i >= n {
            extent
        } else {
            (u64::from(i) * u64::from(extent) / u64::from(n)) as u32
        }
    };

    let mut cells = Vec::with_capacity(rows as usize * cols as usize);
    for row in 0..rows {
        for col in 0..cols {
            let rect = Rect::new(
                edge(col, cols, width),
                edge(row, rows, height),
                edge(col + 1, cols, width),
                edge(row + 1, rows, height),
            )?;
            cells.push(GridCell { row, col, rect });
        }
    }
    Ok(cells)
}
