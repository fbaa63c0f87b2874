//! `slice_linear` and `slice_grid` entry points

use crate::encode::encoder::encode;
use crate::encode::format::OutputFormat;
use crate::io::error::{Result, file_system, invalid_geometry};
use crate::io::image::decode_path;
use crate::layout::cuts::{SliceDirection, grid_cells, linear_cuts};
use crate::ops::naming::{grid_file_name, slice_file_name, source_base_name};
use crate::ops::outcome::{BatchReport, Outcome};
use crate::raster::image::{RasterImage, Rect};
use std::path::{Path, PathBuf};

/// Parameters of one linear slice invocation
#[derive(Debug, Clone)]
pub struct SliceRequest {
    /// Image to cut
    pub source: PathBuf,
    /// Directory receiving the per-source folder
    pub output_dir: PathBuf,
    /// Number of pieces
    pub count: u32,
    /// Orientation of the cut lines
    pub direction: SliceDirection,
    /// Move cuts onto visually quiet lines
    pub content_aware: bool,
    /// Width to scale the source to before cutting
    pub target_width: Option<u32>,
    /// Advisory size ceiling per piece in KB
    pub ceiling_kb: Option<u64>,
    /// Output format
    pub format: OutputFormat,
    /// Replaces the source file stem in folder and file names
    pub base_name: Option<String>,
}

impl SliceRequest {
    /// Horizontal, non-content-aware request with default options
    pub fn new(source: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, count: u32) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            count,
            direction: SliceDirection::Horizontal,
            content_aware: false,
            target_width: None,
            ceiling_kb: None,
            format: OutputFormat::Auto,
            base_name: None,
        }
    }
}

/// Parameters of one grid slice invocation
#[derive(Debug, Clone)]
pub struct GridSliceRequest {
    /// Image to cut
    pub source: PathBuf,
    /// Directory receiving the per-source folder
    pub output_dir: PathBuf,
    /// Number of cell rows
    pub rows: u32,
    /// Number of cell columns
    pub cols: u32,
    /// Width to scale the source to before cutting
    pub target_width: Option<u32>,
    /// Advisory size ceiling per cell in KB
    pub ceiling_kb: Option<u64>,
    /// Output format
    pub format: OutputFormat,
    /// Replaces the source file stem in folder and file names
    pub base_name: Option<String>,
}

impl GridSliceRequest {
    /// Request with default options
    pub fn new(
        source: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        rows: u32,
        cols: u32,
    ) -> Self {
        Self {
            source: source.into(),
            output_dir: output_dir.into(),
            rows,
            cols,
            target_width: None,
            ceiling_kb: None,
            format: OutputFormat::Auto,
            base_name: None,
        }
    }
}

/// Cut one image into `count` strips along `direction`
pub fn slice_linear(request: &SliceRequest) -> Outcome {
    run_linear(request).unwrap_or_else(Outcome::from)
}

/// Cut one image into a `rows` by `cols` grid of cells
pub fn slice_grid(request: &GridSliceRequest) -> Outcome {
    run_grid(request).unwrap_or_else(Outcome::from)
}

fn run_linear(request: &SliceRequest) -> Result<Outcome> {
    if request.count == 0 {
        return Err(invalid_geometry("count", &0, &"must be at least 1"));
    }
    check_target_width(request.target_width)?;

    let image = load(&request.source, request.target_width)?;
    let cuts = linear_cuts(
        &image,
        request.count,
        request.direction,
        request.content_aware,
    )?;
    log::debug!(
        "cut points for {}: {:?}",
        request.source.display(),
        cuts.offsets()
    );

    let base = source_base_name(&request.source, request.base_name.as_deref());
    let folder = prepare_folder(&request.output_dir, &base)?;
    let extension = request.format.codec().extension();

    let target = Target {
        folder: &folder,
        ceiling_kb: request.ceiling_kb,
        format: request.format,
    };
    let mut report = BatchReport::new();
    for (index, (start, end)) in cuts.segments().enumerate() {
        let name = slice_file_name(&base, index, request.direction, extension);
        let rect = request.direction.segment_rect(&image, start, end);
        write_piece(&image, rect, &target, name, &mut report);
    }

    let summary = format!(
        "Successfully sliced {} parts ({}, {}) into folder '{base}'.",
        report.written_count(),
        request.direction.label(),
        request.format.label()
    );
    Ok(report.into_outcome(&summary))
}

fn run_grid(request: &GridSliceRequest) -> Result<Outcome> {
    if request.rows == 0 || request.cols == 0 {
        return Err(invalid_geometry(
            "grid",
            &format!("{}x{}", request.rows, request.cols),
            &"rows and cols must be positive",
        ));
    }
    check_target_width(request.target_width)?;

    let image = load(&request.source, request.target_width)?;
    let cells = grid_cells(image.width(), image.height(), request.rows, request.cols)?;

    let base = source_base_name(&request.source, request.base_name.as_deref());
    let folder = prepare_folder(&request.output_dir, &base)?;
    let extension = request.format.codec().extension();

    let target = Target {
        folder: &folder,
        ceiling_kb: request.ceiling_kb,
        format: request.format,
    };
    let mut report = BatchReport::new();
    for cell in cells {
        let name = grid_file_name(&base, cell.row, cell.col, extension);
        write_piece(&image, Ok(cell.rect), &target, name, &mut report);
    }

    let summary = format!(
        "Successfully sliced {} grid parts ({}) into folder '{base}'.",
        report.written_count(),
        request.format.label()
    );
    Ok(report.into_outcome(&summary))
}

struct Target<'a> {
    folder: &'a Path,
    ceiling_kb: Option<u64>,
    format: OutputFormat,
}

fn write_piece(
    image: &RasterImage,
    rect: Result<Rect>,
    target: &Target<'_>,
    name: String,
    report: &mut BatchReport,
) {
    let path = target.folder.join(&name);
    let written = rect
        .and_then(|rect| image.crop(rect))
        .and_then(|piece| encode(&piece, &path, target.ceiling_kb, target.format));
    match written {
        Ok(_) => report.written(name),
        Err(error) => report.failed(name, error),
    }
}

fn check_target_width(target_width: Option<u32>) -> Result<()> {
    if target_width == Some(0) {
        return Err(invalid_geometry(
            "target width",
            &0,
            &"must be positive when given",
        ));
    }
    Ok(())
}

// Cut geometry is computed on the resized grid, so resize first
fn load(source: &Path, target_width: Option<u32>) -> Result<RasterImage> {
    let image = decode_path(source)?;
    Ok(match target_width {
        Some(width) => image.resize_to_width(width),
        None => image,
    })
}

fn prepare_folder(output_dir: &Path, base: &str) -> Result<PathBuf> {
    let folder = output_dir.join(base);
    std::fs::create_dir_all(&folder)
        .map_err(|e| file_system(&folder, "create slice folder", e))?;
    Ok(folder)
}
