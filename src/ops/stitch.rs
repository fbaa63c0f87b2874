//! `stitch` entry point: group sources, compose each group, encode each sheet

use crate::encode::encoder::encode;
use crate::encode::format::OutputFormat;
use crate::io::error::{Result, SpliceError, file_system, invalid_geometry};
use crate::io::image::{decode_path, header_dimensions};
use crate::layout::grouping::{balance_groups, normalized_weight};
use crate::layout::stitch::{StitchLayout, compose};
use crate::ops::naming::{date_stamp, stitched_stem, unique_path};
use crate::ops::outcome::{BatchReport, Outcome};
use crate::raster::image::RasterImage;
use chrono::{Local, NaiveDate};
use std::ops::Range;
use std::path::PathBuf;

/// Parameters of one stitch invocation
#[derive(Debug, Clone)]
pub struct StitchRequest {
    /// Sources in output order
    pub sources: Vec<PathBuf>,
    /// Directory receiving the sheets
    pub output_dir: PathBuf,
    /// Sheet arrangement
    pub layout: StitchLayout,
    /// Number of sheets to spread the sources over (ignored for grids)
    pub split_count: usize,
    /// Final sheet width; `None` keeps the composed width
    pub target_width: Option<u32>,
    /// Advisory size ceiling per sheet in KB
    pub ceiling_kb: Option<u64>,
    /// Output format
    pub format: OutputFormat,
    /// Replaces the `stitched_<mode>_<date>` name prefix
    pub base_name: Option<String>,
}

impl StitchRequest {
    /// Vertical single-sheet request with default options
    pub fn new(sources: Vec<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            sources,
            output_dir: output_dir.into(),
            layout: StitchLayout::Vertical,
            split_count: 1,
            target_width: None,
            ceiling_kb: None,
            format: OutputFormat::Auto,
            base_name: None,
        }
    }
}

/// Stitch the request's sources into one or more sheets
///
/// Undecodable sources are skipped and listed in the message. Sheets are
/// named for today's date.
pub fn stitch(request: &StitchRequest) -> Outcome {
    stitch_on(request, Local::now().date_naive())
}

/// [`stitch`] with an explicit date for the output names
pub fn stitch_on(request: &StitchRequest, date: NaiveDate) -> Outcome {
    match run(request, date) {
        Ok(outcome) => outcome,
        Err(error) => Outcome::from(error),
    }
}

fn run(request: &StitchRequest, date: NaiveDate) -> Result<Outcome> {
    validate(request)?;
    std::fs::create_dir_all(&request.output_dir)
        .map_err(|e| file_system(&request.output_dir, "create output directory", e))?;

    let groups = plan_groups(request);
    let stamp = date_stamp(date);
    let extension = request.format.codec().extension();
    let mut report = BatchReport::new();

    for (index, range) in groups.into_iter().enumerate() {
        let part = index + 1;
        let sources = request.sources.get(range).unwrap_or(&[]);
        let images = decode_group(sources, &mut report);
        if images.is_empty() {
            report.skipped(format!("sheet {part}"), "no decodable images");
            continue;
        }

        let stem = stitched_stem(request.layout, &stamp, part, request.base_name.as_deref());
        let path = unique_path(&request.output_dir, &stem, extension);
        let written = compose(&images, request.layout, request.target_width)
            .and_then(|sheet| encode(&sheet, &path, request.ceiling_kb, request.format));
        match written {
            Ok(_) => {
                let name = path.file_name().unwrap_or_default();
                report.written(name.to_string_lossy());
            }
            Err(error) => report.failed(format!("sheet {part}"), error),
        }
    }

    let summary = format!(
        "Successfully created {} images ({}, {}).",
        report.written_count(),
        request.layout.label(),
        request.format.label()
    );
    Ok(report.into_outcome(&summary))
}

fn validate(request: &StitchRequest) -> Result<()> {
    if request.sources.is_empty() {
        return Err(SpliceError::EmptyInput {
            reason: "no images to stitch".to_string(),
        });
    }
    if let StitchLayout::Grid { rows, cols } = request.layout
        && (rows == 0 || cols == 0)
    {
        return Err(invalid_geometry(
            "grid",
            &format!("{rows}x{cols}"),
            &"rows and cols must be positive",
        ));
    }
    if request.target_width == Some(0) {
        return Err(invalid_geometry(
            "target width",
            &0,
            &"must be positive when given",
        ));
    }
    Ok(())
}

/// Contiguous source ranges, one per output sheet
///
/// Grids always produce a single sheet. Other layouts balance normalized
/// heights read from the headers; unreadable headers weigh nothing.
pub fn plan_groups(request: &StitchRequest) -> Vec<Range<usize>> {
    if request.layout.is_grid() || request.split_count <= 1 {
        let everything = 0..request.sources.len();
        return vec![everything];
    }
    let weights: Vec<f64> = request
        .sources
        .iter()
        .map(|path| {
            header_dimensions(path)
                .map_or(0.0, |(width, height)| normalized_weight(width, height))
        })
        .collect();
    balance_groups(&weights, request.split_count)
}

fn decode_group(sources: &[PathBuf], report: &mut BatchReport) -> Vec<RasterImage> {
    sources
        .iter()
        .filter_map(|path| match decode_path(path) {
            Ok(image) => Some(image),
            Err(error) => {
                report.skipped(path.display(), error);
                None
            }
        })
        .collect()
}
