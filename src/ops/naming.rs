//! Output naming contracts
//!
//! Stitched sheets: `stitched_<mode>_<YYYYMMDD>_p<N><ext>`, suffixed `_1`,
//! `_2`, ... on collision. Slices go into a folder named after the source:
//! `<base>_<NN><ext>` for horizontal cuts, `<base>_v<NN><ext>` for vertical
//! cuts and `<base>_r<RR>_c<CC><ext>` for grid cells, all 1-based.

use crate::io::configuration::{INDEX_WIDTH, STITCH_DATE_FORMAT};
use crate::layout::cuts::SliceDirection;
use crate::layout::stitch::StitchLayout;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

/// Date stamp used in stitched names
pub fn date_stamp(date: NaiveDate) -> String {
    date.format(STITCH_DATE_FORMAT).to_string()
}

/// Stem of the `part`-th (1-based) stitched sheet
///
/// A base-name override replaces the `stitched_<mode>_<date>` prefix.
pub fn stitched_stem(
    layout: StitchLayout,
    date: &str,
    part: usize,
    base_override: Option<&str>,
) -> String {
    base_override.map_or_else(
        || format!("stitched_{}_{date}_p{part}", layout.label()),
        |base| format!("{base}_p{part}"),
    )
}

/// First free path of the form `<stem><ext>`, `<stem>_1<ext>`, `<stem>_2<ext>`, ...
pub fn unique_path(dir: &Path, stem: &str, extension: &str) -> PathBuf {
    let mut candidate = dir.join(format!("{stem}{extension}"));
    let mut counter = 1_u32;
    while candidate.exists() {
        candidate = dir.join(format!("{stem}_{counter}{extension}"));
        counter += 1;
    }
    candidate
}

/// Base name for a source's slices: the override, or the file stem
pub fn source_base_name(source: &Path, base_override: Option<&str>) -> String {
    if let Some(base) = base_override.filter(|base| !base.is_empty()) {
        return base.to_string();
    }
    let Some(stem) = source.file_stem() else {
        return "image".to_string();
    };
    stem.to_string_lossy().into_owned()
}

/// File name of the `index`-th (0-based) linear slice
pub fn slice_file_name(
    base: &str,
    index: usize,
    direction: SliceDirection,
    extension: &str,
) -> String {
    let tag = match direction {
        SliceDirection::Horizontal => "",
        SliceDirection::Vertical => "v",
    };
    format!(
        "{base}_{tag}{:0width$}{extension}",
        index + 1,
        width = INDEX_WIDTH
    )
}

/// File name of the grid cell at 0-based `row`, `col`
pub fn grid_file_name(base: &str, row: u32, col: u32, extension: &str) -> String {
    format!(
        "{base}_r{:0width$}_c{:0width$}{extension}",
        row + 1,
        col + 1,
        width = INDEX_WIDTH
    )
}
