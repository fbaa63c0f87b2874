//! Numeric-aware ordering of source paths

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static DIGIT_RUN: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"[0-9]+").ok());

/// Sequence number of a file: the last run of ASCII digits in its file name
///
/// `20251205_093600_001.jpg` yields 1. Directories are ignored, so digits in
/// a parent folder never affect ordering. Runs too long for `u64` saturate.
pub fn sequence_number(path: &Path) -> Option<u64> {
    let name = path.file_name()?.to_string_lossy();
    let digits = DIGIT_RUN.as_ref()?.find_iter(&name).last()?;
    Some(digits.as_str().parse::<u64>().unwrap_or(u64::MAX))
}

/// Order paths by [`sequence_number`], placing names without digits last
///
/// The sort is stable: equal keys keep their input order.
pub fn sort_paths(paths: &mut [PathBuf]) {
    paths.sort_by_cached_key(|path| {
        let key = sequence_number(path);
        (key.is_none(), key)
    });
}
