//! Units of work that can run on the caller's thread or a worker thread

use crate::ops::merge::{MergeRequest, merge_to_pdf};
use crate::ops::outcome::Outcome;
use crate::ops::slice::{GridSliceRequest, SliceRequest, slice_grid, slice_linear};
use crate::ops::stitch::{StitchRequest, stitch};
use std::thread::{self, JoinHandle};

/// One invocation of an entry point, owned so it can move to another thread
#[derive(Debug, Clone)]
pub enum Job {
    /// Compose several sources into sheets
    Stitch(StitchRequest),
    /// Cut one source into strips
    Slice(SliceRequest),
    /// Cut one source into grid cells
    Grid(GridSliceRequest),
    /// Merge sources into a PDF
    Merge(MergeRequest),
}

impl Job {
    /// Run the job on the current thread
    pub fn run(&self) -> Outcome {
        log::debug!("running {}", self.describe());
        match self {
            Self::Stitch(request) => stitch(request),
            Self::Slice(request) => slice_linear(request),
            Self::Grid(request) => slice_grid(request),
            Self::Merge(request) => merge_to_pdf(request),
        }
    }

    /// Short label for progress display
    pub fn describe(&self) -> String {
        match self {
            Self::Stitch(request) => format!(
                "stitch {} image(s) ({})",
                request.sources.len(),
                request.layout.label()
            ),
            Self::Slice(request) => format!("slice {}", file_label(&request.source)),
            Self::Grid(request) => format!(
                "grid {}x{} {}",
                request.rows,
                request.cols,
                file_label(&request.source)
            ),
            Self::Merge(request) => format!(
                "merge {} image(s) into {}",
                request.sources.len(),
                file_label(&request.output_path)
            ),
        }
    }
}

/// Run `job` on a new worker thread
///
/// Jobs share no state, so any number may be in flight. A panicking job
/// surfaces as `Err` from [`JoinHandle::join`].
pub fn spawn(job: Job) -> JoinHandle<Outcome> {
    thread::spawn(move || job.run())
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name().map_or_else(
        || path.display().to_string(),
        |name| name.to_string_lossy().into_owned(),
    )
}
