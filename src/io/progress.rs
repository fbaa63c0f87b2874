//! Multi-job progress tracking with automatic batching for large sets

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use crate::ops::outcome::Outcome;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::LazyLock;

/// Lifecycle of one job as shown in the progress display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    /// Submitted to a worker
    Running,
    /// Finished with a successful outcome
    Done,
    /// Finished with a failed outcome
    Failed,
}

impl JobState {
    const fn marker(self) -> &'static str {
        match self {
            Self::Running => "…",
            Self::Done => "✓",
            Self::Failed => "✗",
        }
    }
}

/// Coordinates progress display for batch operations
///
/// Shows one line per job for small batches, and a rolling window of the
/// most recent jobs under a single batch bar for large ones
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    job_bars: Vec<ProgressBar>,
    job_count: usize,
    /// Stores (`label`, `state`) for rolling window display
    job_states: Vec<(String, JobState)>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static JOB_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template = format!(
        "[{{elapsed_precise}}] Jobs: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}"
    );
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            job_bars: Vec::new(),
            job_count: 0,
            job_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on job count
    pub fn initialize(&mut self, job_count: usize) {
        self.job_count = job_count;

        // Switch to batch mode for large job sets to avoid terminal spam
        if job_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(job_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = job_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(1);
            pb.set_style(JOB_STYLE.clone());
            self.job_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of jobs the display was initialized for
    pub const fn job_count(&self) -> usize {
        self.job_count
    }

    /// Show a job as running
    pub fn start_job(&mut self, index: usize, label: impl Into<String>) {
        if index >= self.job_states.len() {
            self.job_states
                .resize(index + 1, (String::new(), JobState::Running));
        }
        if let Some(state) = self.job_states.get_mut(index) {
            *state = (label.into(), JobState::Running);
        }
        self.update_bars();
    }

    /// Mark a job as finished and update batch progress
    pub fn complete_job(&mut self, index: usize, outcome: &Outcome) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.job_states.get_mut(index) {
            state.1 = if outcome.ok {
                JobState::Done
            } else {
                JobState::Failed
            };
        }
        self.update_bars();
    }

    /// State of a job, if it has been started
    pub fn job_state(&self, index: usize) -> Option<JobState> {
        self.job_states
            .get(index)
            .filter(|(label, _)| !label.is_empty())
            .map(|(_, state)| *state)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All jobs processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all bars to show the last N started jobs
    fn update_bars(&self) {
        let started: Vec<&(String, JobState)> = self
            .job_states
            .iter()
            .filter(|(label, _)| !label.is_empty())
            .collect();

        let start_idx = started.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = started.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, (label, state)) in visible.iter().enumerate() {
            if let Some(bar) = self.job_bars.get(bar_idx) {
                bar.set_prefix(state.marker());
                bar.set_message(label.clone());
            }
        }

        for bar_idx in visible.len()..self.job_bars.len() {
            if let Some(bar) = self.job_bars.get(bar_idx) {
                bar.set_prefix(String::new());
                bar.set_message(String::new());
            }
        }
    }
}
