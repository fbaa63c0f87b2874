//! Command-line interface: argument parsing and the batch driver

use crate::encode::format::OutputFormat;
use crate::io::progress::ProgressManager;
use crate::io::sort::sort_paths;
use crate::layout::cuts::SliceDirection;
use crate::layout::stitch::StitchLayout;
use crate::ops::job::{Job, spawn};
use crate::ops::merge::MergeRequest;
use crate::ops::outcome::Outcome;
use crate::ops::slice::{GridSliceRequest, SliceRequest};
use crate::ops::stitch::StitchRequest;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stitchslice")]
#[command(
    author,
    version,
    about = "Stitch images into sheets, slice images into pieces, merge images into a PDF"
)]
/// Command-line arguments for the stitch and slice tool
pub struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Log every quality attempt and chosen cut
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Maximum number of jobs running at once (defaults to available cores)
    #[arg(short, long, global = true)]
    pub jobs: Option<NonZeroUsize>,

    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed on the command line
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Stitch images into one or more sheets
    Stitch(StitchArgs),
    /// Slice each image into strips
    Slice(SliceArgs),
    /// Slice each image into a grid of cells
    Grid(GridArgs),
    /// Merge images into a single PDF
    Merge(MergeArgs),
}

/// Input list shared by every subcommand
#[derive(Args, Debug)]
pub struct SourceArgs {
    /// Input images
    #[arg(value_name = "SOURCES", required = true, num_args = 1..)]
    pub sources: Vec<PathBuf>,

    /// Order inputs by the last number in their file name
    #[arg(short, long)]
    pub sort: bool,
}

impl SourceArgs {
    /// Inputs in processing order
    pub fn ordered(&self) -> Vec<PathBuf> {
        let mut sources = self.sources.clone();
        if self.sort {
            sort_paths(&mut sources);
        }
        sources
    }
}

/// Output options shared by stitch and slice subcommands
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Scale to this width before cutting, or after stitching
    #[arg(short, long)]
    pub width: Option<u32>,

    /// Advisory size ceiling per output file in KB (0 = unlimited)
    #[arg(short = 'k', long)]
    pub max_kb: Option<u64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Auto)]
    pub format: OutputFormat,

    /// Base name replacing the generated name prefix
    #[arg(short, long)]
    pub name: Option<String>,
}

/// Sheet arrangement as named on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StitchMode {
    /// Stack top to bottom
    Vertical,
    /// Place side by side
    Horizontal,
    /// Fill a rows by cols grid
    Grid,
}

/// Arguments of the `stitch` subcommand
#[derive(Args, Debug)]
pub struct StitchArgs {
    /// Inputs
    #[command(flatten)]
    pub input: SourceArgs,

    /// Outputs
    #[command(flatten)]
    pub output: OutputArgs,

    /// Sheet arrangement
    #[arg(short, long, value_enum, default_value_t = StitchMode::Vertical)]
    pub mode: StitchMode,

    /// Grid rows
    #[arg(long, default_value_t = 2)]
    pub rows: u32,

    /// Grid columns
    #[arg(long, default_value_t = 2)]
    pub cols: u32,

    /// Number of sheets to spread the inputs over (ignored for grids)
    #[arg(short = 'p', long, default_value_t = 1)]
    pub split: usize,
}

impl StitchArgs {
    /// Layout selected by `--mode`, `--rows` and `--cols`
    pub const fn layout(&self) -> StitchLayout {
        match self.mode {
            StitchMode::Vertical => StitchLayout::Vertical,
            StitchMode::Horizontal => StitchLayout::Horizontal,
            StitchMode::Grid => StitchLayout::Grid {
                rows: self.rows,
                cols: self.cols,
            },
        }
    }
}

/// Arguments of the `slice` subcommand
#[derive(Args, Debug)]
pub struct SliceArgs {
    /// Inputs
    #[command(flatten)]
    pub input: SourceArgs,

    /// Outputs
    #[command(flatten)]
    pub output: OutputArgs,

    /// Pieces per image
    #[arg(short = 'c', long, default_value_t = 2)]
    pub count: u32,

    /// Orientation of the cut lines
    #[arg(short, long, value_enum, default_value_t = SliceDirection::Horizontal)]
    pub direction: SliceDirection,

    /// Move cuts onto visually quiet lines
    #[arg(short = 'a', long)]
    pub smart: bool,
}

/// Arguments of the `grid` subcommand
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Inputs
    #[command(flatten)]
    pub input: SourceArgs,

    /// Outputs
    #[command(flatten)]
    pub output: OutputArgs,

    /// Cell rows
    #[arg(long, default_value_t = 2)]
    pub rows: u32,

    /// Cell columns
    #[arg(long, default_value_t = 2)]
    pub cols: u32,
}

/// Arguments of the `merge` subcommand
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Inputs
    #[command(flatten)]
    pub input: SourceArgs,

    /// PDF file to write
    #[arg(short, long)]
    pub output: PathBuf,

    /// Advisory size ceiling per page image in KB (0 = unlimited)
    #[arg(short = 'k', long)]
    pub max_kb: Option<u64>,
}

impl Cli {
    /// Default log filter selected by `--quiet` and `--verbose`
    pub const fn log_filter(&self) -> &'static str {
        if self.quiet {
            "warn"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Worker count for the batch driver
    pub fn parallelism(&self) -> usize {
        self.jobs
            .or_else(|| std::thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }

    /// Independent jobs described by the command line
    ///
    /// Stitch and merge form one job over all inputs; slice and grid form
    /// one job per input.
    pub fn jobs(&self) -> Vec<Job> {
        match &self.command {
            Command::Stitch(args) => {
                let out = &args.output;
                let mut request = StitchRequest::new(args.input.ordered(), &out.output);
                request.layout = args.layout();
                request.split_count = args.split;
                request.target_width = out.width;
                request.ceiling_kb = out.max_kb;
                request.format = out.format;
                request.base_name.clone_from(&out.name);
                vec![Job::Stitch(request)]
            }
            Command::Slice(args) => {
                let out = &args.output;
                args.input
                    .ordered()
                    .into_iter()
                    .map(|source| {
                        let mut request = SliceRequest::new(source, &out.output, args.count);
                        request.direction = args.direction;
                        request.content_aware = args.smart;
                        request.target_width = out.width;
                        request.ceiling_kb = out.max_kb;
                        request.format = out.format;
                        request.base_name.clone_from(&out.name);
                        Job::Slice(request)
                    })
                    .collect()
            }
            Command::Grid(args) => {
                let out = &args.output;
                args.input
                    .ordered()
                    .into_iter()
                    .map(|source| {
                        let mut request =
                            GridSliceRequest::new(source, &out.output, args.rows, args.cols);
                        request.target_width = out.width;
                        request.ceiling_kb = out.max_kb;
                        request.format = out.format;
                        request.base_name.clone_from(&out.name);
                        Job::Grid(request)
                    })
                    .collect()
            }
            Command::Merge(args) => vec![Job::Merge(MergeRequest {
                sources: args.input.ordered(),
                output_path: args.output.clone(),
                page_ceiling_kb: args.max_kb,
            })],
        }
    }
}

/// Runs the jobs of one command line on worker threads with progress tracking
pub struct BatchRunner {
    jobs: Vec<Job>,
    parallelism: usize,
    progress_manager: Option<ProgressManager>,
}

impl BatchRunner {
    /// Create a runner for the jobs described by `cli`
    pub fn new(cli: &Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            jobs: cli.jobs(),
            parallelism: cli.parallelism(),
            progress_manager,
        }
    }

    /// Run every job and return the outcomes in submission order
    ///
    /// At most `parallelism` jobs run at once. A job that panics yields a
    /// failed outcome instead of aborting the batch.
    pub fn process(&mut self) -> Vec<Outcome> {
        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(self.jobs.len());
        }

        let mut outcomes = Vec::with_capacity(self.jobs.len());
        let mut first_index = 0;
        for chunk in self.jobs.chunks(self.parallelism.max(1)) {
            let handles: Vec<_> = chunk
                .iter()
                .enumerate()
                .map(|(offset, job)| {
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.start_job(first_index + offset, job.describe());
                    }
                    spawn(job.clone())
                })
                .collect();

            for (offset, handle) in handles.into_iter().enumerate() {
                let outcome = handle
                    .join()
                    .unwrap_or_else(|_| Outcome::failure("Job panicked before finishing."));
                if let Some(ref mut pm) = self.progress_manager {
                    pm.complete_job(first_index + offset, &outcome);
                }
                outcomes.push(outcome);
            }
            first_index += chunk.len();
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }
        outcomes
    }
}

/// Print one line per outcome and return whether all succeeded
// Allow print: outcomes are the command's primary output
#[allow(clippy::print_stdout)]
pub fn report(outcomes: &[Outcome]) -> bool {
    for outcome in outcomes {
        println!("{outcome}");
    }
    outcomes.iter().all(|outcome| outcome.ok)
}
