//! CLI entry point for stitching, slicing and merging images

use clap::Parser;
use std::process::ExitCode;
use stitchslice::io::cli::{BatchRunner, Cli, report};
use stitchslice::io::image::{DecodePolicy, init_decode_policy};

fn main() -> stitchslice::Result<ExitCode> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(cli.log_filter()))
        .init();
    init_decode_policy(DecodePolicy::Unlimited)?;

    let mut runner = BatchRunner::new(&cli);
    let outcomes = runner.process();
    Ok(if report(&outcomes) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
