//! Command-line interface definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Iterate over EMCal-style particle containers
#[derive(Parser, Debug)]
#[command(name = "rusty-emcal", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the entries of a particle file, one per line
    List(ListArgs),

    /// Print entry and accepted counts with rejection reasons
    Summary(SummaryArgs),
}

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Particle file (.parquet, .json or .csv)
    pub file: PathBuf,

    /// Only list accepted particles
    #[arg(long)]
    pub accepted: bool,

    /// Iterate from the last entry to the first
    #[arg(long)]
    pub reverse: bool,

    #[command(flatten)]
    pub cuts: CutArgs,
}

#[derive(Args, Debug)]
pub struct SummaryArgs {
    /// Particle file (.parquet, .json or .csv)
    pub file: PathBuf,

    #[command(flatten)]
    pub cuts: CutArgs,
}

/// Acceptance settings shared by all commands.
#[derive(Args, Debug)]
pub struct CutArgs {
    /// JSON analysis config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the minimum pt
    #[arg(long)]
    pub min_pt: Option<f64>,

    /// Override the maximum pt
    #[arg(long)]
    pub max_pt: Option<f64>,

    /// Override the eta acceptance with |eta| <= MAX_ETA
    #[arg(long)]
    pub max_eta: Option<f64>,
}
