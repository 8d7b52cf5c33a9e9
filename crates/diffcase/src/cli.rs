use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// `diffcase`: build test corpora from a reference function and replay
/// them against candidate implementations.
#[derive(Parser, Debug)]
#[command(name = "diffcase", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log per-case decisions (same as `RUST_LOG=debug`).
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List built-in benchmarks.
    List,

    /// Synthesize a corpus for a benchmark's reference function.
    Generate(GenerateArgs),

    /// Replay a corpus against a candidate and print the diagnostic summary.
    Diagnose(DiagnoseArgs),
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Benchmark name (see `diffcase list`).
    pub bench: String,

    /// Harness settings file (TOML).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for randomized draws.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Where to write the corpus.
    #[arg(long, value_name = "PATH")]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct DiagnoseArgs {
    /// Benchmark name (see `diffcase list`).
    pub bench: String,

    /// Implementation to check against the reference.
    #[arg(long, value_enum, default_value_t = CandidateKind::Faithful)]
    pub candidate: CandidateKind,

    /// Harness settings file (TOML).
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Corpus file to replay.
    #[arg(long, value_name = "PATH")]
    pub corpus: Option<PathBuf>,

    /// Trust persisted `Expected` values instead of calling the reference.
    #[arg(long)]
    pub persisted: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateKind {
    /// An independent implementation that should agree with the reference.
    #[default]
    Faithful,
    /// An implementation with a known defect.
    Faulty,
    /// The reference itself.
    Reference,
}
