pub(crate) mod diagnose;
pub(crate) mod generate;
pub(crate) mod list;

use anyhow::{Result, anyhow};

use crate::catalog::{self, Benchmark};
use crate::cli::{Cli, Commands};

pub(crate) fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List => list::handle(),
        Commands::Generate(args) => generate::handle(args),
        Commands::Diagnose(args) => diagnose::handle(args),
    }
}

fn find_benchmark(name: &str) -> Result<&'static Benchmark> {
    catalog::find(name).ok_or_else(|| anyhow!("Unknown benchmark '{name}'"))
}
