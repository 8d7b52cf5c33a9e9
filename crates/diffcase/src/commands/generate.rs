//! Handler for the `diffcase generate` command.

use anyhow::{Context, Result};
use diffcase_synth::{AcceptAll, Interestingness, synthesize};

use crate::cli::GenerateArgs;
use crate::config;

pub(crate) fn handle(args: GenerateArgs) -> Result<()> {
    let bench = super::find_benchmark(&args.bench)?;
    let mut settings = config::resolve(args.config.as_deref())?;
    if let Some(seed) = args.seed {
        settings.seed = seed;
    }
    if let Some(out) = args.out {
        settings.corpus_path = out;
    }

    let predicate: &dyn Interestingness = match &bench.predicate {
        Some(predicate) => predicate,
        None => &AcceptAll,
    };
    let report = synthesize(&settings, &bench.reference, &bench.synthesizer(), predicate)
        .with_context(|| format!("Failed to synthesize corpus for '{}'", bench.name))?;

    println!(
        "Saved {} test cases to {}",
        report.corpus_len,
        report.path.display()
    );
    Ok(())
}
