//! Handler for the `diffcase diagnose` command.

use anyhow::{Context, Result};
use diffcase_config::ExpectedSource;
use diffcase_corpus::CorpusStore;
use diffcase_diagnose::DiagnosticRunner;

use crate::cli::DiagnoseArgs;
use crate::config;

pub(crate) fn handle(args: DiagnoseArgs) -> Result<()> {
    let bench = super::find_benchmark(&args.bench)?;
    let mut settings = config::resolve(args.config.as_deref())?;
    if let Some(corpus) = args.corpus {
        settings.corpus_path = corpus;
    }
    if args.persisted {
        settings.expected_source = ExpectedSource::Persisted;
    }

    let store = CorpusStore::new(&settings.corpus_path);
    let candidate = bench.candidate(args.candidate);
    let summary = DiagnosticRunner::new(&settings)
        .with_params(bench.param_names())
        .run_from_store(&bench.reference, &candidate, &store);

    summary
        .emit(&mut std::io::stdout().lock())
        .context("Failed to write diagnostic summary")?;
    Ok(())
}
