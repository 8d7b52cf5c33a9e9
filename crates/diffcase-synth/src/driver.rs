//! The synthesis loop.

use std::path::PathBuf;

use diffcase_config::HarnessConfig;
use diffcase_corpus::{Accept, Corpus, CorpusStore, FlushGuard, StoreError};
use diffcase_strategy::Synthesizer;
use serde::Serialize;
use tracing::{debug, info};

use crate::{Interestingness, Invoker, Subject, Verdict};

/// Counters for one synthesis run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SynthesisReport {
    /// Candidate tuples evaluated.
    pub drawn: usize,
    pub accepted: usize,
    pub raised: usize,
    pub uninteresting: usize,
    pub unrepresentable: usize,
    pub duplicates: usize,
    /// Kept tuples refused because the corpus was already full.
    pub over_cap: usize,
    /// Cases written by the final flush.
    pub corpus_len: usize,
    pub path: PathBuf,
}

/// Build a corpus for `subject` and flush it to `config.corpus_path`.
///
/// `config.draw_budget` and `config.seed` replace the synthesizer's own.
/// The loop stops when draws run out, or once the corpus is full and
/// `config.extra_draws_after_full` more candidates have been evaluated.
/// The corpus is flushed exactly once, including when `subject` or
/// `predicate` panics.
pub fn synthesize<S, P>(
    config: &HarnessConfig,
    subject: &S,
    synthesizer: &Synthesizer,
    predicate: &P,
) -> Result<SynthesisReport, StoreError>
where
    S: Subject + ?Sized,
    P: Interestingness + ?Sized,
{
    let synthesizer = synthesizer
        .clone()
        .with_budget(config.draw_budget)
        .with_seed(config.seed);
    let store = CorpusStore::new(&config.corpus_path);
    let mut report = SynthesisReport {
        path: store.path().to_path_buf(),
        ..SynthesisReport::default()
    };
    let mut guard = FlushGuard::new(
        Corpus::new(config.corpus_cap).with_dedupe(config.dedupe),
        store,
    );
    let invoker = Invoker::new(subject, predicate);
    let mut extra_left = config.extra_draws_after_full;
    let mut draws = synthesizer.draws();

    loop {
        if guard.is_full() {
            if extra_left == 0 {
                break;
            }
            extra_left -= 1;
        }
        let Some(inputs) = draws.next() else {
            break;
        };
        report.drawn += 1;

        match invoker.evaluate(inputs) {
            Verdict::Keep(case) => match guard.accept(case) {
                Accept::Accepted => report.accepted += 1,
                Accept::Duplicate => {
                    debug!(draw = report.drawn, "discarded: duplicate inputs");
                    report.duplicates += 1;
                }
                Accept::Full => report.over_cap += 1,
            },
            Verdict::Raised(err) => {
                debug!(draw = report.drawn, error_type = %err.error_type, "discarded: reference raised: {}", err.message);
                report.raised += 1;
            }
            Verdict::Uninteresting => {
                debug!(draw = report.drawn, "discarded: uninteresting");
                report.uninteresting += 1;
            }
            Verdict::Unrepresentable => {
                debug!(draw = report.drawn, "discarded: non-finite value");
                report.unrepresentable += 1;
            }
        }
    }

    info!(
        drawn = report.drawn,
        accepted = report.accepted,
        raised = report.raised,
        randomized = draws.randomized_drawn(),
        "synthesis finished"
    );
    report.corpus_len = guard.finish()?;
    Ok(report)
}
