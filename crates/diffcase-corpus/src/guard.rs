//! Scoped flush of a corpus.

use std::path::Path;

use tracing::{error, info};

use crate::{Accept, Corpus, CorpusStore, StoreError, TestCase};

/// Owns a [`Corpus`] while it is being filled and flushes it exactly once.
///
/// Call [`FlushGuard::finish`] on the normal path. If the guard is dropped
/// without it (early return, `?`, or a panic unwinding through the owner)
/// the flush runs in `Drop` and its outcome is logged.
#[derive(Debug)]
pub struct FlushGuard {
    corpus: Corpus,
    store: CorpusStore,
    flushed: bool,
}

impl FlushGuard {
    pub fn new(corpus: Corpus, store: CorpusStore) -> Self {
        Self {
            corpus,
            store,
            flushed: false,
        }
    }

    pub fn accept(&mut self, case: TestCase) -> Accept {
        self.corpus.accept(case)
    }

    pub fn is_full(&self) -> bool {
        self.corpus.is_full()
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }

    /// Flush now and disarm the guard.
    pub fn finish(mut self) -> Result<usize, StoreError> {
        self.flushed = true;
        let written = self.store.flush(&self.corpus)?;
        info!("saved {written} test cases to {}", self.store.path().display());
        Ok(written)
    }
}

impl Drop for FlushGuard {
    fn drop(&mut self) {
        if self.flushed {
            return;
        }
        self.flushed = true;
        match self.store.flush(&self.corpus) {
            Ok(written) => info!(
                "saved {written} test cases to {} (early exit)",
                self.store.path().display()
            ),
            Err(err) => error!(error = %err, "failed to save corpus on early exit"),
        }
    }
}
