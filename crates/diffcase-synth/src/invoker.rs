//! Per-tuple evaluation of the reference function.

use diffcase_corpus::TestCase;
use diffcase_value::{Inputs, Value};

use crate::{InvocationError, Subject, invoke_guarded};

/// Decides whether a successful `(inputs, output)` pair is worth keeping.
pub trait Interestingness {
    fn is_interesting(&self, inputs: &Inputs, output: &Value) -> bool;
}

impl<F> Interestingness for F
where
    F: Fn(&Inputs, &Value) -> bool,
{
    fn is_interesting(&self, inputs: &Inputs, output: &Value) -> bool {
        self(inputs, output)
    }
}

/// Keeps every pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl Interestingness for AcceptAll {
    fn is_interesting(&self, _inputs: &Inputs, _output: &Value) -> bool {
        true
    }
}

/// What happened to one candidate tuple.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Keep(TestCase),
    /// The reference raised (or panicked) on these inputs.
    Raised(InvocationError),
    /// The predicate rejected the pair.
    Uninteresting,
    /// Inputs or output contain a non-finite float and could not be persisted.
    Unrepresentable,
}

/// Reference function plus interestingness filter.
pub struct Invoker<'a, S: ?Sized, P: ?Sized> {
    subject: &'a S,
    predicate: &'a P,
}

impl<'a, S, P> Invoker<'a, S, P>
where
    S: Subject + ?Sized,
    P: Interestingness + ?Sized,
{
    pub fn new(subject: &'a S, predicate: &'a P) -> Self {
        Self { subject, predicate }
    }

    pub fn evaluate(&self, inputs: Inputs) -> Verdict {
        let output = match invoke_guarded(self.subject, &inputs) {
            Ok(output) => output,
            Err(err) => return Verdict::Raised(err),
        };
        if !output.is_representable() || !inputs.values().all(Value::is_representable) {
            return Verdict::Unrepresentable;
        }
        if !self.predicate.is_interesting(&inputs, &output) {
            return Verdict::Uninteresting;
        }
        Verdict::Keep(TestCase::new(inputs, output))
    }
}
