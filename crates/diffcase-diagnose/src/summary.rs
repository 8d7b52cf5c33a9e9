//! Summary shapes and the delimited stdout block.

use std::io::{self, Write};

use diffcase_compare::Difference;
use diffcase_value::{Inputs, Value};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SUMMARY_START: &str = "---DIAGNOSTIC_SUMMARY_START---";
pub const SUMMARY_END: &str = "---DIAGNOSTIC_SUMMARY_END---";

/// One reported problem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FailureRecord {
    /// Both sides ran; the outputs differ.
    TestFailure {
        case_id: usize,
        inputs: Inputs,
        expected: Value,
        actual: Value,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        difference: Option<Difference>,
    },
    /// Something raised for this case only.
    ExecutionError {
        case_id: usize,
        inputs: Inputs,
        error_type: String,
        error_message: String,
    },
    /// The run itself could not continue.
    CriticalExecutionError {
        error_type: String,
        error_message: String,
    },
}

impl FailureRecord {
    pub fn case_id(&self) -> Option<usize> {
        match self {
            FailureRecord::TestFailure { case_id, .. }
            | FailureRecord::ExecutionError { case_id, .. } => Some(*case_id),
            FailureRecord::CriticalExecutionError { .. } => None,
        }
    }
}

/// Outcome of one diagnostic run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DiagnosticSummary {
    pub passed: usize,
    pub failed: usize,
    /// `passed + failed`; cases after a critical error are not counted.
    pub total: usize,
    /// The first failures, up to the configured limit.
    pub failures: Vec<FailureRecord>,
    pub execution_error: Option<FailureRecord>,
}

impl DiagnosticSummary {
    /// A summary for a run that stopped before any case was processed.
    pub fn critical(error_type: impl Into<String>, error_message: impl Into<String>) -> Self {
        Self {
            execution_error: Some(FailureRecord::CriticalExecutionError {
                error_type: error_type.into(),
                error_message: error_message.into(),
            }),
            ..Self::default()
        }
    }

    /// `passed / total`, or 0.0 for an empty run.
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64
        }
    }

    /// Every processed case passed and nothing went wrong at run level.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.execution_error.is_none()
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The summary wrapped in its delimiter lines.
    pub fn to_delimited_block(&self) -> Result<String, serde_json::Error> {
        Ok(format!(
            "\n{SUMMARY_START}\n{}\n{SUMMARY_END}\n",
            self.to_json_pretty()?
        ))
    }

    pub fn emit<W: Write>(&self, out: &mut W) -> io::Result<()> {
        let block = self.to_delimited_block().map_err(io::Error::other)?;
        out.write_all(block.as_bytes())?;
        out.flush()
    }
}

/// Errors from [`extract_summary`].
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No ---DIAGNOSTIC_SUMMARY_START--- line found in output")]
    MissingStart,

    #[error("No ---DIAGNOSTIC_SUMMARY_END--- line after the last summary start")]
    MissingEnd,

    #[error("Summary block is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Parse the last delimited summary block found in `output`.
///
/// Delimiters only count when they stand on a line of their own, so case
/// data quoting them inside the JSON body cannot end or restart a block.
pub fn extract_summary(output: &str) -> Result<DiagnosticSummary, ExtractError> {
    let lines: Vec<&str> = output.lines().collect();
    let start = lines
        .iter()
        .rposition(|line| line.trim() == SUMMARY_START)
        .ok_or(ExtractError::MissingStart)?;
    let body = &lines[start + 1..];
    let end = body
        .iter()
        .position(|line| line.trim() == SUMMARY_END)
        .ok_or(ExtractError::MissingEnd)?;
    Ok(serde_json::from_str(body[..end].join("\n").trim())?)
}
