use crate::error::{Result, ValidatorError};
use serde::{Deserialize, Serialize};

pub const GRAPH_TAG: &str = "@aicontext-graph";
pub const GRAPH_IGNORE_TAG: &str = "@aicontext-graph-ignore";

/// Outcome of one validation run.
///
/// `errors` are fatal in aggregate, `warnings` are advisory only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Graph entries whose class was found and compared
    pub checked: usize,
    /// Graph entries skipped for a missing file or class
    pub skipped: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.errors.is_empty()
    }

    /// `Err(ValidationFailed)` carrying every error when the run failed
    pub fn into_verdict(self) -> Result<Self> {
        if self.passed() {
            Ok(self)
        } else {
            Err(ValidatorError::ValidationFailed {
                errors: self.errors,
            })
        }
    }

    pub(crate) fn missing_dependency(&mut self, file_path: &str, line_number: usize, name: &str) {
        self.errors.push(format!(
            "{file_path}:{line_number}: Class dependency '{name}' found but not in graph. Add to {GRAPH_TAG} or {GRAPH_IGNORE_TAG}."
        ));
    }

    pub(crate) fn unused_documented(&mut self, file_path: &str, line_number: usize, name: &str) {
        let warning =
            format!("{file_path}:{line_number} Graph documents '{name}' but code does not use it (lenient).");
        log::warn!("{warning}");
        self.warnings.push(warning);
    }
}
