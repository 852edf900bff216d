use serde::{Deserialize, Serialize};

/// Which check of a rule produced a failure
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Required,
    MinLength,
    MaxLength,
    Pattern,
    Custom,
}

/// A single field-level validation failure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationFailure {
    pub field_name: String,
    pub message: String,
    pub kind: FailureKind,
}

/// Outcome of validating a form.
///
/// Built once per validation call; the failures are kept in the order the
/// rules were declared.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    pub valid: bool,
    pub failures: Vec<ValidationFailure>,
}

impl ValidationResult {
    pub fn from_failures(failures: Vec<ValidationFailure>) -> Self {
        Self {
            valid: failures.is_empty(),
            failures,
        }
    }

    /// Field that should receive focus after a rejected submit.
    pub fn first_failed_field(&self) -> Option<&str> {
        self.failures.first().map(|f| f.field_name.as_str())
    }

    pub fn failure_for(&self, field_name: &str) -> Option<&ValidationFailure> {
        self.failures.iter().find(|f| f.field_name == field_name)
    }

    /// All messages joined into one sentence-style summary.
    pub fn summary(&self) -> String {
        self.failures
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join(". ")
    }
}
