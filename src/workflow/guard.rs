use thiserror::Error;

use crate::config::ConfirmationConfig;

use super::state::{TriggerKind, WorkflowState};

/// Why a trigger was rejected. The workflow state is unchanged in every case.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GuardViolation {
    #[error("'{trigger}' is not accepted while {state}")]
    NotPermitted {
        state: WorkflowState,
        trigger: TriggerKind,
    },
    #[error("confirmation text does not match '{expected}'")]
    ConfirmationMismatch { expected: String },
    #[error("input is locked while the action is being submitted")]
    InputLocked,
    #[error("workflow already {state}")]
    Terminal { state: WorkflowState },
}

/// Checks typed confirmation text against the configured word
#[derive(Debug, Clone)]
pub struct ConfirmationGuard {
    literal: String,
    case_insensitive: bool,
}

impl ConfirmationGuard {
    pub fn new(literal: impl Into<String>, case_insensitive: bool) -> Self {
        Self {
            literal: literal.into().trim().to_string(),
            case_insensitive,
        }
    }

    pub fn from_config(config: &ConfirmationConfig) -> Self {
        Self::new(config.literal.clone(), config.case_insensitive)
    }

    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Whitespace around the typed text is ignored.
    pub fn matches(&self, typed: &str) -> bool {
        let typed = typed.trim();
        if self.literal.is_empty() {
            return false;
        }
        if self.case_insensitive {
            typed.to_lowercase() == self.literal.to_lowercase()
        } else {
            typed == self.literal
        }
    }
}
