pub mod config;
pub mod models;
pub mod submission;
pub mod ui;
pub mod validator;
pub mod workflow;

// Re-export main types
pub use config::{GuardConfig, resolve_form};
pub use models::{FieldRule, ValidationFailure, ValidationResult};
pub use submission::{FormController, SubmitOutcome};
pub use validator::FormValidator;
pub use workflow::{
    ConfirmationWorkflow, GuardViolation, Trigger, WorkflowElements, WorkflowState, spawn_workflow,
};

// Re-export UI collaborator traits
pub use ui::{CommitAction, FieldFocus, MessageKind, Notifier, UiSurface, VisualState};
