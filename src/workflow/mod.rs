pub mod driver;
pub mod guard;
pub mod machine;
pub mod state;

pub use driver::{DriverReport, WorkflowHandle, spawn_workflow};
pub use guard::{ConfirmationGuard, GuardViolation};
pub use machine::{ConfirmationWorkflow, KEEP_MESSAGE, WorkflowElements};
pub use state::{TRANSITIONS, Transition, Trigger, TriggerKind, WorkflowState, next_state};
