use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where a destructive-action flow currently stands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum WorkflowState {
    /// Nothing requested yet, or the last branch was cancelled
    Idle,
    /// The reconsider modal is open
    Reconsidering,
    /// Waiting for the user to type the confirmation word
    AwaitingConfirmationText,
    /// Guard passed; the commit action is being dispatched
    Submitting,
    /// Page was torn down before the action was committed
    Aborted,
    /// Commit action dispatched
    Completed,
}

impl WorkflowState {
    /// No trigger is accepted once a terminal state is reached.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Aborted | Self::Completed)
    }
}

impl fmt::Display for WorkflowState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Reconsidering => "reconsidering",
            Self::AwaitingConfirmationText => "awaiting-confirmation-text",
            Self::Submitting => "submitting",
            Self::Aborted => "aborted",
            Self::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// A user or page event consumed by the workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    RequestDelete,
    Reconsider,
    Keep,
    Continue,
    /// The confirmation input changed to this text
    Input(String),
    Confirm,
    Cancel,
    /// The page is being torn down
    Unload,
}

/// Payload-free discriminant of [`Trigger`], used as the transition table key
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TriggerKind {
    RequestDelete,
    Reconsider,
    Keep,
    Continue,
    Input,
    Confirm,
    Cancel,
    Unload,
    /// Internal edge taken once the commit action has been dispatched
    Commit,
}

impl Trigger {
    pub fn kind(&self) -> TriggerKind {
        match self {
            Self::RequestDelete => TriggerKind::RequestDelete,
            Self::Reconsider => TriggerKind::Reconsider,
            Self::Keep => TriggerKind::Keep,
            Self::Continue => TriggerKind::Continue,
            Self::Input(_) => TriggerKind::Input,
            Self::Confirm => TriggerKind::Confirm,
            Self::Cancel => TriggerKind::Cancel,
            Self::Unload => TriggerKind::Unload,
        }
    }

    /// Map a UI event name and optional payload to a trigger.
    ///
    /// `input` without a payload is an empty confirmation field.
    pub fn from_event(name: &str, payload: Option<&str>) -> Option<Self> {
        let trigger = match name.trim().to_ascii_lowercase().as_str() {
            "delete" | "request-delete" => Self::RequestDelete,
            "reconsider" | "think-again" => Self::Reconsider,
            "keep" => Self::Keep,
            "continue" => Self::Continue,
            "input" | "type" => Self::Input(payload.unwrap_or_default().to_string()),
            "confirm" => Self::Confirm,
            "cancel" | "escape" | "close" => Self::Cancel,
            "unload" => Self::Unload,
            _ => return None,
        };
        Some(trigger)
    }
}

impl fmt::Display for TriggerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::RequestDelete => "delete",
            Self::Reconsider => "reconsider",
            Self::Keep => "keep",
            Self::Continue => "continue",
            Self::Input => "input",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::Unload => "unload",
            Self::Commit => "commit",
        };
        f.write_str(name)
    }
}

use TriggerKind as T;
use WorkflowState as S;

/// Every permitted (state, trigger) -> next state edge.
///
/// `Confirm` is additionally guarded by the confirmation word. Submitting is
/// left only through `Commit`, which the workflow takes itself after dispatch.
pub const TRANSITIONS: &[(WorkflowState, TriggerKind, WorkflowState)] = &[
    (S::Idle, T::RequestDelete, S::AwaitingConfirmationText),
    (S::Idle, T::Reconsider, S::Reconsidering),
    (S::Idle, T::Unload, S::Aborted),
    (S::Reconsidering, T::Keep, S::Idle),
    (S::Reconsidering, T::Cancel, S::Idle),
    (S::Reconsidering, T::Continue, S::AwaitingConfirmationText),
    (S::Reconsidering, T::Unload, S::Aborted),
    (S::AwaitingConfirmationText, T::Input, S::AwaitingConfirmationText),
    (S::AwaitingConfirmationText, T::Confirm, S::Submitting),
    (S::AwaitingConfirmationText, T::Cancel, S::Idle),
    (S::AwaitingConfirmationText, T::Unload, S::Aborted),
    (S::Submitting, T::Commit, S::Completed),
];

/// Look up the target of an edge, ignoring guards.
pub fn next_state(state: WorkflowState, trigger: TriggerKind) -> Option<WorkflowState> {
    TRANSITIONS
        .iter()
        .find(|(from, kind, _)| *from == state && *kind == trigger)
        .map(|(_, _, to)| *to)
}

/// An accepted state change
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transition {
    pub from: WorkflowState,
    pub to: WorkflowState,
    pub trigger: TriggerKind,
    pub at: DateTime<Utc>,
}

impl Transition {
    pub fn new(from: WorkflowState, to: WorkflowState, trigger: TriggerKind) -> Self {
        Self {
            from,
            to,
            trigger,
            at: Utc::now(),
        }
    }

    /// True for Keep/Cancel edges that send the flow back to Idle.
    pub fn is_abort(&self) -> bool {
        self.to == WorkflowState::Idle && self.from != WorkflowState::Idle
    }
}
