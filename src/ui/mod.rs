//! UI collaborators - Capabilities the controllers call into but never implement.
//!
//! The page supplies these at construction. Element and field references are
//! plain identifiers (DOM ids in the browser, names in the console surface).

pub mod console;
pub mod toast;

pub use console::{ConsoleCommit, ConsoleSurface};
pub use toast::{ToastId, ToastQueue};

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Style classes the controllers toggle on page elements
pub mod classes {
    pub const HIDDEN: &str = "hidden";
    pub const VISIBLE: &str = "visible";
    pub const OPEN: &str = "open";
    pub const ARMED: &str = "armed";
    pub const SHAKE: &str = "shake";
    pub const DISABLED: &str = "disabled";
    pub const LOADING: &str = "loading";
    pub const HAS_ERROR: &str = "has-error";
}

/// Kind of transient message, controls the styling of a toast
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Shows and removes transient messages
pub trait Notifier: Send + Sync {
    fn show(&self, id: ToastId, text: &str, kind: MessageKind);

    fn dismiss(&self, id: ToastId);
}

/// Moves keyboard focus to a field
pub trait FieldFocus: Send + Sync {
    fn focus(&self, field: &str);
}

/// Adds or removes a style class on an element
pub trait VisualState: Send + Sync {
    fn apply(&self, element: &str, class: &str);

    fn clear(&self, element: &str, class: &str);
}

/// Everything a page controller needs from the rendered page.
pub trait UiSurface: Notifier + FieldFocus + VisualState + 'static {}

impl<T> UiSurface for T where T: Notifier + FieldFocus + VisualState + 'static {}

/// The irreversible operation behind a form (post submit, delete request)
#[async_trait]
pub trait CommitAction: Send + Sync {
    async fn commit(&self) -> Result<()>;
}
