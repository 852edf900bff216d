use anyhow::Result;
use async_trait::async_trait;
use tracing::{debug, info};

use super::{CommitAction, FieldFocus, MessageKind, Notifier, ToastId, VisualState};

/// Terminal stand-in for a rendered page: messages go to stdout, the rest to the log.
#[derive(Debug, Default)]
pub struct ConsoleSurface;

impl Notifier for ConsoleSurface {
    fn show(&self, id: ToastId, text: &str, kind: MessageKind) {
        let marker = match kind {
            MessageKind::Info => "[INFO]",
            MessageKind::Success => "[OK]",
            MessageKind::Warning => "[WARN]",
            MessageKind::Error => "[ERROR]",
        };
        println!("{} {}", marker, text);
        debug!("{} shown", id);
    }

    fn dismiss(&self, id: ToastId) {
        debug!("{} dismissed", id);
    }
}

impl FieldFocus for ConsoleSurface {
    fn focus(&self, field: &str) {
        debug!("focus -> {}", field);
    }
}

impl VisualState for ConsoleSurface {
    fn apply(&self, element: &str, class: &str) {
        debug!("{} +{}", element, class);
    }

    fn clear(&self, element: &str, class: &str) {
        debug!("{} -{}", element, class);
    }
}

/// Commit action that reports the submission instead of sending it anywhere
#[derive(Debug, Clone)]
pub struct ConsoleCommit {
    form: String,
}

impl ConsoleCommit {
    pub fn new(form: impl Into<String>) -> Self {
        Self { form: form.into() }
    }
}

#[async_trait]
impl CommitAction for ConsoleCommit {
    async fn commit(&self) -> Result<()> {
        info!("Submitting form '{}'", self.form);
        println!("Form '{}' submitted", self.form);
        Ok(())
    }
}
