//! Transient notifications with a single auto-dismiss policy.
//!
//! Each toast gets a cancellation token derived from the scope it was shown
//! in. Cancelling the scope stops the pending auto-dismiss timer, and
//! [`ToastQueue::sweep_cancelled`] removes the toasts of cancelled scopes at once.

use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::{MessageKind, Notifier};

/// Identifier of a displayed toast
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId(pub u64);

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toast-{}", self.0)
    }
}

type ActiveToasts = Arc<Mutex<HashMap<ToastId, CancellationToken>>>;

/// Shows toasts through a [`Notifier`] and dismisses them after a fixed delay.
///
/// Each toast spawns its timer task on the current tokio runtime. Outside a
/// runtime the toast stays up until it is dismissed or its scope is swept.
pub struct ToastQueue<N: Notifier + 'static> {
    notifier: Arc<N>,
    auto_dismiss: Duration,
    next_id: AtomicU64,
    active: ActiveToasts,
}

impl<N: Notifier + 'static> ToastQueue<N> {
    pub fn new(notifier: Arc<N>, auto_dismiss: Duration) -> Self {
        Self {
            notifier,
            auto_dismiss,
            next_id: AtomicU64::new(1),
            active: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn auto_dismiss(&self) -> Duration {
        self.auto_dismiss
    }

    /// Show a toast tied to `scope` and start its auto-dismiss timer.
    pub fn show(&self, text: &str, kind: MessageKind, scope: &CancellationToken) -> ToastId {
        let id = ToastId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let token = scope.child_token();
        lock(&self.active).insert(id, token.clone());

        self.notifier.show(id, text, kind);
        debug!("Showing {} ({:?}): {}", id, kind, text);

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!("No tokio runtime, {} will not auto-dismiss", id);
            return id;
        };

        let notifier = Arc::clone(&self.notifier);
        let active = Arc::clone(&self.active);
        let delay = self.auto_dismiss;
        runtime.spawn(async move {
            tokio::select! {
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    if lock(&active).remove(&id).is_some() {
                        notifier.dismiss(id);
                    }
                }
            }
        });

        id
    }

    /// Dismiss a toast before its timer fires. Unknown ids are ignored.
    pub fn dismiss(&self, id: ToastId) {
        let token = lock(&self.active).remove(&id);
        if let Some(token) = token {
            token.cancel();
            self.notifier.dismiss(id);
        }
    }

    /// Remove every toast whose scope has been cancelled.
    pub fn sweep_cancelled(&self) -> usize {
        let swept: Vec<ToastId> = {
            let mut active = lock(&self.active);
            let ids: Vec<ToastId> = active
                .iter()
                .filter(|(_, token)| token.is_cancelled())
                .map(|(id, _)| *id)
                .collect();
            for id in &ids {
                active.remove(id);
            }
            ids
        };

        for id in &swept {
            self.notifier.dismiss(*id);
        }
        swept.len()
    }

    /// Number of toasts currently on screen.
    pub fn active_count(&self) -> usize {
        lock(&self.active).len()
    }
}

fn lock(active: &ActiveToasts) -> MutexGuard<'_, HashMap<ToastId, CancellationToken>> {
    // A poisoned map only means a notifier panicked mid-call; the ids are still valid
    active.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
