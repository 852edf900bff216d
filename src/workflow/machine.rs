//! ConfirmationWorkflow - Guarded sequencing of a destructive action.
//!
//! The workflow owns its [`WorkflowState`]; callers can only feed it
//! [`Trigger`]s. Every transition applies its UI side effects synchronously,
//! so a transition is never observed half-done.
//!
//! ## Branches
//!
//! Leaving Idle starts a branch with its own cancellation token. Toasts shown
//! during the branch are tied to it, so Keep/Cancel remove them and stop their
//! timers in the same step that returns the flow to Idle.
//!
//! ## Dispatch
//!
//! The commit action runs at most once per workflow, and only after the Confirm
//! guard held. Its outcome does not change the flow: success and failure both
//! end in Completed, and failures are only logged.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::GuardConfig;
use crate::ui::{CommitAction, MessageKind, ToastQueue, UiSurface, classes};

use super::guard::{ConfirmationGuard, GuardViolation};
use super::state::{Transition, Trigger, TriggerKind, WorkflowState, next_state};

/// References to the page elements the workflow drives
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowElements {
    /// Initial "Delete" / "Think again" buttons
    pub button_group: String,
    pub confirmation_step: String,
    pub confirm_input: String,
    pub final_button: String,
    pub reconsider_modal: String,
}

impl Default for WorkflowElements {
    fn default() -> Self {
        Self {
            button_group: "buttonGroup".to_string(),
            confirmation_step: "confirmationStep".to_string(),
            confirm_input: "confirmInput".to_string(),
            final_button: "finalDeleteBtn".to_string(),
            reconsider_modal: "reconsiderModal".to_string(),
        }
    }
}

/// Message shown when the user decides to keep the item
pub const KEEP_MESSAGE: &str = "Great decision! Post kept safe.";

/// State machine for one destructive-action flow on one page.
pub struct ConfirmationWorkflow<S: UiSurface, C: CommitAction> {
    state: WorkflowState,
    guard: ConfirmationGuard,
    reconsider_points: Vec<String>,
    elements: WorkflowElements,
    surface: Arc<S>,
    commit: C,
    toasts: ToastQueue<S>,
    typed: String,
    dispatched: bool,
    page: CancellationToken,
    branch: CancellationToken,
    history: Vec<Transition>,
}

impl<S: UiSurface, C: CommitAction> ConfirmationWorkflow<S, C> {
    pub fn new(
        config: &GuardConfig,
        elements: WorkflowElements,
        surface: Arc<S>,
        commit: C,
    ) -> Self {
        let page = CancellationToken::new();
        let branch = page.child_token();
        Self {
            state: WorkflowState::Idle,
            guard: ConfirmationGuard::from_config(&config.confirmation),
            reconsider_points: config.confirmation.reconsider_points.clone(),
            elements,
            toasts: ToastQueue::new(Arc::clone(&surface), config.notifications.auto_dismiss()),
            surface,
            commit,
            typed: String::new(),
            dispatched: false,
            page,
            branch,
            history: Vec::new(),
        }
    }

    pub fn state(&self) -> WorkflowState {
        self.state
    }

    pub fn history(&self) -> &[Transition] {
        &self.history
    }

    /// Text currently in the confirmation input
    pub fn typed_text(&self) -> &str {
        &self.typed
    }

    pub fn guard(&self) -> &ConfirmationGuard {
        &self.guard
    }

    pub fn reconsider_points(&self) -> &[String] {
        &self.reconsider_points
    }

    /// Whether the commit action has been handed off
    pub fn dispatched(&self) -> bool {
        self.dispatched
    }

    pub fn toasts(&self) -> &ToastQueue<S> {
        &self.toasts
    }

    /// Apply a trigger and, if it entered Submitting, dispatch the commit action.
    pub async fn handle(&mut self, trigger: Trigger) -> Result<Transition, GuardViolation> {
        let transition = self.apply(trigger)?;
        if transition.to == WorkflowState::Submitting {
            self.dispatch().await;
        }
        Ok(transition)
    }

    /// Apply a trigger without dispatching.
    ///
    /// Entering Submitting locks the input; call [`Self::dispatch`] to hand off
    /// the commit action. Toast timers only run when called inside a tokio runtime.
    pub fn apply(&mut self, trigger: Trigger) -> Result<Transition, GuardViolation> {
        let kind = trigger.kind();

        if self.state.is_terminal() {
            debug!("Ignoring '{}': workflow already {}", kind, self.state);
            return Err(GuardViolation::Terminal { state: self.state });
        }
        if self.state == WorkflowState::Submitting {
            debug!("Ignoring '{}' while submitting", kind);
            return Err(GuardViolation::InputLocked);
        }

        let next = next_state(self.state, kind).ok_or(GuardViolation::NotPermitted {
            state: self.state,
            trigger: kind,
        })?;

        if kind == TriggerKind::Confirm && !self.guard.matches(&self.typed) {
            self.surface.apply(&self.elements.confirm_input, classes::SHAKE);
            debug!("Confirmation text does not match '{}'", self.guard.literal());
            return Err(GuardViolation::ConfirmationMismatch {
                expected: self.guard.literal().to_string(),
            });
        }

        let from = self.state;
        self.state = next;
        self.run_side_effects(from, trigger);

        Ok(self.record(from, next, kind))
    }

    /// Hand the commit action off. Returns false if nothing was dispatched.
    pub async fn dispatch(&mut self) -> bool {
        if self.state != WorkflowState::Submitting || self.dispatched {
            debug!("Dispatch skipped (state {}, dispatched {})", self.state, self.dispatched);
            return false;
        }
        self.dispatched = true;

        info!("Dispatching commit action");
        match self.commit.commit().await {
            Ok(()) => info!("Commit action completed"),
            Err(e) => warn!("Commit action failed: {:#}", e),
        }

        self.state = WorkflowState::Completed;
        self.record(WorkflowState::Submitting, WorkflowState::Completed, TriggerKind::Commit);
        true
    }

    fn record(&mut self, from: WorkflowState, to: WorkflowState, kind: TriggerKind) -> Transition {
        // Keystrokes collapse into the latest Input entry
        if kind == TriggerKind::Input
            && let Some(last) = self.history.last_mut()
            && last.trigger == TriggerKind::Input
        {
            last.at = Utc::now();
            debug!("Workflow {} --{}--> {}", from, kind, to);
            return last.clone();
        }

        info!("Workflow {} --{}--> {}", from, kind, to);
        let transition = Transition::new(from, to, kind);
        self.history.push(transition.clone());
        transition
    }

    fn run_side_effects(&mut self, from: WorkflowState, trigger: Trigger) {
        if from == WorkflowState::Idle {
            self.branch = self.page.child_token();
        }

        match (from, trigger) {
            (WorkflowState::Idle, Trigger::RequestDelete) => self.show_confirmation_step(),
            (WorkflowState::Idle, Trigger::Reconsider) => {
                self.surface.apply(&self.elements.reconsider_modal, classes::OPEN);
            }
            (WorkflowState::Reconsidering, Trigger::Continue) => {
                self.surface.clear(&self.elements.reconsider_modal, classes::OPEN);
                self.show_confirmation_step();
            }
            (WorkflowState::Reconsidering, Trigger::Keep) => {
                self.surface.clear(&self.elements.reconsider_modal, classes::OPEN);
                self.abort_branch();
                self.toasts.show(KEEP_MESSAGE, MessageKind::Success, &self.page);
            }
            (WorkflowState::Reconsidering, Trigger::Cancel) => {
                self.surface.clear(&self.elements.reconsider_modal, classes::OPEN);
                self.abort_branch();
            }
            (WorkflowState::AwaitingConfirmationText, Trigger::Input(text)) => {
                self.typed = text;
                let elements = [&self.elements.confirm_input, &self.elements.final_button];
                if self.guard.matches(&self.typed) {
                    elements.iter().for_each(|e| self.surface.apply(e, classes::ARMED));
                } else {
                    elements.iter().for_each(|e| self.surface.clear(e, classes::ARMED));
                }
            }
            (WorkflowState::AwaitingConfirmationText, Trigger::Cancel) => {
                self.hide_confirmation_step();
                self.abort_branch();
            }
            (WorkflowState::AwaitingConfirmationText, Trigger::Confirm) => {
                self.surface.apply(&self.elements.confirm_input, classes::DISABLED);
                self.surface.apply(&self.elements.final_button, classes::DISABLED);
                self.toasts.show("Deleting...", MessageKind::Info, &self.page);
            }
            (_, Trigger::Unload) => {
                self.page.cancel();
                self.toasts.sweep_cancelled();
                self.typed.clear();
            }
            _ => {}
        }
    }

    fn show_confirmation_step(&mut self) {
        self.surface.apply(&self.elements.button_group, classes::HIDDEN);
        self.surface.apply(&self.elements.confirmation_step, classes::VISIBLE);
        self.surface.focus(&self.elements.confirm_input);

        let hint = format!("Type {} to confirm", self.guard.literal());
        self.toasts.show(&hint, MessageKind::Info, &self.branch);
    }

    fn hide_confirmation_step(&mut self) {
        self.surface.clear(&self.elements.confirmation_step, classes::VISIBLE);
        self.surface.clear(&self.elements.button_group, classes::HIDDEN);
        self.surface.clear(&self.elements.confirm_input, classes::ARMED);
        self.surface.clear(&self.elements.final_button, classes::ARMED);
        self.typed.clear();
    }

    /// Cancel everything started since the flow left Idle.
    fn abort_branch(&mut self) {
        self.branch.cancel();
        let swept = self.toasts.sweep_cancelled();
        debug!("Branch aborted, {} toast(s) removed", swept);
    }
}

impl<S: UiSurface, C: CommitAction> Drop for ConfirmationWorkflow<S, C> {
    fn drop(&mut self) {
        self.page.cancel();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use anyhow::Result;
    use async_trait::async_trait;

    use super::*;
    use crate::ui::{FieldFocus, Notifier, ToastId, VisualState};

    #[derive(Default)]
    struct RecordingSurface {
        calls: Mutex<Vec<String>>,
    }

    impl RecordingSurface {
        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }

        fn push(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }
    }

    impl Notifier for RecordingSurface {
        fn show(&self, _id: ToastId, text: &str, _kind: MessageKind) {
            self.push(format!("toast {}", text));
        }

        fn dismiss(&self, _id: ToastId) {
            self.push("dismiss".to_string());
        }
    }

    impl FieldFocus for RecordingSurface {
        fn focus(&self, field: &str) {
            self.push(format!("focus {}", field));
        }
    }

    impl VisualState for RecordingSurface {
        fn apply(&self, element: &str, class: &str) {
            self.push(format!("{} +{}", element, class));
        }

        fn clear(&self, element: &str, class: &str) {
            self.push(format!("{} -{}", element, class));
        }
    }

    #[derive(Clone, Default)]
    struct CountingCommit {
        count: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl CommitAction for CountingCommit {
        async fn commit(&self) -> Result<()> {
            self.count.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                anyhow::bail!("server returned 500");
            }
            Ok(())
        }
    }

    fn workflow(
        commit: CountingCommit,
    ) -> (ConfirmationWorkflow<RecordingSurface, CountingCommit>, Arc<RecordingSurface>) {
        let surface = Arc::new(RecordingSurface::default());
        let wf = ConfirmationWorkflow::new(
            &GuardConfig::default(),
            WorkflowElements::default(),
            Arc::clone(&surface),
            commit,
        );
        (wf, surface)
    }

    #[tokio::test(start_paused = true)]
    async fn test_delete_then_cancel_returns_to_idle_without_commit() {
        let commit = CountingCommit::default();
        let (mut wf, _surface) = workflow(commit.clone());

        wf.handle(Trigger::RequestDelete).await.unwrap();
        assert_eq!(wf.state(), WorkflowState::AwaitingConfirmationText);

        let t = wf.handle(Trigger::Cancel).await.unwrap();
        assert!(t.is_abort());
        assert_eq!(wf.state(), WorkflowState::Idle);
        assert_eq!(commit.count.load(Ordering::SeqCst), 0);
        assert!(!wf.dispatched());
    }

    #[tokio::test(start_paused = true)]
    async fn test_lowercase_confirmation_enters_submitting() {
        let (mut wf, _surface) = workflow(CountingCommit::default());

        wf.apply(Trigger::RequestDelete).unwrap();
        wf.apply(Trigger::Input("delete".to_string())).unwrap();
        let t = wf.apply(Trigger::Confirm).unwrap();

        assert_eq!(t.to, WorkflowState::Submitting);
        assert_eq!(wf.state(), WorkflowState::Submitting);
    }

    #[tokio::test(start_paused = true)]
    async fn test_partial_word_never_leaves_awaiting() {
        let commit = CountingCommit::default();
        let (mut wf, surface) = workflow(commit.clone());

        wf.handle(Trigger::RequestDelete).await.unwrap();
        wf.handle(Trigger::Input("delet".to_string())).await.unwrap();

        for _ in 0..3 {
            let err = wf.handle(Trigger::Confirm).await.unwrap_err();
            assert_eq!(
                err,
                GuardViolation::ConfirmationMismatch {
                    expected: "DELETE".to_string()
                }
            );
            assert_eq!(wf.state(), WorkflowState::AwaitingConfirmationText);
        }
        assert_eq!(commit.count.load(Ordering::SeqCst), 0);
        assert!(surface.calls().contains(&"confirmInput +shake".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_rapid_double_confirm_dispatches_once() {
        let commit = CountingCommit::default();
        let (mut wf, _surface) = workflow(commit.clone());

        wf.apply(Trigger::RequestDelete).unwrap();
        wf.apply(Trigger::Input("DELETE".to_string())).unwrap();
        wf.apply(Trigger::Confirm).unwrap();
        assert_eq!(wf.apply(Trigger::Confirm), Err(GuardViolation::InputLocked));
        assert_eq!(
            wf.apply(Trigger::Input("x".to_string())),
            Err(GuardViolation::InputLocked)
        );

        assert!(wf.dispatch().await);
        assert!(!wf.dispatch().await);
        assert_eq!(commit.count.load(Ordering::SeqCst), 1);
        assert_eq!(wf.state(), WorkflowState::Completed);

        let err = wf.handle(Trigger::Confirm).await.unwrap_err();
        assert_eq!(
            err,
            GuardViolation::Terminal {
                state: WorkflowState::Completed
            }
        );
        assert_eq!(commit.count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dispatch_without_guard_does_nothing() {
        let commit = CountingCommit::default();
        let (mut wf, _surface) = workflow(commit.clone());

        assert!(!wf.dispatch().await);
        wf.apply(Trigger::RequestDelete).unwrap();
        assert!(!wf.dispatch().await);
        assert_eq!(commit.count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_commit_still_completes() {
        let commit = CountingCommit {
            fail: true,
            ..Default::default()
        };
        let (mut wf, _surface) = workflow(commit.clone());

        wf.handle(Trigger::RequestDelete).await.unwrap();
        wf.handle(Trigger::Input(" Delete ".to_string())).await.unwrap();
        wf.handle(Trigger::Confirm).await.unwrap();

        assert_eq!(wf.state(), WorkflowState::Completed);
        assert_eq!(commit.count.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconsider_keep_shows_message_and_aborts() {
        let (mut wf, surface) = workflow(CountingCommit::default());

        wf.handle(Trigger::Reconsider).await.unwrap();
        assert_eq!(wf.state(), WorkflowState::Reconsidering);
        assert!(!wf.reconsider_points().is_empty());

        wf.handle(Trigger::Keep).await.unwrap();
        assert_eq!(wf.state(), WorkflowState::Idle);

        let calls = surface.calls();
        assert!(calls.contains(&"reconsiderModal +open".to_string()));
        assert!(calls.contains(&"reconsiderModal -open".to_string()));
        assert!(calls.contains(&format!("toast {}", KEEP_MESSAGE)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_reconsider_continue_reaches_confirmation_step() {
        let (mut wf, surface) = workflow(CountingCommit::default());

        wf.handle(Trigger::Reconsider).await.unwrap();
        wf.handle(Trigger::Continue).await.unwrap();

        assert_eq!(wf.state(), WorkflowState::AwaitingConfirmationText);
        let calls = surface.calls();
        assert!(calls.contains(&"focus confirmInput".to_string()));
        assert!(calls.contains(&"toast Type DELETE to confirm".to_string()));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_invalidates_branch_timers() {
        let (mut wf, surface) = workflow(CountingCommit::default());

        wf.handle(Trigger::RequestDelete).await.unwrap();
        assert_eq!(wf.toasts().active_count(), 1);

        wf.handle(Trigger::Cancel).await.unwrap();
        assert_eq!(wf.toasts().active_count(), 0);
        let after_cancel = surface.calls();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(surface.calls(), after_cancel);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keep_message_outlives_branch_and_auto_dismisses() {
        let (mut wf, surface) = workflow(CountingCommit::default());

        wf.handle(Trigger::Reconsider).await.unwrap();
        wf.handle(Trigger::Keep).await.unwrap();
        assert_eq!(wf.toasts().active_count(), 1);

        tokio::time::sleep(Duration::from_millis(3001)).await;
        assert_eq!(wf.toasts().active_count(), 0);
        assert_eq!(surface.calls().last().unwrap(), "dismiss");
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_toggles_armed_state() {
        let (mut wf, surface) = workflow(CountingCommit::default());

        wf.handle(Trigger::RequestDelete).await.unwrap();
        wf.handle(Trigger::Input("DELETE".to_string())).await.unwrap();
        assert!(surface.calls().contains(&"finalDeleteBtn +armed".to_string()));

        wf.handle(Trigger::Input("DELET".to_string())).await.unwrap();
        assert_eq!(surface.calls().last().unwrap(), "finalDeleteBtn -armed");
        assert_eq!(wf.typed_text(), "DELET");
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_clears_typed_text() {
        let (mut wf, _surface) = workflow(CountingCommit::default());

        wf.handle(Trigger::RequestDelete).await.unwrap();
        wf.handle(Trigger::Input("DELETE".to_string())).await.unwrap();
        wf.handle(Trigger::Cancel).await.unwrap();
        wf.handle(Trigger::RequestDelete).await.unwrap();

        // The old text must not satisfy the guard in the new branch
        assert!(wf.handle(Trigger::Confirm).await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_triggers_not_in_table_are_rejected() {
        let (mut wf, _surface) = workflow(CountingCommit::default());

        assert_eq!(
            wf.handle(Trigger::Confirm).await,
            Err(GuardViolation::NotPermitted {
                state: WorkflowState::Idle,
                trigger: TriggerKind::Confirm,
            })
        );
        assert!(wf.handle(Trigger::Keep).await.is_err());
        assert!(wf.handle(Trigger::Input("DELETE".to_string())).await.is_err());
        assert_eq!(wf.state(), WorkflowState::Idle);
        assert!(wf.history().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unload_aborts_and_silences_timers() {
        let commit = CountingCommit::default();
        let (mut wf, surface) = workflow(commit.clone());

        wf.handle(Trigger::RequestDelete).await.unwrap();
        wf.handle(Trigger::Unload).await.unwrap();
        assert_eq!(wf.state(), WorkflowState::Aborted);
        let after_unload = surface.calls();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(surface.calls(), after_unload);
        assert!(wf.handle(Trigger::RequestDelete).await.is_err());
        assert_eq!(commit.count.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unload_from_idle_aborts() {
        let (mut wf, _surface) = workflow(CountingCommit::default());

        let t = wf.handle(Trigger::Unload).await.unwrap();
        assert_eq!(t.from, WorkflowState::Idle);
        assert_eq!(wf.state(), WorkflowState::Aborted);
        assert!(!t.is_abort());
    }

    #[tokio::test(start_paused = true)]
    async fn test_unload_while_reconsidering_aborts() {
        let commit = CountingCommit::default();
        let (mut wf, surface) = workflow(commit.clone());

        wf.handle(Trigger::Reconsider).await.unwrap();
        wf.handle(Trigger::Unload).await.unwrap();

        assert_eq!(wf.state(), WorkflowState::Aborted);
        assert_eq!(
            wf.handle(Trigger::Continue).await,
            Err(GuardViolation::Terminal {
                state: WorkflowState::Aborted
            })
        );
        assert_eq!(commit.count.load(Ordering::SeqCst), 0);
        assert!(!surface.calls().contains(&format!("toast {}", KEEP_MESSAGE)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unload_while_submitting_is_locked() {
        let commit = CountingCommit::default();
        let (mut wf, _surface) = workflow(commit.clone());

        wf.apply(Trigger::RequestDelete).unwrap();
        wf.apply(Trigger::Input("DELETE".to_string())).unwrap();
        wf.apply(Trigger::Confirm).unwrap();

        assert_eq!(wf.apply(Trigger::Unload), Err(GuardViolation::InputLocked));
        assert_eq!(wf.state(), WorkflowState::Submitting);

        assert!(wf.dispatch().await);
        assert_eq!(wf.state(), WorkflowState::Completed);
        assert_eq!(commit.count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_apply_outside_runtime() {
        let (mut wf, surface) = workflow(CountingCommit::default());

        let t = wf.apply(Trigger::RequestDelete).unwrap();
        assert_eq!(t.to, WorkflowState::AwaitingConfirmationText);
        assert_eq!(wf.toasts().active_count(), 1);
        assert!(surface.calls().contains(&"toast Type DELETE to confirm".to_string()));

        wf.apply(Trigger::Cancel).unwrap();
        assert_eq!(wf.state(), WorkflowState::Idle);
        assert_eq!(wf.toasts().active_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_consecutive_inputs_share_one_history_entry() {
        let (mut wf, _surface) = workflow(CountingCommit::default());

        wf.handle(Trigger::RequestDelete).await.unwrap();
        for typed in ["D", "DE", "DEL", "DELE", "DELET", "DELETE"] {
            wf.handle(Trigger::Input(typed.to_string())).await.unwrap();
        }
        assert_eq!(wf.history().len(), 2);
        assert_eq!(wf.typed_text(), "DELETE");

        // A rejected confirm does not split the run
        wf.handle(Trigger::Input("DELET".to_string())).await.unwrap();
        assert!(wf.handle(Trigger::Confirm).await.is_err());
        wf.handle(Trigger::Input("delete".to_string())).await.unwrap();
        assert_eq!(wf.history().len(), 2);

        wf.handle(Trigger::Confirm).await.unwrap();
        let kinds: Vec<_> = wf.history().iter().map(|t| t.trigger).collect();
        assert_eq!(
            kinds,
            vec![
                TriggerKind::RequestDelete,
                TriggerKind::Input,
                TriggerKind::Confirm,
                TriggerKind::Commit,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_history_records_full_flow() {
        let (mut wf, _surface) = workflow(CountingCommit::default());

        wf.handle(Trigger::RequestDelete).await.unwrap();
        wf.handle(Trigger::Input("delete".to_string())).await.unwrap();
        wf.handle(Trigger::Confirm).await.unwrap();

        let kinds: Vec<_> = wf.history().iter().map(|t| t.trigger).collect();
        assert_eq!(
            kinds,
            vec![
                TriggerKind::RequestDelete,
                TriggerKind::Input,
                TriggerKind::Confirm,
                TriggerKind::Commit,
            ]
        );
        assert_eq!(wf.history().last().unwrap().to, WorkflowState::Completed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_custom_literal_case_sensitive() {
        let mut config = GuardConfig::default();
        config.confirmation.literal = "REMOVE".to_string();
        config.confirmation.case_insensitive = false;

        let commit = CountingCommit::default();
        let mut wf = ConfirmationWorkflow::new(
            &config,
            WorkflowElements::default(),
            Arc::new(RecordingSurface::default()),
            commit.clone(),
        );

        wf.handle(Trigger::RequestDelete).await.unwrap();
        wf.handle(Trigger::Input("remove".to_string())).await.unwrap();
        assert!(wf.handle(Trigger::Confirm).await.is_err());

        wf.handle(Trigger::Input("REMOVE".to_string())).await.unwrap();
        wf.handle(Trigger::Confirm).await.unwrap();
        assert_eq!(commit.count.load(Ordering::SeqCst), 1);
    }
}
