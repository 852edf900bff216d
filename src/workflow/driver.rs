//! Queued event pump for a [`ConfirmationWorkflow`].
//!
//! UI callbacks only hold a cloneable [`WorkflowHandle`]. Triggers go through an
//! unbounded channel and one task applies them in arrival order, so a trigger
//! that arrives while a commit is in flight waits for it to finish.

use serde::Serialize;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::ui::{CommitAction, UiSurface};

use super::machine::ConfirmationWorkflow;
use super::state::{Transition, Trigger, WorkflowState};

/// Cloneable sender side of a running workflow
#[derive(Clone)]
pub struct WorkflowHandle {
    tx: mpsc::UnboundedSender<Trigger>,
    state: watch::Receiver<WorkflowState>,
}

impl WorkflowHandle {
    /// Queue a trigger. Returns false once the workflow has stopped.
    pub fn send(&self, trigger: Trigger) -> bool {
        self.tx.send(trigger).is_ok()
    }

    /// State after the most recently processed trigger
    pub fn state(&self) -> WorkflowState {
        *self.state.borrow()
    }

    /// Wait for the driver to finish the next queued trigger and return the state it left.
    pub async fn settled(&mut self) -> WorkflowState {
        if self.state.changed().await.is_err() {
            return *self.state.borrow();
        }
        *self.state.borrow_and_update()
    }

    /// Wait until the state satisfies `predicate`, or the driver stops.
    pub async fn wait_for(
        &mut self,
        predicate: impl FnMut(&WorkflowState) -> bool,
    ) -> WorkflowState {
        let reached = self.state.wait_for(predicate).await.map(|state| *state);
        reached.unwrap_or_else(|_| *self.state.borrow())
    }
}

/// What the driver saw by the time it stopped
#[derive(Debug, Clone, Serialize)]
pub struct DriverReport {
    pub final_state: WorkflowState,
    pub history: Vec<Transition>,
    /// Triggers that failed their guard or were not permitted
    pub rejected: usize,
}

/// Move `workflow` onto its own task and return the handle feeding it.
///
/// The task ends when the workflow reaches a terminal state or every handle
/// is dropped. Triggers still queued at that point are discarded.
pub fn spawn_workflow<S, C>(
    mut workflow: ConfirmationWorkflow<S, C>,
) -> (WorkflowHandle, JoinHandle<DriverReport>)
where
    S: UiSurface,
    C: CommitAction + 'static,
{
    let (tx, mut rx) = mpsc::unbounded_channel::<Trigger>();
    let (state_tx, state_rx) = watch::channel(workflow.state());

    let task = tokio::spawn(async move {
        let mut rejected = 0;

        while let Some(trigger) = rx.recv().await {
            if let Err(violation) = workflow.handle(trigger).await {
                rejected += 1;
                debug!("Trigger rejected: {}", violation);
            }
            state_tx.send_replace(workflow.state());

            if workflow.state().is_terminal() {
                break;
            }
        }

        info!(
            "Workflow driver stopped in state {} ({} rejected trigger(s))",
            workflow.state(),
            rejected
        );
        DriverReport {
            final_state: workflow.state(),
            history: workflow.history().to_vec(),
            rejected,
        }
    });

    (WorkflowHandle { tx, state: state_rx }, task)
}
