//! Form submission controller for the plain forms (signup, new post, edit post).
//!
//! Validation is delegated to [`FormValidator`]; this controller only turns the
//! result into UI feedback and guards the commit action against double submits.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::config::NotificationConfig;
use crate::models::{FieldRule, ValidationFailure, ValidationResult};
use crate::ui::{CommitAction, MessageKind, ToastQueue, UiSurface, classes};
use crate::validator::FormValidator;

/// Result of a submit attempt
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Validation passed and the commit action was dispatched
    Submitted,
    /// Validation failed; nothing was dispatched
    Rejected(ValidationResult),
    /// A previous submit already dispatched the commit action
    AlreadySubmitted,
}

/// Page controller for one form.
pub struct FormController<S: UiSurface, C: CommitAction> {
    name: String,
    rules: Vec<FieldRule>,
    surface: Arc<S>,
    commit: C,
    toasts: ToastQueue<S>,
    page: CancellationToken,
    submit_button: String,
    submitted: bool,
    errored: HashSet<String>,
}

impl<S: UiSurface, C: CommitAction> FormController<S, C> {
    pub fn new(
        name: impl Into<String>,
        rules: Vec<FieldRule>,
        notifications: &NotificationConfig,
        surface: Arc<S>,
        commit: C,
    ) -> Self {
        Self {
            name: name.into(),
            rules,
            toasts: ToastQueue::new(Arc::clone(&surface), notifications.auto_dismiss()),
            surface,
            commit,
            page: CancellationToken::new(),
            submit_button: "submitButton".to_string(),
            submitted: false,
            errored: HashSet::new(),
        }
    }

    /// Use a different element id for the submit button
    pub fn with_submit_button(mut self, element: impl Into<String>) -> Self {
        self.submit_button = element.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn is_submitted(&self) -> bool {
        self.submitted
    }

    /// Fields currently marked with an error
    pub fn errored_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = self.errored.iter().map(String::as_str).collect();
        fields.sort_unstable();
        fields
    }

    /// Validate and, if everything passes, dispatch the commit action once.
    pub async fn submit(&mut self, values: &HashMap<String, String>) -> SubmitOutcome {
        if self.submitted {
            debug!("Form '{}' already submitted, ignoring", self.name);
            return SubmitOutcome::AlreadySubmitted;
        }

        let result = FormValidator::validate(values, &self.rules);
        self.clear_all_errors();

        if !result.valid {
            info!(
                "Form '{}' rejected with {} failure(s)",
                self.name,
                result.failures.len()
            );
            self.report(&result);
            return SubmitOutcome::Rejected(result);
        }

        self.submitted = true;
        self.surface.apply(&self.submit_button, classes::LOADING);
        self.surface.apply(&self.submit_button, classes::DISABLED);
        self.toasts
            .show("Submitting...", MessageKind::Info, &self.page);

        info!("Submitting form '{}'", self.name);
        if let Err(e) = self.commit.commit().await {
            warn!("Commit action for form '{}' failed: {:#}", self.name, e);
        }
        self.surface.clear(&self.submit_button, classes::LOADING);

        SubmitOutcome::Submitted
    }

    /// Validate one field when it loses focus. Unknown fields always pass.
    pub fn blur(&mut self, field: &str, value: &str) -> Option<ValidationFailure> {
        let rule = self.rules.iter().find(|r| r.field_name == field)?;
        let failure = FormValidator::validate_field(value, rule);

        match &failure {
            Some(_) => self.mark_error(field),
            None => self.clear_error(field),
        }
        failure
    }

    /// The user edited a field: drop its error marker.
    pub fn input(&mut self, field: &str) {
        self.clear_error(field);
    }

    /// Feedback for a rejected submit: one error marker, shake and message per
    /// failure in order, then focus on the first failing field.
    fn report(&mut self, result: &ValidationResult) {
        for failure in &result.failures {
            self.mark_error(&failure.field_name);
            self.surface.apply(&failure.field_name, classes::SHAKE);
            self.toasts
                .show(&failure.message, MessageKind::Error, &self.page);
        }
        if let Some(field) = result.first_failed_field() {
            self.surface.focus(field);
        }
    }

    fn mark_error(&mut self, field: &str) {
        self.surface.apply(field, classes::HAS_ERROR);
        self.errored.insert(field.to_string());
    }

    fn clear_error(&mut self, field: &str) {
        if self.errored.remove(field) {
            self.surface.clear(field, classes::HAS_ERROR);
        }
    }

    fn clear_all_errors(&mut self) {
        for field in self.errored.drain() {
            self.surface.clear(&field, classes::HAS_ERROR);
        }
    }
}

impl<S: UiSurface, C: CommitAction> Drop for FormController<S, C> {
    fn drop(&mut self) {
        self.page.cancel();
    }
}
