//! Form validation - Pure rule evaluation over submitted field values.
//!
//! The validator never touches the UI. Callers apply focus, error styling and
//! notifications from the returned [`ValidationResult`].

pub mod stats;
pub mod strength;

pub use stats::{CounterLevel, TextStats, counter_level, text_stats};
pub use strength::{PasswordStrength, password_strength};

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::{FailureKind, FieldRule, ValidationFailure, ValidationResult};

/// Email shape accepted by the signup and profile forms.
pub static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid EMAIL_PATTERN regex"));

/// Stateless evaluator for ordered field rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValidator;

impl FormValidator {
    /// Validate every rule against `values`, collecting one failure per field at most.
    ///
    /// Fields missing from `values` are validated as the empty string.
    pub fn validate(values: &HashMap<String, String>, rules: &[FieldRule]) -> ValidationResult {
        let failures = rules
            .iter()
            .filter_map(|rule| {
                let value = values
                    .get(&rule.field_name)
                    .map(String::as_str)
                    .unwrap_or("");
                Self::validate_field(value, rule)
            })
            .collect();

        ValidationResult::from_failures(failures)
    }

    /// Validate a single value against its rule. The first failing check wins.
    pub fn validate_field(value: &str, rule: &FieldRule) -> Option<ValidationFailure> {
        let trimmed = value.trim();
        let name = rule.display_name();
        let fail = |kind: FailureKind, message: String| {
            Some(ValidationFailure {
                field_name: rule.field_name.clone(),
                message,
                kind,
            })
        };

        if trimmed.is_empty() {
            if rule.required {
                let message = rule
                    .required_message
                    .clone()
                    .unwrap_or_else(|| format!("{} is required", name));
                return fail(FailureKind::Required, message);
            }
            if rule.allow_blank {
                return None;
            }
        }

        let length = trimmed.chars().count();
        if let Some(min) = rule.min_length
            && length < min
        {
            return fail(
                FailureKind::MinLength,
                format!("{} must be at least {} characters", name, min),
            );
        }
        if let Some(max) = rule.max_length
            && length > max
        {
            return fail(
                FailureKind::MaxLength,
                format!("{} must be at most {} characters", name, max),
            );
        }

        if let Some(pattern) = &rule.pattern
            && !pattern.is_match(trimmed)
        {
            let message = rule
                .pattern_message
                .clone()
                .unwrap_or_else(|| format!("{} has an invalid format", name));
            return fail(FailureKind::Pattern, message);
        }

        if let Some(custom) = &rule.custom_check
            && !custom.passes(value)
        {
            return fail(FailureKind::Custom, custom.message.clone());
        }

        None
    }
}
