use std::fmt;
use std::sync::Arc;

use regex::Regex;

/// Predicate used by a rule's custom check.
pub type CheckFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// A rule-supplied check with the message reported when it fails.
#[derive(Clone)]
pub struct CustomCheck {
    pub check: CheckFn,
    pub message: String,
}

impl CustomCheck {
    pub fn new<F>(message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        Self {
            check: Arc::new(check),
            message: message.into(),
        }
    }

    pub fn passes(&self, value: &str) -> bool {
        (self.check)(value)
    }
}

impl fmt::Debug for CustomCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomCheck")
            .field("message", &self.message)
            .finish_non_exhaustive()
    }
}

/// Validation rule for a single named form field.
///
/// Rules are immutable once built and are evaluated in declaration order.
/// Use the builder methods to describe the checks:
///
/// ```
/// use post_guard::models::FieldRule;
///
/// let rule = FieldRule::new("title").required().min_length(5).max_length(200);
/// assert_eq!(rule.field_name, "title");
/// ```
#[derive(Debug, Clone)]
pub struct FieldRule {
    /// Key of the value in the submitted field map
    pub field_name: String,
    /// Name used in failure messages (defaults to the field name)
    pub label: Option<String>,
    pub required: bool,
    /// Replaces the default "is required" message
    pub required_message: Option<String>,
    /// A blank value passes without running the remaining checks
    pub allow_blank: bool,
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<Regex>,
    /// Replaces the default "has an invalid format" message
    pub pattern_message: Option<String>,
    pub custom_check: Option<CustomCheck>,
}

impl FieldRule {
    pub fn new(field_name: impl Into<String>) -> Self {
        Self {
            field_name: field_name.into(),
            label: None,
            required: false,
            required_message: None,
            allow_blank: false,
            min_length: None,
            max_length: None,
            pattern: None,
            pattern_message: None,
            custom_check: None,
        }
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    /// Let an empty optional field through untouched.
    pub fn allow_blank(mut self) -> Self {
        self.allow_blank = true;
        self
    }

    pub fn min_length(mut self, min: usize) -> Self {
        self.min_length = Some(min);
        self
    }

    pub fn max_length(mut self, max: usize) -> Self {
        self.max_length = Some(max);
        self
    }

    pub fn pattern(mut self, pattern: Regex) -> Self {
        self.pattern = Some(pattern);
        self
    }

    pub fn pattern_message(mut self, message: impl Into<String>) -> Self {
        self.pattern_message = Some(message.into());
        self
    }

    pub fn custom<F>(mut self, message: impl Into<String>, check: F) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.custom_check = Some(CustomCheck::new(message, check));
        self
    }

    /// Name shown to the user in failure messages.
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.field_name)
    }
}
