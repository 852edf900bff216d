pub mod forms;
pub mod settings;

pub use forms::{
    BUILTIN_FORMS, FieldRuleConfig, FormDefinition, post_rules, resolve_form, signup_rules,
};
pub use settings::{ConfirmationConfig, GuardConfig, NotificationConfig};
