use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::FieldRule;
use crate::validator::EMAIL_PATTERN;

use super::GuardConfig;

/// Names of the forms that ship with the crate
pub const BUILTIN_FORMS: &[&str] = &["signup", "new-post", "edit-post"];

const TERMS_MESSAGE: &str = "You must agree to the terms and conditions";

static USERNAME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9@.+\-_]+$").expect("invalid USERNAME_PATTERN regex")
});

/// A form described in the configuration file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDefinition {
    pub name: String,
    pub fields: Vec<FieldRuleConfig>,
}

/// Serializable description of a [`FieldRule`]. Custom checks can only be built in code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FieldRuleConfig {
    pub field: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub required_message: Option<String>,
    #[serde(default)]
    pub allow_blank: bool,
    #[serde(default)]
    pub min_length: Option<usize>,
    #[serde(default)]
    pub max_length: Option<usize>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub pattern_message: Option<String>,
}

impl TryFrom<&FieldRuleConfig> for FieldRule {
    type Error = anyhow::Error;

    fn try_from(config: &FieldRuleConfig) -> Result<Self> {
        let mut rule = FieldRule::new(config.field.clone());
        rule.label = config.label.clone();
        rule.required = config.required;
        rule.required_message = config.required_message.clone();
        rule.allow_blank = config.allow_blank;
        rule.min_length = config.min_length;
        rule.max_length = config.max_length;
        rule.pattern_message = config.pattern_message.clone();
        if let Some(pattern) = &config.pattern {
            let regex = Regex::new(pattern).context(format!(
                "Invalid pattern for field '{}': {}",
                config.field, pattern
            ))?;
            rule.pattern = Some(regex);
        }
        Ok(rule)
    }
}

impl FormDefinition {
    pub fn rules(&self) -> Result<Vec<FieldRule>> {
        self.fields
            .iter()
            .map(FieldRule::try_from)
            .collect::<Result<Vec<_>>>()
            .context(format!("Invalid definition for form '{}'", self.name))
    }
}

/// Look up a form by name: configured forms first, then the built-in presets.
pub fn resolve_form(name: &str, config: &GuardConfig) -> Result<Vec<FieldRule>> {
    if let Some(form) = config.forms.iter().find(|f| f.name == name) {
        return form.rules();
    }

    match name {
        "signup" => Ok(signup_rules()),
        "new-post" | "edit-post" => Ok(post_rules()),
        other => anyhow::bail!(
            "Unknown form '{}'. Built-in forms: {}",
            other,
            BUILTIN_FORMS.join(", ")
        ),
    }
}

/// Account signup: username, email, optional names, password pair and terms checkbox.
pub fn signup_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new("username")
            .label("Username")
            .required()
            .max_length(150)
            .pattern(USERNAME_PATTERN.clone())
            .pattern_message("Enter a valid username. Letters, digits and @/./+/-/_ only."),
        FieldRule::new("email")
            .label("Email")
            .required()
            .max_length(254)
            .pattern(EMAIL_PATTERN.clone())
            .pattern_message("Please enter a valid email address"),
        FieldRule::new("first_name")
            .label("First name")
            .max_length(30)
            .allow_blank(),
        FieldRule::new("last_name")
            .label("Last name")
            .max_length(30)
            .allow_blank(),
        FieldRule::new("password1")
            .label("Password")
            .required()
            .min_length(8),
        FieldRule::new("password2")
            .label("Password confirmation")
            .required()
            .min_length(8),
        FieldRule::new("agree_terms")
            .required()
            .required_message(TERMS_MESSAGE)
            .custom(TERMS_MESSAGE, |v| {
                matches!(v.trim(), "on" | "true" | "yes" | "1")
            }),
    ]
}

/// New and edited posts share the same rules.
pub fn post_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new("title")
            .label("Title")
            .required()
            .min_length(5)
            .max_length(200),
        FieldRule::new("body").label("Content").required().min_length(50),
    ]
}
