use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static LOWERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[a-z]").expect("invalid LOWERCASE regex"));
static UPPERCASE: Lazy<Regex> = Lazy::new(|| Regex::new("[A-Z]").expect("invalid UPPERCASE regex"));
static DIGIT: Lazy<Regex> = Lazy::new(|| Regex::new("[0-9]").expect("invalid DIGIT regex"));
static SYMBOL: Lazy<Regex> =
    Lazy::new(|| Regex::new("[^a-zA-Z0-9]").expect("invalid SYMBOL regex"));

/// Strength bucket shown beside the signup password field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStrength {
    None,
    Weak,
    Fair,
    Good,
    Strong,
}

impl PasswordStrength {
    fn from_score(score: u32) -> Self {
        match score {
            0 => Self::None,
            1 => Self::Weak,
            2 => Self::Fair,
            3 => Self::Good,
            _ => Self::Strong,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Good => "Good",
            Self::Strong => "Strong",
        }
    }

    /// Number of lit segments in the four-segment meter.
    pub fn segments(&self) -> u8 {
        *self as u8
    }
}

/// Score a password: length thresholds plus character-class diversity, capped at Strong.
pub fn password_strength(password: &str) -> PasswordStrength {
    let length = password.chars().count();
    let mut score: u32 = 0;

    if length >= 8 {
        score += 1;
    }
    if length >= 12 {
        score += 2;
    }
    if LOWERCASE.is_match(password) {
        score += 1;
    }
    if UPPERCASE.is_match(password) {
        score += 1;
    }
    if DIGIT.is_match(password) {
        score += 1;
    }
    if SYMBOL.is_match(password) {
        score += 2;
    }

    PasswordStrength::from_score(score.min(4))
}
