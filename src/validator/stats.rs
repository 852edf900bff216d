use serde::{Deserialize, Serialize};

/// Word and character counts for a text field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TextStats {
    pub words: usize,
    pub chars: usize,
}

/// Fill level of a character counter relative to the field's maximum length
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CounterLevel {
    Normal,
    Warning,
    Danger,
}

pub fn text_stats(text: &str) -> TextStats {
    TextStats {
        words: text.split_whitespace().count(),
        chars: text.chars().count(),
    }
}

/// Above 90% of `max` is Danger, above 75% is Warning.
pub fn counter_level(current: usize, max: usize) -> CounterLevel {
    if max == 0 {
        return CounterLevel::Danger;
    }
    let percentage = current as f64 / max as f64 * 100.0;
    if percentage > 90.0 {
        CounterLevel::Danger
    } else if percentage > 75.0 {
        CounterLevel::Warning
    } else {
        CounterLevel::Normal
    }
}
