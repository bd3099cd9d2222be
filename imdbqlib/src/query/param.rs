//! Typed values bound to query placeholders.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single value bound in place of a `$n` placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Param {
    /// Bound as `INT4`
    Int(i32),
    /// Bound as `TEXT`
    Text(String),
}

impl Param {
    /// Wrap `needle` in `%` so a `LIKE` matches it anywhere in the column.
    pub fn contains(needle: &str) -> Self {
        Param::Text(format!("%{}%", needle))
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Int(v) => write!(f, "{}", v),
            Param::Text(s) => write!(f, "'{}'", s),
        }
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Text(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_wraps_in_wildcards() {
        assert_eq!(Param::contains("Star Wars"), Param::Text("%Star Wars%".to_string()));
        assert_eq!(Param::contains(""), Param::Text("%%".to_string()));
    }

    #[test]
    fn test_display() {
        assert_eq!(Param::Int(2022).to_string(), "2022");
        assert_eq!(Param::from("Comedy").to_string(), "'Comedy'");
    }

    #[test]
    fn test_serializes_as_bare_value() {
        assert_eq!(serde_json::to_string(&Param::Int(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&Param::from("x")).unwrap(), "\"x\"");
    }
}
