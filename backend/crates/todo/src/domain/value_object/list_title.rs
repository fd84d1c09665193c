use derive_more::Display;
use kernel::validate::{ValidationError, required_text};
use serde::Serialize;

/// Title of a list: trimmed, non-blank, bounded length
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct ListTitle(String);

impl ListTitle {
    /// Validate a submitted `title` field
    pub fn parse(raw: Option<String>) -> Result<Self, ValidationError> {
        required_text("title", raw).map(Self)
    }

    #[inline]
    pub fn from_db<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let title = ListTitle::parse(Some(" Groceries ".to_string())).unwrap();
        assert_eq!(title.as_str(), "Groceries");
        assert_eq!(title.to_string(), "Groceries");
    }

    #[test]
    fn test_parse_rejects_missing_and_blank() {
        assert_eq!(ListTitle::parse(None), Err(ValidationError::Missing("title")));
        assert_eq!(
            ListTitle::parse(Some("  ".to_string())),
            Err(ValidationError::Blank("title"))
        );
    }
}
