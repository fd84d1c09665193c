use derive_more::Display;
use kernel::validate::{ValidationError, optional_text, required_text};
use serde::Serialize;

/// Text of a todo item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct TodoText(String);

impl TodoText {
    pub fn parse(raw: Option<String>) -> Result<Self, ValidationError> {
        required_text("text", raw).map(Self)
    }

    /// Validate `text` only if it was submitted
    pub fn parse_optional(raw: Option<String>) -> Result<Option<Self>, ValidationError> {
        Ok(optional_text("text", raw)?.map(Self))
    }

    #[inline]
    pub fn from_db<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
