//! Required free-text fields (usernames, product names).

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when constructing a [`RequiredText`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RequiredTextError {
    /// Empty or whitespace only.
    #[error("must not be blank")]
    Blank,
    /// Longer than [`RequiredText::MAX_LENGTH`] characters.
    #[error("must be at most {max} characters")]
    TooLong {
        /// Maximum allowed length.
        max: usize,
    },
}

/// A trimmed, non-blank string.
///
/// Deserialization validates, so a body with `"username": "  "` is rejected
/// during decoding.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RequiredText(String);

impl RequiredText {
    /// Maximum length in characters.
    pub const MAX_LENGTH: usize = 255;

    /// Trim and validate a value.
    ///
    /// # Errors
    ///
    /// Returns [`RequiredTextError`] if the trimmed value is empty or too long.
    pub fn parse(s: &str) -> Result<Self, RequiredTextError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(RequiredTextError::Blank);
        }
        if s.chars().count() > Self::MAX_LENGTH {
            return Err(RequiredTextError::TooLong {
                max: Self::MAX_LENGTH,
            });
        }
        Ok(Self(s.to_owned()))
    }

    /// The value as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RequiredText {
    type Error = RequiredTextError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<RequiredText> for String {
    fn from(text: RequiredText) -> Self {
        text.0
    }
}

impl AsRef<str> for RequiredText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequiredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
