use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const CODE_LEN: usize = 4;

/// Normalized 4-letter ICAO location code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LocationCode(String);

impl LocationCode {
    /// Trim, upper-case, and check the result is exactly four ASCII letters.
    ///
    /// Only ASCII control characters and spaces are trimmed; other Unicode
    /// whitespace is kept and fails validation. Upper-casing is full Unicode,
    /// so `ſ` folds to `S`.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let normalized = input.trim_matches(|ch: char| ch <= ' ').to_uppercase();

        let valid = normalized.len() == CODE_LEN
            && normalized.chars().all(|ch| ch.is_ascii_uppercase());
        if !valid {
            return Err(ValidationError::InvalidLocationCode {
                value: input.to_owned(),
            });
        }

        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LocationCode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for LocationCode {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for LocationCode {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<LocationCode> for String {
    fn from(value: LocationCode) -> Self {
        value.0
    }
}
