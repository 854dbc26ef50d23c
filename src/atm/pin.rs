use std::fmt;
use std::str::FromStr;

use super::error::AtmError;

/// Maximum number of characters of a PIN.
pub const MAX_PIN_LENGTH: usize = 5;

pub const DEFAULT_PIN: &str = "1234";

/// A credential with a bounded length.
///
/// It has to fit in a single whitespace-delimited token of the data file,
/// so it can't be empty nor contain whitespace. Values exceeding [`MAX_PIN_LENGTH`] are rejected, never truncated.
#[derive(Clone, PartialEq, Eq)]
pub struct Pin(String);

impl Pin {
  pub fn new(value: &str) -> Result<Self, AtmError> {
    if value.is_empty()
      || value.chars().count() > MAX_PIN_LENGTH
      || value.chars().any(char::is_whitespace)
    {
      Err(AtmError::InvalidPin)
    } else {
      Ok(Self(value.to_string()))
    }
  }

  pub fn matches(&self, candidate: &str) -> bool {
    self.0 == candidate
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl Default for Pin {
  fn default() -> Self {
    Self(DEFAULT_PIN.to_string())
  }
}

impl FromStr for Pin {
  type Err = AtmError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Pin::new(s)
  }
}

impl fmt::Debug for Pin {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Pin(****)")
  }
}
