use thiserror::Error;

/// Errors reported by the account operations and its persistence.
/// None of them is fatal: every operation can be retried or skipped by the caller.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AtmError {
  #[error("Invalid amount")]
  InvalidAmount,

  #[error("Insufficient funds")]
  InsufficientFunds,

  #[error("PIN does not match")]
  PinMismatch,

  #[error("PINs do not match")]
  PinConfirmationMismatch,

  /// The new PIN is empty, contains whitespace or is longer than [`super::pin::MAX_PIN_LENGTH`].
  #[error("Invalid PIN")]
  InvalidPin,

  #[error("Could not save data: {0}")]
  PersistenceWriteFailed(String),

  #[error("Stored data not loaded: {0}")]
  PersistenceLoadSkipped(String),
}
