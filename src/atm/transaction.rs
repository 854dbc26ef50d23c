use std::fmt;

use rust_decimal::Decimal;

use super::error::AtmError;

/// The kinds of operations recorded in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
  Deposit,
  Withdraw,
}

impl TransactionKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      TransactionKind::Deposit => "Deposit",
      TransactionKind::Withdraw => "Withdraw",
    }
  }
}

impl fmt::Display for TransactionKind {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// An immutable record of a committed deposit or withdrawal.
/// The `amount` is always strictly positive, the direction is given by the `kind`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionRecord {
  kind: TransactionKind,
  amount: Decimal,
}

impl TransactionRecord {
  pub fn new(kind: TransactionKind, amount: Decimal) -> Result<Self, AtmError> {
    if amount <= Decimal::ZERO {
      Err(AtmError::InvalidAmount)
    } else {
      Ok(Self { kind, amount })
    }
  }

  pub fn kind(&self) -> TransactionKind {
    self.kind
  }

  pub fn amount(&self) -> Decimal {
    self.amount
  }
}

#[cfg(test)]
mod tests {

  use rust_decimal_macros::dec;

  use super::*;

  #[test]
  fn transaction_kind_tokens() {
    assert_eq!(TransactionKind::Deposit.to_string(), "Deposit");
    assert_eq!(TransactionKind::Withdraw.to_string(), "Withdraw");
  }

  #[test]
  fn transaction_record_requires_positive_amount() {
    let cases = vec![
      (dec!(0), Err(AtmError::InvalidAmount)),
      (dec!(-0.01), Err(AtmError::InvalidAmount)),
      (
        dec!(0.01),
        Ok(TransactionRecord {
          kind: TransactionKind::Withdraw,
          amount: dec!(0.01),
        }),
      ),
    ];

    for (amount, expected) in cases {
      assert_eq!(
        TransactionRecord::new(TransactionKind::Withdraw, amount),
        expected
      );
    }
  }
}
