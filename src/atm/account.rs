use rust_decimal::{Decimal, RoundingStrategy};

use super::{
  error::AtmError,
  ledger::Ledger,
  pin::Pin,
  transaction::{TransactionKind, TransactionRecord},
};

/// Balance of a freshly initialized account: 1000.00
fn default_balance() -> Decimal {
  Decimal::new(100_000, 2)
}

/// Amounts are kept in cents, the same precision they are stored with.
const CENTS: u32 = 2;

fn to_cents(amount: Decimal) -> Decimal {
  amount.round_dp_with_strategy(CENTS, RoundingStrategy::MidpointAwayFromZero)
}

/// The state of the account: balance, PIN and the most recent transactions.
///
/// Every mutation either succeeds completely or leaves the account untouched,
/// and the balance never becomes negative.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
  balance: Decimal,
  pin: Pin,
  ledger: Ledger,
}

impl Account {
  /// Build an account from previously stored parts. Negative balances are rejected.
  pub fn new(balance: Decimal, pin: Pin, ledger: Ledger) -> Option<Self> {
    if balance < Decimal::ZERO {
      None
    } else {
      Some(Self {
        balance,
        pin,
        ledger,
      })
    }
  }

  pub fn verify_pin(&self, candidate: &str) -> bool {
    self.pin.matches(candidate)
  }

  /// Deposit the `amount` rounded to cents. Amounts rounding to zero are rejected.
  pub fn deposit(&mut self, amount: Decimal) -> Result<(), AtmError> {
    let amount = to_cents(amount);
    let record = TransactionRecord::new(TransactionKind::Deposit, amount)?;
    self.balance = self
      .balance
      .checked_add(amount)
      .ok_or(AtmError::InvalidAmount)?;
    self.ledger.push(record);
    Ok(())
  }

  /// Withdraw the `amount` rounded to cents. Amounts rounding to zero are rejected.
  pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AtmError> {
    let amount = to_cents(amount);
    let record = TransactionRecord::new(TransactionKind::Withdraw, amount)?;
    if amount > self.balance {
      Err(AtmError::InsufficientFunds)
    } else {
      self.balance -= amount;
      self.ledger.push(record);
      Ok(())
    }
  }

  /// Replace the PIN. The `old` one must match the current PIN, and `new` and `confirm` must be equal.
  pub fn change_pin(&mut self, old: &str, new: &str, confirm: &str) -> Result<(), AtmError> {
    if !self.pin.matches(old) {
      Err(AtmError::PinMismatch)
    } else if new != confirm {
      Err(AtmError::PinConfirmationMismatch)
    } else {
      self.pin = Pin::new(new)?;
      Ok(())
    }
  }

  pub fn balance(&self) -> Decimal {
    self.balance
  }

  pub(crate) fn pin(&self) -> &Pin {
    &self.pin
  }

  pub fn ledger(&self) -> &Ledger {
    &self.ledger
  }

  /// Copy of the ledger records, oldest first.
  pub fn statement(&self) -> Vec<TransactionRecord> {
    self.ledger.iter().cloned().collect()
  }
}

impl Default for Account {
  fn default() -> Self {
    Self {
      balance: default_balance(),
      pin: Pin::default(),
      ledger: Ledger::new(),
    }
  }
}

#[cfg(test)]
mod tests {

  use rust_decimal_macros::dec;

  use super::*;
  use crate::atm::ledger::LEDGER_CAPACITY;

  fn record(kind: TransactionKind, amount: Decimal) -> TransactionRecord {
    TransactionRecord::new(kind, amount).unwrap()
  }

  fn account_with_balance(balance: Decimal) -> Account {
    Account::new(balance, Pin::default(), Ledger::new()).unwrap()
  }

  #[test]
  fn account_default() {
    let account = Account::default();

    assert_eq!(account.balance(), dec!(1000.00));
    assert!(account.verify_pin("1234"));
    assert!(account.statement().is_empty());
  }

  #[test]
  fn account_new_rejects_negative_balance() {
    assert_eq!(
      Account::new(dec!(-0.01), Pin::default(), Ledger::new()),
      None
    );
    assert!(Account::new(dec!(0), Pin::default(), Ledger::new()).is_some());
  }

  #[test]
  fn non_positive_amounts_are_rejected() {
    for amount in vec![dec!(0), dec!(-1), dec!(-0.001)] {
      let mut account = Account::default();

      assert_eq!(account.deposit(amount), Err(AtmError::InvalidAmount));
      assert_eq!(account.withdraw(amount), Err(AtmError::InvalidAmount));
      assert_eq!(account, Account::default());
    }
  }

  #[test]
  fn deposit_overflow_is_rejected() {
    let mut account = account_with_balance(Decimal::MAX);

    assert_eq!(account.deposit(dec!(1)), Err(AtmError::InvalidAmount));
    assert_eq!(account.balance(), Decimal::MAX);
    assert!(account.statement().is_empty());
  }

  #[test]
  fn withdraw_more_than_balance_is_rejected() {
    let mut account = account_with_balance(dec!(10));

    assert_eq!(account.withdraw(dec!(10.01)), Err(AtmError::InsufficientFunds));
    assert_eq!(account.balance(), dec!(10));
    assert!(account.statement().is_empty());
  }

  #[test]
  fn withdraw_whole_balance() {
    let mut account = account_with_balance(dec!(10));

    assert_eq!(account.withdraw(dec!(10)), Ok(()));
    assert_eq!(account.balance(), dec!(0));
  }

  #[test]
  fn deposit_and_withdraw_scenario() {
    let mut account = Account::default();

    assert_eq!(account.deposit(dec!(500)), Ok(()));
    assert_eq!(account.balance(), dec!(1500.00));
    assert_eq!(
      account.statement(),
      vec![record(TransactionKind::Deposit, dec!(500))]
    );

    assert_eq!(account.withdraw(dec!(2000)), Err(AtmError::InsufficientFunds));
    assert_eq!(account.balance(), dec!(1500.00));
    assert_eq!(account.statement().len(), 1);

    assert_eq!(account.withdraw(dec!(300)), Ok(()));
    assert_eq!(account.balance(), dec!(1200.00));
    assert_eq!(
      account.statement(),
      vec![
        record(TransactionKind::Deposit, dec!(500)),
        record(TransactionKind::Withdraw, dec!(300)),
      ]
    );
  }

  #[test]
  fn eleven_deposits_evict_the_first() {
    let mut account = account_with_balance(dec!(0));
    for _ in 0..11 {
      account.deposit(dec!(1.00)).unwrap();
    }

    assert_eq!(account.balance(), dec!(11.00));
    assert_eq!(account.ledger().len(), LEDGER_CAPACITY);
    assert_eq!(
      account.statement(),
      vec![record(TransactionKind::Deposit, dec!(1.00)); LEDGER_CAPACITY]
    );

    let mut numbered = account_with_balance(dec!(0));
    for n in 1..=11 {
      numbered.deposit(Decimal::from(n)).unwrap();
    }

    let statement = numbered.statement();
    assert_eq!(statement.len(), LEDGER_CAPACITY);
    assert_eq!(statement.first().map(|r| r.amount()), Some(dec!(2)));
    assert_eq!(statement.last().map(|r| r.amount()), Some(dec!(11)));
  }

  #[test]
  fn amounts_are_rounded_to_cents() {
    let mut account = account_with_balance(dec!(10));

    assert_eq!(account.deposit(dec!(0.004)), Err(AtmError::InvalidAmount));
    assert_eq!(account.withdraw(dec!(0.0049)), Err(AtmError::InvalidAmount));
    assert_eq!(account.balance(), dec!(10));
    assert!(account.statement().is_empty());

    assert_eq!(account.deposit(dec!(0.005)), Ok(()));
    assert_eq!(account.withdraw(dec!(1.234)), Ok(()));
    assert_eq!(account.balance(), dec!(8.78));
    assert_eq!(
      account.statement(),
      vec![
        record(TransactionKind::Deposit, dec!(0.01)),
        record(TransactionKind::Withdraw, dec!(1.23)),
      ]
    );
  }

  #[test]
  fn change_pin_successfully() {
    let mut account = Account::default();

    assert_eq!(account.change_pin("1234", "5678", "5678"), Ok(()));
    assert!(!account.verify_pin("1234"));
    assert!(account.verify_pin("5678"));
  }

  #[test]
  fn change_pin_failures() {
    let cases = vec![
      (("0000", "5678", "5678"), AtmError::PinMismatch),
      (("1234", "5678", "5679"), AtmError::PinConfirmationMismatch),
      (("1234", "567890", "567890"), AtmError::InvalidPin),
      (("1234", "", ""), AtmError::InvalidPin),
    ];

    for ((old, new, confirm), expected) in cases {
      let mut account = Account::default();

      assert_eq!(account.change_pin(old, new, confirm), Err(expected));
      assert!(account.verify_pin("1234"));
    }
  }
}
