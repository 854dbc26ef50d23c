use std::collections::VecDeque;

use super::transaction::TransactionRecord;

/// Maximum number of transactions kept in the ledger.
pub const LEDGER_CAPACITY: usize = 10;

/// Bounded log of the most recent transactions in insertion order.
///
/// Once full, pushing a new record evicts the oldest one.
#[derive(Debug, Clone, PartialEq)]
pub struct Ledger {
  records: VecDeque<TransactionRecord>,
}

impl Ledger {
  pub fn new() -> Self {
    Self {
      records: VecDeque::with_capacity(LEDGER_CAPACITY),
    }
  }

  pub fn push(&mut self, record: TransactionRecord) {
    if self.records.len() == LEDGER_CAPACITY {
      self.records.pop_front();
    }
    self.records.push_back(record);
  }

  pub fn len(&self) -> usize {
    self.records.len()
  }

  #[cfg(test)]
  pub fn is_empty(&self) -> bool {
    self.records.is_empty()
  }

  /// Iterate the records from the oldest to the newest.
  pub fn iter(&self) -> impl Iterator<Item = &TransactionRecord> + '_ {
    self.records.iter()
  }
}

impl Default for Ledger {
  fn default() -> Self {
    Self::new()
  }
}

impl std::iter::FromIterator<TransactionRecord> for Ledger {
  fn from_iter<T: IntoIterator<Item = TransactionRecord>>(iter: T) -> Self {
    let mut ledger = Ledger::new();
    for record in iter {
      ledger.push(record);
    }
    ledger
  }
}
