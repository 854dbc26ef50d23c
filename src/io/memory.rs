use async_trait::async_trait;

use super::AccountStore;
use crate::atm::{Account, AtmError, Result};

/// An [`AccountStore`] that keeps the saved account in memory, used to test the components depending on a store.
#[derive(Debug, Default)]
pub struct MemoryAccountStore {
  stored: Option<Account>,
  read_only: bool,
  saves: usize,
}

impl MemoryAccountStore {
  pub fn empty() -> Self {
    Self::default()
  }

  pub fn with_account(account: Account) -> Self {
    Self {
      stored: Some(account),
      ..Self::default()
    }
  }

  /// Make every save fail
  pub fn read_only(self) -> Self {
    Self {
      read_only: true,
      ..self
    }
  }

  pub fn stored(&self) -> Option<&Account> {
    self.stored.as_ref()
  }

  /// Number of successful saves
  pub fn saves(&self) -> usize {
    self.saves
  }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
  async fn load(&mut self) -> Result<Account> {
    self
      .stored
      .clone()
      .ok_or_else(|| AtmError::PersistenceLoadSkipped("nothing stored".to_string()))
  }

  async fn save(&mut self, account: &Account) -> Result<()> {
    if self.read_only {
      Err(AtmError::PersistenceWriteFailed("read only".to_string()))
    } else {
      self.stored = Some(account.clone());
      self.saves += 1;
      Ok(())
    }
  }
}
