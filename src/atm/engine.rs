use async_trait::async_trait;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use super::{account::Account, error::AtmError, transaction::TransactionRecord};
use crate::io::AccountStore;

pub type Result<T> = core::result::Result<T, AtmError>;

/// What happened with the persistence of an applied mutation.
///
/// A failure to save does not undo the mutation, so memory and storage might diverge until the next successful save.
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
  Persisted,
  Unpersisted(AtmError),
}

/// A request to replace the PIN, as typed by the user.
#[derive(Debug, Clone, PartialEq)]
pub struct PinChange {
  pub old: String,
  pub new: String,
  pub confirm: String,
}

impl PinChange {
  #[cfg(test)]
  pub fn new(old: &str, new: &str, confirm: &str) -> Self {
    Self {
      old: old.to_string(),
      new: new.to_string(),
      confirm: confirm.to_string(),
    }
  }
}

/// Interface used by the user facing layers to operate the account.
///
/// It only checks a single PIN attempt, limiting retries is up to the caller.
/// The mutating operations are `async` because they persist the account after applying the change.
#[async_trait]
pub trait Atm {
  fn verify_pin(&self, candidate: &str) -> bool;
  fn balance(&self) -> Decimal;
  /// The most recent transactions, oldest first.
  fn statement(&self) -> Vec<TransactionRecord>;
  async fn deposit(&mut self, amount: Decimal) -> Result<Commit>;
  async fn withdraw(&mut self, amount: Decimal) -> Result<Commit>;
  async fn change_pin(&mut self, change: PinChange) -> Result<Commit>;
}

/// Implementation of [`Atm`] that keeps the account in memory and saves it into an [`AccountStore`] after every mutation.
#[derive(Debug)]
pub struct PersistentAtm<S> {
  account: Account,
  store: S,
}

impl<S> PersistentAtm<S>
where
  S: AccountStore + Send,
{
  /// Load the account from the store, or initialize it with the default values
  /// and save them when there was nothing usable stored.
  pub async fn open(mut store: S) -> Self {
    match store.load().await {
      Ok(account) => {
        debug!(
          transactions = account.ledger().len(),
          "account loaded from store"
        );
        Self { account, store }
      }
      Err(err) => {
        info!(reason = %err, "initializing account with default values");
        let mut atm = Self {
          account: Account::default(),
          store,
        };
        atm.persist().await;
        atm
      }
    }
  }

  #[cfg(test)]
  pub fn account(&self) -> &Account {
    &self.account
  }

  async fn persist(&mut self) -> Commit {
    match self.store.save(&self.account).await {
      Ok(()) => Commit::Persisted,
      Err(err) => {
        warn!(error = %err, "account changes were not persisted");
        Commit::Unpersisted(err)
      }
    }
  }
}

#[async_trait]
impl<S> Atm for PersistentAtm<S>
where
  S: AccountStore + Send,
{
  fn verify_pin(&self, candidate: &str) -> bool {
    self.account.verify_pin(candidate)
  }

  fn balance(&self) -> Decimal {
    self.account.balance()
  }

  fn statement(&self) -> Vec<TransactionRecord> {
    self.account.statement()
  }

  async fn deposit(&mut self, amount: Decimal) -> Result<Commit> {
    self.account.deposit(amount)?;
    info!(%amount, "deposit committed");
    Ok(self.persist().await)
  }

  async fn withdraw(&mut self, amount: Decimal) -> Result<Commit> {
    self.account.withdraw(amount)?;
    info!(%amount, "withdrawal committed");
    Ok(self.persist().await)
  }

  async fn change_pin(&mut self, change: PinChange) -> Result<Commit> {
    self
      .account
      .change_pin(&change.old, &change.new, &change.confirm)?;
    info!("PIN changed");
    Ok(self.persist().await)
  }
}
