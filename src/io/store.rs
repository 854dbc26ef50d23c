use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::{debug, warn};

use super::account::{decode, encode};
use crate::atm::{Account, AtmError, Result};

/// Interface to load and save the account from an external storage
#[async_trait]
pub trait AccountStore {
  /// Load the stored account.
  /// It fails with [`AtmError::PersistenceLoadSkipped`] when there is nothing stored or it can't be understood.
  async fn load(&mut self) -> Result<Account>;

  /// Replace the stored account. It fails with [`AtmError::PersistenceWriteFailed`].
  async fn save(&mut self, account: &Account) -> Result<()>;
}

/// Implementation of [`AccountStore`] for a plain text file.
///
/// The file is overwritten in place, so a save interrupted halfway can leave it corrupted.
#[derive(Debug)]
pub struct FileAccountStore {
  path: PathBuf,
}

impl FileAccountStore {
  pub fn new<P: AsRef<Path>>(path: P) -> Self {
    Self {
      path: path.as_ref().to_path_buf(),
    }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }
}

#[async_trait]
impl AccountStore for FileAccountStore {
  async fn load(&mut self) -> Result<Account> {
    let text = tokio::fs::read_to_string(&self.path)
      .await
      .map_err(|err| match err.kind() {
        ErrorKind::NotFound => {
          AtmError::PersistenceLoadSkipped(format!("{} does not exist", self.path.display()))
        }
        _ => AtmError::PersistenceLoadSkipped(err.to_string()),
      })?;

    debug!(path = %self.path.display(), "account data read");
    decode(&text).map_err(|err| {
      warn!(
        path = %self.path.display(),
        reason = %err,
        "stored account is malformed and will be replaced with default values"
      );
      AtmError::PersistenceLoadSkipped(format!("{} is malformed: {}", self.path.display(), err))
    })
  }

  async fn save(&mut self, account: &Account) -> Result<()> {
    tokio::fs::write(&self.path, encode(account))
      .await
      .map_err(|err| AtmError::PersistenceWriteFailed(err.to_string()))?;

    debug!(path = %self.path.display(), "account data written");
    Ok(())
  }
}
