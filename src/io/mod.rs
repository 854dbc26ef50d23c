//! This module contains the components needed to read and write the account from files
//!
//! The [`account`] and [`transaction`] modules implement the plain text format of the data file,
//! with one header line `balance pin transaction_count` followed by one `kind amount` line per transaction.
//! The [`store`] module contains the [`AccountStore`] interface and its implementation for files.
//!

mod account;
#[cfg(test)]
mod memory;
mod store;
mod transaction;

pub use account::with_two_decimals;
pub use store::{AccountStore, FileAccountStore};

#[cfg(test)]
pub(crate) use memory::MemoryAccountStore;
