//! This module contains the domain logic of the account
//!
//! The [`Account`] enforces the invariants of the balance, PIN and [`Ledger`] on every mutation,
//! and the [`PersistentAtm`] is the implementation of the [`Atm`] interface that saves the account after every change.
//

mod account;
mod engine;
mod error;
mod ledger;
mod pin;
mod transaction;

pub use account::Account;
pub use engine::{Atm, Commit, PersistentAtm, PinChange, Result};
pub use error::AtmError;
pub use ledger::{Ledger, LEDGER_CAPACITY};
pub use pin::{Pin, MAX_PIN_LENGTH};
pub use transaction::{TransactionKind, TransactionRecord};
