use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use rust_decimal::{Decimal, RoundingStrategy};

use super::transaction::TransactionLine;
use crate::atm::{Account, Ledger, Pin, TransactionRecord, LEDGER_CAPACITY, MAX_PIN_LENGTH};

const PRECISION: u32 = 2;

/// Format an amount with exactly two decimals, rounding half away from zero.
pub fn with_two_decimals(value: Decimal) -> String {
  format!(
    "{:.2}",
    value.round_dp_with_strategy(PRECISION, RoundingStrategy::MidpointAwayFromZero)
  )
}

/// The first line of the data file: `<balance> <pin> <transaction_count>`
///
/// The count is clamped to `0..=LEDGER_CAPACITY` and anything after it is ignored.
#[derive(Debug, PartialEq)]
struct Header {
  balance: Decimal,
  pin: String,
  transaction_count: usize,
}

impl FromStr for Header {
  type Err = anyhow::Error;

  fn from_str(line: &str) -> anyhow::Result<Self> {
    let mut tokens = line.split_whitespace();
    let mut next = |name: &str| tokens.next().ok_or_else(|| anyhow!("Missing {}", name));

    let balance = next("balance")?.parse::<Decimal>()?;
    let pin = next("pin")?.to_string();
    let transaction_count = next("transaction count")?
      .parse::<i64>()?
      .max(0)
      .min(LEDGER_CAPACITY as i64) as usize;

    Ok(Self {
      balance,
      pin,
      transaction_count,
    })
  }
}

impl fmt::Display for Header {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "{} {} {}",
      with_two_decimals(self.balance),
      self.pin,
      self.transaction_count
    )
  }
}

impl From<&Account> for Header {
  fn from(account: &Account) -> Self {
    Self {
      balance: account.balance(),
      pin: account.pin().as_str().to_string(),
      transaction_count: account.ledger().len(),
    }
  }
}

/// Encode the account into the text format of the data file.
pub fn encode(account: &Account) -> String {
  let mut text = format!("{}\n", Header::from(account));
  for record in account.ledger().iter() {
    text.push_str(&TransactionLine::from(record).to_string());
    text.push('\n');
  }
  text
}

/// Decode an account from the text format of the data file.
///
/// It fails, telling why, when the header can't be parsed (or holds an invalid PIN or a negative balance).
/// The transactions are read tolerantly: reading stops at the first malformed line,
/// keeping the ones read so far, and anything after the announced count is ignored.
pub fn decode(text: &str) -> anyhow::Result<Account> {
  let mut lines = text.lines().filter(|line| !line.trim().is_empty());

  let header = lines
    .next()
    .ok_or_else(|| anyhow!("Missing header"))?
    .parse::<Header>()?;
  let pin = Pin::new(&header.pin).map_err(|_| {
    anyhow!(
      "Stored PIN must have 1 to {} characters without spaces",
      MAX_PIN_LENGTH
    )
  })?;

  let ledger = lines
    .take(header.transaction_count)
    .map(|line| {
      line
        .parse::<TransactionLine>()
        .and_then(TransactionRecord::try_from)
    })
    .take_while(Result::is_ok)
    .filter_map(Result::ok)
    .collect::<Ledger>();

  Account::new(header.balance, pin, ledger).ok_or_else(|| anyhow!("Negative stored balance"))
}
