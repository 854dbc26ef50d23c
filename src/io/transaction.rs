use std::convert::TryFrom;
use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, bail};
use rust_decimal::Decimal;

use super::account::with_two_decimals;
use crate::atm::{TransactionKind, TransactionRecord};

/// A transaction as stored in one line of the data file: `<kind> <amount>`
#[derive(Debug, PartialEq)]
pub struct TransactionLine {
  kind: TransactionKind,
  amount: Decimal,
}

fn parse_kind(token: &str) -> anyhow::Result<TransactionKind> {
  match token {
    "Deposit" => Ok(TransactionKind::Deposit),
    "Withdraw" => Ok(TransactionKind::Withdraw),
    unknown => bail!("Unknown transaction kind: {}", unknown),
  }
}

impl FromStr for TransactionLine {
  type Err = anyhow::Error;

  fn from_str(line: &str) -> anyhow::Result<Self> {
    let mut tokens = line.split_whitespace();
    let kind = parse_kind(tokens.next().ok_or_else(|| anyhow!("Missing kind"))?)?;
    let amount = tokens
      .next()
      .ok_or_else(|| anyhow!("Missing amount"))?
      .parse::<Decimal>()?;
    if tokens.next().is_some() {
      bail!("Unexpected data after the amount");
    }
    Ok(Self { kind, amount })
  }
}

impl fmt::Display for TransactionLine {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{} {}", self.kind, with_two_decimals(self.amount))
  }
}

impl From<&TransactionRecord> for TransactionLine {
  fn from(record: &TransactionRecord) -> Self {
    Self {
      kind: record.kind(),
      amount: record.amount(),
    }
  }
}

impl TryFrom<TransactionLine> for TransactionRecord {
  type Error = anyhow::Error;

  /// Conversion into the domain record, which rejects non positive amounts.
  fn try_from(line: TransactionLine) -> anyhow::Result<Self> {
    TransactionRecord::new(line.kind, line.amount).map_err(anyhow::Error::from)
  }
}
