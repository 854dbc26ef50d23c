use std::collections::VecDeque;

use anyhow::Result;
use rust_decimal::Decimal;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_stream::{wrappers::LinesStream, StreamExt};

use crate::atm::{Atm, AtmError, Commit, PinChange, MAX_PIN_LENGTH};
use crate::io::with_two_decimals;

const MENU: &str = "\n--- ATM Menu ---\n\
  1. Check Balance\n\
  2. Deposit\n\
  3. Withdraw\n\
  4. Mini Statement\n\
  5. Change PIN\n\
  6. Exit\n\
  Enter choice: ";

/// This is the interactive session of the ATM:
/// - greets the user and asks for the PIN, up to `pin_attempts` times
/// - shows the menu and dispatches the selected operation to the [`Atm`] until the user exits
///
/// The input is read as whitespace-delimited tokens, so several answers can be typed in the same line.
/// The session ends quietly when the input is closed.
pub async fn run<A, R, W>(atm: A, input: R, output: W, pin_attempts: u8) -> Result<()>
where
  A: Atm,
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  Session {
    atm,
    input: Tokens::new(input),
    output,
    pin_attempts,
  }
  .run()
  .await
}

enum Flow {
  Continue,
  Exit,
}

enum Input<T> {
  Value(T),
  Invalid,
  Closed,
}

/// Splits the lines of a reader into tokens.
struct Tokens<R> {
  lines: LinesStream<R>,
  pending: VecDeque<String>,
}

impl<R> Tokens<R>
where
  R: AsyncBufRead + Unpin,
{
  fn new(reader: R) -> Self {
    Self {
      lines: LinesStream::new(reader.lines()),
      pending: VecDeque::new(),
    }
  }

  async fn next(&mut self) -> Result<Option<String>> {
    loop {
      if let Some(token) = self.pending.pop_front() {
        return Ok(Some(token));
      }
      match self.lines.next().await {
        Some(line) => self
          .pending
          .extend(line?.split_whitespace().map(str::to_string)),
        None => return Ok(None),
      }
    }
  }

  /// Forget whatever is left from the current line.
  fn discard_line(&mut self) {
    self.pending.clear();
  }
}

struct Session<A, R, W> {
  atm: A,
  input: Tokens<R>,
  output: W,
  pin_attempts: u8,
}

impl<A, R, W> Session<A, R, W>
where
  A: Atm,
  R: AsyncBufRead + Unpin,
  W: AsyncWrite + Unpin,
{
  async fn run(mut self) -> Result<()> {
    self.say("Welcome to Simple ATM Simulation\n").await?;
    if !self.authenticate().await? {
      return self.say("Too many incorrect attempts. Exiting.\n").await;
    }

    loop {
      self.say(MENU).await?;
      let choice = match self.input.next().await? {
        Some(choice) => choice,
        None => break,
      };

      let flow = match choice.parse::<i64>() {
        Ok(1) => self.check_balance().await?,
        Ok(2) => self.deposit().await?,
        Ok(3) => self.withdraw().await?,
        Ok(4) => self.mini_statement().await?,
        Ok(5) => self.change_pin().await?,
        Ok(6) => {
          self.say("Thank you. Goodbye.\n").await?;
          Flow::Exit
        }
        Ok(_) => {
          self.say("Invalid choice. Try again.\n").await?;
          Flow::Continue
        }
        Err(_) => {
          self.say("Invalid input. Exiting.\n").await?;
          Flow::Exit
        }
      };

      if let Flow::Exit = flow {
        break;
      }
    }
    Ok(())
  }

  async fn authenticate(&mut self) -> Result<bool> {
    for remaining in (0..self.pin_attempts).rev() {
      self.say("Enter PIN: ").await?;
      let candidate = match self.input.next().await? {
        Some(candidate) => candidate,
        None => return Ok(false),
      };
      if self.atm.verify_pin(&candidate) {
        return Ok(true);
      }
      self
        .say(&format!("Incorrect PIN. {} attempt(s) left.\n", remaining))
        .await?;
    }
    Ok(false)
  }

  async fn check_balance(&mut self) -> Result<Flow> {
    let balance = with_two_decimals(self.atm.balance());
    self
      .say(&format!("Your current balance: {}\n", balance))
      .await?;
    Ok(Flow::Continue)
  }

  async fn deposit(&mut self) -> Result<Flow> {
    self.say("Enter amount to deposit: ").await?;
    let amount = match self.read_amount().await? {
      Input::Value(amount) => amount,
      Input::Invalid => return self.invalid_amount().await,
      Input::Closed => return Ok(Flow::Exit),
    };

    match self.atm.deposit(amount).await {
      Ok(commit) => {
        self
          .say(&format!(
            "Deposited {} successfully.\n",
            with_two_decimals(amount)
          ))
          .await?;
        self.report_commit(commit).await?;
      }
      Err(err) => self.report_error(err).await?,
    }
    Ok(Flow::Continue)
  }

  async fn withdraw(&mut self) -> Result<Flow> {
    self.say("Enter amount to withdraw: ").await?;
    let amount = match self.read_amount().await? {
      Input::Value(amount) => amount,
      Input::Invalid => return self.invalid_amount().await,
      Input::Closed => return Ok(Flow::Exit),
    };

    match self.atm.withdraw(amount).await {
      Ok(commit) => {
        self
          .say(&format!(
            "Withdrawn {} successfully.\n",
            with_two_decimals(amount)
          ))
          .await?;
        self.report_commit(commit).await?;
      }
      Err(err) => self.report_error(err).await?,
    }
    Ok(Flow::Continue)
  }

  async fn mini_statement(&mut self) -> Result<Flow> {
    let statement = self.atm.statement();
    let mut text = format!("----- Mini Statement (last {}) -----\n", statement.len());
    for (index, record) in statement.iter().enumerate() {
      text.push_str(&format!(
        "{}. {} : {}\n",
        index + 1,
        record.kind(),
        with_two_decimals(record.amount())
      ));
    }
    if statement.is_empty() {
      text.push_str("No transactions yet.\n");
    }
    self.say(&text).await?;
    Ok(Flow::Continue)
  }

  async fn change_pin(&mut self) -> Result<Flow> {
    self.say("Enter current PIN: ").await?;
    let old = match self.input.next().await? {
      Some(old) => old,
      None => return Ok(Flow::Exit),
    };
    if !self.atm.verify_pin(&old) {
      self.say("PIN does not match.\n").await?;
      return Ok(Flow::Continue);
    }

    self.say("Enter new PIN: ").await?;
    let new = match self.input.next().await? {
      Some(new) => new,
      None => return Ok(Flow::Exit),
    };
    self.say("Confirm new PIN: ").await?;
    let confirm = match self.input.next().await? {
      Some(confirm) => confirm,
      None => return Ok(Flow::Exit),
    };

    match self.atm.change_pin(PinChange { old, new, confirm }).await {
      Ok(commit) => {
        self.report_commit(commit).await?;
        self.say("PIN changed successfully.\n").await?;
      }
      Err(err) => self.report_error(err).await?,
    }
    Ok(Flow::Continue)
  }

  async fn read_amount(&mut self) -> Result<Input<Decimal>> {
    let token = match self.input.next().await? {
      Some(token) => token,
      None => return Ok(Input::Closed),
    };
    match token.parse::<Decimal>() {
      Ok(amount) if amount > Decimal::ZERO => Ok(Input::Value(amount)),
      _ => {
        self.input.discard_line();
        Ok(Input::Invalid)
      }
    }
  }

  async fn invalid_amount(&mut self) -> Result<Flow> {
    self.say("Invalid amount.\n").await?;
    Ok(Flow::Continue)
  }

  async fn report_commit(&mut self, commit: Commit) -> Result<()> {
    match commit {
      Commit::Persisted => Ok(()),
      Commit::Unpersisted(_) => self.say("Warning: Could not save data.\n").await,
    }
  }

  async fn report_error(&mut self, err: AtmError) -> Result<()> {
    let message = match err {
      AtmError::InvalidAmount => "Invalid amount.".to_string(),
      AtmError::InsufficientFunds => format!(
        "Insufficient funds. Current balance: {}",
        with_two_decimals(self.atm.balance())
      ),
      AtmError::PinMismatch => "PIN does not match.".to_string(),
      AtmError::PinConfirmationMismatch => "PINs do not match. Aborting.".to_string(),
      AtmError::InvalidPin => format!(
        "Invalid PIN. Use 1 to {} characters without spaces.",
        MAX_PIN_LENGTH
      ),
      other => format!("{}.", other),
    };
    self.say(&format!("{}\n", message)).await
  }

  async fn say(&mut self, text: &str) -> Result<()> {
    self.output.write_all(text.as_bytes()).await?;
    self.output.flush().await?;
    Ok(())
  }
}
