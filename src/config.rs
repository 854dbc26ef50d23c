use std::path::PathBuf;

use clap::Parser;

/// Simple ATM simulation over a single account stored in a text file.
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Config {
  /// Path of the file where the account is kept between runs
  #[arg(long, env = "ATM_DATA_FILE", default_value = "atm_data.txt")]
  pub data_file: PathBuf,

  /// Number of PIN attempts before the session is terminated
  #[arg(
    long,
    env = "ATM_PIN_ATTEMPTS",
    default_value_t = 3,
    value_parser = clap::value_parser!(u8).range(1..)
  )]
  pub pin_attempts: u8,
}
