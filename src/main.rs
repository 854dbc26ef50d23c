mod atm;
mod config;
mod io;
mod logging;
mod processors;

use anyhow::Result;
use clap::Parser;
use tokio::io::BufReader;
use tracing::debug;

use crate::atm::PersistentAtm;
use crate::config::Config;
use crate::io::FileAccountStore;

#[tokio::main]
async fn main() -> Result<()> {
  let config = Config::parse();
  logging::init();

  let store = FileAccountStore::new(&config.data_file);
  debug!(path = %store.path().display(), "using data file");
  let atm = PersistentAtm::open(store).await;

  let input = BufReader::new(tokio::io::stdin());
  processors::session::run(atm, input, tokio::io::stdout(), config.pin_attempts).await
}
