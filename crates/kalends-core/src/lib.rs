pub mod cli;
pub mod commands;
pub mod config;
pub mod grid;
pub mod hooks;
pub mod locale;
pub mod paint;
pub mod render;
pub mod view;
pub mod widget;

use std::ffi::OsString;

use anyhow::Context;
use clap::Parser;
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli = cli::GlobalCli::parse_from(
    raw_args
  );

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting kalends CLI"
  );

  let mut config =
    config::CalendarConfig::load(
      cli.config.as_deref()
    )
    .context(
      "failed to load configuration"
    )?;
  config.apply_overrides(
    cli
      .set
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  );
  let config = config.sanitize();
  debug!(?config, "effective config");

  let command =
    commands::parse_command(
      &cli.rest
    )?;
  commands::run_command(
    command, &config
  )?;

  info!("done");
  Ok(())
}
