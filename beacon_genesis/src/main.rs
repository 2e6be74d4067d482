use std::process::ExitCode;

use anyhow::Result;
use clap::{Error as ClapError, Parser as _};
use tracing::error;

use crate::args::BeaconGenesisArgs;

mod args;
mod commands;

fn main() -> ExitCode {
    if let Err(error) = try_main() {
        error.downcast_ref().map(ClapError::exit);
        error!("{error:#}");
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn try_main() -> Result<()> {
    let args = BeaconGenesisArgs::try_parse()?;

    initialize_logging(args.quiet());

    commands::run(args)
}

fn initialize_logging(quiet: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

    let default_directive = if quiet { "error" } else { "info" };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .init();
}
