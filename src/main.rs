// Entrypoint for the vintage car client.
// - Keeps `main` small: parse and validate arguments, build the HTTP
//   client, and hand everything to the session loop.
// - Exit codes: 0 when the user quits, 1 for usage errors or an
//   unreachable store, 2 for invalid arguments.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vintage_cars::api::{Endpoint, HttpTransport};
use vintage_cars::client::VehicleApi;
use vintage_cars::config::{Cli, ClientConfig};
use vintage_cars::session::{Session, SessionExit};
use vintage_cars::ui::TerminalConsole;

const USAGE: &str = "Usage: vintage-car-db <server_address> [port] [database] [car_id]";

fn main() -> ExitCode {
    // Logs go to stderr and stay quiet unless RUST_LOG asks for more, so
    // they do not interleave with the interactive menu.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = err.print();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            let _ = err.print();
            eprintln!("{}", USAGE);
            return ExitCode::from(1);
        }
    };

    let config = match ClientConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::from(2);
        }
    };

    match run(config) {
        Ok(exit) => exit.into(),
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::from(1)
        }
    }
}

fn run(config: ClientConfig) -> Result<SessionExit> {
    tracing::info!(
        server = %config.server_address,
        port = config.port,
        database = %config.database,
        "starting session"
    );
    let transport = HttpTransport::new(config.timeout).context("Failed to build HTTP client")?;
    let api = VehicleApi::new(transport, Endpoint::from_config(&config));

    // The session blocks on terminal input until the user exits or the
    // store stops answering.
    let mut session = Session::new(api, TerminalConsole::new(), config.car_id.clone());
    let exit = session.run().context("Terminal input failed")?;
    Ok(exit)
}
