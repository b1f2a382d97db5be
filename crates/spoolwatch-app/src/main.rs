// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Spoolwatch: print job submission and lifecycle monitoring
//
// Entry point. Initialises logging, loads config, builds the backend services
// and dispatches to a CLI command or the HTTP service.

mod cli;
mod commands;
mod server;
mod services;

use std::process::ExitCode;

use clap::Parser;

use spoolwatch_core::AppConfig;
use spoolwatch_core::error::Result;
use spoolwatch_core::human_errors::humanize_error;

use cli::{Cli, Commands};
use services::app_services::AppServices;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            let human = humanize_error(&e);
            eprintln!("Error: {}", human.message);
            eprintln!("{}", human.suggestion);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<bool> {
    let mut config = AppConfig::load(cli.config.as_deref())?;
    cli.apply_overrides(&mut config);
    let services = AppServices::init(config);

    match &cli.command {
        Commands::Print(args) => commands::print(&services, args).await,
        Commands::Status { name } => commands::status(&services, name.as_deref())
            .await
            .map(|()| true),
        Commands::Serve { .. } => {
            tracing::info!("Spoolwatch printer API starting");
            let addr = services.config().listen_addr.clone();
            server::serve(services, &addr).await.map(|()| true)
        }
        Commands::Files => commands::files(&services).map(|()| true),
    }
}
