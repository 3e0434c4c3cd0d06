//! Waypoint CLI
//!
//! Command-line front end for the journey mapper, plus the local model
//! relay (`wp relay`).

mod args;
mod cli;
mod renderer;
mod session;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use log::info;
use renderer::TerminalRenderer;
use waypoint_core::{relay::server, MapperBuilder, RelayConfig};
use Commands::*;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let Args {
        database_file,
        relay_url,
        no_color,
        command,
    } = Args::parse();

    // The relay needs no journey state
    let command = match command {
        Some(Relay(relay_args)) => {
            let config = RelayConfig::from(relay_args);
            info!("Starting relay on {}:{}", config.host, config.port);
            return server::serve(config).await.context("Relay failed");
        }
        other => other,
    };

    let mapper = MapperBuilder::new()
        .with_database_path(database_file)
        .with_relay_url(Some(relay_url))
        .build()
        .await
        .context("Failed to initialize mapper")?;

    let renderer = TerminalRenderer::new(!no_color);
    let mut cli = Cli::new(mapper, renderer);

    info!("Waypoint started");

    match command {
        Some(Start(args)) => cli.start(args.into()).await,
        Some(Add(args)) => cli.add(args.into()).await,
        Some(Suggest(args)) => cli.suggest(args.into()).await,
        Some(Pick(args)) => cli.pick(args.number).await,
        Some(Undo) => cli.undo().await,
        Some(Redo) => cli.redo().await,
        Some(Complete) => cli.complete().await,
        Some(Diagram(args)) => cli.diagram(args.palette.as_deref()),
        Some(Clear) => cli.clear().await,
        Some(Projects { command }) => cli.handle_project_command(command).await,
        Some(Credentials { command }) => cli.handle_credential_command(command).await,
        Some(Export(args)) => cli.export(args.output),
        Some(Share(args)) => cli.share(args.into()),
        Some(Import(args)) => cli.import(&args.source).await,
        Some(Session) => cli.session().await,
        Some(Show) | Some(Relay(_)) | None => cli.show_journey(),
    }
}
