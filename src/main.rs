//! Pots of Gold - unified CLI
//!
//! Serves the game services over HTTP or plays a game in the terminal.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use pots_of_gold::{
    AppConfig, GameController, GameSettings, HttpServiceClient, LocalServices, MoveService,
    PotService,
};
use std::sync::Arc;
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Serve { host, port } => {
            init_tracing("info");
            let mut server = config.server().clone();
            if let Some(host) = host {
                server = server.with_host(host);
            }
            if let Some(port) = port {
                server = server.with_port(port);
            }
            let services = Arc::new(LocalServices::new(server.pot_range()));
            pots_of_gold::serve(&server, services).await
        }
        Command::Play {
            service_url,
            offline,
            pots,
            difficulty,
            first,
            think_ms,
        } => {
            init_tracing("warn");
            let mut game = config.game().clone();
            if let Some(url) = service_url {
                game = game.with_service_url(url);
            }
            if let Some(pots) = pots {
                game = game.with_pot_count(pots);
            }
            if let Some(difficulty) = difficulty {
                game = game.with_difficulty(difficulty);
            }
            if let Some(first) = first {
                game = game.with_first_turn(first);
            }
            if let Some(think_ms) = think_ms {
                game = game.with_think_ms(think_ms);
            }
            run_play(&config, game, offline).await
        }
    }
}

/// Runs a terminal game against remote or in-process services
#[instrument(skip_all, fields(offline = offline))]
async fn run_play(config: &AppConfig, game: GameSettings, offline: bool) -> Result<()> {
    let (pots, moves): (Arc<dyn PotService>, Arc<dyn MoveService>) = if offline {
        let local = Arc::new(LocalServices::new(config.server().pot_range()));
        info!("Using in-process services");
        (local.clone() as Arc<dyn PotService>, local as Arc<dyn MoveService>)
    } else {
        let client = Arc::new(HttpServiceClient::new(game.service_url(), game.request_timeout())?);
        info!(url = %client.base_url(), "Using remote services");
        (client.clone() as Arc<dyn PotService>, client as Arc<dyn MoveService>)
    };

    let mut controller = GameController::new(game, pots, moves);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    pots_of_gold::play::run(&mut controller, stdin, tokio::io::stdout()).await
}

fn init_tracing(default: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}
