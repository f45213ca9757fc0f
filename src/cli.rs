//! Command-line interface for pots_of_gold.

use clap::{Parser, Subcommand};
use pots_of_gold::{Claimant, Difficulty, PotCount};
use std::path::PathBuf;

/// Pots of Gold - take turns claiming coins from either end of a row
#[derive(Parser, Debug)]
#[command(name = "pots_of_gold")]
#[command(about = "Pots of Gold game services and terminal client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the start-game and optimal-move HTTP services
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Play a game in the terminal
    Play {
        /// Base URL of the game services
        #[arg(long, conflicts_with = "offline")]
        service_url: Option<String>,

        /// Use in-process services instead of a server
        #[arg(long)]
        offline: bool,

        /// Number of pots (6, 8, 10 or 12)
        #[arg(long)]
        pots: Option<PotCount>,

        /// Computer strength (easy, medium, hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Who moves first (user or computer)
        #[arg(long)]
        first: Option<Claimant>,

        /// Pause before each computer move, in milliseconds
        #[arg(long)]
        think_ms: Option<u64>,
    },
}
