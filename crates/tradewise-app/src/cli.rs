// Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tradewise_core::Position;

use crate::commands::SideSpec;

/// Fantasy football trade analyzer and league trade finder
#[derive(Debug, Parser)]
#[command(name = "tradewise", version)]
#[command(about = "Score fantasy football trades and find trade partners in a league")]
pub struct Cli {
    /// Directory containing defaults/, config/ and data/ (defaults to the
    /// current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Print JSON instead of text, overriding the configured output format
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Score a trade proposal
    Trade {
        /// One side of the trade: the players that team gives up, by catalog
        /// id or full name. Repeat for each side.
        #[arg(long = "side", value_name = "NAME=PLAYER,...", required = true)]
        sides: Vec<SideSpec>,
    },
    /// Analyze a Sleeper league and suggest trades between its teams
    League {
        league_id: String,
        /// Read the saved snapshot instead of calling the Sleeper API
        #[arg(long)]
        offline: bool,
        /// Save the fetched snapshot for later offline use
        #[arg(long, conflicts_with = "offline")]
        save: bool,
    },
    /// List a Sleeper user's leagues
    Leagues {
        username: String,
        /// Season year (defaults to the configured season)
        #[arg(long)]
        season: Option<String>,
    },
    /// Browse the player catalog
    Players {
        /// Match on player name or team
        #[arg(long)]
        search: Option<String>,
        /// Only this position (QB, RB, WR, TE, K, DST)
        #[arg(long, value_parser = parse_position)]
        position: Option<Position>,
        /// Maximum players to list
        #[arg(long, default_value_t = 25)]
        top: usize,
        /// Player ids to leave out, comma separated
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,
    },
}

fn parse_position(s: &str) -> Result<Position, String> {
    Position::from_str_pos(s).ok_or_else(|| format!("unknown position `{s}`"))
}
