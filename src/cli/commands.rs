use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "rookery")]
#[command(about = "A chess rules engine with a terminal board")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Play a game in the terminal
    ///
    /// Enter moves in coordinate notation (e2e4, e7e8q, O-O). Type 'help'
    /// inside the session for the full command list.
    ///
    /// Examples:
    ///   rookery play
    ///   rookery play --fen "4k3/P7/8/8/8/8/8/4K3 w - - 0 1"
    Play {
        /// Start from this position instead of the configured one
        #[arg(short, long)]
        fen: Option<String>,
        /// Draw pieces as letters instead of Unicode symbols
        #[arg(long)]
        ascii: bool,
    },

    /// Check whether a single move is legal and show the resulting position
    ///
    /// Examples:
    ///   rookery check e2e4
    ///   rookery check e5d6 --fen "4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2"
    ///   rookery check O-O --json
    Check {
        /// The move in coordinate notation
        chess_move: String,
        /// Position to check against (default: starting position)
        #[arg(short, long)]
        fen: Option<String>,
        /// Print the verdict as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the legal destinations of the piece on a square
    ///
    /// Example: rookery moves g1
    Moves {
        /// Square holding the piece, e.g. g1
        square: String,
        /// Position to inspect (default: starting position)
        #[arg(short, long)]
        fen: Option<String>,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show the configuration file path
    Path,
    /// Show the current configuration
    Show,
}
