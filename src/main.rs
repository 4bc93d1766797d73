use anyhow::{Context, Result};
use clap::Parser;
use rookery::chess::{Game, Position, Square};
use rookery::cli::{check_move, list_destinations, Cli, Commands, Config, ConfigCommand, Session};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn load_config() -> Config {
    match Config::load_or_create_default() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Warning: using default configuration ({:#})", e);
            Config::default()
        }
    }
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn position_from(fen: Option<&str>, config: &Config) -> Result<Position> {
    match fen {
        Some(fen) => Position::from_fen(fen).with_context(|| format!("Invalid FEN '{}'", fen)),
        None => config.starting_position(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config();
    init_tracing(&config);

    match cli.command {
        Commands::Play { fen, ascii } => {
            let position = position_from(fen.as_deref(), &config)?;
            let mut options = config.render_options();
            if ascii {
                options.unicode = false;
            }
            info!("Starting session from {}", position.to_fen());

            let mut session = Session::new(Game::from_position(position), options);
            let stdin = std::io::stdin();
            session
                .run(stdin.lock(), std::io::stdout())
                .context("Interactive session failed")?;
        }
        Commands::Check {
            chess_move,
            fen,
            json,
        } => {
            let position = position_from(fen.as_deref(), &config)?;
            let verdict = check_move(&position, &chess_move);
            if json {
                let out = serde_json::to_string_pretty(&verdict)
                    .context("Failed to serialize verdict")?;
                println!("{}", out);
            } else {
                println!("{}", verdict);
            }
        }
        Commands::Moves { square, fen } => {
            let position = position_from(fen.as_deref(), &config)?;
            let square: Square = square.parse()?;
            if position.get_piece(square).is_none() {
                warn!("No piece on {}", square);
            }
            let targets = list_destinations(&position, square);
            if targets.is_empty() {
                println!("No legal moves from {}", square);
            } else {
                println!("{}: {}", square, targets.join(" "));
            }
        }
        Commands::Config { command } => match command {
            ConfigCommand::Path => {
                let path = Config::default_config_file()
                    .context("Failed to determine config path")?;
                println!("{}", path.display());
            }
            ConfigCommand::Show => {
                let content =
                    toml::to_string_pretty(&config).context("Failed to serialize configuration")?;
                print!("{}", content);
            }
        },
    }

    Ok(())
}
