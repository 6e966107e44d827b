use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use battleship_client::config::{DEFAULT_AI_NAME, DEFAULT_AUTHOR_NAMES};
use battleship_client::{
    init_logging, play_match, ClientConfig, ExamplePlayer, Player, ProtocolVersion, RandomPlayer,
};
use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Strategy {
    /// Greedy row-major placement and shooting.
    Example,
    /// Random placement and random untried shots.
    Random,
}

#[derive(Parser)]
#[command(author, version, about = "Battleship competition client", long_about = None)]
struct Cli {
    /// Unix socket the match server listens on.
    socket_path: PathBuf,
    #[arg(long, default_value_t = ProtocolVersion::V2, help = "Message schema spoken by the server (v1 or v2)")]
    protocol: ProtocolVersion,
    #[arg(long, value_enum, default_value_t = Strategy::Example)]
    strategy: Strategy,
    #[arg(long, help = "Fix RNG seed for reproducible games (e.g., --seed 12345)")]
    seed: Option<u64>,
    #[arg(long, default_value = DEFAULT_AI_NAME)]
    ai_name: String,
    #[arg(long, default_value = DEFAULT_AUTHOR_NAMES)]
    authors: String,
    #[arg(long, help = "Give up when the server is silent this long")]
    read_timeout_ms: Option<u64>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let config = ClientConfig::new(cli.socket_path)
        .with_protocol(cli.protocol)
        .with_names(cli.ai_name, cli.authors)
        .with_read_timeout(cli.read_timeout_ms.map(Duration::from_millis));

    let player: Box<dyn Player> = match cli.strategy {
        Strategy::Example => Box::new(ExamplePlayer::new()),
        Strategy::Random => match cli.seed {
            Some(s) => {
                log::info!("Using fixed seed: {} (games will be reproducible)", s);
                Box::new(RandomPlayer::with_seed(s))
            }
            None => Box::new(RandomPlayer::new()),
        },
    };

    log::info!(
        "{} connecting to {} ({})",
        config.ai_name,
        config.socket_path.display(),
        config.protocol
    );
    match play_match(&config, player).await {
        Ok(stats) => {
            log::info!(
                "{} finished {} games: {} wins, {} losses, {} ties",
                config.ai_name,
                stats.games,
                stats.wins,
                stats.losses,
                stats.ties
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{} Error: {}", config.ai_name, e);
            ExitCode::FAILURE
        }
    }
}
