//! Client SDK for the Battleship AI competition server.
//!
//! A client connects to the server's Unix socket, identifies itself and then
//! answers server messages through a [`Player`] until the match ends.
//!
//! ```no_run
//! use battleship_client::{play_match, ClientConfig, ExamplePlayer};
//!
//! # async fn demo() -> battleship_client::Result<()> {
//! let config = ClientConfig::new("/tmp/battleship.sock");
//! let stats = play_match(&config, ExamplePlayer::new()).await?;
//! println!("won {} of {} games", stats.wins, stats.games);
//! # Ok(())
//! # }
//! ```

mod board;
mod common;
pub mod config;
mod error;
mod logging;
pub mod player;
mod player_node;
pub mod protocol;
mod stats;
pub mod transport;

pub use board::Board;
pub use common::BoardError;
pub use config::ClientConfig;
pub use error::{ClientError, Result};
pub use logging::{init_logging, level_from, LOG_ENV};
pub use player::{ExamplePlayer, MatchContext, Player, RandomPlayer};
#[cfg(unix)]
pub use player_node::play_match;
pub use player_node::{Flow, Phase, PlayerNode, Step};
pub use protocol::{
    BoardValue, ClientMessage, Direction, GameResult, GameStats, JsonCodec, PlayerNum,
    PlayerReport, ProtocolVersion, ServerMessage, Ship, Shot,
};
pub use stats::MatchStats;
