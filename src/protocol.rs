//! Wire protocol spoken with the Battleship server.
//!
//! Two schema versions exist. They share keys and most tags but differ in how
//! shot results, kills and game-over statistics are reported, so the version is
//! chosen once per deployment and threaded through [`JsonCodec`].

use core::fmt;
use core::str::FromStr;

pub mod codec;
mod domain;
pub mod frame;

pub use codec::{CodecError, JsonCodec};
pub use domain::*;

/// Short JSON keys used by both sides.
pub mod keys {
    pub const MESSAGE_TYPE: &str = "mt";
    pub const PLAYER_NUM: &str = "pn";
    pub const AI_NAME: &str = "ai";
    pub const AUTHOR_NAMES: &str = "au";
    pub const BOARD_SIZE: &str = "bs";
    pub const LEN: &str = "l";
    pub const ROW: &str = "r";
    pub const COL: &str = "c";
    pub const DIR: &str = "d";
    pub const VALUE: &str = "v";
    pub const PLAYER_1: &str = "p1";
    pub const PLAYER_2: &str = "p2";
    pub const SHIP: &str = "sp";
    pub const SHOT: &str = "st";
    pub const NEXT_SHOT: &str = "ns";
    pub const GAME_RESULT: &str = "gr";
    pub const NUM_BOARD_SHOT: &str = "nb";
    pub const NUM_HITS: &str = "nh";
    pub const NUM_MISSES: &str = "nm";
    pub const NUM_DUPLICATES: &str = "nd";
    pub const SHIPS_KILLED: &str = "sk";
}

/// Protocol schema spoken by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ProtocolVersion {
    /// Flat shot results, standalone `ship_dead` message, bare `game_over`.
    V1,
    /// Per-player shot results with embedded kills, `next-shot` flag, game statistics.
    #[default]
    V2,
}

impl ProtocolVersion {
    pub fn tags(self) -> &'static MessageTags {
        match self {
            ProtocolVersion::V1 => &MessageTags::V1,
            ProtocolVersion::V2 => &MessageTags::V2,
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolVersion::V1 => write!(f, "v1"),
            ProtocolVersion::V2 => write!(f, "v2"),
        }
    }
}

impl FromStr for ProtocolVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(ProtocolVersion::V1),
            "v2" | "2" => Ok(ProtocolVersion::V2),
            other => Err(format!("unknown protocol version `{}` (expected v1 or v2)", other)),
        }
    }
}

/// Messages the server sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServerKind {
    SetupMatch,
    StartGame,
    PlaceShip,
    TakeShot,
    ShotReturn,
    ShipDead,
    GameOver,
    MatchOver,
}

/// Messages the client sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientKind {
    Hello,
    ShipPlaced,
    ShotTaken,
}

/// Integer `mt` tags of one protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageTags {
    pub hello: u8,
    pub setup_match: u8,
    pub start_game: u8,
    pub place_ship: u8,
    pub ship_placed: u8,
    pub take_shot: u8,
    pub shot_taken: u8,
    pub shot_return: u8,
    /// Only v1 reports kills in a message of their own.
    pub ship_dead: Option<u8>,
    pub game_over: u8,
    pub match_over: u8,
}

impl MessageTags {
    pub const V1: MessageTags = MessageTags {
        hello: 1,
        setup_match: 2,
        start_game: 3,
        place_ship: 4,
        ship_placed: 5,
        take_shot: 6,
        shot_taken: 7,
        shot_return: 8,
        ship_dead: Some(9),
        game_over: 10,
        match_over: 11,
    };

    pub const V2: MessageTags = MessageTags {
        hello: 1,
        setup_match: 2,
        start_game: 3,
        place_ship: 4,
        ship_placed: 5,
        take_shot: 6,
        shot_taken: 7,
        shot_return: 8,
        ship_dead: None,
        game_over: 9,
        match_over: 10,
    };

    /// Resolve a tag in the server namespace.
    pub fn server_kind(&self, tag: i64) -> Option<ServerKind> {
        let tag = u8::try_from(tag).ok()?;
        let kind = if tag == self.setup_match {
            ServerKind::SetupMatch
        } else if tag == self.start_game {
            ServerKind::StartGame
        } else if tag == self.place_ship {
            ServerKind::PlaceShip
        } else if tag == self.take_shot {
            ServerKind::TakeShot
        } else if tag == self.shot_return {
            ServerKind::ShotReturn
        } else if Some(tag) == self.ship_dead {
            ServerKind::ShipDead
        } else if tag == self.game_over {
            ServerKind::GameOver
        } else if tag == self.match_over {
            ServerKind::MatchOver
        } else {
            return None;
        };
        Some(kind)
    }

    /// Resolve a tag in the client namespace.
    pub fn client_kind(&self, tag: i64) -> Option<ClientKind> {
        let tag = u8::try_from(tag).ok()?;
        if tag == self.hello {
            Some(ClientKind::Hello)
        } else if tag == self.ship_placed {
            Some(ClientKind::ShipPlaced)
        } else if tag == self.shot_taken {
            Some(ClientKind::ShotTaken)
        } else {
            None
        }
    }

    pub fn server_tag(&self, kind: ServerKind) -> Option<u8> {
        match kind {
            ServerKind::SetupMatch => Some(self.setup_match),
            ServerKind::StartGame => Some(self.start_game),
            ServerKind::PlaceShip => Some(self.place_ship),
            ServerKind::TakeShot => Some(self.take_shot),
            ServerKind::ShotReturn => Some(self.shot_return),
            ServerKind::ShipDead => self.ship_dead,
            ServerKind::GameOver => Some(self.game_over),
            ServerKind::MatchOver => Some(self.match_over),
        }
    }

    pub fn client_tag(&self, kind: ClientKind) -> u8 {
        match kind {
            ClientKind::Hello => self.hello,
            ClientKind::ShipPlaced => self.ship_placed,
            ClientKind::ShotTaken => self.shot_taken,
        }
    }
}

/// A decoded server message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerMessage {
    SetupMatch {
        board_size: usize,
        player_num: PlayerNum,
    },
    StartGame,
    PlaceShip {
        length: usize,
    },
    TakeShot,
    /// v1: the result of one player's shot, optionally with the ship it sank.
    ShotReturn {
        player: PlayerNum,
        shot: Shot,
        killed: Option<Ship>,
    },
    /// v1: `player`'s ship was destroyed.
    ShipDead { player: PlayerNum, ship: Ship },
    /// v2: both players' shots of the round. When `next_shot` is set the
    /// server expects another `shot_taken` without sending `take_shot`.
    ShotReport {
        p1: PlayerReport,
        p2: PlayerReport,
        next_shot: bool,
    },
    /// Statistics are only reported by v2 servers.
    GameOver(Option<GameStats>),
    MatchOver,
    /// A tag outside the server namespace of the active version.
    Unknown(i64),
}

impl ServerMessage {
    pub fn kind(&self) -> Option<ServerKind> {
        Some(match self {
            ServerMessage::SetupMatch { .. } => ServerKind::SetupMatch,
            ServerMessage::StartGame => ServerKind::StartGame,
            ServerMessage::PlaceShip { .. } => ServerKind::PlaceShip,
            ServerMessage::TakeShot => ServerKind::TakeShot,
            ServerMessage::ShotReturn { .. } | ServerMessage::ShotReport { .. } => {
                ServerKind::ShotReturn
            }
            ServerMessage::ShipDead { .. } => ServerKind::ShipDead,
            ServerMessage::GameOver(_) => ServerKind::GameOver,
            ServerMessage::MatchOver => ServerKind::MatchOver,
            ServerMessage::Unknown(_) => return None,
        })
    }

    pub fn name(&self) -> &'static str {
        match self {
            ServerMessage::SetupMatch { .. } => "setup_match",
            ServerMessage::StartGame => "start_game",
            ServerMessage::PlaceShip { .. } => "place_ship",
            ServerMessage::TakeShot => "take_shot",
            ServerMessage::ShotReturn { .. } | ServerMessage::ShotReport { .. } => "shot_return",
            ServerMessage::ShipDead { .. } => "ship_dead",
            ServerMessage::GameOver(_) => "game_over",
            ServerMessage::MatchOver => "match_over",
            ServerMessage::Unknown(_) => "unknown",
        }
    }
}

/// A message composed by the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    Hello {
        ai_name: String,
        author_names: String,
    },
    ShipPlaced(Ship),
    ShotTaken(Shot),
}

impl ClientMessage {
    pub fn kind(&self) -> ClientKind {
        match self {
            ClientMessage::Hello { .. } => ClientKind::Hello,
            ClientMessage::ShipPlaced(_) => ClientKind::ShipPlaced,
            ClientMessage::ShotTaken(_) => ClientKind::ShotTaken,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClientMessage::Hello { .. } => "hello",
            ClientMessage::ShipPlaced(_) => "ship_placed",
            ClientMessage::ShotTaken(_) => "shot_taken",
        }
    }
}
