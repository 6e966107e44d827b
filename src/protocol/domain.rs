//! Typed records carried inside protocol messages.
//!
//! Field renames mirror the short keys in [`super::keys`]; every enumeration is
//! encoded as the integer code the server expects.

use core::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A wire code that does not map to any known variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("unknown {kind} code {code}")]
pub struct UnknownCode {
    pub kind: &'static str,
    pub code: u8,
}

/// Orientation of a ship, encoded as the ASCII code of `H` or `V`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Direction {
    Horizontal = b'H',
    Vertical = b'V',
}

impl From<Direction> for u8 {
    fn from(dir: Direction) -> Self {
        dir as u8
    }
}

impl TryFrom<u8> for Direction {
    type Error = UnknownCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            b'H' => Ok(Direction::Horizontal),
            b'V' => Ok(Direction::Vertical),
            code => Err(UnknownCode { kind: "direction", code }),
        }
    }
}

/// State of one board cell, also used as the value of a reported shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum BoardValue {
    /// Untouched cell; also the value of a shot whose outcome is not known yet.
    Water = b'~',
    Ship = b'S',
    Hit = b'X',
    Miss = b'*',
    Kill = b'K',
    /// Display-only marker used by v1 servers.
    Duplicate = b'!',
    DuplicateHit = 34,
    DuplicateMiss = 35,
    DuplicateKill = 36,
}

impl BoardValue {
    pub fn as_char(self) -> char {
        self as u8 as char
    }

    /// Whether the server reported this cell as shot before.
    pub fn is_duplicate(self) -> bool {
        matches!(
            self,
            BoardValue::Duplicate
                | BoardValue::DuplicateHit
                | BoardValue::DuplicateMiss
                | BoardValue::DuplicateKill
        )
    }
}

impl From<BoardValue> for u8 {
    fn from(value: BoardValue) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for BoardValue {
    type Error = UnknownCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            b'~' => BoardValue::Water,
            b'S' => BoardValue::Ship,
            b'X' => BoardValue::Hit,
            b'*' => BoardValue::Miss,
            b'K' => BoardValue::Kill,
            b'!' => BoardValue::Duplicate,
            34 => BoardValue::DuplicateHit,
            35 => BoardValue::DuplicateMiss,
            36 => BoardValue::DuplicateKill,
            code => return Err(UnknownCode { kind: "board value", code }),
        })
    }
}

impl fmt::Display for BoardValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Outcome of one game from this client's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum GameResult {
    Win = b'W',
    Loss = b'L',
    Tie = b'T',
}

impl From<GameResult> for u8 {
    fn from(result: GameResult) -> Self {
        result as u8
    }
}

impl TryFrom<u8> for GameResult {
    type Error = UnknownCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            b'W' => Ok(GameResult::Win),
            b'L' => Ok(GameResult::Loss),
            b'T' => Ok(GameResult::Tie),
            code => Err(UnknownCode { kind: "game result", code }),
        }
    }
}

/// Seat of a player in the match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum PlayerNum {
    One = 1,
    Two = 2,
}

impl PlayerNum {
    /// The opposing seat.
    pub fn other(self) -> Self {
        match self {
            PlayerNum::One => PlayerNum::Two,
            PlayerNum::Two => PlayerNum::One,
        }
    }
}

impl From<PlayerNum> for u8 {
    fn from(num: PlayerNum) -> Self {
        num as u8
    }
}

impl TryFrom<u8> for PlayerNum {
    type Error = UnknownCode;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(PlayerNum::One),
            2 => Ok(PlayerNum::Two),
            code => Err(UnknownCode { kind: "player number", code }),
        }
    }
}

impl fmt::Display for PlayerNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}

/// Placement of one ship.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ship {
    #[serde(rename = "r")]
    pub row: usize,
    #[serde(rename = "c")]
    pub col: usize,
    #[serde(rename = "l")]
    pub length: usize,
    #[serde(rename = "d")]
    pub direction: Direction,
}

impl Ship {
    pub fn new(row: usize, col: usize, length: usize, direction: Direction) -> Self {
        Self {
            row,
            col,
            length,
            direction,
        }
    }

    /// Cells covered by the ship, starting at its origin.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> {
        let ship = *self;
        (0..ship.length).map(move |i| match ship.direction {
            Direction::Horizontal => (ship.row, ship.col.saturating_add(i)),
            Direction::Vertical => (ship.row.saturating_add(i), ship.col),
        })
    }
}

/// One shot, either proposed by us or reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shot {
    #[serde(rename = "r")]
    pub row: usize,
    #[serde(rename = "c")]
    pub col: usize,
    #[serde(rename = "v")]
    pub value: BoardValue,
}

impl Shot {
    /// A shot at (`row`, `col`) with an unknown outcome.
    pub fn at(row: usize, col: usize) -> Self {
        Self {
            row,
            col,
            value: BoardValue::Water,
        }
    }
}

/// Per-game statistics reported by v2 servers in `game_over`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    #[serde(rename = "gr")]
    pub result: GameResult,
    #[serde(rename = "nb")]
    pub num_board_shot: u32,
    #[serde(rename = "nh")]
    pub hits: u32,
    #[serde(rename = "nm")]
    pub misses: u32,
    #[serde(rename = "nd")]
    pub duplicates: u32,
    #[serde(rename = "sk")]
    pub ships_killed: u32,
}

/// One player's half of a v2 `shot_return`.
///
/// `ship` is present when this player's own ship was destroyed by the shot
/// the opponent just took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerReport {
    #[serde(rename = "st")]
    pub shot: Shot,
    #[serde(rename = "sp", default, skip_serializing_if = "Option::is_none")]
    pub ship: Option<Ship>,
}
