//! JSON encoding of protocol messages.
//!
//! Decoding reads the `mt` tag first and then deserializes the schema that tag
//! selects for the configured [`ProtocolVersion`]. Required fields are never
//! defaulted: a missing key or an unknown enumeration code is a [`CodecError`].

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::frame::strip_padding;
use super::{
    keys, BoardValue, ClientKind, ClientMessage, Direction, MessageTags, PlayerNum, PlayerReport,
    ProtocolVersion, ServerKind, ServerMessage, Ship, Shot,
};
use crate::config::{MAX_BOARD_SIZE, MAX_NAME_SIZE};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("frame is not valid UTF-8: {0}")]
    Utf8(#[from] core::str::Utf8Error),

    #[error("malformed message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("message is not a JSON object")]
    NotAnObject,

    #[error("message has no `{}` tag", keys::MESSAGE_TYPE)]
    MissingTag,

    #[error("message tag is not an integer: {0}")]
    InvalidTag(Value),

    #[error("unknown message tag {0}")]
    UnknownTag(i64),

    #[error("invalid `{field}`: {reason}")]
    InvalidField {
        field: &'static str,
        reason: &'static str,
    },

    #[error("{message} cannot be expressed in protocol {version}")]
    Unsupported {
        message: &'static str,
        version: ProtocolVersion,
    },
}

#[derive(Serialize, Deserialize)]
struct HelloBody {
    #[serde(rename = "ai")]
    ai_name: String,
    #[serde(rename = "au")]
    author_names: String,
}

#[derive(Serialize, Deserialize)]
struct ShotTakenBody {
    #[serde(rename = "r")]
    row: usize,
    #[serde(rename = "c")]
    col: usize,
}

#[derive(Serialize, Deserialize)]
struct SetupMatchBody {
    #[serde(rename = "bs")]
    board_size: usize,
    #[serde(rename = "pn")]
    player_num: PlayerNum,
}

#[derive(Serialize, Deserialize)]
struct PlaceShipBody {
    #[serde(rename = "l")]
    length: usize,
}

/// v1 `shot_return`: the shot sits directly under the message.
#[derive(Serialize, Deserialize)]
struct FlatShotReturn {
    #[serde(rename = "pn")]
    player: PlayerNum,
    #[serde(rename = "r")]
    row: usize,
    #[serde(rename = "c")]
    col: usize,
    #[serde(rename = "v")]
    value: BoardValue,
    #[serde(rename = "sp", default, skip_serializing_if = "Option::is_none")]
    killed: Option<Ship>,
}

/// v1 `ship_dead`.
#[derive(Serialize, Deserialize)]
struct FlatShipDead {
    #[serde(rename = "pn")]
    player: PlayerNum,
    #[serde(rename = "r")]
    row: usize,
    #[serde(rename = "c")]
    col: usize,
    #[serde(rename = "l")]
    length: usize,
    #[serde(rename = "d")]
    direction: Direction,
}

/// v2 `shot_return`.
#[derive(Serialize, Deserialize)]
struct ShotReportBody {
    p1: PlayerReport,
    p2: PlayerReport,
    #[serde(rename = "ns")]
    next_shot: bool,
}

/// Encoder/decoder for one protocol version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct JsonCodec {
    version: ProtocolVersion,
}

impl JsonCodec {
    pub fn new(version: ProtocolVersion) -> Self {
        Self { version }
    }

    pub fn version(&self) -> ProtocolVersion {
        self.version
    }

    fn tags(&self) -> &'static MessageTags {
        self.version.tags()
    }

    /// Encode a client message as compact JSON (unpadded).
    pub fn encode_client(&self, msg: &ClientMessage) -> Result<Vec<u8>, CodecError> {
        let tag = self.tags().client_tag(msg.kind());
        match msg {
            ClientMessage::Hello {
                ai_name,
                author_names,
            } => tagged(
                tag,
                &HelloBody {
                    ai_name: cap_name(ai_name).to_string(),
                    author_names: cap_name(author_names).to_string(),
                },
            ),
            ClientMessage::ShipPlaced(ship) => tagged(tag, ship),
            ClientMessage::ShotTaken(shot) => tagged(
                tag,
                &ShotTakenBody {
                    row: shot.row,
                    col: shot.col,
                },
            ),
        }
    }

    /// Decode one received frame (padding allowed) into a server message.
    pub fn decode_server(&self, frame: &[u8]) -> Result<ServerMessage, CodecError> {
        let object = parse_object(frame)?;
        let tag = read_tag(&object)?;
        let Some(kind) = self.tags().server_kind(tag) else {
            return Ok(ServerMessage::Unknown(tag));
        };
        let body = Value::Object(object);

        let msg = match kind {
            ServerKind::SetupMatch => {
                let setup: SetupMatchBody = from_body(body)?;
                if setup.board_size == 0 {
                    return Err(CodecError::InvalidField {
                        field: keys::BOARD_SIZE,
                        reason: "board size must be at least 1",
                    });
                }
                if setup.board_size > MAX_BOARD_SIZE {
                    return Err(CodecError::InvalidField {
                        field: keys::BOARD_SIZE,
                        reason: "board size is too large",
                    });
                }
                ServerMessage::SetupMatch {
                    board_size: setup.board_size,
                    player_num: setup.player_num,
                }
            }
            ServerKind::StartGame => ServerMessage::StartGame,
            ServerKind::PlaceShip => {
                let place: PlaceShipBody = from_body(body)?;
                ServerMessage::PlaceShip {
                    length: place.length,
                }
            }
            ServerKind::TakeShot => ServerMessage::TakeShot,
            ServerKind::ShotReturn => match self.version {
                ProtocolVersion::V1 => {
                    let flat: FlatShotReturn = from_body(body)?;
                    ServerMessage::ShotReturn {
                        player: flat.player,
                        shot: Shot {
                            row: flat.row,
                            col: flat.col,
                            value: flat.value,
                        },
                        killed: flat.killed,
                    }
                }
                ProtocolVersion::V2 => {
                    let report: ShotReportBody = from_body(body)?;
                    ServerMessage::ShotReport {
                        p1: report.p1,
                        p2: report.p2,
                        next_shot: report.next_shot,
                    }
                }
            },
            ServerKind::ShipDead => {
                let dead: FlatShipDead = from_body(body)?;
                ServerMessage::ShipDead {
                    player: dead.player,
                    ship: Ship::new(dead.row, dead.col, dead.length, dead.direction),
                }
            }
            ServerKind::GameOver => match self.version {
                ProtocolVersion::V1 => ServerMessage::GameOver(None),
                ProtocolVersion::V2 => ServerMessage::GameOver(Some(from_body(body)?)),
            },
            ServerKind::MatchOver => ServerMessage::MatchOver,
        };
        Ok(msg)
    }

    /// Encode a server message. This is the server's half of the protocol and
    /// exists so local peers can speak the exact wire format.
    pub fn encode_server(&self, msg: &ServerMessage) -> Result<Vec<u8>, CodecError> {
        let unsupported = || CodecError::Unsupported {
            message: msg.name(),
            version: self.version,
        };
        let tag = match msg {
            ServerMessage::Unknown(tag) => return tag_only(*tag),
            other => other
                .kind()
                .and_then(|kind| self.tags().server_tag(kind))
                .ok_or_else(unsupported)?,
        };

        match (msg, self.version) {
            (
                ServerMessage::SetupMatch {
                    board_size,
                    player_num,
                },
                _,
            ) => tagged(
                tag,
                &SetupMatchBody {
                    board_size: *board_size,
                    player_num: *player_num,
                },
            ),
            (ServerMessage::PlaceShip { length }, _) => {
                tagged(tag, &PlaceShipBody { length: *length })
            }
            (
                ServerMessage::ShotReturn {
                    player,
                    shot,
                    killed,
                },
                ProtocolVersion::V1,
            ) => tagged(
                tag,
                &FlatShotReturn {
                    player: *player,
                    row: shot.row,
                    col: shot.col,
                    value: shot.value,
                    killed: *killed,
                },
            ),
            (ServerMessage::ShipDead { player, ship }, ProtocolVersion::V1) => tagged(
                tag,
                &FlatShipDead {
                    player: *player,
                    row: ship.row,
                    col: ship.col,
                    length: ship.length,
                    direction: ship.direction,
                },
            ),
            (
                ServerMessage::ShotReport {
                    p1,
                    p2,
                    next_shot,
                },
                ProtocolVersion::V2,
            ) => tagged(
                tag,
                &ShotReportBody {
                    p1: *p1,
                    p2: *p2,
                    next_shot: *next_shot,
                },
            ),
            (ServerMessage::GameOver(_), ProtocolVersion::V1) => tag_only(i64::from(tag)),
            (ServerMessage::GameOver(Some(stats)), ProtocolVersion::V2) => tagged(tag, stats),
            (ServerMessage::StartGame, _)
            | (ServerMessage::TakeShot, _)
            | (ServerMessage::MatchOver, _) => tag_only(i64::from(tag)),
            _ => Err(unsupported()),
        }
    }

    /// Decode a frame sent by a client. Used by local peers standing in for the server.
    pub fn decode_client(&self, frame: &[u8]) -> Result<ClientMessage, CodecError> {
        let object = parse_object(frame)?;
        let tag = read_tag(&object)?;
        let kind = self
            .tags()
            .client_kind(tag)
            .ok_or(CodecError::UnknownTag(tag))?;
        let body = Value::Object(object);

        Ok(match kind {
            ClientKind::Hello => {
                let hello: HelloBody = from_body(body)?;
                ClientMessage::Hello {
                    ai_name: hello.ai_name,
                    author_names: hello.author_names,
                }
            }
            ClientKind::ShipPlaced => ClientMessage::ShipPlaced(from_body(body)?),
            ClientKind::ShotTaken => {
                let shot: ShotTakenBody = from_body(body)?;
                ClientMessage::ShotTaken(Shot::at(shot.row, shot.col))
            }
        })
    }
}

/// Truncate a name so it fits the server's buffer with its terminator.
pub fn cap_name(name: &str) -> &str {
    let limit = MAX_NAME_SIZE - 1;
    if name.len() <= limit {
        return name;
    }
    let mut end = limit;
    while !name.is_char_boundary(end) {
        end -= 1;
    }
    &name[..end]
}

fn parse_object(frame: &[u8]) -> Result<Map<String, Value>, CodecError> {
    let text = core::str::from_utf8(strip_padding(frame))?;
    match serde_json::from_str(text)? {
        Value::Object(object) => Ok(object),
        _ => Err(CodecError::NotAnObject),
    }
}

fn read_tag(object: &Map<String, Value>) -> Result<i64, CodecError> {
    let tag = object.get(keys::MESSAGE_TYPE).ok_or(CodecError::MissingTag)?;
    tag.as_i64().ok_or_else(|| CodecError::InvalidTag(tag.clone()))
}

fn from_body<T: DeserializeOwned>(body: Value) -> Result<T, CodecError> {
    Ok(serde_json::from_value(body)?)
}

fn tag_only(tag: i64) -> Result<Vec<u8>, CodecError> {
    let mut object = Map::new();
    object.insert(keys::MESSAGE_TYPE.to_string(), Value::from(tag));
    Ok(serde_json::to_vec(&Value::Object(object))?)
}

fn tagged<T: Serialize>(tag: u8, body: &T) -> Result<Vec<u8>, CodecError> {
    let mut object = Map::new();
    object.insert(keys::MESSAGE_TYPE.to_string(), Value::from(tag));
    match serde_json::to_value(body)? {
        Value::Object(fields) => object.extend(fields),
        _ => return Err(CodecError::NotAnObject),
    }
    Ok(serde_json::to_vec(&Value::Object(object))?)
}
