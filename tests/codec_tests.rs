use battleship_client::protocol::frame::{pad_frame, strip_padding};
use battleship_client::protocol::CodecError;
use battleship_client::{
    BoardValue, ClientMessage, Direction, GameResult, GameStats, JsonCodec, PlayerNum,
    PlayerReport, ProtocolVersion, ServerMessage, Ship, Shot,
};
use proptest::prelude::*;
use serde_json::{json, Value};

fn v1() -> JsonCodec {
    JsonCodec::new(ProtocolVersion::V1)
}

fn v2() -> JsonCodec {
    JsonCodec::new(ProtocolVersion::V2)
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

#[test]
fn hello_uses_short_keys() {
    let bytes = v2()
        .encode_client(&ClientMessage::Hello {
            ai_name: "Skipper".into(),
            author_names: "A. Uthor".into(),
        })
        .unwrap();
    assert_eq!(as_json(&bytes), json!({"mt": 1, "ai": "Skipper", "au": "A. Uthor"}));
}

#[test]
fn hello_names_are_capped_on_char_boundary() {
    let long = "a".repeat(100);
    let accented = "é".repeat(40);
    let bytes = v2()
        .encode_client(&ClientMessage::Hello {
            ai_name: long,
            author_names: accented,
        })
        .unwrap();
    let value = as_json(&bytes);
    assert_eq!(value["ai"].as_str().unwrap().len(), 63);
    let au = value["au"].as_str().unwrap();
    assert_eq!(au.len(), 62);
    assert!(au.chars().all(|c| c == 'é'));
}

#[test]
fn ship_placed_and_shot_taken_layout() {
    let codec = v2();
    let ship = codec
        .encode_client(&ClientMessage::ShipPlaced(Ship::new(1, 2, 3, Direction::Vertical)))
        .unwrap();
    assert_eq!(as_json(&ship), json!({"mt": 5, "r": 1, "c": 2, "l": 3, "d": 86}));

    let shot = codec
        .encode_client(&ClientMessage::ShotTaken(Shot::at(4, 5)))
        .unwrap();
    assert_eq!(as_json(&shot), json!({"mt": 7, "r": 4, "c": 5}));
}

#[test]
fn client_tags_match_between_versions() {
    let msg = ClientMessage::ShotTaken(Shot::at(0, 0));
    assert_eq!(
        as_json(&v1().encode_client(&msg).unwrap())["mt"],
        as_json(&v2().encode_client(&msg).unwrap())["mt"]
    );
}

#[test]
fn setup_match_decodes_from_padded_frame() {
    let frame = pad_frame(br#"{"mt":2,"bs":10,"pn":2}"#);
    let msg = v2().decode_server(&frame).unwrap();
    assert_eq!(
        msg,
        ServerMessage::SetupMatch {
            board_size: 10,
            player_num: PlayerNum::Two
        }
    );
}

#[test]
fn zero_board_size_is_rejected() {
    let err = v2().decode_server(br#"{"mt":2,"bs":0,"pn":1}"#).unwrap_err();
    assert!(matches!(err, CodecError::InvalidField { field: "bs", .. }));
}

#[test]
fn oversized_board_is_rejected() {
    for codec in [v1(), v2()] {
        let err = codec
            .decode_server(br#"{"mt":2,"bs":4294967296,"pn":1}"#)
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidField { field: "bs", .. }));
        let err = codec
            .decode_server(br#"{"mt":2,"bs":1025,"pn":1}"#)
            .unwrap_err();
        assert!(matches!(err, CodecError::InvalidField { field: "bs", .. }));
    }
    assert_eq!(
        v2().decode_server(br#"{"mt":2,"bs":1024,"pn":1}"#).unwrap(),
        ServerMessage::SetupMatch {
            board_size: 1024,
            player_num: PlayerNum::One,
        }
    );
}

#[test]
fn v2_shot_return_is_per_player() {
    let frame = br#"{"mt":8,"p1":{"st":{"r":0,"c":1,"v":88}},"p2":{"st":{"r":3,"c":3,"v":42},"sp":{"r":0,"c":0,"l":2,"d":72}},"ns":true}"#;
    let msg = v2().decode_server(frame).unwrap();
    assert_eq!(
        msg,
        ServerMessage::ShotReport {
            p1: PlayerReport {
                shot: Shot {
                    row: 0,
                    col: 1,
                    value: BoardValue::Hit
                },
                ship: None,
            },
            p2: PlayerReport {
                shot: Shot {
                    row: 3,
                    col: 3,
                    value: BoardValue::Miss
                },
                ship: Some(Ship::new(0, 0, 2, Direction::Horizontal)),
            },
            next_shot: true,
        }
    );
}

#[test]
fn v1_shot_return_is_flat() {
    let msg = v1()
        .decode_server(br#"{"mt":8,"pn":1,"r":2,"c":7,"v":75}"#)
        .unwrap();
    assert_eq!(
        msg,
        ServerMessage::ShotReturn {
            player: PlayerNum::One,
            shot: Shot {
                row: 2,
                col: 7,
                value: BoardValue::Kill
            },
            killed: None,
        }
    );
}

#[test]
fn tag_nine_depends_on_version() {
    let dead = v1()
        .decode_server(br#"{"mt":9,"pn":2,"r":1,"c":1,"l":4,"d":86}"#)
        .unwrap();
    assert_eq!(
        dead,
        ServerMessage::ShipDead {
            player: PlayerNum::Two,
            ship: Ship::new(1, 1, 4, Direction::Vertical)
        }
    );

    let over = v2()
        .decode_server(br#"{"mt":9,"gr":87,"nb":40,"nh":17,"nm":21,"nd":2,"sk":5}"#)
        .unwrap();
    assert_eq!(
        over,
        ServerMessage::GameOver(Some(GameStats {
            result: GameResult::Win,
            num_board_shot: 40,
            hits: 17,
            misses: 21,
            duplicates: 2,
            ships_killed: 5,
        }))
    );
}

#[test]
fn end_of_match_tags() {
    assert_eq!(
        v1().decode_server(br#"{"mt":10}"#).unwrap(),
        ServerMessage::GameOver(None)
    );
    assert_eq!(
        v1().decode_server(br#"{"mt":11}"#).unwrap(),
        ServerMessage::MatchOver
    );
    assert_eq!(
        v2().decode_server(br#"{"mt":10}"#).unwrap(),
        ServerMessage::MatchOver
    );
    assert_eq!(
        v2().decode_server(br#"{"mt":11}"#).unwrap(),
        ServerMessage::Unknown(11)
    );
}

#[test]
fn malformed_messages_are_errors() {
    let codec = v2();
    assert!(matches!(
        codec.decode_server(br#"{"mt":4}"#),
        Err(CodecError::Json(_))
    ));
    assert!(matches!(
        codec.decode_server(br#"{"mt":8,"p1":{"st":{"r":0,"c":0,"v":1}},"p2":{"st":{"r":0,"c":0,"v":42}},"ns":false}"#),
        Err(CodecError::Json(_))
    ));
    assert!(matches!(
        codec.decode_server(br#"{"bs":10}"#),
        Err(CodecError::MissingTag)
    ));
    assert!(matches!(
        codec.decode_server(br#"{"mt":"two"}"#),
        Err(CodecError::InvalidTag(_))
    ));
    assert!(matches!(
        codec.decode_server(b"[2, 10]"),
        Err(CodecError::NotAnObject)
    ));
    assert!(matches!(
        codec.decode_server(b"{\"mt\":2,\"x\":\"\xff\"}"),
        Err(CodecError::Utf8(_))
    ));
}

#[test]
fn server_side_rejects_messages_foreign_to_version() {
    let dead = ServerMessage::ShipDead {
        player: PlayerNum::One,
        ship: Ship::new(0, 0, 2, Direction::Horizontal),
    };
    assert!(matches!(
        v2().encode_server(&dead),
        Err(CodecError::Unsupported { .. })
    ));
    assert!(matches!(
        v2().encode_server(&ServerMessage::GameOver(None)),
        Err(CodecError::Unsupported { .. })
    ));
    assert!(matches!(
        v2().decode_client(br#"{"mt":3}"#),
        Err(CodecError::UnknownTag(3))
    ));
}

#[test]
fn padding_truncates_and_strips() {
    let payload = vec![b'x'; 300];
    let frame = pad_frame(&payload);
    assert_eq!(frame.len(), 256);
    assert_eq!(frame[255], 0);
    assert_eq!(strip_padding(&frame).len(), 255);

    let short = pad_frame(b"{}");
    assert_eq!(strip_padding(&short), b"{}");
    assert!(short[2..].iter().all(|&b| b == 0));
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn ship_placed_round_trip(row in 0usize..1000, col in 0usize..1000, length in 1usize..20, vertical in any::<bool>()) {
        let direction = if vertical { Direction::Vertical } else { Direction::Horizontal };
        let msg = ClientMessage::ShipPlaced(Ship::new(row, col, length, direction));
        for codec in [v1(), v2()] {
            let frame = pad_frame(&codec.encode_client(&msg).unwrap());
            prop_assert_eq!(codec.decode_client(&frame).unwrap(), msg.clone());
        }
    }

    #[test]
    fn shot_taken_round_trip(row in 0usize..1000, col in 0usize..1000) {
        let msg = ClientMessage::ShotTaken(Shot::at(row, col));
        let codec = v2();
        let frame = pad_frame(&codec.encode_client(&msg).unwrap());
        prop_assert_eq!(codec.decode_client(&frame).unwrap(), msg);
    }
}
