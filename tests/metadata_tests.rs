//! Tests for per-player metadata and game snapshots

use diceduel::duel::{config_label, GameConfig, GameSnapshot, PlayerMetadata, Prediction};

const SNAPSHOT: &str = r#"{
    "publicKey": "Game1111111111111111111111111111111111111111",
    "gameMaker": "MakerAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA",
    "players": [
        { "user": "MakerAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA" },
        { "user": "JoinerBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB" }
    ],
    "maxPlayers": 2,
    "wager": 500000000,
    "softExpirationTimestamp": 1700000060,
    "state": { "waiting": false },
    "winnerIndexes": [1],
    "metadata": {
        "MakerAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA": "{\"diceCount\":2,\"prediction\":\"over\",\"targetNumber\":7}",
        "JoinerBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB": "{\"diceCount\":2,\"prediction\":\"under\",\"targetNumber\":7}"
    }
}"#;

#[test]
fn test_metadata_uses_camel_case_keys() {
    let config = GameConfig::new(1, Prediction::Over, 3);
    let metadata = config.to_metadata().unwrap();
    assert_eq!(
        metadata,
        r#"{"diceCount":1,"prediction":"over","targetNumber":3}"#
    );
    assert_eq!(GameConfig::parse(&metadata), Some(config));
}

#[test]
fn test_parse_rejects_bad_metadata() {
    assert_eq!(GameConfig::parse("not json"), None);
    assert_eq!(GameConfig::parse(r#"{"diceCount":1,"prediction":"over"}"#), None);
    assert_eq!(
        GameConfig::parse(r#"{"diceCount":"1","prediction":"over","targetNumber":3}"#),
        None
    );
    assert_eq!(
        GameConfig::parse(r#"{"diceCount":1,"prediction":"sideways","targetNumber":3}"#),
        None
    );
    assert_eq!(
        GameConfig::parse(r#"{"diceCount":-1,"prediction":"over","targetNumber":3}"#),
        None
    );
}

#[test]
fn test_parse_ignores_extra_fields() {
    let config =
        GameConfig::parse(r#"{"diceCount":3,"prediction":"exact","targetNumber":10,"v":2}"#)
            .unwrap();
    assert_eq!(config, GameConfig::new(3, Prediction::Exact, 10));
}

#[test]
fn test_labels() {
    let config = GameConfig::new(2, Prediction::Under, 5);
    assert_eq!(config.label(), "2d6 under 5");
    assert_eq!(config.prediction_label(), "under 5");
    assert_eq!(
        config_label(r#"{"diceCount":2,"prediction":"under","targetNumber":5}"#),
        "2d6 under 5"
    );
    assert_eq!(config_label(""), "Custom");
    assert_eq!(config_label("{}"), "Custom");
}

#[test]
fn test_default_target_config() {
    let config = GameConfig::with_default_target(3, Prediction::Exact);
    assert_eq!(config.target_number, 10);
    assert!(config.target_in_range());
    assert!(config.wins(10));
    assert!(!config.wins(11));
}

#[test]
fn test_player_metadata_flattens_config() {
    let entry = PlayerMetadata::new("Key", GameConfig::new(1, Prediction::Exact, 4));
    let json = serde_json::to_value(&entry).unwrap();
    assert_eq!(json["diceCount"], 1);
    assert_eq!(json["prediction"], "exact");
    assert_eq!(json["targetNumber"], 4);
    assert_eq!(json["playerKey"], "Key");
}

#[test]
fn test_snapshot_from_json() {
    let game = GameSnapshot::from_json(SNAPSHOT).unwrap();
    assert_eq!(game.players.len(), 2);
    assert!(!game.is_waiting());
    assert!(game.is_settled());
    assert_eq!(
        game.winner(),
        Some("JoinerBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBBB")
    );
    assert_eq!(
        game.maker_config(),
        Some(GameConfig::new(2, Prediction::Over, 7))
    );
    assert_eq!(game.soft_expiration_ms(), 1_700_000_060_000);
    assert!(game.has_player("MakerAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA"));
    assert!(!game.has_player("Someone"));
}

#[test]
fn test_snapshot_winner_index_out_of_bounds() {
    let mut game = GameSnapshot::from_json(SNAPSHOT).unwrap();
    game.winner_indexes = vec![5];
    assert_eq!(game.winner(), None);
    game.winner_indexes.clear();
    assert!(!game.is_settled());
}

#[test]
fn test_snapshot_list_from_json() {
    let games = GameSnapshot::list_from_json(&format!("[{SNAPSHOT}]")).unwrap();
    assert_eq!(games.len(), 1);
    assert!(GameSnapshot::list_from_json("{").is_err());
}
