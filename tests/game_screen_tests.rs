//! Tests for the live game screen

use std::collections::BTreeMap;

use diceduel::duel::{
    DuelError, DuelSettings, GameConfig, GameSnapshot, GameState, GameStatus, GameView,
    PlayerEntry, Prediction,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAKER: &str = "Maker111111111111111111111111111111111111111";
const JOINER: &str = "Joiner11111111111111111111111111111111111111";

fn game(players: &[&str], waiting: bool, winner_indexes: Vec<u32>) -> GameSnapshot {
    let mut metadata = BTreeMap::new();
    metadata.insert(
        MAKER.to_string(),
        r#"{"diceCount":2,"prediction":"over","targetNumber":7}"#.to_string(),
    );
    metadata.insert(
        JOINER.to_string(),
        r#"{"diceCount":2,"prediction":"under","targetNumber":7}"#.to_string(),
    );
    GameSnapshot {
        public_key: "Game".to_string(),
        game_maker: MAKER.to_string(),
        players: players
            .iter()
            .map(|user| PlayerEntry {
                user: user.to_string(),
            })
            .collect(),
        max_players: 2,
        wager: 100_000_000,
        soft_expiration_timestamp: 100,
        state: GameState { waiting },
        winner_indexes,
        metadata,
    }
}

#[test]
fn test_waiting_game_offers_join() {
    let snapshot = game(&[MAKER], true, Vec::new());
    let view = GameView::new(&snapshot, Some(JOINER));

    assert_eq!(view.status(), GameStatus::WaitingForPlayers);
    assert_eq!(view.status().label(), "Waiting for Players");
    assert!(!view.i_am_in_game());
    assert!(view.can_join());
    assert_eq!(view.countdown_label(40_000).as_deref(), Some("Starts in 1:00"));
    assert_eq!(view.countdown_label(100_000), None);
    assert_eq!(view.time_left_ms(200_000), 0);

    let (first, second) = view.player_slots();
    let first = first.unwrap();
    assert_eq!(first.name(), "Make…");
    assert_eq!(first.initial(), Some('M'));
    assert_eq!(first.prediction_label(), "over 7");
    assert!(second.is_none());
}

#[test]
fn test_viewer_in_game_cannot_join() {
    let snapshot = game(&[MAKER], true, Vec::new());
    let view = GameView::new(&snapshot, Some(MAKER));
    assert!(view.i_am_in_game());
    assert!(!view.can_join());

    let anonymous = GameView::new(&snapshot, None);
    assert!(!anonymous.can_join());
}

#[test]
fn test_join_metadata_follows_maker() {
    let snapshot = game(&[MAKER], true, Vec::new());
    let view = GameView::new(&snapshot, Some(JOINER));
    let metadata = view.join_metadata(Prediction::Exact).unwrap();
    assert_eq!(
        GameConfig::parse(&metadata),
        Some(GameConfig::new(2, Prediction::Exact, 7))
    );

    let mut bare = snapshot.clone();
    bare.metadata.clear();
    let view = GameView::new(&bare, Some(JOINER));
    assert!(matches!(
        view.join_metadata(Prediction::Over),
        Err(DuelError::MissingGameConfig)
    ));
}

#[test]
fn test_unsettled_game_reveals_nothing() {
    let snapshot = game(&[MAKER, JOINER], false, Vec::new());
    let mut view = GameView::new(&snapshot, Some(JOINER));
    assert_eq!(view.status(), GameStatus::Rolling);
    assert!(view.reveal(&DuelSettings::default(), &mut StdRng::seed_from_u64(1)).is_none());
    assert_eq!(view.winner(), None);
    assert_eq!(view.result_subtitle(), None);
}

#[test]
fn test_reveal_shows_program_winner() {
    let snapshot = game(&[MAKER, JOINER], false, vec![1]);
    let mut view = GameView::new(&snapshot, Some(JOINER));
    assert_eq!(view.status(), GameStatus::Rolling);
    assert_eq!(view.winner(), None);

    let settings = DuelSettings::default();
    let mut rng = StdRng::seed_from_u64(9);
    let total = view.reveal(&settings, &mut rng).unwrap().total;
    assert_eq!(view.revealed().unwrap().dice_count(), 2);
    assert!((2..=12).contains(&total));

    // The verdict comes from the winner index, whatever the dice show.
    assert_eq!(view.status(), GameStatus::Settled);
    assert_eq!(view.winner(), Some(JOINER));
    assert!(view.i_won());
    assert_eq!(view.result_title(), "You Win!");
    assert_eq!(
        view.result_subtitle(),
        Some(format!("Total: {total} (over 7)"))
    );
    assert!(!view.can_join());

    // A second reveal keeps the first roll.
    let again = view.reveal(&settings, &mut rng).unwrap().clone();
    assert_eq!(again.total, total);
}

#[test]
fn test_loser_view() {
    let snapshot = game(&[MAKER, JOINER], false, vec![1]);
    let mut view = GameView::new(&snapshot, Some(MAKER));
    view.reveal(&DuelSettings::default(), &mut StdRng::seed_from_u64(2));
    assert!(!view.i_won());
    assert_eq!(view.result_title(), "You Lose");
}

#[test]
fn test_oversized_dice_count_reveals_default() {
    let mut snapshot = game(&[MAKER, JOINER], false, vec![0]);
    snapshot.metadata.insert(
        MAKER.to_string(),
        r#"{"diceCount":1300000000,"prediction":"over","targetNumber":7}"#.to_string(),
    );
    let settings = DuelSettings::default();
    let mut view = GameView::new(&snapshot, Some(MAKER));

    let roll = view
        .reveal(&settings, &mut StdRng::seed_from_u64(1))
        .unwrap();
    assert_eq!(roll.dice_count(), settings.default_dice_count as usize);
    assert!((1..=6).contains(&roll.total));
    assert_eq!(view.winner(), Some(MAKER));
}

#[test]
fn test_join_builds_request() {
    let snapshot = game(&[MAKER], true, Vec::new());
    let view = GameView::new(&snapshot, Some(JOINER));
    let mut settings = DuelSettings::default();
    settings.platform_creator = Some("Creator".to_string());

    let request = view
        .join(Some(JOINER), &settings, Prediction::Under)
        .unwrap();
    assert_eq!(request.game_account, "Game");
    assert_eq!(request.player, JOINER);
    assert_eq!(request.wager, 100_000_000);
    assert_eq!(request.mint, settings.token.as_ref().unwrap().mint);
    assert_eq!(request.creator_address.as_deref(), Some("Creator"));
    assert_eq!(request.creator_fee_bps, 150);
    assert_eq!(
        GameConfig::parse(&request.metadata),
        Some(GameConfig::new(2, Prediction::Under, 7))
    );
}

#[test]
fn test_join_checks_wallet_then_config_then_token() {
    let snapshot = game(&[MAKER], true, Vec::new());
    let mut bare = snapshot.clone();
    bare.metadata.clear();
    let mut no_token = DuelSettings::default();
    no_token.token = None;

    let view = GameView::new(&bare, None);
    assert!(matches!(
        view.join(None, &no_token, Prediction::Over),
        Err(DuelError::WalletNotConnected)
    ));
    assert!(matches!(
        view.join(Some(JOINER), &no_token, Prediction::Over),
        Err(DuelError::MissingGameConfig)
    ));

    let view = GameView::new(&snapshot, Some(JOINER));
    assert!(matches!(
        view.join(Some(JOINER), &no_token, Prediction::Over),
        Err(DuelError::NoTokenSelected)
    ));
}
