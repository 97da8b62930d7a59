//! Tests for the create-game form

use diceduel::duel::{
    CreateGameForm, DuelError, DuelSettings, GameConfig, OddsModel, Prediction,
    PAYOUT_TYPE_WINNER_TAKES_ALL, WAGER_TYPE_SAME,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

const WALLET: &str = "Wallet11111111111111111111111111111111111111";

#[test]
fn test_form_defaults() {
    let settings = DuelSettings::default();
    let form = CreateGameForm::new(&settings);
    assert_eq!(form.dice_count(), 1);
    assert_eq!(form.target_number(), 3);
    assert_eq!(form.prediction, Prediction::Over);
    assert_eq!(form.roll_range(), (1, 6));
    assert_eq!(form.quote(OddsModel::Linear).odds, 2.0);
}

#[test]
fn test_dice_count_change_resets_out_of_range_target() {
    let settings = DuelSettings::default();
    let mut form = CreateGameForm::new(&settings);

    form.set_dice_count(3).unwrap();
    // 3 is still a legal total for 3d6.
    assert_eq!(form.target_number(), 3);

    form.set_target(15);
    form.set_dice_count(1).unwrap();
    assert_eq!(form.target_number(), 3);

    let err = form.set_dice_count(4).unwrap_err();
    assert!(matches!(err, DuelError::DiceCountOutOfRange { count: 4, .. }));
    assert_eq!(form.dice_count(), 1);
}

#[test]
fn test_set_target_clamps() {
    let settings = DuelSettings::default();
    let mut form = CreateGameForm::new(&settings);
    form.set_dice_count(2).unwrap();
    form.set_target(40);
    assert_eq!(form.target_number(), 12);
    form.set_target(0);
    assert_eq!(form.target_number(), 2);
}

#[test]
fn test_submit_requires_wallet_then_token_then_wager() {
    let mut settings = DuelSettings::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut form = CreateGameForm::new(&settings);
    form.wager = 0.0;

    let err = form.submit(None, &settings, &mut rng).unwrap_err();
    assert!(matches!(err, DuelError::WalletNotConnected));
    assert_eq!(err.to_string(), "Please connect your wallet first");

    settings.token = None;
    let err = form.submit(Some(WALLET), &settings, &mut rng).unwrap_err();
    assert!(matches!(err, DuelError::NoTokenSelected));

    settings.token = DuelSettings::default().token;
    let err = form.submit(Some(WALLET), &settings, &mut rng).unwrap_err();
    assert!(matches!(err, DuelError::InvalidWager));
    assert_eq!(err.to_string(), "Wager must be greater than 0");

    form.wager = f64::NAN;
    assert!(form.submit(Some(WALLET), &settings, &mut rng).is_err());
    form.wager = -1.0;
    assert!(form.submit(Some(WALLET), &settings, &mut rng).is_err());

    form.wager = f64::INFINITY;
    assert!(matches!(
        form.submit(Some(WALLET), &settings, &mut rng),
        Err(DuelError::InvalidWager)
    ));
    form.wager = 1e30;
    assert!(matches!(
        form.submit(Some(WALLET), &settings, &mut rng),
        Err(DuelError::InvalidWager)
    ));
}

#[test]
fn test_submit_builds_request() {
    let settings = DuelSettings::default();
    let mut rng = StdRng::seed_from_u64(7);
    let mut form = CreateGameForm::new(&settings);
    form.wager = 0.5;
    form.prediction = Prediction::Exact;
    form.set_dice_count(2).unwrap();
    form.set_target(7);

    let request = form.submit(Some(WALLET), &settings, &mut rng).unwrap();
    let params = &request.params;
    assert_eq!(params.max_players, 2);
    assert_eq!(params.pre_alloc_players, 2);
    assert_eq!(params.num_teams, 0);
    assert_eq!(params.winners_target, 1);
    assert_eq!(params.wager_type, WAGER_TYPE_SAME);
    assert_eq!(params.payout_type, PAYOUT_TYPE_WINNER_TAKES_ALL);
    assert_eq!(params.soft_duration, 60);
    assert_eq!(params.hard_duration, 240);
    assert_eq!(params.min_bet, 500_000_000);
    assert_eq!(params.max_bet, 500_000_000);
    assert_eq!(params.game_maker, WALLET);
    assert_eq!(request.creator_fee_bps, 150);
    assert_eq!(
        GameConfig::parse(&request.metadata),
        Some(GameConfig::new(2, Prediction::Exact, 7))
    );
}

#[test]
fn test_submit_seed_comes_from_rng() {
    let settings = DuelSettings::default();
    let mut form = CreateGameForm::new(&settings);
    form.wager = 0.1;

    let a = form
        .submit(Some(WALLET), &settings, &mut StdRng::seed_from_u64(1))
        .unwrap();
    let b = form
        .submit(Some(WALLET), &settings, &mut StdRng::seed_from_u64(1))
        .unwrap();
    assert_eq!(a.params.game_seed, b.params.game_seed);
}

#[test]
fn test_submit_rejects_dust_wager() {
    let settings = DuelSettings::default();
    let mut form = CreateGameForm::new(&settings);
    form.wager = 1e-12;
    let err = form
        .submit(Some(WALLET), &settings, &mut StdRng::seed_from_u64(3))
        .unwrap_err();
    assert!(matches!(err, DuelError::InvalidWager));
}
