//! Create-game form
//!
//! Holds the creator's choices, keeps the target inside the roll range while
//! the dice count changes, and turns a submission into the parameters the
//! multiplayer program needs. Signing and sending the transaction is up to
//! the caller.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info};

use super::error::{DuelError, Result};
use super::odds::{self, OddsModel, OddsQuote};
use super::types::{DuelSettings, GameConfig, Prediction, TokenSetting};

/// Every seat pays the same wager
pub const WAGER_TYPE_SAME: u8 = 0;

/// Winner takes the pot
pub const PAYOUT_TYPE_WINNER_TAKES_ALL: u8 = 0;

/// Arguments for the program's create-game instruction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameParams {
    pub pre_alloc_players: u32,
    pub max_players: u32,
    pub num_teams: u32,
    pub winners_target: u32,
    pub wager_type: u8,
    pub payout_type: u8,
    pub soft_duration: u32,
    pub hard_duration: u32,
    pub game_seed: u64,
    pub min_bet: u64,
    pub max_bet: u64,
    pub game_maker: String,
}

/// Everything needed to create a game and take its first seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGameRequest {
    pub params: GameParams,
    pub mint: String,
    pub creator_address: Option<String>,
    pub creator_fee_bps: u64,
    /// JSON metadata attached to the creator's seat
    pub metadata: String,
}

/// Convert a token amount to its smallest unit, rounding down.
///
/// Returns `None` for amounts that are negative, not finite, or too large
/// for a `u64`.
pub fn to_base_units(amount: f64, decimals: u8) -> Option<u64> {
    let units = (amount * 10f64.powi(decimals as i32)).floor();
    if !units.is_finite() || units < 0.0 || units >= u64::MAX as f64 {
        return None;
    }
    Some(units as u64)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateGameForm {
    pub wager: f64,
    pub prediction: Prediction,
    dice_count: u32,
    target_number: u32,
    min_dice_count: u32,
    max_dice_count: u32,
}

impl CreateGameForm {
    pub fn new(settings: &DuelSettings) -> Self {
        let dice_count = settings.default_dice_count;
        Self {
            wager: settings.wager_presets.first().copied().unwrap_or(0.1),
            prediction: Prediction::Over,
            dice_count,
            target_number: odds::default_target(dice_count),
            min_dice_count: settings.min_dice_count,
            max_dice_count: settings.max_dice_count,
        }
    }

    pub fn dice_count(&self) -> u32 {
        self.dice_count
    }

    pub fn target_number(&self) -> u32 {
        self.target_number
    }

    pub fn roll_range(&self) -> (u32, u32) {
        odds::roll_range(self.dice_count)
    }

    /// Change the dice count; a target outside the new range resets to its default.
    pub fn set_dice_count(&mut self, dice_count: u32) -> Result<()> {
        if !(self.min_dice_count..=self.max_dice_count).contains(&dice_count) {
            return Err(DuelError::DiceCountOutOfRange {
                count: dice_count,
                min: self.min_dice_count,
                max: self.max_dice_count,
            });
        }

        self.dice_count = dice_count;
        if !odds::target_in_range(dice_count, self.target_number) {
            self.target_number = odds::default_target(dice_count);
            debug!(
                dice_count,
                target = self.target_number,
                "target reset to new default"
            );
        }
        Ok(())
    }

    /// Set the target, clamped into the current roll range.
    pub fn set_target(&mut self, target: u32) {
        let (min, max) = self.roll_range();
        self.target_number = target.clamp(min, max);
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new(self.dice_count, self.prediction, self.target_number)
    }

    pub fn quote(&self, model: OddsModel) -> OddsQuote {
        self.config().quote(model)
    }

    /// Validate the form and build the create-game request.
    ///
    /// Checks run in the order the player would fix them: wallet, token,
    /// then wager.
    pub fn submit<R: Rng + ?Sized>(
        &self,
        wallet: Option<&str>,
        settings: &DuelSettings,
        rng: &mut R,
    ) -> Result<CreateGameRequest> {
        let game_maker = wallet.ok_or(DuelError::WalletNotConnected)?;
        let token: &TokenSetting = settings.token.as_ref().ok_or(DuelError::NoTokenSelected)?;
        if !self.wager.is_finite() || self.wager <= 0.0 {
            return Err(DuelError::InvalidWager);
        }
        settings.check_dice_count(self.dice_count)?;

        let config = self.config();
        if !config.target_in_range() {
            let (min, max) = config.roll_range();
            return Err(DuelError::TargetOutOfRange {
                target: config.target_number,
                min,
                max,
            });
        }

        let lamports = match to_base_units(self.wager, token.decimals) {
            Some(lamports) if lamports > 0 => lamports,
            _ => return Err(DuelError::InvalidWager),
        };

        let params = GameParams {
            pre_alloc_players: settings.max_players,
            max_players: settings.max_players,
            num_teams: 0,
            winners_target: settings.winners_target,
            wager_type: WAGER_TYPE_SAME,
            payout_type: PAYOUT_TYPE_WINNER_TAKES_ALL,
            soft_duration: settings.soft_duration_secs,
            hard_duration: settings.hard_duration_secs,
            game_seed: rng.gen(),
            min_bet: lamports,
            max_bet: lamports,
            game_maker: game_maker.to_string(),
        };

        info!(
            config = %config.label(),
            lamports,
            seed = params.game_seed,
            "prepared create-game request"
        );

        Ok(CreateGameRequest {
            params,
            mint: token.mint.clone(),
            creator_address: settings.platform_creator.clone(),
            creator_fee_bps: settings.creator_fee_bps(),
            metadata: config.to_metadata()?,
        })
    }
}
