//! Live game screen state
//!
//! Derives everything the game screen shows from a [`GameSnapshot`] and the
//! viewer's key: the two player slots, the status badge, the join option and,
//! after settlement, the winner plus a cosmetic roll to animate.
//!
//! The win/lose verdict comes from the program's winner index only. The
//! revealed dice are drawn locally after settlement and decide nothing.

use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::error::{DuelError, Result};
use super::format::{format_duration, shorten};
use super::types::{DiceResult, DuelSettings, GameConfig, GameSnapshot, Prediction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    WaitingForPlayers,
    Rolling,
    Settled,
}

impl GameStatus {
    pub fn label(&self) -> &'static str {
        match self {
            GameStatus::WaitingForPlayers => "Waiting for Players",
            GameStatus::Rolling => "Rolling...",
            GameStatus::Settled => "Settled",
        }
    }
}

/// One occupied seat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSlot {
    pub key: String,
    pub config: Option<GameConfig>,
}

impl PlayerSlot {
    pub fn name(&self) -> String {
        shorten(&self.key)
    }

    pub fn initial(&self) -> Option<char> {
        self.key.chars().next()
    }

    pub fn prediction_label(&self) -> String {
        self.config
            .map(|c| c.prediction_label())
            .unwrap_or_else(|| "Waiting...".to_string())
    }
}

/// Everything needed to take the open seat of an existing game
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGameRequest {
    pub game_account: String,
    pub player: String,
    pub mint: String,
    /// Same wager as the maker, in base units
    pub wager: u64,
    pub creator_address: Option<String>,
    pub creator_fee_bps: u64,
    pub metadata: String,
}

#[derive(Debug, Clone)]
pub struct GameView<'a> {
    game: &'a GameSnapshot,
    viewer: Option<&'a str>,
    revealed: Option<DiceResult>,
}

impl<'a> GameView<'a> {
    pub fn new(game: &'a GameSnapshot, viewer: Option<&'a str>) -> Self {
        Self {
            game,
            viewer,
            revealed: None,
        }
    }

    pub fn game(&self) -> &GameSnapshot {
        self.game
    }

    /// Config attached by the game maker; it fixes dice count and target.
    pub fn game_config(&self) -> Option<GameConfig> {
        self.game.maker_config()
    }

    pub fn player_slots(&self) -> (Option<PlayerSlot>, Option<PlayerSlot>) {
        let slot = |index: usize| {
            self.game.players.get(index).map(|p| PlayerSlot {
                key: p.user.clone(),
                config: self.game.config_for(&p.user),
            })
        };
        (slot(0), slot(1))
    }

    pub fn i_am_in_game(&self) -> bool {
        self.viewer.is_some_and(|key| self.game.has_player(key))
    }

    pub fn can_join(&self) -> bool {
        self.viewer.is_some() && !self.i_am_in_game() && self.revealed.is_none()
    }

    pub fn status(&self) -> GameStatus {
        if self.game.is_waiting() {
            GameStatus::WaitingForPlayers
        } else if self.revealed.is_some() {
            GameStatus::Settled
        } else {
            GameStatus::Rolling
        }
    }

    /// Milliseconds until the waiting period ends, zero once it has.
    pub fn time_left_ms(&self, now_ms: i64) -> u64 {
        self.game.soft_expiration_ms().saturating_sub(now_ms).max(0) as u64
    }

    /// `Starts in m:ss` while waiting with time left.
    pub fn countdown_label(&self, now_ms: i64) -> Option<String> {
        let left = self.time_left_ms(now_ms);
        (self.game.is_waiting() && left > 0).then(|| format!("Starts in {}", format_duration(left)))
    }

    /// Metadata for joining this game with `prediction`.
    ///
    /// Dice count and target always follow the maker's config.
    pub fn join_metadata(&self, prediction: Prediction) -> Result<String> {
        let maker = self.game_config().ok_or(DuelError::MissingGameConfig)?;
        GameConfig::new(maker.dice_count, prediction, maker.target_number).to_metadata()
    }

    /// Build the request for `wallet` to join this game with `prediction`.
    ///
    /// Fails with the first missing piece: wallet, game config, then token.
    pub fn join(
        &self,
        wallet: Option<&str>,
        settings: &DuelSettings,
        prediction: Prediction,
    ) -> Result<JoinGameRequest> {
        let player = wallet.ok_or(DuelError::WalletNotConnected)?;
        let metadata = self.join_metadata(prediction)?;
        let token = settings.token.as_ref().ok_or(DuelError::NoTokenSelected)?;

        info!(
            game = %self.game.public_key,
            %prediction,
            wager = self.game.wager,
            "prepared join request"
        );

        Ok(JoinGameRequest {
            game_account: self.game.public_key.clone(),
            player: player.to_string(),
            mint: token.mint.clone(),
            wager: self.game.wager,
            creator_address: settings.platform_creator.clone(),
            creator_fee_bps: settings.creator_fee_bps(),
            metadata,
        })
    }

    /// Dice to show for the reveal.
    ///
    /// The maker's count comes from untrusted metadata, so anything outside
    /// the configured bounds falls back to the default count.
    fn reveal_dice_count(&self, settings: &DuelSettings) -> u32 {
        match self.game_config().map(|c| c.dice_count) {
            Some(count) if settings.dice_count_range().contains(&count) => count,
            Some(count) => {
                warn!(
                    game = %self.game.public_key,
                    count,
                    "dice count outside configured bounds, showing default"
                );
                settings.default_dice_count
            }
            None => settings.default_dice_count,
        }
    }

    /// Draw the cosmetic roll once the game has settled.
    ///
    /// Returns `None` while the game is unsettled; later calls keep the
    /// first roll.
    pub fn reveal<R: Rng + ?Sized>(
        &mut self,
        settings: &DuelSettings,
        rng: &mut R,
    ) -> Option<&DiceResult> {
        if !self.game.is_settled() {
            debug!(game = %self.game.public_key, "not settled, nothing to reveal");
            return None;
        }
        if self.revealed.is_none() {
            let roll = DiceResult::roll(self.reveal_dice_count(settings), rng);
            info!(
                game = %self.game.public_key,
                total = roll.total,
                winner = ?self.game.winner(),
                "revealing settled game"
            );
            self.revealed = Some(roll);
        }
        self.revealed.as_ref()
    }

    pub fn revealed(&self) -> Option<&DiceResult> {
        self.revealed.as_ref()
    }

    /// Winner key, shown only after the reveal.
    pub fn winner(&self) -> Option<&str> {
        self.revealed.as_ref()?;
        self.game.winner()
    }

    pub fn i_won(&self) -> bool {
        matches!((self.winner(), self.viewer), (Some(w), Some(v)) if w == v)
    }

    pub fn result_title(&self) -> &'static str {
        if self.i_won() {
            "You Win!"
        } else {
            "You Lose"
        }
    }

    /// `Total: 9 (over 7)`, or `None` before the reveal.
    pub fn result_subtitle(&self) -> Option<String> {
        let roll = self.revealed.as_ref()?;
        Some(match self.game_config() {
            Some(config) => format!("Total: {} ({})", roll.total, config.prediction_label()),
            None => format!("Total: {}", roll.total),
        })
    }
}
