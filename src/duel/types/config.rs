//! Per-player game configuration
//!
//! Every seat in a duel carries a small JSON metadata string,
//! `{"diceCount":1,"prediction":"over","targetNumber":3}`, stored by the
//! multiplayer program next to the player's key. This module owns that shape.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::Prediction;
use crate::duel::error::Result;
use crate::duel::odds::{self, OddsModel, OddsQuote};

/// Label shown for a game whose metadata cannot be read
pub const CUSTOM_CONFIG_LABEL: &str = "Custom";

/// Dice count, prediction and target chosen by one player
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameConfig {
    pub dice_count: u32,
    pub prediction: Prediction,
    pub target_number: u32,
}

impl GameConfig {
    pub fn new(dice_count: u32, prediction: Prediction, target_number: u32) -> Self {
        Self {
            dice_count,
            prediction,
            target_number,
        }
    }

    /// Config whose target starts at the middle of the roll range.
    pub fn with_default_target(dice_count: u32, prediction: Prediction) -> Self {
        Self::new(dice_count, prediction, odds::default_target(dice_count))
    }

    /// Parse a metadata string.
    ///
    /// Returns `None` for invalid JSON, missing fields, non-numeric counts or
    /// targets, and unknown prediction names.
    pub fn parse(metadata: &str) -> Option<Self> {
        match serde_json::from_str::<GameConfig>(metadata) {
            Ok(config) => Some(config),
            Err(e) => {
                debug!(error = %e, "ignoring unreadable game metadata");
                None
            }
        }
    }

    pub fn to_metadata(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn roll_range(&self) -> (u32, u32) {
        odds::roll_range(self.dice_count)
    }

    pub fn target_in_range(&self) -> bool {
        odds::target_in_range(self.dice_count, self.target_number)
    }

    pub fn wins(&self, total: u32) -> bool {
        odds::check_win(total, self.prediction, self.target_number)
    }

    pub fn quote(&self, model: OddsModel) -> OddsQuote {
        odds::quote(model, self.dice_count, self.prediction, self.target_number)
    }

    /// Short form such as `2d6 over 7`.
    pub fn label(&self) -> String {
        format!(
            "{}d{} {} {}",
            self.dice_count,
            odds::DICE_FACES,
            self.prediction,
            self.target_number
        )
    }

    /// Prediction and target only, such as `over 7`.
    pub fn prediction_label(&self) -> String {
        format!("{} {}", self.prediction, self.target_number)
    }
}

/// Label for a raw metadata string, falling back to [`CUSTOM_CONFIG_LABEL`].
pub fn config_label(metadata: &str) -> String {
    GameConfig::parse(metadata)
        .map(|config| config.label())
        .unwrap_or_else(|| CUSTOM_CONFIG_LABEL.to_string())
}

/// A player's config together with the key it belongs to
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerMetadata {
    #[serde(flatten)]
    pub config: GameConfig,
    pub player_key: String,
}

impl PlayerMetadata {
    pub fn new(player_key: impl Into<String>, config: GameConfig) -> Self {
        Self {
            config,
            player_key: player_key.into(),
        }
    }
}
