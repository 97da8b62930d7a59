//! Application settings types and persistence
//!
//! Settings live in a RON file. Every field has a serde default, so a partial
//! file only overrides what it names and a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;
use tracing::{debug, info};

use crate::duel::error::{DuelError, Result};
use crate::duel::odds::OddsModel;

/// Default settings file name, looked up in the working directory
pub const SETTINGS_FILE_NAME: &str = "diceduel.ron";

/// Basis points in one whole, used for fee conversion
pub const BPS_PER_WHOLE: u64 = 10_000;

/// Address of the wrapped native SOL mint
pub const NATIVE_MINT: &str = "So11111111111111111111111111111111111111112";

/// Token the wager is denominated in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSetting {
    pub symbol: String,
    pub mint: String,
    pub decimals: u8,
}

impl Default for TokenSetting {
    fn default() -> Self {
        Self {
            symbol: "SOL".to_string(),
            mint: NATIVE_MINT.to_string(),
            decimals: 9,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DuelSettings {
    #[serde(default = "default_min_dice_count")]
    pub min_dice_count: u32,

    #[serde(default = "default_max_dice_count")]
    pub max_dice_count: u32,

    #[serde(default = "default_dice_count")]
    pub default_dice_count: u32,

    /// Seats per game
    #[serde(default = "default_max_players")]
    pub max_players: u32,

    #[serde(default = "default_winners_target")]
    pub winners_target: u32,

    /// Seconds a game waits for players before it may start
    #[serde(default = "default_soft_duration_secs")]
    pub soft_duration_secs: u32,

    /// Seconds after which the program expires the game outright
    #[serde(default = "default_hard_duration_secs")]
    pub hard_duration_secs: u32,

    /// Platform fee as a fraction of the wager
    #[serde(default = "default_multiplayer_fee")]
    pub multiplayer_fee: f64,

    /// Wallet credited with the platform fee
    #[serde(default)]
    pub platform_creator: Option<String>,

    #[serde(default = "default_token")]
    pub token: Option<TokenSetting>,

    #[serde(default = "default_wager_presets")]
    pub wager_presets: Vec<f64>,

    #[serde(default)]
    pub odds_model: OddsModel,

    /// Delay between settlement and revealing the cosmetic roll
    #[serde(default = "default_reveal_delay_ms")]
    pub reveal_delay_ms: u64,
}

fn default_min_dice_count() -> u32 {
    1
}

fn default_max_dice_count() -> u32 {
    3
}

fn default_dice_count() -> u32 {
    1
}

fn default_max_players() -> u32 {
    2
}

fn default_winners_target() -> u32 {
    1
}

fn default_soft_duration_secs() -> u32 {
    60
}

fn default_hard_duration_secs() -> u32 {
    240
}

fn default_multiplayer_fee() -> f64 {
    0.015
}

fn default_token() -> Option<TokenSetting> {
    Some(TokenSetting::default())
}

fn default_wager_presets() -> Vec<f64> {
    vec![0.1, 0.5, 1.0, 2.0, 5.0]
}

fn default_reveal_delay_ms() -> u64 {
    2500
}

impl Default for DuelSettings {
    fn default() -> Self {
        Self {
            min_dice_count: default_min_dice_count(),
            max_dice_count: default_max_dice_count(),
            default_dice_count: default_dice_count(),
            max_players: default_max_players(),
            winners_target: default_winners_target(),
            soft_duration_secs: default_soft_duration_secs(),
            hard_duration_secs: default_hard_duration_secs(),
            multiplayer_fee: default_multiplayer_fee(),
            platform_creator: None,
            token: default_token(),
            wager_presets: default_wager_presets(),
            odds_model: OddsModel::default(),
            reveal_delay_ms: default_reveal_delay_ms(),
        }
    }
}

impl DuelSettings {
    /// Load settings from `path`, falling back to defaults when it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no settings file, using defaults");
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        let settings = Self::from_ron(&text)?;
        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    }

    pub fn from_ron(text: &str) -> Result<Self> {
        let settings: DuelSettings = ron::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_ron(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, self.to_ron()?)?;
        info!(path = %path.display(), "Saved settings");
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.min_dice_count == 0 {
            return Err(DuelError::InvalidSettings(
                "min_dice_count must be at least 1".to_string(),
            ));
        }
        if !(self.min_dice_count..=self.max_dice_count).contains(&self.default_dice_count) {
            return Err(DuelError::InvalidSettings(format!(
                "default_dice_count {} must lie in {}-{}",
                self.default_dice_count, self.min_dice_count, self.max_dice_count
            )));
        }
        if self.max_players < 2 {
            return Err(DuelError::InvalidSettings(
                "max_players must be at least 2".to_string(),
            ));
        }
        if self.winners_target == 0 || self.winners_target >= self.max_players {
            return Err(DuelError::InvalidSettings(format!(
                "winners_target {} must lie in 1-{}",
                self.winners_target,
                self.max_players - 1
            )));
        }
        if self.hard_duration_secs < self.soft_duration_secs {
            return Err(DuelError::InvalidSettings(
                "hard_duration_secs must not be shorter than soft_duration_secs".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.multiplayer_fee) {
            return Err(DuelError::InvalidSettings(format!(
                "multiplayer_fee {} must lie in [0, 1)",
                self.multiplayer_fee
            )));
        }
        Ok(())
    }

    pub fn dice_count_range(&self) -> RangeInclusive<u32> {
        self.min_dice_count..=self.max_dice_count
    }

    pub fn check_dice_count(&self, dice_count: u32) -> Result<()> {
        if self.dice_count_range().contains(&dice_count) {
            Ok(())
        } else {
            Err(DuelError::DiceCountOutOfRange {
                count: dice_count,
                min: self.min_dice_count,
                max: self.max_dice_count,
            })
        }
    }

    /// Platform fee in basis points, rounded to the nearest point.
    pub fn creator_fee_bps(&self) -> u64 {
        (self.multiplayer_fee * BPS_PER_WHOLE as f64).round() as u64
    }
}
