//! Error type shared by the duel modules
//!
//! The odds evaluator never returns errors: an out-of-range target prices to
//! zero and an unknown prediction never wins. Everything around it (form
//! submission, settings, metadata and snapshot decoding) reports through
//! [`DuelError`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DuelError {
    // Form submission
    #[error("Please connect your wallet first")]
    WalletNotConnected,

    #[error("No token selected")]
    NoTokenSelected,

    #[error("Wager must be greater than 0")]
    InvalidWager,

    #[error("Dice count {count} is outside the allowed range {min}-{max}")]
    DiceCountOutOfRange { count: u32, min: u32, max: u32 },

    #[error("Target {target} is outside the roll range {min}-{max}")]
    TargetOutOfRange { target: u32, min: u32, max: u32 },

    #[error("Unknown prediction '{0}'. Valid: over, under, exact")]
    UnknownPrediction(String),

    #[error("Game has no readable configuration")]
    MissingGameConfig,

    // Settings
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    #[error("Failed to parse settings: {0}")]
    SettingsParse(#[from] ron::error::SpannedError),

    #[error("Failed to encode settings: {0}")]
    SettingsEncode(#[from] ron::Error),

    // Metadata and snapshots
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DuelError>;
