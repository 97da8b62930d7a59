//! Lobby table rows
//!
//! One row per open game: who created it, what they bet on, how many seats
//! are taken, the wager and whether the game is still counting down.

use serde::Serialize;
use tracing::warn;

use super::format::{format_amount, format_duration, shorten};
use super::types::{config_label, GameSnapshot, CUSTOM_CONFIG_LABEL};

pub const EMPTY_LOBBY_MESSAGE: &str = "No active games. Create one or try debug mode!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum LobbyStatus {
    /// Accepting players; `ms_left` until the waiting period ends
    Waiting { ms_left: u64 },
    /// Waiting period over, game can start
    Ready,
    Started,
}

impl LobbyStatus {
    pub fn for_game(game: &GameSnapshot, now_ms: i64) -> Self {
        if !game.is_waiting() {
            return LobbyStatus::Started;
        }
        let ms_left = game.soft_expiration_ms().saturating_sub(now_ms);
        if ms_left > 0 {
            LobbyStatus::Waiting {
                ms_left: ms_left as u64,
            }
        } else {
            LobbyStatus::Ready
        }
    }

    pub fn label(&self) -> String {
        match self {
            LobbyStatus::Waiting { ms_left } => format_duration(*ms_left),
            LobbyStatus::Ready => "Ready".to_string(),
            LobbyStatus::Started => "Started".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LobbyRow {
    pub game: String,
    pub creator: String,
    pub config: String,
    pub players: String,
    pub bet: String,
    pub status: LobbyStatus,
}

impl LobbyRow {
    pub fn from_snapshot(game: &GameSnapshot, now_ms: i64) -> Self {
        let config = config_label(game.metadata_for(&game.game_maker).unwrap_or_default());
        if config == CUSTOM_CONFIG_LABEL {
            warn!(game = %game.public_key, "maker metadata missing or unreadable");
        }

        Self {
            game: game.public_key.clone(),
            creator: shorten(&game.game_maker),
            config,
            players: format!("{} / {}", game.players.len(), game.max_players),
            bet: format_amount(game.wager, "SOL"),
            status: LobbyStatus::for_game(game, now_ms),
        }
    }
}

pub fn lobby_rows(games: &[GameSnapshot], now_ms: i64) -> Vec<LobbyRow> {
    games
        .iter()
        .map(|game| LobbyRow::from_snapshot(game, now_ms))
        .collect()
}
