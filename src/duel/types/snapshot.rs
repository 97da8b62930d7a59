//! Read-only views of on-chain game accounts
//!
//! The multiplayer program owns the account lifecycle. The client only ever
//! reads a snapshot of it (players, wager, expiry, winners) together with the
//! metadata string each player attached when joining.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::GameConfig;
use crate::duel::error::Result;

/// One seat in a game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerEntry {
    /// Base58 public key of the player
    pub user: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    /// Still accepting players
    #[serde(default)]
    pub waiting: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    /// Address of the game account
    pub public_key: String,
    pub game_maker: String,
    #[serde(default)]
    pub players: Vec<PlayerEntry>,
    pub max_players: u32,
    /// Wager per seat, in lamports
    pub wager: u64,
    /// Unix seconds at which the waiting period ends
    pub soft_expiration_timestamp: i64,
    #[serde(default)]
    pub state: GameState,
    #[serde(default)]
    pub winner_indexes: Vec<u32>,
    /// Metadata string per player key
    #[serde(default)]
    pub metadata: BTreeMap<String, String>,
}

impl GameSnapshot {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn list_from_json(text: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn is_waiting(&self) -> bool {
        self.state.waiting
    }

    /// Settled once the game has started and the program named a winner.
    pub fn is_settled(&self) -> bool {
        !self.state.waiting && !self.winner_indexes.is_empty()
    }

    pub fn has_player(&self, key: &str) -> bool {
        self.players.iter().any(|p| p.user == key)
    }

    pub fn metadata_for(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    pub fn config_for(&self, key: &str) -> Option<GameConfig> {
        self.metadata_for(key).and_then(GameConfig::parse)
    }

    /// Config attached by the player who created the game.
    pub fn maker_config(&self) -> Option<GameConfig> {
        self.config_for(&self.game_maker)
    }

    /// Key of the first winner, if the game settled and the index is valid.
    pub fn winner(&self) -> Option<&str> {
        let index = *self.winner_indexes.first()? as usize;
        self.players.get(index).map(|p| p.user.as_str())
    }

    /// Unix milliseconds at which the waiting period ends
    pub fn soft_expiration_ms(&self) -> i64 {
        self.soft_expiration_timestamp.saturating_mul(1000)
    }
}
