//! Local debug duel
//!
//! Plays both seats of a duel on one machine: a single roll is checked against
//! each player's prediction. If exactly one player's prediction holds, that
//! player wins; otherwise (both or neither) the duel is a tie.

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use super::error::Result;
use super::odds;
use super::types::{DiceResult, DuelSettings, GameConfig, Prediction};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PlayerSide {
    One,
    Two,
}

impl PlayerSide {
    pub fn number(&self) -> u8 {
        match self {
            PlayerSide::One => 1,
            PlayerSide::Two => 2,
        }
    }

    pub fn from_number(n: u8) -> Option<PlayerSide> {
        match n {
            1 => Some(PlayerSide::One),
            2 => Some(PlayerSide::Two),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DuelWinner {
    Player(PlayerSide),
    Tie,
}

/// One simulated seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SimPlayer {
    pub prediction: Prediction,
    pub target: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DuelOutcome {
    pub roll: DiceResult,
    pub player1_wins: bool,
    pub player2_wins: bool,
    pub winner: DuelWinner,
    pub you_won: bool,
}

impl DuelOutcome {
    pub fn is_tie(&self) -> bool {
        self.winner == DuelWinner::Tie
    }

    pub fn title(&self) -> &'static str {
        if self.is_tie() {
            "Tie!"
        } else if self.you_won {
            "You Win!"
        } else {
            "You Lose"
        }
    }

    /// Extra line for ties: whether both players won or both lost.
    pub fn tie_detail(&self) -> Option<&'static str> {
        if !self.is_tie() {
            return None;
        }
        Some(if self.player1_wins {
            "Both players won"
        } else {
            "Both players lost"
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugDuel {
    dice_count: u32,
    pub player1: SimPlayer,
    pub player2: SimPlayer,
    pub you_are: PlayerSide,
}

impl DebugDuel {
    /// Player one bets over, player two under, both at the default target.
    pub fn new(settings: &DuelSettings) -> Self {
        let dice_count = settings.default_dice_count;
        let target = odds::default_target(dice_count);
        Self {
            dice_count,
            player1: SimPlayer {
                prediction: Prediction::Over,
                target,
            },
            player2: SimPlayer {
                prediction: Prediction::Under,
                target,
            },
            you_are: PlayerSide::One,
        }
    }

    pub fn dice_count(&self) -> u32 {
        self.dice_count
    }

    /// Change the dice count and reset both targets to the new default.
    pub fn set_dice_count(&mut self, dice_count: u32, settings: &DuelSettings) -> Result<()> {
        settings.check_dice_count(dice_count)?;
        let target = odds::default_target(dice_count);
        self.dice_count = dice_count;
        self.player1.target = target;
        self.player2.target = target;
        Ok(())
    }

    pub fn player(&self, side: PlayerSide) -> &SimPlayer {
        match side {
            PlayerSide::One => &self.player1,
            PlayerSide::Two => &self.player2,
        }
    }

    pub fn config(&self, side: PlayerSide) -> GameConfig {
        let player = self.player(side);
        GameConfig::new(self.dice_count, player.prediction, player.target)
    }

    /// Name shown on a seat: `You` for the viewer's side.
    pub fn seat_name(&self, side: PlayerSide) -> String {
        if side == self.you_are {
            "You".to_string()
        } else {
            format!("Player {}", side.number())
        }
    }

    pub fn resolve(&self, roll: DiceResult) -> DuelOutcome {
        let player1_wins = odds::check_win(roll.total, self.player1.prediction, self.player1.target);
        let player2_wins = odds::check_win(roll.total, self.player2.prediction, self.player2.target);

        let winner = match (player1_wins, player2_wins) {
            (true, false) => DuelWinner::Player(PlayerSide::One),
            (false, true) => DuelWinner::Player(PlayerSide::Two),
            _ => DuelWinner::Tie,
        };
        let you_won = winner == DuelWinner::Player(self.you_are);

        debug!(total = roll.total, ?winner, "debug duel resolved");

        DuelOutcome {
            roll,
            player1_wins,
            player2_wins,
            winner,
            you_won,
        }
    }

    pub fn play<R: Rng + ?Sized>(&self, rng: &mut R) -> DuelOutcome {
        self.resolve(DiceResult::roll(self.dice_count, rng))
    }
}
