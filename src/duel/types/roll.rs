//! Cosmetic dice rolls
//!
//! These rolls only drive what the screen shows once the multiplayer program
//! has already settled a game. The payout always comes from the on-chain
//! winner, never from a [`DiceResult`].

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::duel::odds::DICE_FACES;

/// Faces shown by one roll of the dice and their total
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceResult {
    pub rolls: Vec<u32>,
    pub total: u32,
    /// Milliseconds since the Unix epoch
    pub timestamp: u64,
}

impl DiceResult {
    pub fn from_rolls(rolls: Vec<u32>, timestamp: u64) -> Self {
        let total = rolls.iter().fold(0u32, |sum, &r| sum.saturating_add(r));
        Self {
            rolls,
            total,
            timestamp,
        }
    }

    pub fn roll<R: Rng + ?Sized>(dice_count: u32, rng: &mut R) -> Self {
        let rolls = (0..dice_count)
            .map(|_| rng.gen_range(1..=DICE_FACES))
            .collect();
        Self::from_rolls(rolls, now_millis())
    }

    /// Roll with a generator seeded from `seed`, for reproducible displays.
    pub fn roll_seeded(dice_count: u32, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::roll(dice_count, &mut rng)
    }

    pub fn dice_count(&self) -> usize {
        self.rolls.len()
    }
}

pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
