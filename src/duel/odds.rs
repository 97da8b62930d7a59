//! Prediction and odds evaluator
//!
//! Pure functions over `(dice count, prediction, target)`. Nothing here keeps
//! state or performs I/O, so every function can be called from any thread.
//!
//! Two odds models are offered. [`OddsModel::Linear`] counts favorable
//! outcomes with `max - target` / `target - min` / `1`, which is exact only for
//! a single die and is kept so quoted odds match the live game client.
//! [`OddsModel::Exact`] convolves the real distribution of the dice total.

use serde::{Deserialize, Serialize};

use super::types::Prediction;

/// Faces on every die in play
pub const DICE_FACES: u32 = 6;

/// Largest dice count the exact model can price; `6^49` no longer fits in `u128`.
pub const MAX_EXACT_DICE: u32 = 48;

/// How favorable outcomes are counted when pricing a bet
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OddsModel {
    /// Linear counts used by the live game client
    #[default]
    Linear,
    /// Exact counts from the distribution of the dice total
    Exact,
}

impl OddsModel {
    pub fn name(&self) -> &'static str {
        match self {
            OddsModel::Linear => "linear",
            OddsModel::Exact => "exact",
        }
    }
}

/// Lowest possible total: every die shows one.
pub fn min_roll(dice_count: u32) -> u32 {
    dice_count
}

/// Highest possible total: every die shows six.
pub fn max_roll(dice_count: u32) -> u32 {
    dice_count.saturating_mul(DICE_FACES)
}

pub fn roll_range(dice_count: u32) -> (u32, u32) {
    (min_roll(dice_count), max_roll(dice_count))
}

/// Midpoint of the roll range, rounded down.
pub fn default_target(dice_count: u32) -> u32 {
    let (min, max) = roll_range(dice_count);
    // u64 so the sum cannot overflow for huge dice counts
    ((min as u64 + max as u64) / 2) as u32
}

pub fn target_in_range(dice_count: u32, target: u32) -> bool {
    let (min, max) = roll_range(dice_count);
    (min..=max).contains(&target)
}

/// Whether a roll `total` wins for `prediction` against `target`.
pub fn check_win(total: u32, prediction: Prediction, target: u32) -> bool {
    prediction.wins(total, target)
}

/// [`check_win`] for a prediction that has not been parsed yet.
///
/// Only the exact wire names count; any other string, including a
/// different case or padding, is never a win.
pub fn check_win_mode(total: u32, mode: &str, target: u32) -> bool {
    Prediction::from_wire(mode).is_some_and(|prediction| prediction.wins(total, target))
}

/// Number of equally likely face combinations, `6^dice_count`.
///
/// Returns `None` once the count no longer fits in `u128`.
pub fn total_outcomes(dice_count: u32) -> Option<u128> {
    (DICE_FACES as u128).checked_pow(dice_count)
}

/// Ways to reach each total with `dice_count` dice, indexed by the total.
///
/// The returned vector has `6 * dice_count + 1` entries; entries below
/// `dice_count` are zero. Returns `None` above [`MAX_EXACT_DICE`].
pub fn sum_distribution(dice_count: u32) -> Option<Vec<u128>> {
    if dice_count > MAX_EXACT_DICE {
        return None;
    }

    let faces = DICE_FACES as usize;
    let mut ways: Vec<u128> = vec![1];
    for _ in 0..dice_count {
        let mut next = vec![0u128; ways.len() + faces];
        for (total, &count) in ways.iter().enumerate() {
            if count == 0 {
                continue;
            }
            for face in 1..=faces {
                next[total + face] += count;
            }
        }
        ways = next;
    }

    Some(ways)
}

/// Favorable face combinations for a bet under `model`.
///
/// Targets outside the roll range, and a dice count of zero, have no
/// favorable outcomes.
pub fn favorable_outcomes(
    model: OddsModel,
    dice_count: u32,
    prediction: Prediction,
    target: u32,
) -> u128 {
    if dice_count == 0 || !target_in_range(dice_count, target) {
        return 0;
    }
    let (min, max) = roll_range(dice_count);

    match model {
        OddsModel::Linear => match prediction {
            Prediction::Over => (max - target) as u128,
            Prediction::Under => (target - min) as u128,
            Prediction::Exact => 1,
        },
        OddsModel::Exact => {
            let Some(ways) = sum_distribution(dice_count) else {
                return 0;
            };
            let target = target as usize;
            match prediction {
                Prediction::Over => ways[target + 1..].iter().sum(),
                Prediction::Under => ways[..target].iter().sum(),
                Prediction::Exact => ways[target],
            }
        }
    }
}

/// Price of a single bet
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OddsQuote {
    pub model: OddsModel,
    pub favorable: u128,
    pub total: u128,
    pub probability: f64,
    /// Fair payout multiplier; zero means the bet cannot be priced
    pub odds: f64,
}

impl OddsQuote {
    pub fn is_priced(&self) -> bool {
        self.odds > 0.0
    }
}

pub fn quote(model: OddsModel, dice_count: u32, prediction: Prediction, target: u32) -> OddsQuote {
    let favorable = favorable_outcomes(model, dice_count, prediction, target);
    let total = total_outcomes(dice_count).unwrap_or(0);

    let probability = if favorable == 0 || total == 0 {
        0.0
    } else {
        favorable as f64 / total as f64
    };
    let odds = if probability > 0.0 { 1.0 / probability } else { 0.0 };

    OddsQuote {
        model,
        favorable,
        total,
        probability,
        odds,
    }
}

/// Fair odds with the linear counts the live client shows.
pub fn fair_odds(dice_count: u32, prediction: Prediction, target: u32) -> f64 {
    quote(OddsModel::Linear, dice_count, prediction, target).odds
}

pub fn fair_odds_with(model: OddsModel, dice_count: u32, prediction: Prediction, target: u32) -> f64 {
    quote(model, dice_count, prediction, target).odds
}

pub fn win_probability(model: OddsModel, dice_count: u32, prediction: Prediction, target: u32) -> f64 {
    quote(model, dice_count, prediction, target).probability
}
