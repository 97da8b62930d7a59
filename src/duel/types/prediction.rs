//! Prediction modes
//!
//! A prediction compares the dice total against a target number. The set of
//! modes is closed; anything that does not parse into a [`Prediction`] never
//! wins.

use serde::{Deserialize, Serialize};
use std::fmt;

/// All supported prediction modes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prediction {
    /// Total strictly greater than the target
    #[default]
    Over,
    /// Total strictly less than the target
    Under,
    /// Total equal to the target
    Exact,
}

impl Prediction {
    pub const ALL: [Prediction; 3] = [Prediction::Over, Prediction::Under, Prediction::Exact];

    /// Wire name, as written into game metadata
    pub fn name(&self) -> &'static str {
        match self {
            Prediction::Over => "over",
            Prediction::Under => "under",
            Prediction::Exact => "exact",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Prediction::Over => "Over",
            Prediction::Under => "Under",
            Prediction::Exact => "Exact",
        }
    }

    /// Exact wire name only: `over`, `under` or `exact`.
    pub fn from_wire(s: &str) -> Option<Prediction> {
        Prediction::ALL.into_iter().find(|p| p.name() == s)
    }

    /// Lenient parse for user input: trims and ignores case.
    pub fn parse(s: &str) -> Option<Prediction> {
        match s.trim().to_lowercase().as_str() {
            "over" => Some(Prediction::Over),
            "under" => Some(Prediction::Under),
            "exact" => Some(Prediction::Exact),
            _ => None,
        }
    }

    /// Whether `total` satisfies this prediction against `target`.
    pub fn wins(&self, total: u32, target: u32) -> bool {
        match self {
            Prediction::Over => total > target,
            Prediction::Under => total < target,
            Prediction::Exact => total == target,
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
