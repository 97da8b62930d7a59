//! Type definitions for Dice Duel
//!
//! This module is organized into submodules:
//! - `prediction` - Prediction modes (over, under, exact)
//! - `config` - Per-player game configuration and its JSON metadata form
//! - `roll` - Cosmetic dice roll results
//! - `settings` - Application settings and persistence
//! - `snapshot` - Read-only views of on-chain game accounts

pub mod config;
pub mod prediction;
pub mod roll;
pub mod settings;
pub mod snapshot;

// Re-export all public types for convenient access
pub use config::*;
pub use prediction::*;
pub use roll::*;
pub use settings::*;
pub use snapshot::*;
