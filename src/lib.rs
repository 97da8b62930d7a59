//! Dice Duel
//!
//! Client-side logic for a two-player over/under/exact dice betting game whose
//! wagers are escrowed and settled by an external multiplayer program.
//!
//! The crate covers the prediction/odds evaluator, the JSON metadata attached
//! to each player's seat, and the view-model logic behind the lobby, the
//! create-game form, the live game screen and the local debug simulator.

pub mod duel;
