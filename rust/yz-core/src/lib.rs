//! yz-core: Yatzy rules, scoring, game state, advice plumbing and the game engine.
//!
//! Everything here is presentation-free; the TUI and CLI crates sit on top.

pub mod advice;
pub mod category;
pub mod clock;
pub mod config;
pub mod engine;
pub mod scoring;
pub mod sim;
pub mod state;

pub use advice::{AdviceError, AdviceFetcher, AdviceSource, StaticAdviceSource};
pub use category::{Category, NUM_CATS, NUM_UPPER};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{AdviceConfig, Config, ConfigError, GameConfig, UiConfig};
pub use engine::{
    decide_outcome, mark_value, Control, EngineEvent, GameEngine, Input, NameEdit, Outcome,
    HOW_TO_PLAY, MAX_PLAYERS,
};
pub use scoring::{is_yatzy, score, scores_for_dice, upper_bonus, Hand};
pub use sim::{histogram, simulate, SimConfig, SimReport};
pub use state::{
    default_player_name, CommitError, DiceTurnState, GameState, Mode, Player, NUM_DICE,
    ROLLS_PER_TURN,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Identifies the scoring rules in logs.
pub const RULESET_ID: &str = "yatzy-13cat-bonus63";

#[cfg(test)]
mod advice_tests;
#[cfg(test)]
mod scoring_tests;
#[cfg(test)]
mod state_tests;
