//! Turn state, players and the engine-owned game state.

use rand::Rng;
use thiserror::Error;

use crate::category::{Category, NUM_CATS};
use crate::scoring::{upper_bonus, Hand};

pub const NUM_DICE: usize = 5;
pub const ROLLS_PER_TURN: u8 = 3;

/// One player's dice for the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiceTurnState {
    pub hand: Hand,
    pub held: [bool; NUM_DICE],
    pub rolls_remaining: u8,
}

impl Default for DiceTurnState {
    fn default() -> Self {
        Self {
            hand: [0; NUM_DICE],
            held: [false; NUM_DICE],
            rolls_remaining: ROLLS_PER_TURN,
        }
    }
}

impl DiceTurnState {
    /// True once the first roll of the turn has happened.
    pub fn has_rolled(&self) -> bool {
        self.rolls_remaining < ROLLS_PER_TURN
    }

    /// Number of rolls used this turn (0..=3).
    pub fn rolls_used(&self) -> u8 {
        ROLLS_PER_TURN - self.rolls_remaining
    }

    /// Reroll every unheld die. Returns false (and changes nothing) when no rolls remain.
    pub fn roll<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.rolls_remaining == 0 {
            return false;
        }
        self.rolls_remaining -= 1;
        for (die, &held) in self.hand.iter_mut().zip(self.held.iter()) {
            if !held {
                *die = rng.gen_range(1..=6);
            }
        }
        true
    }

    /// Flip the hold flag of die `idx`. Rejected before the first roll or for an out-of-range index.
    pub fn toggle_hold(&mut self, idx: usize) -> bool {
        if !self.has_rolled() || idx >= NUM_DICE {
            return false;
        }
        self.held[idx] = !self.held[idx];
        true
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommitError {
    #[error("category {0} is already scored")]
    AlreadyScored(Category),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    /// Write-once score per category, indexed by [`Category::index`].
    scores: [Option<u32>; NUM_CATS],
    pub turn: DiceTurnState,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: [None; NUM_CATS],
            turn: DiceTurnState::default(),
        }
    }

    pub fn score(&self, cat: Category) -> Option<u32> {
        self.scores[cat.index()]
    }

    pub fn is_scored(&self, cat: Category) -> bool {
        self.scores[cat.index()].is_some()
    }

    pub fn scores(&self) -> &[Option<u32>; NUM_CATS] {
        &self.scores
    }

    /// Record `value` for `cat`. Turn state is left alone.
    pub fn commit_score(&mut self, cat: Category, value: u32) -> Result<(), CommitError> {
        let slot = &mut self.scores[cat.index()];
        if slot.is_some() {
            return Err(CommitError::AlreadyScored(cat));
        }
        *slot = Some(value);
        Ok(())
    }

    pub fn upper_total(&self) -> u32 {
        Category::UPPER
            .iter()
            .filter_map(|&cat| self.score(cat))
            .sum()
    }

    pub fn bonus(&self) -> u32 {
        upper_bonus(self.upper_total())
    }

    pub fn grand_total(&self) -> u32 {
        self.scores.iter().flatten().sum::<u32>() + self.bonus()
    }

    pub fn is_complete(&self) -> bool {
        self.scores.iter().all(Option::is_some)
    }

    pub fn open_categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|&c| !self.is_scored(c))
    }
}

/// Engine modes, in the order a game normally visits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    ModeSelection,
    NameInput,
    HowToPlay,
    Playing,
    GameOver,
}

/// Everything that belongs to one game. Replaced wholesale on restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub mode: Mode,
    pub players: Vec<Player>,
    /// Editable name drafts while in `Mode::NameInput`, one per player.
    pub name_drafts: Vec<String>,
    pub current_turn: usize,
    pub advice_text: Option<String>,
    pub advice_enabled: bool,
    pub turn_started_ms: u64,
    /// `None` until the first fetch after the latest roll.
    pub last_advice_ms: Option<u64>,
    /// Id of the fetch started during the current turn, if any.
    pub pending_advice: Option<u64>,
}

impl GameState {
    pub fn new(now_ms: u64) -> Self {
        Self {
            mode: Mode::ModeSelection,
            players: Vec::new(),
            name_drafts: Vec::new(),
            current_turn: 0,
            advice_text: None,
            advice_enabled: false,
            turn_started_ms: now_ms,
            last_advice_ms: None,
            pending_advice: None,
        }
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.players.get(self.current_turn)
    }

    pub fn is_finished(&self) -> bool {
        !self.players.is_empty() && self.players.iter().all(Player::is_complete)
    }
}

/// Default display name for the player at `idx` (0-based).
pub fn default_player_name(idx: usize) -> String {
    format!("Player {}", idx + 1)
}
