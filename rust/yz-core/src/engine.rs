//! Game engine: the state machine behind every screen.
//!
//! This is the single place that mutates `GameState`. The presentation layer
//! feeds it [`Input`]s, calls [`GameEngine::tick`] once per frame, and reads
//! the state back for drawing.

use std::sync::Arc;

use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use tracing::debug;

use crate::advice::{AdviceFetcher, AdviceSource};
use crate::category::Category;
use crate::clock::Clock;
use crate::config::Config;
use crate::scoring::{is_yatzy, score, Hand, YATZY_SCORE};
use crate::state::{default_player_name, GameState, Mode, Player};

pub const MAX_PLAYERS: usize = 2;

/// Rules summary shown on the help screen.
pub const HOW_TO_PLAY: &[&str] = &[
    "Goal: fill all 13 categories and finish with the highest total.",
    "",
    "On your turn, roll the five dice up to 3 times.",
    "After a roll, hold any dice you want to keep; held dice are not rerolled.",
    "Once you are done rolling, pick one open category to score the hand in.",
    "Scoring a category ends your turn.",
    "",
    "Aces..Sixes: sum of the dice showing that face.",
    "Upper bonus: +35 once Aces..Sixes add up to 63 or more.",
    "3/4 of a Kind: sum of all dice when 3/4 dice match.",
    "Full House: a pair and a triple, 25 points.",
    "Small Straight: four in a row, 30 points.",
    "Large Straight: five in a row, 40 points.",
    "Yatzy: all five dice equal, 50 points.",
    "Chance: sum of all dice.",
    "",
    "When every player has filled every category, the highest total wins.",
    "Stuck? Advice shows up under your name a few seconds after you roll.",
];

/// Edit applied to a player's name draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameEdit {
    Insert(String),
    Backspace,
}

/// Device-agnostic input events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    SelectPlayerCount(usize),
    RequestHelp,
    BackToMenu,
    EditName { player: usize, edit: NameEdit },
    Start,
    Roll,
    ToggleDie(usize),
    SelectCategory(Category),
    Restart,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Index of the player with the highest total (the only player in a solo game).
    Winner(usize),
    Tie,
}

/// Things that happened, in order, for logs and UI feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ModeChanged {
        from: Mode,
        to: Mode,
    },
    GameStarted {
        names: Vec<String>,
    },
    Rolled {
        player: usize,
        hand: Hand,
        rolls_remaining: u8,
    },
    ScoreCommitted {
        player: usize,
        category: Category,
        score: u32,
        hand: Hand,
        rolls_used: u8,
    },
    GameOver {
        outcome: Outcome,
        totals: Vec<u32>,
    },
    AdviceRequested {
        player: usize,
    },
    AdviceReceived {
        text: String,
    },
    AdviceDiscarded {
        text: String,
    },
}

/// Points for marking `cat` with `hand`. A five-of-a-kind in Yatzy is always 50.
pub fn mark_value(cat: Category, hand: Hand) -> u32 {
    if cat == Category::Yatzy && is_yatzy(hand) {
        YATZY_SCORE
    } else {
        score(cat, hand)
    }
}

/// Winner by grand total; equal top totals are a tie.
pub fn decide_outcome(players: &[Player]) -> Option<Outcome> {
    let best = players.iter().map(Player::grand_total).max()?;
    let mut leaders = players
        .iter()
        .enumerate()
        .filter(|(_, p)| p.grand_total() == best)
        .map(|(i, _)| i);
    let first = leaders.next()?;
    if leaders.next().is_some() {
        Some(Outcome::Tie)
    } else {
        Some(Outcome::Winner(first))
    }
}

pub struct GameEngine {
    cfg: Config,
    state: GameState,
    rng: ChaCha8Rng,
    clock: Arc<dyn Clock>,
    advice: AdviceFetcher,
    events: Vec<EngineEvent>,
    game_id: u64,
}

impl GameEngine {
    pub fn new(cfg: Config, source: Arc<dyn AdviceSource>, clock: Arc<dyn Clock>) -> Self {
        let rng = match cfg.game.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        let advice = AdviceFetcher::new(source, cfg.advice.fallback.clone());
        let state = GameState::new(clock.now_ms());
        Self {
            cfg,
            state,
            rng,
            clock,
            advice,
            events: Vec::new(),
            game_id: 0,
        }
    }

    // ---- queries ----

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn current_turn(&self) -> usize {
        self.state.current_turn
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.state.current_player()
    }

    pub fn name_drafts(&self) -> &[String] {
        &self.state.name_drafts
    }

    pub fn advice_text(&self) -> Option<&str> {
        self.state.advice_text.as_deref()
    }

    pub fn advice_enabled(&self) -> bool {
        self.state.advice_enabled
    }

    pub fn is_advice_loading(&self) -> bool {
        self.advice.is_loading()
    }

    /// Increments on every restart.
    pub fn game_id(&self) -> u64 {
        self.game_id
    }

    /// Final result, once the game is over.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.state.mode != Mode::GameOver {
            return None;
        }
        decide_outcome(&self.state.players)
    }

    /// What `cat` would score for the current player right now, if it can be selected.
    pub fn preview(&self, cat: Category) -> Option<u32> {
        if self.state.mode != Mode::Playing {
            return None;
        }
        let p = self.state.current_player()?;
        if !p.turn.has_rolled() || p.is_scored(cat) {
            return None;
        }
        Some(mark_value(cat, p.turn.hand))
    }

    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    // ---- transitions ----

    /// Dispatch one input. Inputs that the current mode does not accept are ignored.
    pub fn handle(&mut self, input: Input) -> Control {
        let mode = self.state.mode;
        match (mode, input) {
            (_, Input::Quit) => {
                debug!(?mode, "quit requested");
                return Control::Quit;
            }
            (Mode::ModeSelection, Input::SelectPlayerCount(n)) => {
                self.select_player_count(n);
            }
            (Mode::ModeSelection | Mode::NameInput, Input::RequestHelp) => {
                self.set_mode(Mode::HowToPlay);
            }
            (Mode::HowToPlay, Input::BackToMenu) => {
                self.state.players.clear();
                self.state.name_drafts.clear();
                self.set_mode(Mode::ModeSelection);
            }
            (Mode::NameInput, Input::EditName { player, edit }) => {
                self.edit_name(player, edit);
            }
            (Mode::NameInput, Input::Start) => self.start(),
            (Mode::Playing, Input::Roll) => {
                self.request_roll();
            }
            (Mode::Playing, Input::ToggleDie(idx)) => {
                self.toggle_die(idx);
            }
            (Mode::Playing, Input::SelectCategory(cat)) => {
                self.select_category(cat);
            }
            (Mode::Playing | Mode::GameOver, Input::Restart) => self.restart(),
            (mode, input) => {
                debug!(?mode, ?input, "input ignored in this mode");
            }
        }
        Control::Continue
    }

    /// Choose a 1- or 2-player game and move to name entry.
    pub fn select_player_count(&mut self, n: usize) -> bool {
        if self.state.mode != Mode::ModeSelection || !(1..=MAX_PLAYERS).contains(&n) {
            return false;
        }
        self.state.players = (0..n).map(|i| Player::new(default_player_name(i))).collect();
        self.state.name_drafts = vec![String::new(); n];
        self.state.current_turn = 0;
        self.set_mode(Mode::NameInput);
        true
    }

    /// Apply an edit to one name draft, capped at `game.max_name_len` characters.
    pub fn edit_name(&mut self, player: usize, edit: NameEdit) -> bool {
        if self.state.mode != Mode::NameInput {
            return false;
        }
        let max = self.cfg.game.max_name_len;
        let Some(draft) = self.state.name_drafts.get_mut(player) else {
            return false;
        };
        match edit {
            NameEdit::Insert(text) => {
                let mut len = draft.chars().count();
                for ch in text.chars().filter(|c| !c.is_control()) {
                    if len >= max {
                        break;
                    }
                    draft.push(ch);
                    len += 1;
                }
            }
            NameEdit::Backspace => {
                draft.pop();
            }
        }
        true
    }

    /// Leave name entry and begin play. Blank names become "Player N".
    pub fn start(&mut self) {
        if self.state.mode != Mode::NameInput {
            return;
        }
        let drafts = std::mem::take(&mut self.state.name_drafts);
        for (i, p) in self.state.players.iter_mut().enumerate() {
            let trimmed = drafts.get(i).map(|d| d.trim()).unwrap_or_default();
            p.name = if trimmed.is_empty() {
                default_player_name(i)
            } else {
                trimmed.to_string()
            };
            p.turn.reset();
        }
        self.state.current_turn = 0;
        self.state.turn_started_ms = self.clock.now_ms();
        let names = self.state.players.iter().map(|p| p.name.clone()).collect();
        self.events.push(EngineEvent::GameStarted { names });
        self.set_mode(Mode::Playing);
    }

    /// Roll the current player's unheld dice. No-op when no rolls remain.
    pub fn request_roll(&mut self) -> bool {
        if self.state.mode != Mode::Playing {
            return false;
        }
        let now = self.clock.now_ms();
        let cur = self.state.current_turn;
        let Some(p) = self.state.players.get_mut(cur) else {
            return false;
        };
        if !p.turn.roll(&mut self.rng) {
            debug!(player = cur, "roll ignored: no rolls remaining");
            return false;
        }
        let (hand, rolls_remaining) = (p.turn.hand, p.turn.rolls_remaining);

        self.state.advice_enabled = true;
        self.state.advice_text = None;
        self.state.turn_started_ms = now;
        self.state.last_advice_ms = None;

        debug!(player = cur, ?hand, rolls_remaining, "rolled");
        self.events.push(EngineEvent::Rolled {
            player: cur,
            hand,
            rolls_remaining,
        });
        true
    }

    /// Toggle the hold flag of die `idx`; only after the first roll of the turn.
    pub fn toggle_die(&mut self, idx: usize) -> bool {
        if self.state.mode != Mode::Playing {
            return false;
        }
        let cur = self.state.current_turn;
        match self.state.players.get_mut(cur) {
            Some(p) => p.turn.toggle_hold(idx),
            None => false,
        }
    }

    /// Score the current hand in `cat`, then pass the turn on.
    pub fn select_category(&mut self, cat: Category) -> bool {
        if self.state.mode != Mode::Playing {
            return false;
        }
        let now = self.clock.now_ms();
        let cur = self.state.current_turn;
        let n = self.state.players.len();
        let Some(p) = self.state.players.get_mut(cur) else {
            return false;
        };
        if !p.turn.has_rolled() {
            debug!(player = cur, %cat, "category ignored: not rolled yet");
            return false;
        }
        let hand = p.turn.hand;
        let rolls_used = p.turn.rolls_used();
        let value = mark_value(cat, hand);
        if let Err(e) = p.commit_score(cat, value) {
            debug!(player = cur, error = %e, "category ignored");
            return false;
        }
        p.turn.reset();

        let next = (cur + 1) % n;
        self.state.current_turn = next;
        self.state.players[next].turn.reset();
        self.state.turn_started_ms = now;
        self.state.advice_enabled = false;
        self.state.advice_text = None;
        self.state.last_advice_ms = None;
        self.state.pending_advice = None;

        debug!(player = cur, %cat, value, next, "score committed");
        self.events.push(EngineEvent::ScoreCommitted {
            player: cur,
            category: cat,
            score: value,
            hand,
            rolls_used,
        });

        if self.state.is_finished() {
            let totals = self.state.players.iter().map(Player::grand_total).collect();
            if let Some(outcome) = decide_outcome(&self.state.players) {
                self.events.push(EngineEvent::GameOver { outcome, totals });
            }
            self.set_mode(Mode::GameOver);
        }
        true
    }

    /// Throw the current game away and return to mode selection.
    pub fn restart(&mut self) {
        let from = self.state.mode;
        self.state = GameState::new(self.clock.now_ms());
        self.game_id += 1;
        debug!(game_id = self.game_id, "restarted");
        self.events.push(EngineEvent::ModeChanged {
            from,
            to: Mode::ModeSelection,
        });
    }

    /// Periodic update: schedule advice fetches and collect finished ones.
    pub fn tick(&mut self) {
        let now = self.clock.now_ms();
        let delay = self.cfg.advice.delay_ms;
        let interval = self.cfg.advice.interval_ms;

        let s = &mut self.state;
        let due = s.mode == Mode::Playing
            && s.advice_enabled
            && !self.advice.is_loading()
            && now.saturating_sub(s.turn_started_ms) >= delay
            && s
                .last_advice_ms
                .map_or(true, |t| now.saturating_sub(t) >= interval);
        if due && self.advice.request_fetch() {
            s.last_advice_ms = Some(now);
            s.pending_advice = Some(self.advice.last_request_id());
            self.events.push(EngineEvent::AdviceRequested {
                player: s.current_turn,
            });
        }

        // Only the fetch started during this turn may fill the advice box.
        if let Some((id, text)) = self.advice.poll_tagged() {
            if s.mode == Mode::Playing && s.advice_enabled && s.pending_advice == Some(id) {
                s.advice_text = Some(text.clone());
                self.events.push(EngineEvent::AdviceReceived { text });
            } else {
                debug!("stale advice discarded");
                self.events.push(EngineEvent::AdviceDiscarded { text });
            }
        }
    }

    fn set_mode(&mut self, to: Mode) {
        let from = self.state.mode;
        if from == to {
            return;
        }
        debug!(?from, ?to, "mode change");
        self.state.mode = to;
        self.events.push(EngineEvent::ModeChanged { from, to });
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("game_id", &self.game_id)
            .field("state", &self.state)
            .field("advice", &self.advice)
            .finish()
    }
}
