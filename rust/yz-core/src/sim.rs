//! Headless self-play with a simple greedy policy.
//!
//! Drives [`GameEngine`] through the same inputs a human would send, so the
//! numbers double as a smoke test of the whole rules path.

use std::sync::Arc;

use serde::Serialize;

use crate::advice::StaticAdviceSource;
use crate::category::{Category, NUM_CATS};
use crate::clock::ManualClock;
use crate::config::Config;
use crate::engine::{GameEngine, Input};
use crate::scoring::{score, Hand};
use crate::state::{Mode, NUM_DICE};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimConfig {
    pub games: u32,
    pub players: usize,
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            games: 100,
            players: 1,
            seed: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub games: u32,
    pub players: usize,
    /// Grand totals, one per player per game.
    pub totals: Vec<u32>,
    pub mean: f64,
    pub median: f64,
    pub std: f64,
    pub min: u32,
    pub max: u32,
    pub bonus_rate: f64,
    pub yatzy_rate: f64,
    /// Mean points per category, in scorecard order.
    pub category_means: Vec<f64>,
}

/// Faces to keep for the next roll: the most common face, higher face on ties.
fn keep_mask(hand: Hand) -> [bool; NUM_DICE] {
    let mut counts = [0u8; 7];
    for &d in &hand {
        counts[d as usize] += 1;
    }
    let target = (1..=6u8)
        .max_by_key(|&f| (counts[f as usize], f))
        .unwrap_or(6);
    hand.map(|d| d == target)
}

fn done_rolling(hand: Hand) -> bool {
    score(Category::Yatzy, hand) > 0
        || score(Category::LargeStraight, hand) > 0
        || score(Category::FullHouse, hand) > 0
}

/// Open category with the best immediate score; earliest wins ties.
fn pick_category(engine: &GameEngine) -> Option<Category> {
    let mut best: Option<(Category, u32)> = None;
    for cat in Category::ALL {
        let Some(v) = engine.preview(cat) else {
            continue;
        };
        if best.map_or(true, |(_, b)| v > b) {
            best = Some((cat, v));
        }
    }
    best.map(|(c, _)| c)
}

fn play_turn(engine: &mut GameEngine) -> Option<()> {
    engine.handle(Input::Roll);
    loop {
        let turn = engine.current_player()?.turn;
        if turn.rolls_remaining == 0 || done_rolling(turn.hand) {
            break;
        }
        let want = keep_mask(turn.hand);
        for (i, (&held, &keep)) in turn.held.iter().zip(want.iter()).enumerate() {
            if held != keep {
                engine.handle(Input::ToggleDie(i));
            }
        }
        engine.handle(Input::Roll);
    }
    let cat = pick_category(engine)?;
    engine.handle(Input::SelectCategory(cat));
    Some(())
}

fn mean(xs: &[f64]) -> f64 {
    if xs.is_empty() {
        return 0.0;
    }
    xs.iter().sum::<f64>() / xs.len() as f64
}

fn median(sorted: &[u32]) -> f64 {
    let n = sorted.len();
    match n {
        0 => 0.0,
        _ if n % 2 == 1 => sorted[n / 2] as f64,
        _ => (sorted[n / 2 - 1] as f64 + sorted[n / 2] as f64) / 2.0,
    }
}

/// Play `cfg.games` full games and summarize the scores.
pub fn simulate(cfg: SimConfig) -> SimReport {
    let players = cfg.players.clamp(1, crate::engine::MAX_PLAYERS);
    let mut totals = Vec::with_capacity(cfg.games as usize * players);
    let mut cat_sums = [0u64; NUM_CATS];
    let mut bonuses = 0u32;
    let mut yatzies = 0u32;

    for g in 0..cfg.games {
        let mut game_cfg = Config::default();
        game_cfg.game.seed = Some(cfg.seed.wrapping_add(g as u64));
        let source = Arc::new(StaticAdviceSource::new(Vec::<String>::new()));
        let mut engine = GameEngine::new(game_cfg, source, Arc::new(ManualClock::new(0)));

        engine.handle(Input::SelectPlayerCount(players));
        engine.handle(Input::Start);
        while engine.mode() == Mode::Playing {
            if play_turn(&mut engine).is_none() {
                break;
            }
        }

        for p in engine.players() {
            totals.push(p.grand_total());
            if p.bonus() > 0 {
                bonuses += 1;
            }
            if p.score(Category::Yatzy).unwrap_or(0) > 0 {
                yatzies += 1;
            }
            for (sum, s) in cat_sums.iter_mut().zip(p.scores()) {
                *sum += u64::from(s.unwrap_or(0));
            }
        }
    }

    let mut sorted = totals.clone();
    sorted.sort_unstable();
    let as_f: Vec<f64> = totals.iter().map(|&t| t as f64).collect();
    let m = mean(&as_f);
    let var = mean(&as_f.iter().map(|x| (x - m).powi(2)).collect::<Vec<_>>());
    let n = totals.len().max(1) as f64;

    SimReport {
        games: cfg.games,
        players,
        mean: m,
        median: median(&sorted),
        std: var.sqrt(),
        min: sorted.first().copied().unwrap_or(0),
        max: sorted.last().copied().unwrap_or(0),
        bonus_rate: bonuses as f64 / n,
        yatzy_rate: yatzies as f64 / n,
        category_means: cat_sums.iter().map(|&s| s as f64 / n).collect(),
        totals,
    }
}

/// Bucket totals into `width`-point bins: `(bin_start, count)`, empty bins skipped.
pub fn histogram(totals: &[u32], width: u32) -> Vec<(u32, usize)> {
    let width = width.max(1);
    let mut bins: std::collections::BTreeMap<u32, usize> = std::collections::BTreeMap::new();
    for &t in totals {
        *bins.entry(t / width * width).or_default() += 1;
    }
    bins.into_iter().collect()
}
