//! Category scoring for a 5-dice hand.
//!
//! Pure functions only. A hand of all zeros (never rolled) scores 0 everywhere;
//! refusing to mark a category before the first roll is the engine's job.

use crate::category::{Category, NUM_CATS};

/// Five dice, each in 1..=6, or 0 for "not rolled yet".
pub type Hand = [u8; 5];

pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS: u32 = 35;
pub const FULL_HOUSE_SCORE: u32 = 25;
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
pub const YATZY_SCORE: u32 = 50;

const SMALL_STRAIGHTS: [[u8; 4]; 3] = [[1, 2, 3, 4], [2, 3, 4, 5], [3, 4, 5, 6]];
const LARGE_STRAIGHTS: [Hand; 2] = [[1, 2, 3, 4, 5], [2, 3, 4, 5, 6]];

/// Occurrences per face; slot 0 counts unrolled dice.
fn face_counts(hand: Hand) -> [u8; 7] {
    let mut counts = [0u8; 7];
    for &d in &hand {
        counts[(d as usize).min(6)] += 1;
    }
    counts
}

fn sum(hand: Hand) -> u32 {
    hand.iter().map(|&d| d as u32).sum()
}

fn has_n_of_a_kind(counts: &[u8; 7], n: u8) -> bool {
    counts.iter().any(|&c| c >= n)
}

/// Exactly one pair and one triple of different faces.
fn is_full_house(counts: &[u8; 7]) -> bool {
    let mut present: Vec<u8> = counts.iter().copied().filter(|&c| c > 0).collect();
    present.sort_unstable();
    present == [2, 3]
}

fn has_small_straight(counts: &[u8; 7]) -> bool {
    SMALL_STRAIGHTS
        .iter()
        .any(|run| run.iter().all(|&face| counts[face as usize] > 0))
}

fn has_large_straight(hand: Hand) -> bool {
    let mut sorted = hand;
    sorted.sort_unstable();
    LARGE_STRAIGHTS.contains(&sorted)
}

/// All five dice equal and rolled.
pub fn is_yatzy(hand: Hand) -> bool {
    hand[0] != 0 && hand.iter().all(|&d| d == hand[0])
}

/// Score `hand` in `category`.
///
/// Three/Four of a Kind score the sum of all five dice once the count condition
/// holds, not only the matching faces.
pub fn score(category: Category, hand: Hand) -> u32 {
    let counts = face_counts(hand);
    match category {
        Category::Aces
        | Category::Twos
        | Category::Threes
        | Category::Fours
        | Category::Fives
        | Category::Sixes => {
            let face = category.face().unwrap_or_default();
            hand.iter()
                .filter(|&&d| d == face)
                .map(|&d| d as u32)
                .sum()
        }
        Category::ThreeOfAKind => {
            if has_n_of_a_kind(&counts, 3) {
                sum(hand)
            } else {
                0
            }
        }
        Category::FourOfAKind => {
            if has_n_of_a_kind(&counts, 4) {
                sum(hand)
            } else {
                0
            }
        }
        Category::FullHouse => {
            if is_full_house(&counts) {
                FULL_HOUSE_SCORE
            } else {
                0
            }
        }
        Category::SmallStraight => {
            if has_small_straight(&counts) {
                SMALL_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::LargeStraight => {
            if has_large_straight(hand) {
                LARGE_STRAIGHT_SCORE
            } else {
                0
            }
        }
        Category::Yatzy => {
            if is_yatzy(hand) {
                YATZY_SCORE
            } else {
                0
            }
        }
        Category::Chance => sum(hand),
    }
}

/// Score `hand` in every category, indexed by [`Category::index`].
pub fn scores_for_dice(hand: Hand) -> [u32; NUM_CATS] {
    let mut out = [0u32; NUM_CATS];
    for cat in Category::ALL {
        out[cat.index()] = score(cat, hand);
    }
    out
}

/// Upper-section bonus for a given upper total.
pub fn upper_bonus(upper_total: u32) -> u32 {
    if upper_total >= UPPER_BONUS_THRESHOLD {
        UPPER_BONUS
    } else {
        0
    }
}
