//! Scoring categories (13 fixed slots, upper section first).

use std::fmt;

use serde::{Deserialize, Serialize};

pub const NUM_CATS: usize = 13;

/// Number of upper-section categories (Aces..Sixes).
pub const NUM_UPPER: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    // Upper section
    Aces,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    // Lower section
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Yatzy,
    Chance,
}

impl Category {
    /// Display order.
    pub const ALL: [Category; NUM_CATS] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::ThreeOfAKind,
        Category::FourOfAKind,
        Category::FullHouse,
        Category::SmallStraight,
        Category::LargeStraight,
        Category::Yatzy,
        Category::Chance,
    ];

    pub const UPPER: [Category; NUM_UPPER] = [
        Category::Aces,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
    ];

    /// Position in `Category::ALL` (0..=12).
    pub fn index(self) -> usize {
        self as usize
    }

    /// Inverse of [`Category::index`].
    pub fn from_index(idx: usize) -> Option<Category> {
        Category::ALL.get(idx).copied()
    }

    /// Face value bound to an upper-section category.
    pub fn face(self) -> Option<u8> {
        match self {
            Category::Aces => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    pub fn is_upper(self) -> bool {
        self.face().is_some()
    }

    pub fn name(self) -> &'static str {
        match self {
            Category::Aces => "Aces",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "3 of a Kind",
            Category::FourOfAKind => "4 of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::Yatzy => "Yatzy",
            Category::Chance => "Chance",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_roundtrips_in_display_order() {
        for (i, &cat) in Category::ALL.iter().enumerate() {
            assert_eq!(cat.index(), i);
            assert_eq!(Category::from_index(i), Some(cat));
        }
        assert_eq!(Category::from_index(NUM_CATS), None);
    }

    #[test]
    fn only_upper_categories_have_faces() {
        for (i, &cat) in Category::UPPER.iter().enumerate() {
            assert_eq!(cat.face(), Some(i as u8 + 1));
        }
        let lower = Category::ALL.iter().filter(|c| !c.is_upper()).count();
        assert_eq!(lower, NUM_CATS - NUM_UPPER);
    }
}
