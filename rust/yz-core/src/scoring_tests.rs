#[cfg(test)]
mod tests {
    use crate::category::Category;
    use crate::scoring::{is_yatzy, score, scores_for_dice, upper_bonus, Hand};

    fn all_hands() -> Vec<Hand> {
        let mut out = Vec::with_capacity(7776);
        for a in 1u8..=6 {
            for b in 1u8..=6 {
                for c in 1u8..=6 {
                    for d in 1u8..=6 {
                        for e in 1u8..=6 {
                            out.push([a, b, c, d, e]);
                        }
                    }
                }
            }
        }
        out
    }

    #[test]
    fn score_is_permutation_invariant() {
        for hand in all_hands() {
            let base = scores_for_dice(hand);
            let mut rotated = hand;
            rotated.rotate_left(2);
            let mut reversed = hand;
            reversed.reverse();
            assert_eq!(scores_for_dice(rotated), base, "rotated {:?}", hand);
            assert_eq!(scores_for_dice(reversed), base, "reversed {:?}", hand);
        }
    }

    #[test]
    fn yatzy_scores_50_iff_all_equal() {
        for hand in all_hands() {
            let all_equal = hand.iter().all(|&d| d == hand[0]);
            let expected = if all_equal { 50 } else { 0 };
            assert_eq!(score(Category::Yatzy, hand), expected, "{:?}", hand);
            assert_eq!(is_yatzy(hand), all_equal);
        }
        assert_eq!(score(Category::Yatzy, [0; 5]), 0);
        assert!(!is_yatzy([0; 5]));
    }

    #[test]
    fn upper_categories_sum_matching_faces() {
        let hand = [3, 3, 5, 3, 1];
        assert_eq!(score(Category::Aces, hand), 1);
        assert_eq!(score(Category::Twos, hand), 0);
        assert_eq!(score(Category::Threes, hand), 9);
        assert_eq!(score(Category::Fives, hand), 5);
    }

    #[test]
    fn n_of_a_kind_sums_all_dice() {
        let hand = [5, 5, 5, 5, 2];
        assert_eq!(score(Category::ThreeOfAKind, hand), 22);
        assert_eq!(score(Category::FourOfAKind, hand), 22);
        assert_eq!(score(Category::Yatzy, hand), 0);

        let hand = [4, 4, 4, 1, 2];
        assert_eq!(score(Category::ThreeOfAKind, hand), 15);
        assert_eq!(score(Category::FourOfAKind, hand), 0);
    }

    #[test]
    fn full_house_requires_pair_and_triple() {
        assert_eq!(score(Category::FullHouse, [2, 2, 2, 5, 5]), 25);
        assert_eq!(score(Category::FullHouse, [2, 2, 3, 3, 3]), 25);
        assert_eq!(score(Category::FullHouse, [1, 1, 1, 1, 2]), 0);
        assert_eq!(score(Category::FullHouse, [6, 6, 6, 6, 6]), 0);
        assert_eq!(score(Category::FullHouse, [1, 1, 2, 2, 3]), 0);
    }

    #[test]
    fn straights() {
        assert_eq!(score(Category::SmallStraight, [1, 2, 3, 4, 6]), 30);
        assert_eq!(score(Category::SmallStraight, [4, 3, 5, 6, 6]), 30);
        assert_eq!(score(Category::SmallStraight, [1, 2, 4, 5, 6]), 0);

        assert_eq!(score(Category::LargeStraight, [5, 4, 3, 2, 1]), 40);
        assert_eq!(score(Category::LargeStraight, [2, 3, 4, 5, 6]), 40);
        assert_eq!(score(Category::LargeStraight, [1, 2, 3, 4, 6]), 0);
        // A large straight is also a small straight.
        assert_eq!(score(Category::SmallStraight, [2, 3, 4, 5, 6]), 30);
    }

    #[test]
    fn chance_is_unconditional_sum() {
        assert_eq!(score(Category::Chance, [1, 2, 3, 4, 6]), 16);
        assert_eq!(score(Category::Chance, [6, 6, 6, 6, 6]), 30);
    }

    #[test]
    fn unrolled_hand_scores_zero_everywhere() {
        assert_eq!(scores_for_dice([0; 5]), [0; 13]);
    }

    #[test]
    fn upper_bonus_threshold() {
        assert_eq!(upper_bonus(62), 0);
        assert_eq!(upper_bonus(63), 35);
        assert_eq!(upper_bonus(105), 35);
    }
}
