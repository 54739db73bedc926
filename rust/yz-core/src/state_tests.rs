use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;

use crate::category::Category;
use crate::state::{CommitError, DiceTurnState, GameState, Mode, Player, ROLLS_PER_TURN};

#[test]
fn roll_consumes_rolls_and_stops_at_zero() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut t = DiceTurnState::default();
    assert!(!t.has_rolled());

    for left in (0..ROLLS_PER_TURN).rev() {
        assert!(t.roll(&mut rng));
        assert_eq!(t.rolls_remaining, left);
        assert!(t.hand.iter().all(|d| (1..=6).contains(d)));
    }

    let before = t;
    assert!(!t.roll(&mut rng));
    assert_eq!(t, before);
}

#[test]
fn held_dice_are_never_rerolled() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut t = DiceTurnState::default();
    t.roll(&mut rng);
    assert!(t.toggle_hold(0));
    assert!(t.toggle_hold(3));
    let kept = (t.hand[0], t.hand[3]);

    t.roll(&mut rng);
    t.roll(&mut rng);
    assert_eq!((t.hand[0], t.hand[3]), kept);
}

#[test]
fn toggle_hold_rejected_before_first_roll() {
    let mut t = DiceTurnState::default();
    assert!(!t.toggle_hold(0));
    assert_eq!(t.held, [false; 5]);

    t.rolls_remaining = 2;
    assert!(!t.toggle_hold(5));
    assert!(t.toggle_hold(4));
    assert!(t.held[4]);
    assert!(t.toggle_hold(4));
    assert!(!t.held[4]);
}

#[test]
fn reset_restores_fresh_turn() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut t = DiceTurnState::default();
    t.roll(&mut rng);
    t.toggle_hold(2);
    t.reset();
    assert_eq!(t, DiceTurnState::default());
    assert_eq!(t.hand, [0; 5]);
    assert_eq!(t.rolls_remaining, 3);
}

#[test]
fn commit_is_write_once() {
    let mut p = Player::new("A");
    assert_eq!(p.commit_score(Category::Chance, 20), Ok(()));
    assert_eq!(
        p.commit_score(Category::Chance, 30),
        Err(CommitError::AlreadyScored(Category::Chance))
    );
    assert_eq!(p.score(Category::Chance), Some(20));
    assert_eq!(p.grand_total(), 20);
}

#[test]
fn bonus_only_counts_upper_section() {
    let mut p = Player::new("A");
    // 62 in the upper section: no bonus yet.
    p.commit_score(Category::Sixes, 30).unwrap();
    p.commit_score(Category::Fives, 20).unwrap();
    p.commit_score(Category::Fours, 12).unwrap();
    p.commit_score(Category::Chance, 30).unwrap();
    assert_eq!(p.upper_total(), 62);
    assert_eq!(p.bonus(), 0);
    assert_eq!(p.grand_total(), 92);

    p.commit_score(Category::Aces, 3).unwrap();
    assert_eq!(p.upper_total(), 65);
    assert_eq!(p.bonus(), 35);
    assert_eq!(p.grand_total(), 65 + 30 + 35);
}

#[test]
fn complete_after_all_categories() {
    let mut p = Player::new("A");
    for (i, cat) in Category::ALL.into_iter().enumerate() {
        assert!(!p.is_complete());
        p.commit_score(cat, i as u32).unwrap();
    }
    assert!(p.is_complete());
    assert_eq!(p.open_categories().count(), 0);
}

#[test]
fn fresh_game_state() {
    let s = GameState::new(42);
    assert_eq!(s.mode, Mode::ModeSelection);
    assert!(s.players.is_empty());
    assert!(s.current_player().is_none());
    assert!(!s.is_finished());
    assert_eq!(s.turn_started_ms, 42);
}
