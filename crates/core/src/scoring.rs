use crate::{Category, Hand, CATEGORY_COUNT, DICE_COUNT};
use serde::{Deserialize, Serialize};

pub const FULL_HOUSE_SCORE: u32 = 25;
pub const SMALL_STRAIGHT_SCORE: u32 = 30;
pub const LARGE_STRAIGHT_SCORE: u32 = 40;
pub const YAHTZEE_SCORE: u32 = 50;
pub const UPPER_BONUS_THRESHOLD: u32 = 63;
pub const UPPER_BONUS: u32 = 35;

/// Achievable score of one hand in each of the 13 categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores(pub [u32; CATEGORY_COUNT]);

impl CategoryScores {
    pub fn get(&self, category: Category) -> u32 {
        self.0[category.index()]
    }

    pub fn as_array(&self) -> [u32; CATEGORY_COUNT] {
        self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, u32)> + '_ {
        Category::ALL.into_iter().zip(self.0.iter().copied())
    }
}

pub fn score_hand(hand: &Hand) -> CategoryScores {
    let counts = hand.face_counts();
    let total = hand.sum();
    let mut scores = [0u32; CATEGORY_COUNT];

    for (face_index, count) in counts.iter().enumerate() {
        scores[face_index] = u32::from(*count) * (face_index as u32 + 1);
    }

    let has_at_least = |n: u8| counts.iter().any(|count| *count >= n);
    let has_exactly = |n: u8| counts.contains(&n);

    scores[Category::ThreeOfAKind.index()] = if has_at_least(3) { total } else { 0 };
    scores[Category::FourOfAKind.index()] = if has_at_least(4) { total } else { 0 };
    // Five of a kind has no count of exactly 3, so it is not a full house.
    scores[Category::FullHouse.index()] = if has_exactly(3) && has_exactly(2) {
        FULL_HOUSE_SCORE
    } else {
        0
    };

    let run = longest_run(&counts);
    scores[Category::SmallStraight.index()] = if run >= 4 { SMALL_STRAIGHT_SCORE } else { 0 };
    scores[Category::LargeStraight.index()] = if run >= 5 { LARGE_STRAIGHT_SCORE } else { 0 };
    scores[Category::Chance.index()] = total;
    scores[Category::Yahtzee.index()] = if has_exactly(5) { YAHTZEE_SCORE } else { 0 };

    CategoryScores(scores)
}

pub fn score_dice(dice: [u8; DICE_COUNT]) -> Option<CategoryScores> {
    Hand::new(dice).ok().map(|hand| score_hand(&hand))
}

pub fn upper_bonus(upper_sum: u32) -> u32 {
    if upper_sum >= UPPER_BONUS_THRESHOLD {
        UPPER_BONUS
    } else {
        0
    }
}

/// Longest run of consecutive faces present, ignoring duplicates.
fn longest_run(counts: &[u8; 6]) -> usize {
    let mut best = 0;
    let mut current = 0;
    for count in counts {
        if *count > 0 {
            current += 1;
            best = best.max(current);
        } else {
            current = 0;
        }
    }
    best
}
