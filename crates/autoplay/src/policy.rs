use yahtzee_core::{Category, CategoryScores, RandomSource, ScoreSheet, CATEGORY_COUNT, DICE_COUNT};

/// Highest-scoring open category whose score reaches its minimum. Ties go to
/// the lowest category index.
pub fn preferred_category(
    scores: &CategoryScores,
    sheet: &ScoreSheet,
    min_scores: &[u32; CATEGORY_COUNT],
) -> Option<Category> {
    best_open(scores, sheet, |category, score| {
        score >= min_scores[category.index()]
    })
}

/// Highest-scoring open category regardless of minimums. Ties go to the
/// lowest category index.
pub fn fallback_category(scores: &CategoryScores, sheet: &ScoreSheet) -> Option<Category> {
    best_open(scores, sheet, |_, _| true)
}

/// Each die is independently picked for the next roll with even odds.
pub fn random_selection(rng: &mut impl RandomSource) -> [bool; DICE_COUNT] {
    let mut mask = [false; DICE_COUNT];
    for die in &mut mask {
        *die = rng.coin_flip();
    }
    mask
}

fn best_open(
    scores: &CategoryScores,
    sheet: &ScoreSheet,
    accept: impl Fn(Category, u32) -> bool,
) -> Option<Category> {
    let mut best: Option<(Category, u32)> = None;
    for (category, score) in scores.iter() {
        if sheet.is_filled(category) || !accept(category, score) {
            continue;
        }
        if best.map_or(true, |(_, top)| score > top) {
            best = Some((category, score));
        }
    }
    best.map(|(category, _)| category)
}
