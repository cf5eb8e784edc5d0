use crate::{upper_bonus, Category, BONUS_SLOT, CATEGORY_COUNT, SLOT_COUNT, TOTAL_SLOT, UPPER_COUNT};
use serde::{Deserialize, Serialize};

/// One player's score column. A slot's value only means something once its
/// filled flag is set, and a filled slot is never written again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSheet {
    scores: [u32; SLOT_COUNT],
    filled: [bool; SLOT_COUNT],
}

impl Default for ScoreSheet {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreSheet {
    pub fn new() -> Self {
        Self {
            scores: [0; SLOT_COUNT],
            filled: [false; SLOT_COUNT],
        }
    }

    pub fn is_filled(&self, category: Category) -> bool {
        self.filled[category.index()]
    }

    pub fn slot_filled(&self, slot: usize) -> bool {
        self.filled.get(slot).copied().unwrap_or(false)
    }

    /// Value of a slot if it has been filled.
    pub fn slot(&self, slot: usize) -> Option<u32> {
        self.slot_filled(slot).then(|| self.scores[slot])
    }

    pub fn score(&self, category: Category) -> Option<u32> {
        self.slot(category.index())
    }

    pub fn slots(&self) -> [(u32, bool); SLOT_COUNT] {
        let mut out = [(0, false); SLOT_COUNT];
        for (slot, entry) in out.iter_mut().enumerate() {
            *entry = (self.scores[slot], self.filled[slot]);
        }
        out
    }

    pub fn unfilled(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(|category| !self.is_filled(*category))
    }

    pub fn filled_count(&self) -> usize {
        self.filled[..CATEGORY_COUNT].iter().filter(|f| **f).count()
    }

    pub fn is_complete(&self) -> bool {
        self.filled_count() == CATEGORY_COUNT
    }

    pub fn upper_sum(&self) -> u32 {
        self.scores[..UPPER_COUNT].iter().sum()
    }

    pub fn bonus(&self) -> Option<u32> {
        self.slot(BONUS_SLOT)
    }

    pub fn total(&self) -> Option<u32> {
        self.slot(TOTAL_SLOT)
    }

    /// Running total of the committed categories, before any bonus.
    pub fn running_total(&self) -> u32 {
        self.scores[..CATEGORY_COUNT].iter().sum()
    }

    /// Returns false when the category was already filled.
    pub(crate) fn fill(&mut self, category: Category, score: u32) -> bool {
        let slot = category.index();
        if self.filled[slot] {
            return false;
        }
        self.scores[slot] = score;
        self.filled[slot] = true;
        true
    }

    /// Writes the Bonus and Total rows. Only meaningful once every category is
    /// filled; the caller guarantees that.
    pub(crate) fn finalize(&mut self) -> (u32, u32) {
        let bonus = upper_bonus(self.upper_sum());
        let total = bonus + self.running_total();
        self.scores[BONUS_SLOT] = bonus;
        self.scores[TOTAL_SLOT] = total;
        self.filled[BONUS_SLOT] = true;
        self.filled[TOTAL_SLOT] = true;
        (bonus, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_is_write_once() {
        let mut sheet = ScoreSheet::new();
        assert!(sheet.fill(Category::Chance, 17));
        assert!(!sheet.fill(Category::Chance, 30));
        assert_eq!(sheet.score(Category::Chance), Some(17));
        assert_eq!(sheet.score(Category::Ones), None);
    }

    #[test]
    fn finalize_applies_upper_bonus() {
        let mut sheet = ScoreSheet::new();
        let upper = [3, 6, 9, 12, 15, 18];
        for (category, score) in Category::ALL.into_iter().zip(upper) {
            sheet.fill(category, score);
        }
        for category in Category::ALL.into_iter().skip(UPPER_COUNT) {
            sheet.fill(category, 0);
        }
        assert!(sheet.is_complete());
        assert_eq!(sheet.finalize(), (35, 63 + 35));
        assert_eq!(sheet.bonus(), Some(35));
        assert_eq!(sheet.total(), Some(98));
    }
}
