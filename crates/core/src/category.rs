use serde::{Deserialize, Serialize};

/// Scoring categories a player commits to, in sheet order.
pub const CATEGORY_COUNT: usize = 13;
/// Sheet slots: the 13 categories plus the derived Bonus and Total rows.
pub const SLOT_COUNT: usize = 15;
pub const BONUS_SLOT: usize = 13;
pub const TOTAL_SLOT: usize = 14;
pub const UPPER_COUNT: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeOfAKind,
    FourOfAKind,
    FullHouse,
    SmallStraight,
    LargeStraight,
    Chance,
    Yahtzee,
}

impl Category {
    pub const ALL: [Category; CATEGORY_COUNT] = [
        Category::Ones,
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
        Category::Chance,
        Category::Yahtzee,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn id(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::ThreeOfAKind => "three_kind",
            Category::FourOfAKind => "four_kind",
            Category::FullHouse => "full_house",
            Category::SmallStraight => "small_straight",
            Category::LargeStraight => "large_straight",
            Category::Chance => "chance",
            Category::Yahtzee => "yahtzee",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Ones => "Ones",
            Category::Twos => "Twos",
            Category::Threes => "Threes",
            Category::Fours => "Fours",
            Category::Fives => "Fives",
            Category::Sixes => "Sixes",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::FourOfAKind => "Four of a Kind",
            Category::FullHouse => "Full House",
            Category::SmallStraight => "Small Straight",
            Category::LargeStraight => "Large Straight",
            Category::Chance => "Chance",
            Category::Yahtzee => "Yahtzee",
        }
    }

    /// Accepts the id, the label in any case, or the sheet index.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if let Ok(index) = value.parse::<usize>() {
            return Self::from_index(index);
        }
        let normalized = value.to_ascii_lowercase().replace([' ', '-'], "_");
        Self::ALL.into_iter().find(|category| {
            category.id() == normalized || category.label().eq_ignore_ascii_case(value)
        })
    }
}

/// Display label for any sheet slot, derived rows included.
pub fn slot_label(slot: usize) -> &'static str {
    match slot {
        BONUS_SLOT => "Bonus",
        TOTAL_SLOT => "Total",
        other => Category::from_index(other).map(Category::label).unwrap_or("?"),
    }
}
