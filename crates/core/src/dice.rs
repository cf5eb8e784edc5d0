use crate::RandomSource;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DICE_COUNT: usize = 5;
pub const FACES: u8 = 6;

/// The five dice in play. Every face is always in `1..=6`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "[u8; DICE_COUNT]", into = "[u8; DICE_COUNT]")]
pub struct Hand([u8; DICE_COUNT]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidFace(pub u8);

impl fmt::Display for InvalidFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "die face {} outside 1..=6", self.0)
    }
}

impl Hand {
    pub fn new(dice: [u8; DICE_COUNT]) -> Result<Self, InvalidFace> {
        if let Some(bad) = dice.iter().copied().find(|face| !(1..=FACES).contains(face)) {
            return Err(InvalidFace(bad));
        }
        Ok(Self(dice))
    }

    pub fn random(rng: &mut impl RandomSource) -> Self {
        let mut dice = [1u8; DICE_COUNT];
        for die in &mut dice {
            *die = rng.roll_die();
        }
        Self(dice)
    }

    pub fn dice(&self) -> [u8; DICE_COUNT] {
        self.0
    }

    pub fn sum(&self) -> u32 {
        self.0.iter().map(|face| u32::from(*face)).sum()
    }

    /// `counts[v - 1]` is the number of dice showing `v`.
    pub fn face_counts(&self) -> [u8; FACES as usize] {
        let mut counts = [0u8; FACES as usize];
        for face in self.0 {
            counts[usize::from(face - 1)] += 1;
        }
        counts
    }

    /// Re-rolls every die whose mask entry is set; the rest keep their faces.
    pub fn reroll(&mut self, mask: &[bool; DICE_COUNT], rng: &mut impl RandomSource) {
        for (die, selected) in self.0.iter_mut().zip(mask) {
            if *selected {
                *die = rng.roll_die();
            }
        }
    }
}

impl TryFrom<[u8; DICE_COUNT]> for Hand {
    type Error = InvalidFace;

    fn try_from(value: [u8; DICE_COUNT]) -> Result<Self, Self::Error> {
        Hand::new(value)
    }
}

impl From<Hand> for [u8; DICE_COUNT] {
    fn from(value: Hand) -> Self {
        value.0
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.0.iter().map(|face| face.to_string()).collect();
        write!(f, "[{}]", faces.join(" "))
    }
}
