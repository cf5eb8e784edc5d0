use crate::{Category, Hand, Outcome, Player, DICE_COUNT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    TurnStarted {
        player: Player,
        turns_left: u8,
    },
    DiceRolled {
        player: Player,
        hand: Hand,
        rolls_left: u8,
    },
    SelectionChanged {
        player: Player,
        selected: [bool; DICE_COUNT],
    },
    CategoryCommitted {
        player: Player,
        category: Category,
        score: u32,
        turns_left: u8,
    },
    MatchFinished {
        outcome: Outcome,
        player_total: u32,
        opponent_total: u32,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }
}
