use super::{InvalidMove, MatchError};
use crate::*;
use tracing::debug;

impl MatchState {
    /// Resets the turn bookkeeping: all rolls available, every die selected.
    /// Refused once the owner has rolled. A turn that is already fresh is left
    /// alone and emits nothing.
    pub fn start_turn(
        &mut self,
        actor: Player,
        events: &mut EventBus,
    ) -> Result<(), MatchError> {
        self.ensure_active(actor)?;
        if self.has_rolled() {
            return Err(InvalidMove::TurnInProgress.into());
        }
        if self.selected == [true; DICE_COUNT] {
            return Ok(());
        }
        self.reset_turn();
        self.touch();
        events.push(Event::TurnStarted {
            player: self.turn,
            turns_left: self.turns_left,
        });
        Ok(())
    }

    /// Rolls the selected dice and uses up one roll. The first roll of a turn
    /// always covers all five dice. Afterwards nothing is selected, so the
    /// owner marks the dice to roll again.
    pub fn roll(
        &mut self,
        actor: Player,
        rng: &mut impl RandomSource,
        events: &mut EventBus,
    ) -> Result<Hand, MatchError> {
        self.ensure_active(actor)?;
        if self.rolls_left == 0 {
            return Err(InvalidMove::NoRollsLeft.into());
        }
        let mask = if self.has_rolled() {
            self.selected
        } else {
            [true; DICE_COUNT]
        };
        if !mask.iter().any(|selected| *selected) {
            return Err(InvalidMove::NothingSelected.into());
        }
        self.hand.reroll(&mask, rng);
        self.rolls_left -= 1;
        self.selected = [false; DICE_COUNT];
        self.touch();
        debug!(player = %actor, hand = %self.hand, rolls_left = self.rolls_left, "dice rolled");
        events.push(Event::DiceRolled {
            player: actor,
            hand: self.hand,
            rolls_left: self.rolls_left,
        });
        Ok(self.hand)
    }

    /// Flips whether a die will be re-rolled. Returns the new flag.
    pub fn toggle_die(
        &mut self,
        actor: Player,
        index: usize,
        events: &mut EventBus,
    ) -> Result<bool, MatchError> {
        self.ensure_selectable(actor)?;
        if index >= DICE_COUNT {
            return Err(InvalidMove::DieOutOfRange(index).into());
        }
        self.selected[index] = !self.selected[index];
        self.touch();
        events.push(Event::SelectionChanged {
            player: actor,
            selected: self.selected,
        });
        Ok(self.selected[index])
    }

    pub fn set_selection(
        &mut self,
        actor: Player,
        selected: [bool; DICE_COUNT],
        events: &mut EventBus,
    ) -> Result<(), MatchError> {
        self.ensure_selectable(actor)?;
        self.selected = selected;
        self.touch();
        events.push(Event::SelectionChanged {
            player: actor,
            selected,
        });
        Ok(())
    }

    /// Scores the current hand into `category` for the turn owner and passes
    /// the turn. Returns the points written.
    pub fn commit_category(
        &mut self,
        actor: Player,
        category: Category,
        events: &mut EventBus,
    ) -> Result<u32, MatchError> {
        self.ensure_active(actor)?;
        if !self.has_rolled() {
            return Err(InvalidMove::RollRequired.into());
        }
        if self.sheets[actor.index()].is_filled(category) {
            return Err(InvalidMove::CategoryFilled(category).into());
        }
        let turns_left = self
            .turns_left
            .checked_sub(1)
            .ok_or(MatchError::MatchAlreadyFinished)?;
        let score = score_hand(&self.hand).get(category);
        self.sheets[actor.index()].fill(category, score);
        self.turns_left = turns_left;
        self.touch();
        debug!(
            player = %actor,
            category = category.id(),
            score,
            turns_left = self.turns_left,
            "category committed"
        );
        events.push(Event::CategoryCommitted {
            player: actor,
            category,
            score,
            turns_left: self.turns_left,
        });

        if self.turns_left == 0 {
            self.finish(events);
        } else {
            self.turn = actor.other();
            self.reset_turn();
            events.push(Event::TurnStarted {
                player: self.turn,
                turns_left: self.turns_left,
            });
        }
        Ok(score)
    }

    pub fn commit_category_index(
        &mut self,
        actor: Player,
        index: usize,
        events: &mut EventBus,
    ) -> Result<u32, MatchError> {
        let category = Category::from_index(index).ok_or(InvalidMove::UnknownCategory(index))?;
        self.commit_category(actor, category, events)
    }

    fn ensure_selectable(&self, actor: Player) -> Result<(), MatchError> {
        self.ensure_active(actor)?;
        if !(1..ROLLS_PER_TURN).contains(&self.rolls_left) {
            return Err(InvalidMove::SelectionLocked.into());
        }
        Ok(())
    }

    pub(super) fn reset_turn(&mut self) {
        self.rolls_left = ROLLS_PER_TURN;
        self.selected = [true; DICE_COUNT];
    }
}
