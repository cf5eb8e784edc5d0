use crate::*;
use tracing::info;

impl MatchState {
    /// Runs once, when the last category of the match is committed.
    pub(super) fn finish(&mut self, events: &mut EventBus) {
        let (player_bonus, player_total) = self.sheets[Player::Human.index()].finalize();
        let (_, opponent_total) = self.sheets[Player::Computer.index()].finalize();
        let outcome = Outcome::from_totals(player_total, opponent_total);
        let got_yahtzee = self.sheet(Player::Human).score(Category::Yahtzee) == Some(YAHTZEE_SCORE);

        self.result = Some(MatchResult {
            my_points: player_total,
            opponent_points: opponent_total,
            outcome,
            got_bonus: player_bonus > 0,
            got_yahtzee,
            timestamp: now_ms(),
        });
        self.finished = true;
        self.reset_turn();

        info!(%outcome, player_total, opponent_total, "match finished");
        events.push(Event::MatchFinished {
            outcome,
            player_total,
            opponent_total,
        });
    }

    /// Hands the finished match to `sink`, at most once per match. Returns
    /// whether anything was written by this call.
    pub fn flush_result<S: ResultSink>(&mut self, sink: &mut S) -> Result<bool, S::Error> {
        if self.result_saved {
            return Ok(false);
        }
        let Some(result) = self.result.as_ref() else {
            return Ok(false);
        };
        sink.save_result(result)?;
        self.result_saved = true;
        Ok(true)
    }

    pub fn result_saved(&self) -> bool {
        self.result_saved
    }
}
