use super::*;
use crate::{classify, clear_score, EndingInputs, Event, ENDING_COUNT_BOARD, SCORE_BOARD};

impl TurnEngine {
    pub(super) fn game_end(&mut self) -> Step {
        if let Some(outcome) = &self.outcome {
            return Step::Finished(outcome.ending);
        }
        self.running = false;

        let snapshot = EndingSnapshot::capture(&self.player, self.turn);
        let ending = classify(EndingInputs::from_player(
            &self.player,
            self.turn,
            self.settings.max_turns,
        ));
        tracing::info!(
            target: "striena::ending",
            ending = ?ending,
            turn = self.turn,
            survival_rate = snapshot.survival_rate,
            dangerous = snapshot.dangerous_card_uses,
            "run finished"
        );
        if let Err(err) = self.ledger.record_and_persist(ending, &snapshot) {
            tracing::error!(target: "striena::ending", %err, "failed to persist ending");
        }

        let cleared = self.player.is_alive()
            && self.turn < self.settings.max_turns
            && self.player.available_citizens() == 0;
        let score = if cleared {
            let score = clear_score(snapshot.survival_rate, self.turn, self.settings.max_turns);
            self.report(SCORE_BOARD, score);
            Some(score)
        } else {
            None
        };
        let collected_endings = self.ledger.collected_count();
        self.report(ENDING_COUNT_BOARD, collected_endings as u32);

        self.outcome = Some(GameOutcome {
            ending,
            snapshot,
            cleared,
            score,
            collected_endings,
        });
        self.emit(Event::GameEnded { ending });
        Step::Finished(ending)
    }

    fn report(&mut self, board: u32, value: u32) {
        match self.reporter.submit(board, value) {
            Ok(()) => self.emit(Event::ScoreReported { board, value }),
            Err(err) => {
                tracing::error!(
                    target: "striena::ending",
                    board,
                    value,
                    %err,
                    "score report failed"
                );
            }
        }
    }
}
