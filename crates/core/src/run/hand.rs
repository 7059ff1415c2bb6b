use super::*;
use crate::{EngineHost, Event};

impl TurnEngine {
    /// Clears the hand and redraws the same number of cards.
    ///
    /// With `trigger_next_phase` the refill also counts as the turn's action:
    /// the first refilled card becomes the pending selection and the next
    /// card-effect phase resolves without applying anything.
    pub fn reset_hand(
        &mut self,
        trigger_next_phase: bool,
        host: &mut dyn EngineHost,
    ) -> Result<usize, RunError> {
        if !matches!(self.phase, Phase::PlayerAction | Phase::RandomEvent) {
            tracing::debug!(target: "striena::engine", phase = ?self.phase, "hand reset rejected");
            return Err(RunError::InvalidPhase(self.phase));
        }
        if self.resetting_hand {
            tracing::debug!(target: "striena::engine", "hand reset already running");
            return Err(RunError::HandResetInProgress);
        }
        self.resetting_hand = true;

        let previous = self.player.hand().len();
        host.pause(pacing::HAND_RESET_CLEAR);
        self.player.clear_hand();
        host.pause(pacing::HAND_RESET_REFILL);
        self.refresh_unlocks();

        let mut drawn = 0;
        for _ in 0..previous {
            if !self.draw_one() {
                tracing::warn!(
                    target: "striena::engine",
                    drawn,
                    wanted = previous,
                    "card pool exhausted during hand reset"
                );
                break;
            }
            drawn += 1;
            host.pause(pacing::CARD_DRAW);
        }
        self.emit(Event::HandReset { drawn });

        if trigger_next_phase {
            match self.player.hand().first().cloned() {
                Some(card) => {
                    self.pending = Some(PendingCard { card, index: 0 });
                    self.hand_reset_action = true;
                }
                None => {
                    tracing::warn!(
                        target: "striena::engine",
                        "hand empty after reset, nothing to resolve as the action"
                    );
                }
            }
        }

        self.resetting_hand = false;
        Ok(drawn)
    }

    /// Draws up to `count` extra cards and grows the hand limit by the number drawn.
    pub fn draw_additional_cards(&mut self, count: u32, host: &mut dyn EngineHost) -> usize {
        let mut drawn = 0;
        for _ in 0..count {
            if !self.draw_one() {
                tracing::warn!(target: "striena::engine", drawn, "card pool exhausted");
                break;
            }
            drawn += 1;
            host.pause(pacing::CARD_DRAW);
        }
        if drawn > 0 {
            self.player.change_max_hand_size(drawn as i64);
        }
        drawn
    }

    /// Removes up to `count` random hand cards and shrinks the hand limit to match.
    pub fn remove_random_cards(&mut self, count: u32) -> usize {
        let mut removed = 0;
        for _ in 0..count {
            let Some(idx) = self.rng.index(self.player.hand().len()) else {
                break;
            };
            if self.player.remove_card_at(idx).is_some() {
                removed += 1;
            }
        }
        if removed > 0 {
            self.player.change_max_hand_size(-(removed as i64));
        }
        removed
    }

    pub(super) fn refresh_unlocks(&mut self) {
        self.card_pool.update_conditions(
            self.turn,
            self.player.health(),
            self.player.available_citizens(),
        );
    }

    pub(super) fn draw_one(&mut self) -> bool {
        let Some(card) = self.card_pool.draw(&mut self.rng).cloned() else {
            return false;
        };
        self.player.draw_card(card);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardDef, Content, Headless};

    fn engine_at_player_action() -> TurnEngine {
        let content = Content::new(
            vec![CardDef::new("Guard"), CardDef::new("Lantern")],
            Vec::new(),
        );
        let mut engine = TurnEngine::new(
            GameSettings::default(),
            content,
            7,
            EndingLedger::default(),
        );
        let step = engine.run_until_blocked(&mut Headless);
        assert_eq!(step, Step::Suspended(Wait::CardSelection));
        engine
    }

    #[test]
    fn reset_keeps_hand_size() {
        let mut engine = engine_at_player_action();
        let drawn = engine.reset_hand(false, &mut Headless).expect("reset");
        assert_eq!(drawn, 5);
        assert_eq!(engine.player().hand().len(), 5);
        assert!(engine.pending_card().is_none());
    }

    #[test]
    fn reset_rejects_reentry() {
        let mut engine = engine_at_player_action();
        engine.resetting_hand = true;
        assert_eq!(
            engine.reset_hand(true, &mut Headless),
            Err(RunError::HandResetInProgress)
        );
        assert!(!engine.hand_reset_action);
    }

    #[test]
    fn triggered_reset_resolves_without_effects() {
        let mut engine = engine_at_player_action();
        engine.reset_hand(true, &mut Headless).expect("reset");
        let pending = engine.pending_card().expect("pending").clone();
        assert_eq!(pending.index, 0);

        let step = engine.step(&mut Headless);
        assert_eq!(step, Step::Advanced(Phase::CardEffect));
        let step = engine.step(&mut Headless);
        assert_eq!(step, Step::Advanced(Phase::EnemyProgress));
        assert_eq!(engine.player().hand().len(), 5);
        assert_eq!(engine.player().dangerous_card_uses(), 0);
    }

    #[test]
    fn extra_draws_and_discards_move_the_limit() {
        let mut engine = engine_at_player_action();
        assert_eq!(engine.draw_additional_cards(2, &mut Headless), 2);
        assert_eq!(engine.player().max_hand_size(), 7);
        assert_eq!(engine.player().hand().len(), 7);

        assert_eq!(engine.remove_random_cards(10), 7);
        assert_eq!(engine.player().max_hand_size(), 0);
        assert!(engine.player().hand().is_empty());
    }
}
