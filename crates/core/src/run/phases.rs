use super::*;
use crate::{EngineHost, Event};

impl TurnEngine {
    /// Runs the current phase body once.
    pub fn step(&mut self, host: &mut dyn EngineHost) -> Step {
        let step = match self.phase {
            Phase::Initialize => self.initialize(host),
            Phase::DrawCard => self.draw_cards(host),
            Phase::PlayerAction => self.await_player_action(),
            Phase::CardEffect => self.resolve_card_effect(host),
            Phase::EnemyProgress => self.enemy_progress(host),
            Phase::RandomEvent => self.random_event(host),
            Phase::CheckGameEnd => self.check_game_end(),
            Phase::Retreat => self.retreat(host),
            Phase::GameEnd => self.game_end(),
        };
        self.flush_player_changes();
        step
    }

    /// Steps until the engine needs outside input or the game is over.
    pub fn run_until_blocked(&mut self, host: &mut dyn EngineHost) -> Step {
        loop {
            match self.step(host) {
                Step::Advanced(_) => continue,
                other => return other,
            }
        }
    }

    pub(super) fn change_phase(&mut self, next: Phase) {
        match next {
            Phase::PlayerAction => self.pending = None,
            Phase::Retreat => {
                self.offered_areas = None;
                self.selected_area = None;
            }
            _ => {}
        }
        tracing::debug!(
            target: "striena::engine",
            from = ?self.phase,
            to = ?next,
            turn = self.turn,
            "phase changed"
        );
        self.phase = next;
        self.emit(Event::PhaseChanged { phase: next });
    }

    fn advance(&mut self) -> Step {
        let next = self.phase.next();
        self.change_phase(next);
        Step::Advanced(next)
    }

    fn route(&mut self, next: Phase) -> Step {
        self.change_phase(next);
        Step::Advanced(next)
    }

    fn initialize(&mut self, host: &mut dyn EngineHost) -> Step {
        if !host.subsystem_ready() {
            return Step::Suspended(Wait::SubsystemReady);
        }
        host.pause(pacing::INITIALIZE_SETTLE);
        self.advance()
    }

    fn draw_cards(&mut self, host: &mut dyn EngineHost) -> Step {
        self.refresh_unlocks();
        while self.player.hand().len() < self.player.max_hand_size() {
            if !self.draw_one() {
                tracing::warn!(
                    target: "striena::engine",
                    hand = self.player.hand().len(),
                    limit = self.player.max_hand_size(),
                    "card pool exhausted while filling hand"
                );
                break;
            }
            host.pause(pacing::CARD_DRAW);
        }
        self.advance()
    }

    fn await_player_action(&mut self) -> Step {
        if self.pending.is_none() {
            return Step::Suspended(Wait::CardSelection);
        }
        self.advance()
    }

    fn resolve_card_effect(&mut self, host: &mut dyn EngineHost) -> Step {
        if self.hand_reset_action {
            self.hand_reset_action = false;
            self.pending = None;
            host.pause(pacing::HAND_RESET_ACTION);
            return self.advance();
        }
        let Some(PendingCard { card, index }) = self.pending.take() else {
            tracing::warn!(target: "striena::engine", "card effect phase without a selected card");
            return self.advance();
        };

        let ops = card.effect_ops();
        self.apply_effects(&ops, host);
        if card.dangerous {
            self.player.increment_dangerous_usage();
        }
        self.emit(Event::CardUsed {
            card: card.id(),
            index,
        });
        host.pause(pacing::CARD_USE);

        let id = card.id();
        let at_index = self
            .player
            .hand()
            .get(index)
            .is_some_and(|held| held.is(&id));
        if at_index {
            self.player.remove_card_at(index);
        } else {
            self.player.remove_card(&id);
        }
        host.pause(pacing::CARD_SETTLE);
        self.advance()
    }

    fn enemy_progress(&mut self, host: &mut dyn EngineHost) -> Step {
        if self.enemy_stun_turns > 0 {
            self.enemy_stun_turns -= 1;
            self.emit(Event::EnemyStunned {
                turns_left: self.enemy_stun_turns,
            });
        } else {
            self.player.process_turn_deaths(self.settings.turn_death_count);
        }
        host.pause(pacing::ENEMY_PROGRESS);
        self.advance()
    }

    fn random_event(&mut self, host: &mut dyn EngineHost) -> Step {
        if self.turn > 1 && self.turn % 3 == 0 {
            match self.event_pool.draw(self.area, &mut self.rng).cloned() {
                Some(event) => {
                    tracing::info!(
                        target: "striena::engine",
                        event = %event.id,
                        area = ?self.area,
                        turn = self.turn,
                        "random event"
                    );
                    self.emit(Event::RandomEventOccurred {
                        event: event.id.clone(),
                    });
                    let ops = event.effect_ops();
                    self.apply_effects(&ops, host);
                    host.pause(pacing::EVENT_DISPLAY);
                }
                None => {
                    tracing::warn!(
                        target: "striena::engine",
                        area = ?self.area,
                        "no random event eligible for area"
                    );
                }
            }
        }
        self.advance()
    }

    fn check_game_end(&mut self) -> Step {
        if !self.player.is_alive()
            || self.turn >= self.settings.max_turns
            || self.player.available_citizens() == 0
        {
            return self.route(Phase::GameEnd);
        }

        self.turn += 1;
        self.emit(Event::TurnAdvanced { turn: self.turn });
        self.player.tick_disabled_cards();

        if self.settings.is_retreat_turn(self.turn) {
            self.route(Phase::Retreat)
        } else {
            self.route(Phase::DrawCard)
        }
    }

    fn retreat(&mut self, host: &mut dyn EngineHost) -> Step {
        if self.offered_areas.is_none() {
            self.retreat_count += 1;
            host.pause(pacing::RETREAT_DIALOGUE);
            let (first, second) = self.draw_two_areas();
            self.offered_areas = Some((first, second));
            self.selected_area = None;
            self.emit(Event::AreaSelectionRequired { first, second });
            return Step::Suspended(Wait::AreaSelection);
        }
        let Some(area) = self.selected_area.take() else {
            return Step::Suspended(Wait::AreaSelection);
        };

        self.area = area;
        self.offered_areas = None;
        self.emit(Event::AreaChanged { area });
        host.pause(pacing::RETREAT_TRANSITION);
        self.route(Phase::DrawCard)
    }

    /// Two distinct areas, neither of them the current one.
    fn draw_two_areas(&mut self) -> (BattleArea, BattleArea) {
        let mut candidates: Vec<BattleArea> = BattleArea::ALL
            .into_iter()
            .filter(|area| *area != self.area)
            .collect();
        let first_idx = self.rng.index(candidates.len()).unwrap_or(0);
        let first = candidates.remove(first_idx);
        let second_idx = self.rng.index(candidates.len()).unwrap_or(0);
        let second = candidates[second_idx];
        (first, second)
    }
}
