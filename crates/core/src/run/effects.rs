use super::*;
use crate::{EffectOp, EngineHost, Event};

impl TurnEngine {
    pub(super) fn apply_effects(&mut self, ops: &[EffectOp], host: &mut dyn EngineHost) {
        for op in ops {
            self.apply_effect(op, host);
        }
    }

    fn apply_effect(&mut self, op: &EffectOp, host: &mut dyn EngineHost) {
        match op {
            EffectOp::ReduceHealthToOne => self.player.reduce_health_to_one(),
            EffectOp::TakeDamage(amount) => {
                let damage = amount.resolve(&mut self.rng);
                self.player.take_damage(damage);
            }
            EffectOp::SacrificeCitizens(count) => self.player.sacrifice(*count),
            EffectOp::Heal(amount) => self.player.heal(*amount),
            EffectOp::CallReinforcements(count) => self.player.call_reinforcements(*count),
            EffectOp::Evacuate(amount) => {
                let count = amount.resolve(&mut self.rng);
                self.player.evacuate(count);
            }
            EffectOp::StunEnemy(turns) => self.stun_enemy(*turns),
            EffectOp::ShuffleHand => {
                if let Err(err) = self.reset_hand(false, host) {
                    tracing::debug!(target: "striena::engine", %err, "hand shuffle skipped");
                }
            }
            EffectOp::ReduceNextDamage => self.player.arm_damage_reduction(),
            EffectOp::DrawCards(count) => {
                self.draw_additional_cards(*count, host);
            }
            EffectOp::DiscardRandom(count) => {
                self.remove_random_cards(*count);
            }
            EffectOp::ReplaceRandomCard(id) => {
                match self.card_pool.catalog_card(id.as_str()).cloned() {
                    Some(card) => {
                        self.player.replace_random_card(card, &mut self.rng);
                    }
                    None => {
                        tracing::warn!(
                            target: "striena::engine",
                            card = %id,
                            "replacement card not in catalog"
                        );
                    }
                }
            }
            EffectOp::DisableRandomCards(count) => {
                self.player.disable_random_cards(*count, &mut self.rng);
            }
            EffectOp::PlayCue(cue) => host.play_cue(*cue),
        }
    }

    /// Adds `turns` to the enemy's stun counter.
    pub fn stun_enemy(&mut self, turns: u32) {
        if turns == 0 {
            return;
        }
        self.enemy_stun_turns = self.enemy_stun_turns.saturating_add(turns);
        self.emit(Event::EnemyStunned {
            turns_left: self.enemy_stun_turns,
        });
    }
}
