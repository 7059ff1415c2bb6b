use crate::{CardDef, CardId, Cue, EventDef, RngState, ValueRange};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Amount {
    Fixed(u32),
    Range(ValueRange),
}

impl Amount {
    pub fn resolve(&self, rng: &mut RngState) -> u32 {
        match self {
            Amount::Fixed(value) => *value,
            Amount::Range(range) => range.roll(rng),
        }
    }
}

/// Shared effect vocabulary for cards and events, applied in list order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum EffectOp {
    ReduceHealthToOne,
    TakeDamage(Amount),
    SacrificeCitizens(u32),
    Heal(u32),
    CallReinforcements(u32),
    Evacuate(Amount),
    StunEnemy(u32),
    ShuffleHand,
    ReduceNextDamage,
    DrawCards(u32),
    DiscardRandom(u32),
    ReplaceRandomCard(CardId),
    DisableRandomCards(u32),
    PlayCue(Cue),
}

impl CardDef {
    /// Costs first, then gains, then special effects.
    pub fn effect_ops(&self) -> Vec<EffectOp> {
        let mut ops = Vec::new();
        if self.reduce_health_to_one {
            ops.push(EffectOp::ReduceHealthToOne);
        }
        if let Some(range) = self.random_health_cost {
            ops.push(EffectOp::TakeDamage(Amount::Range(range)));
        } else if self.health_cost > 0 {
            ops.push(EffectOp::TakeDamage(Amount::Fixed(self.health_cost)));
            ops.push(EffectOp::PlayCue(Cue::PlayerDamage));
            ops.push(EffectOp::PlayCue(Cue::EnemyAttack));
        }
        if self.citizen_cost > 0 {
            ops.push(EffectOp::SacrificeCitizens(self.citizen_cost));
        }
        if self.heal > 0 {
            ops.push(EffectOp::Heal(self.heal));
        }
        if self.citizen_gain > 0 {
            ops.push(EffectOp::CallReinforcements(self.citizen_gain));
        }
        if self.evacuation > 0 {
            ops.push(EffectOp::Evacuate(Amount::Fixed(self.evacuation)));
        }
        if let Some(range) = self.random_evacuation {
            ops.push(EffectOp::Evacuate(Amount::Range(range)));
        }
        if self.enemy_stun_turns > 0 {
            ops.push(EffectOp::StunEnemy(self.enemy_stun_turns));
            ops.push(EffectOp::PlayCue(Cue::PlayerAttack));
        }
        ops
    }
}

impl EventDef {
    pub fn effect_ops(&self) -> Vec<EffectOp> {
        let mut ops = Vec::new();
        if self.health_change > 0 {
            ops.push(EffectOp::Heal(clamp_u32(self.health_change)));
        } else if self.health_change < 0 {
            ops.push(EffectOp::TakeDamage(Amount::Fixed(clamp_u32(
                -self.health_change,
            ))));
        }
        if self.citizen_change > 0 {
            ops.push(EffectOp::CallReinforcements(clamp_u32(self.citizen_change)));
        } else if self.citizen_change < 0 {
            ops.push(EffectOp::SacrificeCitizens(clamp_u32(-self.citizen_change)));
        }
        if self.enemy_stun_turns > 0 {
            ops.push(EffectOp::StunEnemy(self.enemy_stun_turns));
        }
        if self.shuffle_hand {
            ops.push(EffectOp::ShuffleHand);
        }
        if self.reduce_damage_next {
            ops.push(EffectOp::ReduceNextDamage);
        }
        if self.hand_size_change > 0 {
            ops.push(EffectOp::DrawCards(clamp_u32(self.hand_size_change)));
        } else if self.hand_size_change < 0 {
            ops.push(EffectOp::DiscardRandom(clamp_u32(-self.hand_size_change)));
        }
        if let Some(name) = &self.replace_card {
            ops.push(EffectOp::ReplaceRandomCard(CardId::new(name.clone())));
        }
        if self.disable_card_count > 0 {
            ops.push(EffectOp::DisableRandomCards(self.disable_card_count));
        }
        ops
    }
}

fn clamp_u32(value: i64) -> u32 {
    value.clamp(0, i64::from(u32::MAX)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_costs_precede_gains_and_specials() {
        let mut card = CardDef::new("Desperate Gambit");
        card.reduce_health_to_one = true;
        card.health_cost = 10;
        card.citizen_cost = 4;
        card.heal = 6;
        card.evacuation = 20;
        card.enemy_stun_turns = 2;
        assert_eq!(
            card.effect_ops(),
            vec![
                EffectOp::ReduceHealthToOne,
                EffectOp::TakeDamage(Amount::Fixed(10)),
                EffectOp::PlayCue(Cue::PlayerDamage),
                EffectOp::PlayCue(Cue::EnemyAttack),
                EffectOp::SacrificeCitizens(4),
                EffectOp::Heal(6),
                EffectOp::Evacuate(Amount::Fixed(20)),
                EffectOp::StunEnemy(2),
                EffectOp::PlayCue(Cue::PlayerAttack),
            ]
        );
    }

    #[test]
    fn random_health_cost_replaces_fixed_cost() {
        let mut card = CardDef::new("Wild Charge");
        card.health_cost = 10;
        card.random_health_cost = Some(ValueRange::new(5, 15));
        card.random_evacuation = Some(ValueRange::new(1, 3));
        assert_eq!(
            card.effect_ops(),
            vec![
                EffectOp::TakeDamage(Amount::Range(ValueRange::new(5, 15))),
                EffectOp::Evacuate(Amount::Range(ValueRange::new(1, 3))),
            ]
        );
    }

    #[test]
    fn event_deltas_lower_by_sign() {
        let mut event = EventDef::new("ambush");
        event.health_change = -12;
        event.citizen_change = -3;
        event.hand_size_change = -1;
        event.replace_card = Some("Incapacitated".to_string());
        assert_eq!(
            event.effect_ops(),
            vec![
                EffectOp::TakeDamage(Amount::Fixed(12)),
                EffectOp::SacrificeCitizens(3),
                EffectOp::DiscardRandom(1),
                EffectOp::ReplaceRandomCard(CardId::from("Incapacitated")),
            ]
        );

        let mut blessing = EventDef::new("blessing");
        blessing.health_change = 8;
        blessing.citizen_change = 5;
        blessing.shuffle_hand = true;
        blessing.reduce_damage_next = true;
        blessing.hand_size_change = 2;
        blessing.disable_card_count = 1;
        assert_eq!(
            blessing.effect_ops(),
            vec![
                EffectOp::Heal(8),
                EffectOp::CallReinforcements(5),
                EffectOp::ShuffleHand,
                EffectOp::ReduceNextDamage,
                EffectOp::DrawCards(2),
                EffectOp::DisableRandomCards(1),
            ]
        );
    }

    #[test]
    fn amount_resolves_within_range() {
        let mut rng = RngState::from_seed(21);
        let amount = Amount::Range(ValueRange::new(2, 4));
        for _ in 0..100 {
            assert!((2..=4).contains(&amount.resolve(&mut rng)));
        }
        assert_eq!(Amount::Fixed(9).resolve(&mut rng), 9);
    }
}
