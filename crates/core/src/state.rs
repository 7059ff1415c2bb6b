use crate::{CardDef, CardId, GameSettings, RngState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Phase {
    Initialize,
    DrawCard,
    PlayerAction,
    CardEffect,
    EnemyProgress,
    RandomEvent,
    CheckGameEnd,
    Retreat,
    GameEnd,
}

impl Phase {
    /// Default successor. `CheckGameEnd` and `Retreat` route explicitly in the engine.
    pub fn next(self) -> Phase {
        match self {
            Phase::Initialize => Phase::DrawCard,
            Phase::DrawCard => Phase::PlayerAction,
            Phase::PlayerAction => Phase::CardEffect,
            Phase::CardEffect => Phase::EnemyProgress,
            Phase::EnemyProgress => Phase::RandomEvent,
            Phase::RandomEvent => Phase::CheckGameEnd,
            Phase::CheckGameEnd => Phase::DrawCard,
            Phase::Retreat => Phase::DrawCard,
            Phase::GameEnd => Phase::GameEnd,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == Phase::GameEnd
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum BattleArea {
    Market,
    Residential,
    BackAlley,
    Cathedral,
}

impl BattleArea {
    pub const ALL: [BattleArea; 4] = [
        BattleArea::Market,
        BattleArea::Residential,
        BattleArea::BackAlley,
        BattleArea::Cathedral,
    ];
}

/// One notification per mutating player operation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum PlayerChange {
    Health { current: u32, max: u32 },
    Citizens {
        available: u32,
        evacuated: u32,
        killed: u32,
    },
    Hand { cards: usize },
    MaxHandSize { size: usize },
    DisabledCards { count: usize },
    DangerousUsage { count: u32 },
    DamageReduction { armed: bool },
}

#[derive(Debug, Clone)]
pub struct PlayerState {
    max_health: u32,
    initial_population: u32,
    health: u32,
    available: u32,
    evacuated: u32,
    killed: u32,
    dangerous_uses: u32,
    reduce_damage_next: bool,
    max_hand_size: usize,
    hand: Vec<CardDef>,
    disabled: BTreeMap<CardId, u32>,
    changes: Vec<PlayerChange>,
}

impl PlayerState {
    pub fn new(settings: &GameSettings) -> Self {
        Self {
            max_health: settings.max_health,
            initial_population: settings.initial_citizens,
            health: settings.max_health,
            available: settings.initial_citizens,
            evacuated: 0,
            killed: 0,
            dangerous_uses: 0,
            reduce_damage_next: false,
            max_hand_size: settings.max_hand_size,
            hand: Vec::new(),
            disabled: BTreeMap::new(),
            changes: Vec::new(),
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn available_citizens(&self) -> u32 {
        self.available
    }

    pub fn evacuated_citizens(&self) -> u32 {
        self.evacuated
    }

    pub fn killed_citizens(&self) -> u32 {
        self.killed
    }

    pub fn initial_population(&self) -> u32 {
        self.initial_population
    }

    pub fn dangerous_card_uses(&self) -> u32 {
        self.dangerous_uses
    }

    pub fn damage_reduction_armed(&self) -> bool {
        self.reduce_damage_next
    }

    pub fn max_hand_size(&self) -> usize {
        self.max_hand_size
    }

    pub fn hand(&self) -> &[CardDef] {
        &self.hand
    }

    pub fn disabled_cards(&self) -> &BTreeMap<CardId, u32> {
        &self.disabled
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn all_evacuated(&self) -> bool {
        self.available == 0 && self.evacuated > 0
    }

    pub fn evacuation_progress(&self) -> f64 {
        let total = self.available + self.evacuated;
        if total == 0 {
            return 0.0;
        }
        f64::from(self.evacuated) / f64::from(total)
    }

    /// Survivors over the starting population. Reinforcements can push this above 1.
    pub fn survival_rate(&self) -> f64 {
        if self.initial_population == 0 {
            return 0.0;
        }
        f64::from(self.available + self.evacuated) / f64::from(self.initial_population)
    }

    pub fn has_card(&self, id: &CardId) -> bool {
        self.hand.iter().any(|card| card.is(id))
    }

    pub fn is_card_disabled(&self, id: &CardId) -> bool {
        self.disabled.contains_key(id)
    }

    pub fn take_damage(&mut self, damage: u32) {
        let mut actual = damage;
        if self.reduce_damage_next {
            actual = damage.div_ceil(2);
            self.reduce_damage_next = false;
        }
        self.health = self.health.saturating_sub(actual);
        self.push_health();
    }

    pub fn heal(&mut self, amount: u32) {
        self.health = self.health.saturating_add(amount).min(self.max_health);
        self.push_health();
    }

    pub fn reduce_health_to_one(&mut self) {
        self.health = 1.min(self.max_health);
        self.push_health();
    }

    /// Moves up to `count` citizens from available to evacuated.
    pub fn evacuate(&mut self, count: u32) -> u32 {
        let moved = count.min(self.available);
        self.available -= moved;
        self.evacuated += moved;
        self.push_citizens();
        moved
    }

    pub fn call_reinforcements(&mut self, count: u32) {
        self.available = self.available.saturating_add(count);
        self.push_citizens();
    }

    /// Card cost: the full requested count is recorded as killed.
    pub fn sacrifice(&mut self, count: u32) {
        self.available = self.available.saturating_sub(count);
        self.killed = self.killed.saturating_add(count);
        self.push_citizens();
    }

    pub fn process_turn_deaths(&mut self, count: u32) -> u32 {
        let deaths = count.min(self.available);
        if deaths > 0 {
            self.available -= deaths;
            self.killed += deaths;
            self.push_citizens();
        }
        deaths
    }

    pub fn increment_dangerous_usage(&mut self) {
        self.dangerous_uses = self.dangerous_uses.saturating_add(1);
        self.changes.push(PlayerChange::DangerousUsage {
            count: self.dangerous_uses,
        });
    }

    pub fn arm_damage_reduction(&mut self) {
        self.reduce_damage_next = true;
        self.changes.push(PlayerChange::DamageReduction { armed: true });
    }

    pub fn change_max_hand_size(&mut self, delta: i64) {
        let next = (self.max_hand_size as i64).saturating_add(delta).max(0);
        self.max_hand_size = next as usize;
        self.changes.push(PlayerChange::MaxHandSize {
            size: self.max_hand_size,
        });
    }

    pub fn draw_card(&mut self, card: CardDef) {
        self.hand.push(card);
        self.push_hand();
    }

    /// Removes the first hand entry equal to `id`.
    pub fn remove_card(&mut self, id: &CardId) -> bool {
        let Some(idx) = self.hand.iter().position(|card| card.is(id)) else {
            return false;
        };
        self.hand.remove(idx);
        self.push_hand();
        true
    }

    pub fn remove_card_at(&mut self, index: usize) -> Option<CardDef> {
        if index >= self.hand.len() {
            return None;
        }
        let card = self.hand.remove(index);
        self.push_hand();
        Some(card)
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
        self.push_hand();
    }

    pub fn replace_random_card(&mut self, card: CardDef, rng: &mut RngState) -> bool {
        let Some(idx) = rng.index(self.hand.len()) else {
            return false;
        };
        self.hand[idx] = card;
        self.push_hand();
        true
    }

    /// Disables up to `count` distinct enabled hand cards for one turn.
    pub fn disable_random_cards(&mut self, count: u32, rng: &mut RngState) -> usize {
        let mut enabled: Vec<CardId> = Vec::new();
        for card in &self.hand {
            let id = card.id();
            if !self.disabled.contains_key(&id) && !enabled.contains(&id) {
                enabled.push(id);
            }
        }
        let target = (count as usize).min(enabled.len());
        for _ in 0..target {
            let Some(idx) = rng.index(enabled.len()) else {
                break;
            };
            let id = enabled.swap_remove(idx);
            self.disabled.insert(id, 1);
        }
        if target > 0 {
            self.push_disabled();
        }
        target
    }

    /// Counts every disabled entry down by one turn, releasing those that reach zero.
    pub fn tick_disabled_cards(&mut self) {
        if self.disabled.is_empty() {
            return;
        }
        self.disabled.retain(|_, turns| {
            *turns = turns.saturating_sub(1);
            *turns > 0
        });
        self.push_disabled();
    }

    pub fn drain_changes(&mut self) -> impl Iterator<Item = PlayerChange> + '_ {
        self.changes.drain(..)
    }

    fn push_health(&mut self) {
        self.changes.push(PlayerChange::Health {
            current: self.health,
            max: self.max_health,
        });
    }

    fn push_citizens(&mut self) {
        self.changes.push(PlayerChange::Citizens {
            available: self.available,
            evacuated: self.evacuated,
            killed: self.killed,
        });
    }

    fn push_hand(&mut self) {
        self.changes.push(PlayerChange::Hand {
            cards: self.hand.len(),
        });
    }

    fn push_disabled(&mut self) {
        self.changes.push(PlayerChange::DisabledCards {
            count: self.disabled.len(),
        });
    }
}
