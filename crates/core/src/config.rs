use serde::{Deserialize, Serialize};

/// Card names gated behind each unlock threshold.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConditionCards {
    pub turn: Vec<String>,
    pub health: Vec<String>,
    pub population: Vec<String>,
}

impl Default for ConditionCards {
    fn default() -> Self {
        Self {
            turn: vec!["Prayer".to_string(), "Mysterious Magic".to_string()],
            health: vec!["Life Drain".to_string()],
            population: vec!["Last Stand".to_string()],
        }
    }
}

impl ConditionCards {
    pub fn contains(&self, name: &str) -> bool {
        self.turn
            .iter()
            .chain(self.health.iter())
            .chain(self.population.iter())
            .any(|card| card == name)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameSettings {
    pub max_health: u32,
    pub initial_citizens: u32,
    pub turn_death_count: u32,
    pub max_turns: u32,
    pub max_hand_size: usize,
    pub retreat_interval: u32,
    pub special_card_weight: f64,
    pub turn_condition_threshold: u32,
    pub health_condition_threshold: u32,
    pub population_condition_threshold: u32,
    pub condition_cards: ConditionCards,
    /// Cards that only events hand out; never drawn from the pool.
    pub event_only_cards: Vec<String>,
}

impl Default for GameSettings {
    fn default() -> Self {
        Self {
            max_health: 150,
            initial_citizens: 200,
            turn_death_count: 5,
            max_turns: 20,
            max_hand_size: 5,
            retreat_interval: 5,
            special_card_weight: 3.0,
            turn_condition_threshold: 15,
            health_condition_threshold: 20,
            population_condition_threshold: 50,
            condition_cards: ConditionCards::default(),
            event_only_cards: vec!["Incapacitated".to_string()],
        }
    }
}

impl GameSettings {
    pub fn is_condition_card(&self, name: &str) -> bool {
        self.condition_cards.contains(name)
    }

    pub fn is_event_only_card(&self, name: &str) -> bool {
        self.event_only_cards.iter().any(|card| card == name)
    }

    /// A retreat interval of zero disables retreats.
    pub fn is_retreat_turn(&self, turn: u32) -> bool {
        self.retreat_interval > 0 && turn % self.retreat_interval == 0
    }
}
