use crate::{BattleArea, CardDef};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDef {
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effect_description: String,
    /// Universal events ignore `area`.
    #[serde(default)]
    pub universal: bool,
    #[serde(default)]
    pub area: Option<BattleArea>,
    #[serde(default)]
    pub health_change: i64,
    #[serde(default)]
    pub citizen_change: i64,
    #[serde(default)]
    pub enemy_stun_turns: u32,
    #[serde(default)]
    pub shuffle_hand: bool,
    #[serde(default)]
    pub reduce_damage_next: bool,
    #[serde(default)]
    pub hand_size_change: i64,
    #[serde(default)]
    pub replace_card: Option<String>,
    #[serde(default)]
    pub disable_card_count: u32,
}

impl EventDef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: String::new(),
            effect_description: String::new(),
            universal: false,
            area: None,
            health_change: 0,
            citizen_change: 0,
            enemy_stun_turns: 0,
            shuffle_hand: false,
            reduce_damage_next: false,
            hand_size_change: 0,
            replace_card: None,
            disable_card_count: 0,
        }
    }

    pub fn can_occur_in(&self, area: BattleArea) -> bool {
        self.universal || self.area == Some(area)
    }
}

/// Catalogs handed to the engine, already loaded by the caller.
#[derive(Debug, Clone, Default)]
pub struct Content {
    pub cards: Vec<CardDef>,
    pub events: Vec<EventDef>,
}

impl Content {
    pub fn new(cards: Vec<CardDef>, events: Vec<EventDef>) -> Self {
        Self { cards, events }
    }

    pub fn card_by_name(&self, name: &str) -> Option<&CardDef> {
        self.cards.iter().find(|card| card.name == name)
    }

    pub fn event_by_id(&self, id: &str) -> Option<&EventDef> {
        self.events.iter().find(|event| event.id == id)
    }
}
