use crate::RngState;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable card identity. Two definitions with the same name are the same card.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl ValueRange {
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    pub fn roll(&self, rng: &mut RngState) -> u32 {
        rng.range_inclusive(self.min, self.max)
    }
}

fn default_draw_weight() -> f64 {
    1.0
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDef {
    pub name: String,
    #[serde(default)]
    pub health_cost: u32,
    #[serde(default)]
    pub citizen_cost: u32,
    #[serde(default)]
    pub heal: u32,
    #[serde(default)]
    pub citizen_gain: u32,
    #[serde(default)]
    pub evacuation: u32,
    #[serde(default)]
    pub random_evacuation: Option<ValueRange>,
    #[serde(default)]
    pub random_health_cost: Option<ValueRange>,
    #[serde(default)]
    pub enemy_stun_turns: u32,
    #[serde(default)]
    pub reduce_health_to_one: bool,
    /// Counts toward the corruption ending.
    #[serde(default)]
    pub dangerous: bool,
    #[serde(default = "default_draw_weight")]
    pub draw_weight: f64,
}

impl CardDef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            health_cost: 0,
            citizen_cost: 0,
            heal: 0,
            citizen_gain: 0,
            evacuation: 0,
            random_evacuation: None,
            random_health_cost: None,
            enemy_stun_turns: 0,
            reduce_health_to_one: false,
            dangerous: false,
            draw_weight: default_draw_weight(),
        }
    }

    pub fn id(&self) -> CardId {
        CardId::new(self.name.clone())
    }

    pub fn is(&self, id: &CardId) -> bool {
        self.name == id.as_str()
    }
}

impl PartialEq for CardDef {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for CardDef {}
