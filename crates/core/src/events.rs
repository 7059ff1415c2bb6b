use crate::{BattleArea, CardId, Ending, Phase, PlayerChange};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    PhaseChanged { phase: Phase },
    TurnAdvanced { turn: u32 },
    CardUsed { card: CardId, index: usize },
    EnemyStunned { turns_left: u32 },
    RandomEventOccurred { event: String },
    AreaSelectionRequired {
        first: BattleArea,
        second: BattleArea,
    },
    AreaChanged { area: BattleArea },
    HandReset { drawn: usize },
    Player(PlayerChange),
    ScoreReported { board: u32, value: u32 },
    GameEnded { ending: Ending },
}

impl Event {
    pub fn ending(&self) -> Option<Ending> {
        match self {
            Event::GameEnded { ending } => Some(*ending),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn pending(&self) -> &[Event] {
        &self.queue
    }
}
