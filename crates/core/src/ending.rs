use crate::{KeyValueStore, MemoryStore, PlayerState, StoreError};
use serde::{Deserialize, Serialize};

const LAST_ENDING_KEY: &str = "LastEndingNumber";
const LAST_TURN_KEY: &str = "LastEndingTurn";
const LAST_SURVIVAL_RATE_KEY: &str = "LastEndingSurvivalRate";
const LAST_EVACUATED_KEY: &str = "LastEndingEvacuated";
const LAST_KILLED_KEY: &str = "LastEndingKilled";
const LAST_DANGEROUS_KEY: &str = "LastEndingDangerousCardCount";
const COLLECTED_KEY: &str = "CollectedEndings";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Ending {
    GameOver,
    AllEvacuated,
    HighSurvival,
    LowSurvival,
    Corruption,
}

impl Ending {
    pub const ALL: [Ending; 5] = [
        Ending::GameOver,
        Ending::AllEvacuated,
        Ending::HighSurvival,
        Ending::LowSurvival,
        Ending::Corruption,
    ];

    /// Persisted identifier.
    pub fn number(self) -> u32 {
        match self {
            Ending::GameOver => 1,
            Ending::AllEvacuated => 2,
            Ending::HighSurvival => 3,
            Ending::LowSurvival => 4,
            Ending::Corruption => 5,
        }
    }

    pub fn from_number(number: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|ending| ending.number() == number)
    }

    pub fn is_true_ending(self) -> bool {
        self == Ending::AllEvacuated
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EndingInputs {
    pub is_alive: bool,
    pub turn: u32,
    pub max_turns: u32,
    pub dangerous_card_uses: u32,
    pub survival_rate: f64,
}

impl EndingInputs {
    pub fn from_player(player: &PlayerState, turn: u32, max_turns: u32) -> Self {
        Self {
            is_alive: player.is_alive(),
            turn,
            max_turns,
            dangerous_card_uses: player.dangerous_card_uses(),
            survival_rate: player.survival_rate(),
        }
    }
}

/// First matching rule wins.
pub fn classify(inputs: EndingInputs) -> Ending {
    if !inputs.is_alive {
        return Ending::GameOver;
    }
    if inputs.turn >= inputs.max_turns {
        return Ending::GameOver;
    }
    if inputs.dangerous_card_uses > 1 {
        return Ending::Corruption;
    }
    if inputs.survival_rate >= 1.0 {
        return Ending::AllEvacuated;
    }
    if inputs.survival_rate >= 0.5 {
        return Ending::HighSurvival;
    }
    Ending::LowSurvival
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EndingSnapshot {
    pub turn: u32,
    pub survival_rate: f64,
    pub evacuated: u32,
    pub killed: u32,
    pub dangerous_card_uses: u32,
}

impl EndingSnapshot {
    pub fn capture(player: &PlayerState, turn: u32) -> Self {
        Self {
            turn,
            survival_rate: player.survival_rate(),
            evacuated: player.evacuated_citizens(),
            killed: player.killed_citizens(),
            dangerous_card_uses: player.dangerous_card_uses(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EndingRecord {
    pub ending: Ending,
    pub snapshot: EndingSnapshot,
}

/// Persisted ending history: the last ending reached and the set of every ending ever reached.
pub struct EndingLedger {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for EndingLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EndingLedger")
            .field("collected", &self.collected())
            .finish()
    }
}

impl Default for EndingLedger {
    fn default() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }
}

impl EndingLedger {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    pub fn into_store(self) -> Box<dyn KeyValueStore> {
        self.store
    }

    /// Overwrites the last-ending record and adds `ending` to the reached set if it is new.
    pub fn record_and_persist(
        &mut self,
        ending: Ending,
        snapshot: &EndingSnapshot,
    ) -> Result<(), StoreError> {
        self.store.set(LAST_ENDING_KEY, ending.number().to_string());
        self.store.set(LAST_TURN_KEY, snapshot.turn.to_string());
        self.store.set(LAST_SURVIVAL_RATE_KEY, snapshot.survival_rate.to_string());
        self.store.set(LAST_EVACUATED_KEY, snapshot.evacuated.to_string());
        self.store.set(LAST_KILLED_KEY, snapshot.killed.to_string());
        self.store.set(LAST_DANGEROUS_KEY, snapshot.dangerous_card_uses.to_string());

        let mut collected = self.collected();
        if !collected.contains(&ending) {
            collected.push(ending);
            let joined = collected
                .iter()
                .map(|ending| ending.number().to_string())
                .collect::<Vec<_>>()
                .join(",");
            self.store.set(COLLECTED_KEY, joined);
        }
        self.store.flush()
    }

    /// Reached endings in first-reached order. Unknown ids in the store are skipped.
    pub fn collected(&self) -> Vec<Ending> {
        let Some(raw) = self.store.get(COLLECTED_KEY) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        for part in raw.split(',') {
            let Ok(number) = part.trim().parse::<u32>() else {
                continue;
            };
            if let Some(ending) = Ending::from_number(number) {
                if !out.contains(&ending) {
                    out.push(ending);
                }
            }
        }
        out
    }

    pub fn collected_count(&self) -> usize {
        self.collected().len()
    }

    pub fn is_collected(&self, ending: Ending) -> bool {
        self.collected().contains(&ending)
    }

    pub fn last_record(&self) -> Option<EndingRecord> {
        let ending = self
            .store
            .get(LAST_ENDING_KEY)
            .and_then(|raw| raw.parse::<u32>().ok())
            .and_then(Ending::from_number)?;
        let number = |key: &str| {
            self.store
                .get(key)
                .and_then(|raw| raw.parse::<u32>().ok())
                .unwrap_or(0)
        };
        let survival_rate = self
            .store
            .get(LAST_SURVIVAL_RATE_KEY)
            .and_then(|raw| raw.parse::<f64>().ok())
            .unwrap_or(0.0);
        Some(EndingRecord {
            ending,
            snapshot: EndingSnapshot {
                turn: number(LAST_TURN_KEY),
                survival_rate,
                evacuated: number(LAST_EVACUATED_KEY),
                killed: number(LAST_KILLED_KEY),
                dangerous_card_uses: number(LAST_DANGEROUS_KEY),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(turn: u32) -> EndingSnapshot {
        EndingSnapshot {
            turn,
            survival_rate: 0.75,
            evacuated: 120,
            killed: 50,
            dangerous_card_uses: 1,
        }
    }

    #[test]
    fn numbers_round_trip() {
        for ending in Ending::ALL {
            assert_eq!(Ending::from_number(ending.number()), Some(ending));
        }
        assert_eq!(Ending::from_number(0), None);
        assert!(Ending::AllEvacuated.is_true_ending());
        assert!(!Ending::HighSurvival.is_true_ending());
    }

    #[test]
    fn recording_same_ending_twice_keeps_set_size() {
        let mut ledger = EndingLedger::default();
        ledger
            .record_and_persist(Ending::HighSurvival, &snapshot(12))
            .expect("record");
        ledger
            .record_and_persist(Ending::GameOver, &snapshot(20))
            .expect("record");
        ledger
            .record_and_persist(Ending::HighSurvival, &snapshot(9))
            .expect("record");
        assert_eq!(
            ledger.collected(),
            vec![Ending::HighSurvival, Ending::GameOver]
        );
        assert_eq!(ledger.collected_count(), 2);
        let last = ledger.last_record().expect("last");
        assert_eq!(last.ending, Ending::HighSurvival);
        assert_eq!(last.snapshot, snapshot(9));
    }

    #[test]
    fn collected_list_is_comma_joined_numbers() {
        let mut ledger = EndingLedger::default();
        ledger
            .record_and_persist(Ending::Corruption, &snapshot(7))
            .expect("record");
        ledger
            .record_and_persist(Ending::AllEvacuated, &snapshot(8))
            .expect("record");
        assert_eq!(
            ledger.store().get("CollectedEndings").as_deref(),
            Some("5,2")
        );
        assert_eq!(ledger.store().get("LastEndingNumber").as_deref(), Some("2"));
        assert_eq!(ledger.store().get("LastEndingTurn").as_deref(), Some("8"));
    }

    #[test]
    fn corrupt_collected_entries_are_ignored() {
        let mut store = MemoryStore::new();
        store.set("CollectedEndings", "3,x,,9,3,1".to_string());
        let ledger = EndingLedger::new(Box::new(store));
        assert_eq!(ledger.collected(), vec![Ending::HighSurvival, Ending::GameOver]);
        assert!(ledger.last_record().is_none());
    }
}
