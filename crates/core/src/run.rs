use crate::{
    BattleArea, CardDef, CardId, CardPool, Ending, EndingLedger, EndingSnapshot, EventBus,
    EventPool, GameSettings, Phase, PlayerState, RngState, ScoreReporter,
};
use thiserror::Error;

mod actions;
mod effects;
mod end;
mod hand;
mod phases;
mod state;

/// Pacing delays requested from the host between observable steps.
pub mod pacing {
    use std::time::Duration;

    pub const INITIALIZE_SETTLE: Duration = Duration::from_millis(500);
    pub const CARD_DRAW: Duration = Duration::from_millis(200);
    pub const HAND_RESET_ACTION: Duration = Duration::from_millis(100);
    pub const CARD_USE: Duration = Duration::from_millis(300);
    pub const CARD_SETTLE: Duration = Duration::from_millis(200);
    pub const ENEMY_PROGRESS: Duration = Duration::from_millis(500);
    pub const EVENT_DISPLAY: Duration = Duration::from_millis(2000);
    pub const RETREAT_DIALOGUE: Duration = Duration::from_millis(1500);
    pub const RETREAT_TRANSITION: Duration = Duration::from_millis(1500);
    pub const HAND_RESET_CLEAR: Duration = Duration::from_millis(300);
    pub const HAND_RESET_REFILL: Duration = Duration::from_millis(200);
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RunError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("card not in hand: {0}")]
    CardNotInHand(CardId),
    #[error("card is disabled: {0}")]
    CardDisabled(CardId),
    #[error("invalid hand index: {0}")]
    InvalidHandIndex(usize),
    #[error("no areas on offer")]
    NoAreasOffered,
    #[error("hand reset already in progress")]
    HandResetInProgress,
}

/// What the driver must supply before the engine can continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wait {
    SubsystemReady,
    CardSelection,
    AreaSelection,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Advanced(Phase),
    Suspended(Wait),
    Finished(Ending),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingCard {
    pub card: CardDef,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameOutcome {
    pub ending: Ending,
    pub snapshot: EndingSnapshot,
    pub cleared: bool,
    pub score: Option<u32>,
    pub collected_endings: usize,
}

pub struct TurnEngine {
    settings: GameSettings,
    player: PlayerState,
    card_pool: CardPool,
    event_pool: EventPool,
    ledger: EndingLedger,
    reporter: Box<dyn ScoreReporter>,
    rng: RngState,
    events: EventBus,
    phase: Phase,
    running: bool,
    turn: u32,
    enemy_stun_turns: u32,
    area: BattleArea,
    retreat_count: u32,
    pending: Option<PendingCard>,
    offered_areas: Option<(BattleArea, BattleArea)>,
    selected_area: Option<BattleArea>,
    resetting_hand: bool,
    hand_reset_action: bool,
    outcome: Option<GameOutcome>,
}

impl std::fmt::Debug for TurnEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TurnEngine")
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("area", &self.area)
            .field("enemy_stun_turns", &self.enemy_stun_turns)
            .field("player", &self.player)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}
