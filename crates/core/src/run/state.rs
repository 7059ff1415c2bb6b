use super::*;
use crate::{Content, Event, NullReporter};

impl TurnEngine {
    pub fn new(settings: GameSettings, content: Content, seed: u64, ledger: EndingLedger) -> Self {
        let player = PlayerState::new(&settings);
        let card_pool = CardPool::new(content.cards, &settings);
        let event_pool = EventPool::new(content.events);
        Self {
            settings,
            player,
            card_pool,
            event_pool,
            ledger,
            reporter: Box::new(NullReporter),
            rng: RngState::from_seed(seed),
            events: EventBus::default(),
            phase: Phase::Initialize,
            running: true,
            turn: 1,
            enemy_stun_turns: 0,
            area: BattleArea::Market,
            retreat_count: 0,
            pending: None,
            offered_areas: None,
            selected_area: None,
            resetting_hand: false,
            hand_reset_action: false,
            outcome: None,
        }
    }

    pub fn with_reporter(mut self, reporter: Box<dyn ScoreReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn settings(&self) -> &GameSettings {
        &self.settings
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn card_pool(&self) -> &CardPool {
        &self.card_pool
    }

    pub fn event_pool(&self) -> &EventPool {
        &self.event_pool
    }

    pub fn ledger(&self) -> &EndingLedger {
        &self.ledger
    }

    pub fn into_ledger(self) -> EndingLedger {
        self.ledger
    }

    pub fn rng_seed(&self) -> u64 {
        self.rng.seed()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn enemy_stun_turns(&self) -> u32 {
        self.enemy_stun_turns
    }

    pub fn area(&self) -> BattleArea {
        self.area
    }

    pub fn retreat_count(&self) -> u32 {
        self.retreat_count
    }

    pub fn pending_card(&self) -> Option<&PendingCard> {
        self.pending.as_ref()
    }

    pub fn offered_areas(&self) -> Option<(BattleArea, BattleArea)> {
        self.offered_areas
    }

    pub fn outcome(&self) -> Option<&GameOutcome> {
        self.outcome.as_ref()
    }

    /// Signals queued since the last drain, in emission order.
    pub fn drain_events(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.flush_player_changes();
        self.events.drain()
    }

    pub(super) fn emit(&mut self, event: Event) {
        self.flush_player_changes();
        self.events.push(event);
    }

    pub(super) fn flush_player_changes(&mut self) {
        for change in self.player.drain_changes() {
            self.events.push(Event::Player(change));
        }
    }
}
