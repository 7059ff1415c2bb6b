use crate::{BattleArea, EventDef, RngState};

#[derive(Debug, Clone, Default)]
pub struct EventPool {
    events: Vec<EventDef>,
}

impl EventPool {
    pub fn new(events: Vec<EventDef>) -> Self {
        if events.is_empty() {
            tracing::warn!(target: "striena::pool", "event catalog is empty");
        }
        Self { events }
    }

    pub fn events(&self) -> &[EventDef] {
        &self.events
    }

    pub fn eligible(&self, area: BattleArea) -> impl Iterator<Item = &EventDef> + '_ {
        self.events.iter().filter(move |event| event.can_occur_in(area))
    }

    /// Uniform pick among universal events and those bound to `area`.
    pub fn draw(&self, area: BattleArea, rng: &mut RngState) -> Option<&EventDef> {
        let eligible: Vec<&EventDef> = self.eligible(area).collect();
        let idx = rng.index(eligible.len())?;
        eligible.get(idx).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool() -> EventPool {
        let mut fire = EventDef::new("market_fire");
        fire.area = Some(BattleArea::Market);
        let mut bells = EventDef::new("cathedral_bells");
        bells.area = Some(BattleArea::Cathedral);
        let mut rain = EventDef::new("rain");
        rain.universal = true;
        rain.area = Some(BattleArea::Cathedral);
        EventPool::new(vec![fire, bells, rain])
    }

    #[test]
    fn draws_only_eligible_events() {
        let pool = pool();
        let mut rng = RngState::from_seed(4);
        for _ in 0..200 {
            let event = pool.draw(BattleArea::Market, &mut rng).expect("event");
            assert!(event.id == "market_fire" || event.id == "rain");
        }
        for _ in 0..50 {
            let event = pool.draw(BattleArea::BackAlley, &mut rng).expect("event");
            assert_eq!(event.id, "rain");
        }
    }

    #[test]
    fn no_eligible_event_yields_none() {
        let mut only_market = EventDef::new("market_fire");
        only_market.area = Some(BattleArea::Market);
        let pool = EventPool::new(vec![only_market]);
        let mut rng = RngState::from_seed(4);
        assert!(pool.draw(BattleArea::Residential, &mut rng).is_none());
        assert!(EventPool::default().draw(BattleArea::Market, &mut rng).is_none());
    }
}
