use crate::{CardDef, GameSettings, RngState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockKind {
    Turn,
    Health,
    Population,
}

#[derive(Debug, Clone)]
struct UnlockRule {
    kind: UnlockKind,
    threshold: u32,
    cards: Vec<String>,
    met: bool,
}

impl UnlockRule {
    fn triggered(&self, turn: u32, health: u32, remaining: u32) -> bool {
        match self.kind {
            UnlockKind::Turn => turn > self.threshold,
            UnlockKind::Health => health < self.threshold,
            UnlockKind::Population => remaining < self.threshold,
        }
    }
}

/// Weighted draw pool with one-shot condition unlocks.
#[derive(Debug, Clone)]
pub struct CardPool {
    catalog: Vec<CardDef>,
    cards: Vec<CardDef>,
    rules: Vec<UnlockRule>,
    condition_multiplier: f64,
}

impl CardPool {
    pub fn new(catalog: Vec<CardDef>, settings: &GameSettings) -> Self {
        let cards = catalog
            .iter()
            .filter(|card| {
                !settings.is_condition_card(&card.name) && !settings.is_event_only_card(&card.name)
            })
            .cloned()
            .collect();
        let conditions = &settings.condition_cards;
        let rules = vec![
            UnlockRule {
                kind: UnlockKind::Turn,
                threshold: settings.turn_condition_threshold,
                cards: conditions.turn.clone(),
                met: false,
            },
            UnlockRule {
                kind: UnlockKind::Health,
                threshold: settings.health_condition_threshold,
                cards: conditions.health.clone(),
                met: false,
            },
            UnlockRule {
                kind: UnlockKind::Population,
                threshold: settings.population_condition_threshold,
                cards: conditions.population.clone(),
                met: false,
            },
        ];
        Self {
            catalog,
            cards,
            rules,
            condition_multiplier: settings.special_card_weight,
        }
    }

    pub fn cards(&self) -> &[CardDef] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Looks a card up in the full catalog, including locked and event-only cards.
    pub fn catalog_card(&self, name: &str) -> Option<&CardDef> {
        self.catalog.iter().find(|card| card.name == name)
    }

    pub fn is_unlocked(&self, kind: UnlockKind) -> bool {
        self.rules.iter().any(|rule| rule.kind == kind && rule.met)
    }

    pub fn weight_of(&self, card: &CardDef) -> f64 {
        let base = card.draw_weight.max(0.0);
        if self.is_condition_card(&card.name) {
            base * self.condition_multiplier
        } else {
            base
        }
    }

    pub fn total_weight(&self) -> f64 {
        self.cards.iter().map(|card| self.weight_of(card)).sum()
    }

    pub fn draw(&self, rng: &mut RngState) -> Option<&CardDef> {
        let last = self.cards.last()?;
        let roll = rng.next_unit() * self.total_weight();
        let mut cumulative = 0.0;
        for card in &self.cards {
            cumulative += self.weight_of(card);
            if roll <= cumulative {
                return Some(card);
            }
        }
        Some(last)
    }

    /// Appends each condition group once its threshold is crossed. Returns how many cards joined.
    pub fn update_conditions(&mut self, turn: u32, health: u32, remaining: u32) -> usize {
        let mut added = 0;
        for idx in 0..self.rules.len() {
            let rule = &self.rules[idx];
            if rule.met || !rule.triggered(turn, health, remaining) {
                continue;
            }
            let names = rule.cards.clone();
            let kind = rule.kind;
            self.rules[idx].met = true;
            for name in names {
                match self.catalog.iter().find(|card| card.name == name) {
                    Some(card) => {
                        self.cards.push(card.clone());
                        added += 1;
                        tracing::info!(
                            target: "striena::pool",
                            card = %name,
                            unlock = ?kind,
                            "condition card unlocked"
                        );
                    }
                    None => {
                        tracing::warn!(
                            target: "striena::pool",
                            card = %name,
                            unlock = ?kind,
                            "condition card missing from catalog"
                        );
                    }
                }
            }
        }
        added
    }

    fn is_condition_card(&self, name: &str) -> bool {
        self.rules
            .iter()
            .any(|rule| rule.cards.iter().any(|card| card == name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weighted(name: &str, weight: f64) -> CardDef {
        let mut card = CardDef::new(name);
        card.draw_weight = weight;
        card
    }

    fn catalog() -> Vec<CardDef> {
        vec![
            weighted("Guard", 1.0),
            weighted("Rally", 2.0),
            weighted("Prayer", 1.0),
            weighted("Mysterious Magic", 0.5),
            weighted("Life Drain", 1.0),
            weighted("Last Stand", 1.0),
            weighted("Incapacitated", 1.0),
        ]
    }

    #[test]
    fn initial_pool_excludes_condition_and_event_cards() {
        let pool = CardPool::new(catalog(), &GameSettings::default());
        let names: Vec<_> = pool.cards().iter().map(|card| card.name.as_str()).collect();
        assert_eq!(names, vec!["Guard", "Rally"]);
        assert!(pool.catalog_card("Incapacitated").is_some());
    }

    #[test]
    fn empty_pool_draws_nothing() {
        let pool = CardPool::new(Vec::new(), &GameSettings::default());
        let mut rng = RngState::from_seed(1);
        assert!(pool.draw(&mut rng).is_none());
    }

    #[test]
    fn unlocks_are_one_shot() {
        let settings = GameSettings::default();
        let mut pool = CardPool::new(catalog(), &settings);
        assert_eq!(pool.update_conditions(15, 20, 50), 0);
        assert_eq!(pool.update_conditions(16, 150, 200), 2);
        assert!(pool.is_unlocked(UnlockKind::Turn));
        assert_eq!(pool.update_conditions(30, 1, 1), 2);
        for _ in 0..5 {
            assert_eq!(pool.update_conditions(30, 1, 1), 0);
        }
        assert_eq!(pool.len(), 6);
        let prayers = pool.cards().iter().filter(|card| card.name == "Prayer").count();
        assert_eq!(prayers, 1);
    }

    #[test]
    fn condition_cards_use_multiplier() {
        let mut pool = CardPool::new(catalog(), &GameSettings::default());
        pool.update_conditions(16, 150, 200);
        let prayer = pool.catalog_card("Prayer").cloned().expect("prayer");
        let magic = pool.catalog_card("Mysterious Magic").cloned().expect("magic");
        assert_eq!(pool.weight_of(&prayer), 3.0);
        assert_eq!(pool.weight_of(&magic), 1.5);
        assert!((pool.total_weight() - 7.5).abs() < 1e-9);
    }

    #[test]
    fn weighted_draw_converges_to_weight_share() {
        let mut pool = CardPool::new(catalog(), &GameSettings::default());
        pool.update_conditions(16, 150, 200);
        let mut rng = RngState::from_seed(0xC0FFEE);
        let draws = 60_000;
        let mut counts = std::collections::HashMap::new();
        for _ in 0..draws {
            let card = pool.draw(&mut rng).expect("card");
            *counts.entry(card.name.clone()).or_insert(0usize) += 1;
        }
        let total = pool.total_weight();
        for card in pool.cards() {
            let expected = pool.weight_of(card) / total;
            let observed = counts.get(&card.name).copied().unwrap_or(0) as f64 / draws as f64;
            assert!(
                (observed - expected).abs() < 0.015,
                "{}: expected {expected:.3}, observed {observed:.3}",
                card.name
            );
        }
    }

    #[test]
    fn missing_condition_cards_are_skipped() {
        let mut pool = CardPool::new(vec![weighted("Guard", 1.0)], &GameSettings::default());
        assert_eq!(pool.update_conditions(16, 1, 1), 0);
        assert!(pool.is_unlocked(UnlockKind::Population));
        assert_eq!(pool.len(), 1);
    }
}
