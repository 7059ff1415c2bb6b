use super::*;
use crate::{BattleArea, CardId};

impl TurnEngine {
    /// Queues the card at `index` for the card-effect phase.
    ///
    /// `index` must point at a copy of `card` in the current hand.
    pub fn select_card(&mut self, card: &CardId, index: usize) -> Result<(), RunError> {
        if self.phase != Phase::PlayerAction {
            tracing::debug!(
                target: "striena::engine",
                phase = ?self.phase,
                %card,
                "card selection rejected"
            );
            return Err(RunError::InvalidPhase(self.phase));
        }
        if !self.player.has_card(card) {
            tracing::debug!(target: "striena::engine", %card, "selected card not in hand");
            return Err(RunError::CardNotInHand(card.clone()));
        }
        if self.player.is_card_disabled(card) {
            tracing::debug!(target: "striena::engine", %card, "selected card is disabled");
            return Err(RunError::CardDisabled(card.clone()));
        }
        let Some(held) = self
            .player
            .hand()
            .get(index)
            .filter(|held| held.is(card))
            .cloned()
        else {
            tracing::debug!(
                target: "striena::engine",
                %card,
                index,
                "hand index does not hold card"
            );
            return Err(RunError::InvalidHandIndex(index));
        };
        self.pending = Some(PendingCard { card: held, index });
        Ok(())
    }

    pub fn select_card_at(&mut self, index: usize) -> Result<(), RunError> {
        if self.phase != Phase::PlayerAction {
            return Err(RunError::InvalidPhase(self.phase));
        }
        let Some(card) = self.player.hand().get(index).map(|card| card.id()) else {
            return Err(RunError::InvalidHandIndex(index));
        };
        self.select_card(&card, index)
    }

    /// Answers a pending retreat with one of the offered areas.
    pub fn select_area(&mut self, area: BattleArea) -> Result<(), RunError> {
        if self.phase != Phase::Retreat {
            tracing::debug!(
                target: "striena::engine",
                phase = ?self.phase,
                ?area,
                "area selection rejected"
            );
            return Err(RunError::InvalidPhase(self.phase));
        }
        if self.offered_areas.is_none() {
            return Err(RunError::NoAreasOffered);
        }
        self.selected_area = Some(area);
        Ok(())
    }

    /// Resolves a pending retreat with the first offered area.
    pub fn skip_area_selection(&mut self) -> Result<BattleArea, RunError> {
        if self.phase != Phase::Retreat {
            return Err(RunError::InvalidPhase(self.phase));
        }
        let Some((first, _)) = self.offered_areas else {
            return Err(RunError::NoAreasOffered);
        };
        self.selected_area = Some(first);
        Ok(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardDef, Content, Headless};

    #[test]
    fn disabled_cards_cannot_be_selected() {
        let content = Content::new(vec![CardDef::new("Barricade")], Vec::new());
        let mut engine =
            TurnEngine::new(GameSettings::default(), content, 3, EndingLedger::default());
        engine.run_until_blocked(&mut Headless);

        let mut rng = crate::RngState::from_seed(9);
        assert_eq!(engine.player.disable_random_cards(1, &mut rng), 1);
        let barricade = CardId::new("Barricade");
        assert_eq!(
            engine.select_card(&barricade, 0),
            Err(RunError::CardDisabled(barricade.clone()))
        );
        assert!(engine.pending_card().is_none());

        engine.player.tick_disabled_cards();
        assert_eq!(engine.select_card(&barricade, 0), Ok(()));
    }

    #[test]
    fn index_must_hold_the_selected_card() {
        let content = Content::new(
            vec![CardDef::new("Barricade"), CardDef::new("Lantern")],
            Vec::new(),
        );
        let mut engine =
            TurnEngine::new(GameSettings::default(), content, 3, EndingLedger::default());
        engine.run_until_blocked(&mut Headless);
        engine.player.clear_hand();
        engine.player.draw_card(CardDef::new("Barricade"));
        engine.player.draw_card(CardDef::new("Lantern"));

        let barricade = CardId::new("Barricade");
        let lantern = CardId::new("Lantern");
        assert_eq!(
            engine.select_card(&barricade, 1),
            Err(RunError::InvalidHandIndex(1))
        );
        assert_eq!(
            engine.select_card(&barricade, 5),
            Err(RunError::InvalidHandIndex(5))
        );
        assert!(engine.pending_card().is_none());

        assert_eq!(engine.select_card(&lantern, 1), Ok(()));
        let pending = engine.pending_card().expect("pending");
        assert_eq!(pending.index, 1);
        assert!(pending.card.is(&lantern));
    }

    #[test]
    fn area_selection_needs_an_offer() {
        let content = Content::new(vec![CardDef::new("Barricade")], Vec::new());
        let mut engine =
            TurnEngine::new(GameSettings::default(), content, 3, EndingLedger::default());
        engine.phase = Phase::Retreat;
        assert_eq!(
            engine.select_area(BattleArea::Cathedral),
            Err(RunError::NoAreasOffered)
        );
        assert_eq!(engine.skip_area_selection(), Err(RunError::NoAreasOffered));
    }
}
