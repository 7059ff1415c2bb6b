use anyhow::{bail, Context};
use serde::de::DeserializeOwned;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use striena_core::{CardDef, Content, EventDef, GameSettings};

const CARDS_FILE: &str = "cards.json";
const EVENTS_FILE: &str = "events.json";

const BUILTIN_CARDS: &str = include_str!("../assets/cards.json");
const BUILTIN_EVENTS: &str = include_str!("../assets/events.json");

pub fn load_settings(path: &Path) -> anyhow::Result<GameSettings> {
    let settings: GameSettings = load_json(path)?;
    validate_settings(&settings).with_context(|| format!("validate {}", path.display()))?;
    Ok(settings)
}

/// Reads `path` when given, otherwise falls back to the built-in defaults.
pub fn load_settings_or_default(path: Option<&Path>) -> anyhow::Result<GameSettings> {
    match path {
        Some(path) => load_settings(path),
        None => Ok(GameSettings::default()),
    }
}

/// Loads `cards.json` and the optional `events.json` from `dir`.
pub fn load_content(dir: &Path, settings: &GameSettings) -> anyhow::Result<Content> {
    let cards: Vec<CardDef> = load_json(dir.join(CARDS_FILE))?;
    let events_path = dir.join(EVENTS_FILE);
    let events: Vec<EventDef> = if events_path.exists() {
        load_json(events_path)?
    } else {
        Vec::new()
    };
    let content = Content::new(cards, events);
    validate_content(&content, settings).with_context(|| format!("validate {}", dir.display()))?;
    Ok(content)
}

/// The starter catalog compiled into the crate.
pub fn builtin_content(settings: &GameSettings) -> anyhow::Result<Content> {
    let cards: Vec<CardDef> = serde_json::from_str(BUILTIN_CARDS).context("parse builtin cards")?;
    let events: Vec<EventDef> =
        serde_json::from_str(BUILTIN_EVENTS).context("parse builtin events")?;
    let content = Content::new(cards, events);
    validate_content(&content, settings).context("validate builtin content")?;
    Ok(content)
}

pub fn validate_settings(settings: &GameSettings) -> anyhow::Result<()> {
    if settings.max_health == 0 {
        bail!("max_health must be positive");
    }
    if settings.max_turns == 0 {
        bail!("max_turns must be positive");
    }
    if settings.max_hand_size == 0 {
        bail!("max_hand_size must be positive");
    }
    if !settings.special_card_weight.is_finite() || settings.special_card_weight < 0.0 {
        bail!(
            "special_card_weight must be a non-negative number, got {}",
            settings.special_card_weight
        );
    }
    Ok(())
}

/// Rejects catalogs the engine cannot run: duplicate or empty names, bad weights
/// and ranges, unknown replacement targets, or nothing drawable at the start.
pub fn validate_content(content: &Content, settings: &GameSettings) -> anyhow::Result<()> {
    let mut names = HashSet::new();
    for card in &content.cards {
        if card.name.trim().is_empty() {
            bail!("card with empty name");
        }
        if !names.insert(card.name.as_str()) {
            bail!("duplicate card {}", card.name);
        }
        if !card.draw_weight.is_finite() || card.draw_weight < 0.0 {
            bail!(
                "card {} has invalid draw_weight {}",
                card.name,
                card.draw_weight
            );
        }
        for range in [card.random_evacuation, card.random_health_cost]
            .into_iter()
            .flatten()
        {
            if range.min > range.max {
                bail!(
                    "card {} has inverted range {}..={}",
                    card.name,
                    range.min,
                    range.max
                );
            }
        }
    }

    let drawable = content.cards.iter().any(|card| {
        !settings.is_condition_card(&card.name) && !settings.is_event_only_card(&card.name)
    });
    if !drawable {
        bail!("no drawable cards: every card is a condition or event-only card");
    }

    let mut ids = HashSet::new();
    for event in &content.events {
        if !ids.insert(event.id.as_str()) {
            bail!("duplicate event {}", event.id);
        }
        if let Some(name) = &event.replace_card {
            if !names.contains(name.as_str()) {
                bail!("event {} replaces with unknown card {}", event.id, name);
            }
        }
        if !event.universal && event.area.is_none() {
            tracing::warn!(
                event = %event.id,
                "event is neither universal nor bound to an area"
            );
        }
    }
    Ok(())
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use striena_core::BattleArea;

    #[test]
    fn builtin_catalog_is_valid() {
        let settings = GameSettings::default();
        let content = builtin_content(&settings).expect("builtin");
        for name in [
            "Prayer",
            "Mysterious Magic",
            "Life Drain",
            "Last Stand",
            "Incapacitated",
        ] {
            assert!(content.card_by_name(name).is_some(), "missing {name}");
        }
        assert!(content
            .cards
            .iter()
            .any(|card| !settings.is_condition_card(&card.name)
                && !settings.is_event_only_card(&card.name)));
        assert!(!content.events.is_empty());
    }

    #[test]
    fn duplicate_cards_are_rejected() {
        let content = Content::new(
            vec![CardDef::new("Barricade"), CardDef::new("Barricade")],
            Vec::new(),
        );
        let err = validate_content(&content, &GameSettings::default()).expect_err("duplicate");
        assert!(err.to_string().contains("duplicate card Barricade"));
    }

    #[test]
    fn replacement_must_exist() {
        let mut event = EventDef::new("Collapse");
        event.area = Some(BattleArea::BackAlley);
        event.replace_card = Some("Nowhere".to_string());
        let content = Content::new(vec![CardDef::new("Barricade")], vec![event]);
        assert!(validate_content(&content, &GameSettings::default()).is_err());
    }

    #[test]
    fn catalog_needs_a_drawable_card() {
        let settings = GameSettings::default();
        let locked_only = Content::new(
            vec![
                CardDef::new("Prayer"),
                CardDef::new("Last Stand"),
                CardDef::new("Incapacitated"),
            ],
            Vec::new(),
        );
        let err = validate_content(&locked_only, &settings).expect_err("nothing drawable");
        assert!(err.to_string().contains("no drawable cards"));
        assert!(validate_content(&Content::default(), &settings).is_err());

        let mut playable = locked_only;
        playable.cards.push(CardDef::new("Barricade"));
        assert!(validate_content(&playable, &settings).is_ok());
    }

    #[test]
    fn zero_turn_settings_are_rejected() {
        let settings = GameSettings {
            max_turns: 0,
            ..GameSettings::default()
        };
        assert!(validate_settings(&settings).is_err());
        assert!(validate_settings(&GameSettings::default()).is_ok());
    }
}
