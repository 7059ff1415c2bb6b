use anyhow::Context;
use striena_core::{Event, GameOutcome, PlayerChange, TurnEngine};

#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    json: bool,
}

impl Renderer {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    pub fn is_json(&self) -> bool {
        self.json
    }

    pub fn flush_events(&self, engine: &mut TurnEngine) -> anyhow::Result<()> {
        for event in engine.drain_events() {
            if self.json {
                let line = serde_json::to_string(&event).context("encode event")?;
                println!("{line}");
            } else if let Some(text) = describe(&event) {
                println!("{text}");
            }
        }
        Ok(())
    }

    pub fn print_status(&self, engine: &TurnEngine) {
        if self.json {
            return;
        }
        let player = engine.player();
        println!(
            "turn {}/{} | area {:?} | health {}/{} | citizens {} (evacuated {}, lost {}) | stun {}",
            engine.turn(),
            engine.settings().max_turns,
            engine.area(),
            player.health(),
            player.max_health(),
            player.available_citizens(),
            player.evacuated_citizens(),
            player.killed_citizens(),
            engine.enemy_stun_turns(),
        );
    }

    pub fn print_hand(&self, engine: &TurnEngine) {
        if self.json {
            return;
        }
        let player = engine.player();
        for (idx, card) in player.hand().iter().enumerate() {
            let mut flags = Vec::new();
            if player.is_card_disabled(&card.id()) {
                flags.push("disabled");
            }
            if card.dangerous {
                flags.push("dangerous");
            }
            if flags.is_empty() {
                println!("  [{idx}] {}", card.name);
            } else {
                println!("  [{idx}] {} ({})", card.name, flags.join(", "));
            }
        }
    }

    pub fn print_outcome(&self, outcome: &GameOutcome) -> anyhow::Result<()> {
        if self.json {
            let line = serde_json::json!({
                "ending": outcome.ending,
                "turn": outcome.snapshot.turn,
                "survival_rate": outcome.snapshot.survival_rate,
                "cleared": outcome.cleared,
                "score": outcome.score,
                "collected_endings": outcome.collected_endings,
            });
            println!("{line}");
            return Ok(());
        }
        println!("ending: {:?} (#{})", outcome.ending, outcome.ending.number());
        println!(
            "turn {} | survival {:.1}% | evacuated {} | lost {} | dangerous cards {}",
            outcome.snapshot.turn,
            outcome.snapshot.survival_rate * 100.0,
            outcome.snapshot.evacuated,
            outcome.snapshot.killed,
            outcome.snapshot.dangerous_card_uses,
        );
        match outcome.score {
            Some(score) => println!("cleared, score {score}"),
            None => println!("not cleared"),
        }
        println!("endings collected: {}/5", outcome.collected_endings);
        Ok(())
    }
}

fn describe(event: &Event) -> Option<String> {
    let text = match event {
        Event::PhaseChanged { .. } => return None,
        Event::TurnAdvanced { turn } => format!("-- turn {turn} --"),
        Event::CardUsed { card, .. } => format!("used {card}"),
        Event::EnemyStunned { turns_left } => format!("enemy stunned ({turns_left} turns left)"),
        Event::RandomEventOccurred { event } => format!("event: {event}"),
        Event::AreaSelectionRequired { first, second } => {
            format!("retreat: choose [1] {first:?} or [2] {second:?}")
        }
        Event::AreaChanged { area } => format!("moved to {area:?}"),
        Event::HandReset { drawn } => format!("hand reshuffled ({drawn} cards)"),
        Event::Player(change) => return describe_change(change),
        Event::ScoreReported { board, value } => format!("reported {value} to board {board}"),
        Event::GameEnded { ending } => format!("game over: {ending:?}"),
    };
    Some(text)
}

fn describe_change(change: &PlayerChange) -> Option<String> {
    let text = match change {
        PlayerChange::Health { current, max } => format!("health {current}/{max}"),
        PlayerChange::Citizens {
            available,
            evacuated,
            killed,
        } => format!("citizens {available} (evacuated {evacuated}, lost {killed})"),
        PlayerChange::DisabledCards { count } if *count > 0 => {
            format!("{count} card(s) disabled")
        }
        PlayerChange::DamageReduction { armed: true } => "next damage halved".to_string(),
        PlayerChange::MaxHandSize { size } => format!("hand limit {size}"),
        _ => return None,
    };
    Some(text)
}
