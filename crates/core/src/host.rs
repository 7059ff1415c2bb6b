use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Presentation cues raised while effects resolve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Cue {
    PlayerDamage,
    EnemyAttack,
    PlayerAttack,
}

/// Capabilities the engine borrows from its embedder: readiness, pacing and cues.
pub trait EngineHost {
    fn subsystem_ready(&mut self) -> bool {
        true
    }

    fn pause(&mut self, _duration: Duration) {}

    fn play_cue(&mut self, _cue: Cue) {}
}

/// Always ready, never waits.
#[derive(Debug, Default, Clone, Copy)]
pub struct Headless;

impl EngineHost for Headless {}
