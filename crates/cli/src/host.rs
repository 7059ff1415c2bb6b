use std::time::Duration;
use striena_core::{Cue, EngineHost};

/// Terminal host: real sleeps scaled by `pace`, cues printed inline.
#[derive(Debug, Clone, Copy)]
pub struct CliHost {
    pace: f64,
    show_cues: bool,
}

impl CliHost {
    pub fn new(pace: f64, show_cues: bool) -> Self {
        Self {
            pace: pace.max(0.0),
            show_cues,
        }
    }
}

impl EngineHost for CliHost {
    fn pause(&mut self, duration: Duration) {
        if self.pace > 0.0 {
            std::thread::sleep(duration.mul_f64(self.pace));
        }
    }

    fn play_cue(&mut self, cue: Cue) {
        tracing::trace!(target: "striena::cli", ?cue, "cue");
        if !self.show_cues {
            return;
        }
        let text = match cue {
            Cue::PlayerDamage => "* you are hurt *",
            Cue::EnemyAttack => "* the enemy strikes *",
            Cue::PlayerAttack => "* you strike back *",
        };
        println!("{text}");
    }
}
