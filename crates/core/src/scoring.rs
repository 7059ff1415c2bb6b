use thiserror::Error;

pub const SCORE_BOARD: u32 = 1;
pub const ENDING_COUNT_BOARD: u32 = 2;

const SURVIVAL_POINTS: f64 = 10_000.0;
const TURN_BONUS_POINTS: f64 = 5_000.0;
const PERFECT_BONUS: u32 = 5_000;

/// Score for a cleared run: survival share, a bonus for finishing early, and a perfect-run bonus.
pub fn clear_score(survival_rate: f64, turn: u32, max_turns: u32) -> u32 {
    let survival = (survival_rate.max(0.0) * SURVIVAL_POINTS).round_ties_even() as u32;
    let turn_bonus = if max_turns > 0 && turn <= max_turns {
        (f64::from(max_turns - turn) / f64::from(max_turns) * TURN_BONUS_POINTS).round_ties_even()
            as u32
    } else {
        0
    };
    let perfect = if survival_rate >= 1.0 { PERFECT_BONUS } else { 0 };
    survival + turn_bonus + perfect
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("transport error: {0}")]
    Transport(String),
    #[error("board {board} rejected value: {reason}")]
    Rejected { board: u32, reason: String },
}

/// Leaderboard boundary. Failures are logged by the engine and never block the run.
pub trait ScoreReporter {
    fn submit(&mut self, board: u32, value: u32) -> Result<(), ReportError>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl ScoreReporter for NullReporter {
    fn submit(&mut self, _board: u32, _value: u32) -> Result<(), ReportError> {
        Ok(())
    }
}
