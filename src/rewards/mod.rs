//! Pure reward arithmetic: coin, energy and experience deltas keyed by
//! difficulty tier. The transactional side lives in [`engine`].

pub mod engine;
pub mod leveling;

use crate::constants::{QUIZ_BASE_COINS, QUIZ_BASE_ENERGY_COST};
use crate::database::models::Difficulty;

/// The deltas a quiz submission earns before any task bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RewardBreakdown {
    pub coins: i64,
    pub energy_cost: i64,
    pub experience: i64,
}

/// Experience granted by completing a plain task.
pub fn task_experience(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Easy => 5,
        Difficulty::Medium => 10,
        Difficulty::Hard => 20,
    }
}

/// Base-plus-per-correct-answer quiz reward, tiered by difficulty.
pub fn quiz_reward(difficulty: Difficulty, correct_count: i64) -> RewardBreakdown {
    let (per_correct, extra_cost, exp_per_correct) = match difficulty {
        Difficulty::Easy => (2, 0, 5),
        Difficulty::Medium => (3, 5, 8),
        Difficulty::Hard => (5, 10, 12),
    };
    RewardBreakdown {
        coins: QUIZ_BASE_COINS + correct_count * per_correct,
        energy_cost: QUIZ_BASE_ENERGY_COST + extra_cost,
        experience: correct_count * exp_per_correct,
    }
}

/// Flat coin bonus added when a quiz attempt is linked to a task.
pub fn task_quiz_bonus(difficulty: Difficulty) -> i64 {
    match difficulty {
        Difficulty::Easy => 10,
        Difficulty::Medium => 15,
        Difficulty::Hard => 20,
    }
}
