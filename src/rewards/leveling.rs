//! Level progression math shared by task completion and quiz submission.

use crate::constants::{LEVEL_UP_COIN_BONUS, LEVEL_XP_STEP};

/// The result of applying an experience gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelOutcome {
    pub new_level: i64,
    pub new_experience: i64,
    pub leveled_up: bool,
    pub bonus_coins: i64,
}

/// Applies an experience gain with at most one level-up per call: crossing
/// the `level * 100` threshold increments the level, resets experience to 0
/// and grants a `new_level * 50` coin bonus. `leveled_up` is always
/// assigned, regardless of which path was taken.
pub fn apply_experience(level: i64, experience: i64, gained: i64) -> LevelOutcome {
    let mut new_level = level;
    let mut new_experience = experience + gained;
    let mut leveled_up = false;
    let mut bonus_coins = 0;
    if new_experience >= new_level * LEVEL_XP_STEP {
        new_level += 1;
        new_experience = 0;
        leveled_up = true;
        bonus_coins = new_level * LEVEL_UP_COIN_BONUS;
    }
    LevelOutcome {
        new_level,
        new_experience,
        leveled_up,
        bonus_coins,
    }
}
