// Central constants for reward math, energy bounds and the daily rotation.
pub const MAX_ENERGY: i64 = 100;
pub const DAILY_ENERGY_REFILL: i64 = 50; // granted to every user by the midnight reset
pub const DAILY_TASK_COUNT: usize = 3; // tasks per DailyTaskSet, plus one quiz

pub const QUIZ_BASE_COINS: i64 = 20;
pub const QUIZ_BASE_ENERGY_COST: i64 = 15;
pub const QUESTIONS_PER_ATTEMPT: usize = 5;

pub const LEVEL_XP_STEP: i64 = 100; // next level at level * LEVEL_XP_STEP experience
pub const LEVEL_UP_COIN_BONUS: i64 = 50; // scaled by the new level

pub const STREAK_BONUS_INTERVAL: i64 = 7;
pub const STREAK_BONUS_COINS: i64 = 100;

// The reset itself is keyed off the stored last-run date, so coarse polling is fine.
pub const SCHEDULER_POLL_SECS: u64 = 60;
