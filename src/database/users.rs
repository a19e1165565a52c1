//! Database functions for user accounts: creation, login streaks, balances
//! and the bulk energy refill used by the daily reset.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{Sqlite, Transaction};

use super::init::DbPool;
use super::models::User;
use crate::constants::{
    DAILY_ENERGY_REFILL, MAX_ENERGY, STREAK_BONUS_COINS, STREAK_BONUS_INTERVAL,
};
use crate::error::{AppError, AppResult};

pub async fn create_user(
    pool: &DbPool,
    username: &str,
    email: &str,
    role: &str,
    is_admin: bool,
    starting_coins: i64,
) -> AppResult<User> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO users (username, email, role, is_admin, coins, created_at) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(username)
    .bind(email)
    .bind(role)
    .bind(is_admin)
    .bind(starting_coins)
    .bind(now)
    .execute(pool)
    .await?;
    get_user(pool, result.last_insert_rowid()).await
}

pub async fn get_user(pool: &DbPool, user_id: i64) -> AppResult<User> {
    try_get_user(pool, user_id)
        .await?
        .ok_or(AppError::NotFound("user"))
}

pub async fn try_get_user(pool: &DbPool, user_id: i64) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

pub async fn get_user_by_username(pool: &DbPool, username: &str) -> AppResult<Option<User>> {
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = ?")
        .bind(username)
        .fetch_optional(pool)
        .await?;
    Ok(user)
}

/// Fetches a user inside an open transaction. SQLite serializes writers, so
/// no explicit row locking is needed here.
pub async fn get_user_tx(tx: &mut Transaction<'_, Sqlite>, user_id: i64) -> AppResult<User> {
    sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = ?")
        .bind(user_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(AppError::NotFound("user"))
}

pub async fn require_admin(pool: &DbPool, user_id: i64) -> AppResult<User> {
    let user = get_user(pool, user_id).await?;
    if !user.is_admin {
        return Err(AppError::Unauthorized);
    }
    Ok(user)
}

#[derive(Debug, Serialize)]
pub struct LoginOutcome {
    pub user: User,
    pub streak: i64,
    pub bonus_coins: i64,
}

/// Records a login event and applies the consecutive-day streak rules:
/// same-day logins leave the streak untouched, yesterday increments it,
/// anything older resets it to 1. Every 7th consecutive day pays 100 coins.
pub async fn record_login(
    pool: &DbPool,
    user_id: i64,
    now: DateTime<Utc>,
) -> AppResult<LoginOutcome> {
    let mut tx = pool.begin().await?;
    let user = get_user_tx(&mut tx, user_id).await?;

    let today = now.date_naive();
    let mut bonus_coins = 0;
    let new_streak = match user.last_login {
        Some(prev) if prev.date_naive() == today => user.streak,
        Some(prev) if (today - prev.date_naive()).num_days() == 1 => {
            let streak = user.streak + 1;
            if streak % STREAK_BONUS_INTERVAL == 0 {
                bonus_coins = STREAK_BONUS_COINS;
            }
            streak
        }
        _ => 1,
    };

    sqlx::query("UPDATE users SET streak = ?, coins = coins + ?, last_login = ? WHERE id = ?")
        .bind(new_streak)
        .bind(bonus_coins)
        .bind(now)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    let user = get_user(pool, user_id).await?;
    Ok(LoginOutcome {
        streak: new_streak,
        bonus_coins,
        user,
    })
}

/// The bounded midnight refill, applied to every user in one statement.
pub async fn refill_all_energy(
    tx: &mut Transaction<'_, Sqlite>,
    now: DateTime<Utc>,
) -> AppResult<u64> {
    let result =
        sqlx::query("UPDATE users SET energy = MIN(?, energy + ?), last_daily_reset = ?")
            .bind(MAX_ENERGY)
            .bind(DAILY_ENERGY_REFILL)
            .bind(now)
            .execute(&mut **tx)
            .await?;
    Ok(result.rows_affected())
}

pub async fn all_user_ids(tx: &mut Transaction<'_, Sqlite>) -> AppResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>("SELECT id FROM users ORDER BY id")
        .fetch_all(&mut **tx)
        .await?;
    Ok(ids)
}

pub async fn leaderboard(pool: &DbPool, limit: i64) -> AppResult<Vec<User>> {
    let users = sqlx::query_as::<_, User>(
        "SELECT * FROM users WHERE role = 'child' ORDER BY coins DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(users)
}

#[derive(Debug, Serialize)]
pub struct UserStats {
    pub total_tasks: i64,
    pub total_quizzes: i64,
    pub total_coins_earned: i64,
    pub streak_days: i64,
}

pub async fn user_stats(pool: &DbPool, user_id: i64) -> AppResult<UserStats> {
    let user = get_user(pool, user_id).await?;
    let total_tasks = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM user_tasks WHERE user_id = ? AND completed = 1",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    let total_quizzes =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quiz_attempts WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;
    let total_coins_earned = sqlx::query_scalar::<_, i64>(
        "SELECT COALESCE(SUM(coins_earned), 0) FROM quiz_attempts WHERE user_id = ?",
    )
    .bind(user_id)
    .fetch_one(pool)
    .await?;
    Ok(UserStats {
        total_tasks,
        total_quizzes,
        total_coins_earned,
        streak_days: user.streak,
    })
}
