//! DailyProgress counters. Reporting only: the reward engine bumps these as
//! a side effect, never reads them back for computation.

use chrono::NaiveDate;
use sqlx::{Sqlite, Transaction};

use super::init::DbPool;
use super::models::DailyProgress;
use crate::error::AppResult;

pub async fn ensure_row_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    date: NaiveDate,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO daily_progress (user_id, date) VALUES (?, ?) \
         ON CONFLICT(user_id, date) DO NOTHING",
    )
    .bind(user_id)
    .bind(date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

/// Adds to the day's counters, creating the row if the global reset has not
/// run for this user yet.
pub async fn bump_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    date: NaiveDate,
    tasks: i64,
    quizzes: i64,
    coins: i64,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO daily_progress (user_id, date, tasks_completed, quizzes_completed, coins_earned) \
         VALUES (?, ?, ?, ?, ?) \
         ON CONFLICT(user_id, date) DO UPDATE SET \
         tasks_completed = tasks_completed + excluded.tasks_completed, \
         quizzes_completed = quizzes_completed + excluded.quizzes_completed, \
         coins_earned = coins_earned + excluded.coins_earned",
    )
    .bind(user_id)
    .bind(date)
    .bind(tasks)
    .bind(quizzes)
    .bind(coins)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn get(pool: &DbPool, user_id: i64, date: NaiveDate) -> AppResult<Option<DailyProgress>> {
    let row = sqlx::query_as::<_, DailyProgress>(
        "SELECT * FROM daily_progress WHERE user_id = ? AND date = ?",
    )
    .bind(user_id)
    .bind(date)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}
