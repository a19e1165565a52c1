//! Database functions for task reference data and per-user completion state,
//! including the lazy per-user reset of daily-set completions.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{Sqlite, Transaction};

use super::init::DbPool;
use super::models::{Difficulty, Task, TaskType, UserTaskProgress};
use crate::error::{AppError, AppResult};

pub async fn list_active(pool: &DbPool) -> AppResult<Vec<Task>> {
    let tasks = sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE is_active = 1 ORDER BY id")
        .fetch_all(pool)
        .await?;
    Ok(tasks)
}

pub async fn get_task(pool: &DbPool, task_id: i64) -> AppResult<Task> {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
        .bind(task_id)
        .fetch_optional(pool)
        .await?
        .ok_or(AppError::NotFound("task"))
}

pub async fn get_task_tx(tx: &mut Transaction<'_, Sqlite>, task_id: i64) -> AppResult<Task> {
    sqlx::query_as::<_, Task>("SELECT * FROM tasks WHERE id = ?")
        .bind(task_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or(AppError::NotFound("task"))
}

pub async fn get_progress_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    task_id: i64,
) -> AppResult<Option<UserTaskProgress>> {
    let row = sqlx::query_as::<_, UserTaskProgress>(
        "SELECT * FROM user_tasks WHERE user_id = ? AND task_id = ?",
    )
    .bind(user_id)
    .bind(task_id)
    .fetch_optional(&mut **tx)
    .await?;
    Ok(row)
}

pub async fn mark_completed_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    task_id: i64,
    now: DateTime<Utc>,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO user_tasks (user_id, task_id, completed, completed_at, created_at) \
         VALUES (?, ?, 1, ?, ?) \
         ON CONFLICT(user_id, task_id) \
         DO UPDATE SET completed = 1, completed_at = excluded.completed_at",
    )
    .bind(user_id)
    .bind(task_id)
    .bind(now)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(())
}

pub async fn completed_task_ids(pool: &DbPool, user_id: i64) -> AppResult<Vec<i64>> {
    let ids = sqlx::query_scalar::<_, i64>(
        "SELECT task_id FROM user_tasks WHERE user_id = ? AND completed = 1",
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;
    Ok(ids)
}

/// Lazy per-user reset, run on dashboard load: makes sure a progress row
/// exists for every task in today's daily set, and clears completions whose
/// stored date is not today. `NotStarted -> Completed -> NotStarted` on date
/// rollover; no other transitions.
pub async fn sync_daily_progress(
    pool: &DbPool,
    user_id: i64,
    today: NaiveDate,
    daily_task_ids: &[i64],
) -> AppResult<()> {
    let mut tx = pool.begin().await?;
    let now = Utc::now();
    for &task_id in daily_task_ids {
        sqlx::query(
            "INSERT INTO user_tasks (user_id, task_id, created_at) VALUES (?, ?, ?) \
             ON CONFLICT(user_id, task_id) DO NOTHING",
        )
        .bind(user_id)
        .bind(task_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let row = get_progress_tx(&mut tx, user_id, task_id).await?;
        if let Some(row) = row {
            let stale = row.completed
                && row
                    .completed_at
                    .map(|at| at.date_naive() != today)
                    .unwrap_or(true);
            if stale {
                sqlx::query(
                    "UPDATE user_tasks SET completed = 0, completed_at = NULL WHERE id = ?",
                )
                .bind(row.id)
                .execute(&mut *tx)
                .await?;
            }
        }
    }
    tx.commit().await?;
    Ok(())
}

// --- Admin reference-data maintenance ---

fn default_reward_coins() -> i64 {
    10
}
fn default_energy_cost() -> i64 {
    10
}
fn default_true() -> bool {
    true
}
fn default_difficulty() -> Difficulty {
    Difficulty::Easy
}
fn default_task_type() -> TaskType {
    TaskType::Regular
}
fn default_category() -> String {
    "eco".to_string()
}

#[derive(Debug, Deserialize)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    #[serde(default = "default_reward_coins")]
    pub reward_coins: i64,
    #[serde(default = "default_energy_cost")]
    pub energy_cost: i64,
    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,
    #[serde(default = "default_true")]
    pub quiz_required: bool,
    #[serde(default)]
    pub daily_reset: bool,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(default = "default_task_type")]
    pub task_type: TaskType,
    #[serde(default = "default_category")]
    pub category: String,
}

pub async fn insert_task(pool: &DbPool, task: &NewTask) -> AppResult<Task> {
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO tasks (title, description, reward_coins, energy_cost, difficulty, \
         quiz_required, is_active, daily_reset, task_type, category, created_at, updated_at) \
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(&task.title)
    .bind(&task.description)
    .bind(task.reward_coins)
    .bind(task.energy_cost)
    .bind(task.difficulty)
    .bind(task.quiz_required)
    .bind(task.is_active)
    .bind(task.daily_reset)
    .bind(task.task_type)
    .bind(&task.category)
    .bind(now)
    .bind(now)
    .execute(pool)
    .await?;
    get_task(pool, result.last_insert_rowid()).await
}

/// Partial update; absent fields keep their stored values.
#[derive(Debug, Default, Deserialize)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub reward_coins: Option<i64>,
    pub energy_cost: Option<i64>,
    pub difficulty: Option<Difficulty>,
    pub quiz_required: Option<bool>,
    pub daily_reset: Option<bool>,
    pub is_active: Option<bool>,
    pub task_type: Option<TaskType>,
    pub category: Option<String>,
}

pub async fn update_task(pool: &DbPool, task_id: i64, patch: &TaskPatch) -> AppResult<Task> {
    let current = get_task(pool, task_id).await?;
    sqlx::query(
        "UPDATE tasks SET title = ?, description = ?, reward_coins = ?, energy_cost = ?, \
         difficulty = ?, quiz_required = ?, daily_reset = ?, is_active = ?, task_type = ?, \
         category = ?, updated_at = ? WHERE id = ?",
    )
    .bind(patch.title.as_ref().unwrap_or(&current.title))
    .bind(patch.description.as_ref().unwrap_or(&current.description))
    .bind(patch.reward_coins.unwrap_or(current.reward_coins))
    .bind(patch.energy_cost.unwrap_or(current.energy_cost))
    .bind(patch.difficulty.unwrap_or(current.difficulty))
    .bind(patch.quiz_required.unwrap_or(current.quiz_required))
    .bind(patch.daily_reset.unwrap_or(current.daily_reset))
    .bind(patch.is_active.unwrap_or(current.is_active))
    .bind(patch.task_type.unwrap_or(current.task_type))
    .bind(patch.category.as_ref().unwrap_or(&current.category))
    .bind(Utc::now())
    .bind(task_id)
    .execute(pool)
    .await?;
    get_task(pool, task_id).await
}

pub async fn toggle_task(pool: &DbPool, task_id: i64) -> AppResult<Task> {
    let result =
        sqlx::query("UPDATE tasks SET is_active = 1 - is_active, updated_at = ? WHERE id = ?")
            .bind(Utc::now())
            .bind(task_id)
            .execute(pool)
            .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("task"));
    }
    get_task(pool, task_id).await
}
