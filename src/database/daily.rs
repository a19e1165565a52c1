//! DailyTaskSet rotation and the scheduler's last-run bookkeeping.

use chrono::{NaiveDate, Utc};
use rand::seq::SliceRandom;
use sqlx::{Sqlite, Transaction};
use tracing::{info, warn};

use super::init::DbPool;
use super::models::{DailyTaskSet, Task};
use crate::constants::DAILY_TASK_COUNT;
use crate::error::AppResult;

pub async fn get_daily_set(pool: &DbPool, date: NaiveDate) -> AppResult<Option<DailyTaskSet>> {
    let set = sqlx::query_as::<_, DailyTaskSet>("SELECT * FROM daily_task_sets WHERE date = ?")
        .bind(date)
        .fetch_optional(pool)
        .await?;
    Ok(set)
}

/// Makes sure exactly one DailyTaskSet exists for `date`, rolling 3 distinct
/// active daily tasks and 1 active quiz task uniformly at random on first
/// access. Repeated calls return the stored set without re-rolling. Returns
/// `None` when the task pool is too small.
pub async fn ensure_daily_set(pool: &DbPool, date: NaiveDate) -> AppResult<Option<DailyTaskSet>> {
    if let Some(existing) = get_daily_set(pool, date).await? {
        return Ok(Some(existing));
    }

    let daily_ids = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM tasks WHERE task_type = 'daily' AND is_active = 1",
    )
    .fetch_all(pool)
    .await?;
    let quiz_ids = sqlx::query_scalar::<_, i64>(
        "SELECT id FROM tasks WHERE task_type = 'quiz' AND is_active = 1",
    )
    .fetch_all(pool)
    .await?;

    if daily_ids.len() < DAILY_TASK_COUNT || quiz_ids.is_empty() {
        warn!(
            daily = daily_ids.len(),
            quiz = quiz_ids.len(),
            %date,
            "not enough active tasks for a daily rotation"
        );
        return Ok(None);
    }

    // rng is scoped so it is dropped before the next await point.
    let (picked, quiz_task_id) = {
        let mut rng = rand::thread_rng();
        let picked: Vec<i64> = daily_ids
            .choose_multiple(&mut rng, DAILY_TASK_COUNT)
            .copied()
            .collect();
        let Some(quiz_task_id) = quiz_ids.choose(&mut rng).copied() else {
            return Ok(None);
        };
        (picked, quiz_task_id)
    };

    // UNIQUE(date) absorbs a concurrent create; the re-read below wins either way.
    sqlx::query(
        "INSERT INTO daily_task_sets (date, task_1_id, task_2_id, task_3_id, quiz_task_id, created_at) \
         VALUES (?, ?, ?, ?, ?, ?) ON CONFLICT(date) DO NOTHING",
    )
    .bind(date)
    .bind(picked[0])
    .bind(picked[1])
    .bind(picked[2])
    .bind(quiz_task_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    let set = get_daily_set(pool, date).await?;
    if let Some(ref set) = set {
        info!(%date, ids = ?set.all_task_ids(), "daily rotation ready");
    }
    Ok(set)
}

/// Resolves a set's task ids into (three daily tasks, quiz task).
pub async fn tasks_for_set(pool: &DbPool, set: &DailyTaskSet) -> AppResult<(Vec<Task>, Task)> {
    let mut daily = Vec::with_capacity(DAILY_TASK_COUNT);
    for id in set.daily_task_ids() {
        daily.push(super::tasks::get_task(pool, id).await?);
    }
    let quiz = super::tasks::get_task(pool, set.quiz_task_id).await?;
    Ok((daily, quiz))
}

// --- SystemState: the stored last-run date driving scheduler idempotence ---

pub async fn last_reset_date(pool: &DbPool) -> AppResult<Option<NaiveDate>> {
    let date = sqlx::query_scalar::<_, Option<NaiveDate>>(
        "SELECT last_reset_date FROM system_state WHERE id = 1",
    )
    .fetch_optional(pool)
    .await?;
    Ok(date.flatten())
}

pub async fn set_last_reset_date(
    tx: &mut Transaction<'_, Sqlite>,
    date: NaiveDate,
) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO system_state (id, last_reset_date) VALUES (1, ?) \
         ON CONFLICT(id) DO UPDATE SET last_reset_date = excluded.last_reset_date",
    )
    .bind(date)
    .execute(&mut **tx)
    .await?;
    Ok(())
}
