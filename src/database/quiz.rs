//! QuizAttempt rows and the quiz-prerequisite lookup used by task completion.

use chrono::{DateTime, Utc};
use sqlx::{Sqlite, Transaction};

use crate::error::AppResult;

#[allow(clippy::too_many_arguments)]
pub async fn insert_attempt_tx(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    task_id: Option<i64>,
    score: i64,
    correct_answers: i64,
    total_questions: i64,
    coins_earned: i64,
    now: DateTime<Utc>,
) -> AppResult<i64> {
    let result = sqlx::query(
        "INSERT INTO quiz_attempts (user_id, task_id, score, correct_answers, total_questions, \
         coins_earned, completed_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id)
    .bind(task_id)
    .bind(score)
    .bind(correct_answers)
    .bind(total_questions)
    .bind(coins_earned)
    .bind(now)
    .execute(&mut **tx)
    .await?;
    Ok(result.last_insert_rowid())
}

/// Whether the user has any recorded attempt for this task. Gates completion
/// of quiz-required tasks.
pub async fn has_attempt_for_task(
    tx: &mut Transaction<'_, Sqlite>,
    user_id: i64,
    task_id: i64,
) -> AppResult<bool> {
    let count = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM quiz_attempts WHERE user_id = ? AND task_id = ?",
    )
    .bind(user_id)
    .bind(task_id)
    .fetch_one(&mut **tx)
    .await?;
    Ok(count > 0)
}
