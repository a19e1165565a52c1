//! The transactional reward engine: validates preconditions, computes the
//! deltas and applies them atomically. A failed precondition returns before
//! any write, and every write happens inside one transaction per call — no
//! partial credit.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use crate::database::init::DbPool;
use crate::database::models::Difficulty;
use crate::database::{progress, quiz, tasks, users};
use crate::error::{AppError, AppResult};
use crate::rewards::leveling::apply_experience;
use crate::rewards::{quiz_reward, task_experience, task_quiz_bonus};

#[derive(Debug, Serialize)]
pub struct CompletionReceipt {
    pub coins_earned: i64,
    pub energy_used: i64,
    pub experience_gained: i64,
    pub new_coins: i64,
    pub new_energy: i64,
    pub new_level: i64,
    pub level_up: bool,
    pub message: String,
}

/// Completes a task for a user. Fails with `AlreadyCompleted`,
/// `PrerequisiteNotMet` (quiz-required tasks without an attempt) or
/// `InsufficientResource` (energy), leaving state untouched.
pub async fn complete_task(
    pool: &DbPool,
    user_id: i64,
    task_id: i64,
    now: DateTime<Utc>,
) -> AppResult<CompletionReceipt> {
    let mut tx = pool.begin().await?;
    let task = tasks::get_task_tx(&mut tx, task_id).await?;
    let user = users::get_user_tx(&mut tx, user_id).await?;

    if let Some(progress) = tasks::get_progress_tx(&mut tx, user_id, task_id).await? {
        if progress.completed {
            return Err(AppError::AlreadyCompleted);
        }
    }
    if task.quiz_required && !quiz::has_attempt_for_task(&mut tx, user_id, task_id).await? {
        return Err(AppError::PrerequisiteNotMet(
            "take the task quiz before completing it".to_string(),
        ));
    }
    if user.energy < task.energy_cost {
        return Err(AppError::InsufficientResource(format!(
            "not enough energy: have {}, need {}",
            user.energy, task.energy_cost
        )));
    }

    let experience_gained = task_experience(task.difficulty);
    let level = apply_experience(user.level, user.experience, experience_gained);
    let coins_earned = task.reward_coins + level.bonus_coins;

    let new_coins = user.coins + coins_earned;
    let new_energy = user.energy - task.energy_cost;
    sqlx::query("UPDATE users SET coins = ?, energy = ?, level = ?, experience = ? WHERE id = ?")
        .bind(new_coins)
        .bind(new_energy)
        .bind(level.new_level)
        .bind(level.new_experience)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    tasks::mark_completed_tx(&mut tx, user_id, task_id, now).await?;
    progress::bump_tx(&mut tx, user_id, now.date_naive(), 1, 0, task.reward_coins).await?;
    tx.commit().await?;

    let mut message = format!(
        "Task complete! +{} coins, -{} energy",
        task.reward_coins, task.energy_cost
    );
    if level.leveled_up {
        message.push_str(&format!(" Congratulations, you reached level {}!", level.new_level));
    }
    info!(user_id, task_id, coins_earned, level_up = level.leveled_up, "task completed");

    Ok(CompletionReceipt {
        coins_earned,
        energy_used: task.energy_cost,
        experience_gained,
        new_coins,
        new_energy,
        new_level: level.new_level,
        level_up: level.leveled_up,
        message,
    })
}

#[derive(Debug, Clone)]
pub struct QuizSubmission {
    pub task_id: Option<i64>,
    pub difficulty: Difficulty,
    pub score: i64,
    pub correct_count: i64,
    pub total_questions: i64,
}

#[derive(Debug, Serialize)]
pub struct QuizReceipt {
    pub score: i64,
    pub correct_answers: i64,
    pub total_questions: i64,
    pub coins_earned: i64,
    pub energy_used: i64,
    pub experience_gained: i64,
    pub new_coins: i64,
    pub new_energy: i64,
    pub new_experience: i64,
    pub new_level: i64,
    pub level_up: bool,
    pub difficulty: Difficulty,
    pub task_completed: bool,
    pub message: String,
}

/// Applies a quiz submission: tiered coins/energy/experience, an optional
/// linked-task bonus, a recorded QuizAttempt row and the day's counters.
/// All-or-nothing, like task completion.
pub async fn submit_quiz(
    pool: &DbPool,
    user_id: i64,
    submission: &QuizSubmission,
    now: DateTime<Utc>,
) -> AppResult<QuizReceipt> {
    let mut tx = pool.begin().await?;
    let user = users::get_user_tx(&mut tx, user_id).await?;
    let task = match submission.task_id {
        Some(task_id) => Some(tasks::get_task_tx(&mut tx, task_id).await?),
        None => None,
    };

    // A linked task pins the difficulty regardless of what the client sent.
    let difficulty = task
        .as_ref()
        .map(|t| t.difficulty)
        .unwrap_or(submission.difficulty);

    let reward = quiz_reward(difficulty, submission.correct_count);
    let mut coins_earned = reward.coins;
    if let Some(ref task) = task {
        coins_earned += task.reward_coins + task_quiz_bonus(task.difficulty);
    }

    if user.energy < reward.energy_cost {
        return Err(AppError::InsufficientResource(format!(
            "not enough energy: have {}, need {}",
            user.energy, reward.energy_cost
        )));
    }

    let level = apply_experience(user.level, user.experience, reward.experience);
    let total_coins = coins_earned + level.bonus_coins;
    let new_coins = user.coins + total_coins;
    let new_energy = user.energy - reward.energy_cost;

    sqlx::query("UPDATE users SET coins = ?, energy = ?, level = ?, experience = ? WHERE id = ?")
        .bind(new_coins)
        .bind(new_energy)
        .bind(level.new_level)
        .bind(level.new_experience)
        .bind(user_id)
        .execute(&mut *tx)
        .await?;
    quiz::insert_attempt_tx(
        &mut tx,
        user_id,
        submission.task_id,
        submission.score,
        submission.correct_count,
        submission.total_questions,
        coins_earned,
        now,
    )
    .await?;
    progress::bump_tx(&mut tx, user_id, now.date_naive(), 0, 1, coins_earned).await?;
    tx.commit().await?;

    let mut message = format!(
        "Quiz finished! {}/{} correct, +{} coins",
        submission.correct_count, submission.total_questions, coins_earned
    );
    if level.leveled_up {
        message.push_str(&format!(" Congratulations, you reached level {}!", level.new_level));
    }
    if let Some(ref task) = task {
        message.push_str(&format!(" Quiz for \"{}\" recorded.", task.title));
    }
    info!(user_id, ?difficulty, coins_earned, level_up = level.leveled_up, "quiz submitted");

    Ok(QuizReceipt {
        score: submission.score,
        correct_answers: submission.correct_count,
        total_questions: submission.total_questions,
        coins_earned: total_coins,
        energy_used: reward.energy_cost,
        experience_gained: reward.experience,
        new_coins,
        new_energy,
        new_experience: level.new_experience,
        new_level: level.new_level,
        level_up: level.leveled_up,
        difficulty,
        task_completed: task.is_some(),
        message,
    })
}
