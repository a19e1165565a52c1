//! Shared helpers for the integration tests: an in-memory SQLite pool with
//! the full schema, plus quick user/task factories.

use ecoverse_backend::database::init::{create_schema, DbPool};
use ecoverse_backend::database::models::{Difficulty, TaskType};
use ecoverse_backend::database::tasks::{insert_task, NewTask};
use ecoverse_backend::database::users;
use sqlx::sqlite::SqlitePoolOptions;

pub async fn test_pool() -> DbPool {
    // A single connection so every query sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    create_schema(&pool).await.expect("schema");
    pool
}

pub async fn user_with(pool: &DbPool, username: &str, coins: i64, energy: i64) -> i64 {
    let user = users::create_user(
        pool,
        username,
        &format!("{username}@test.local"),
        "child",
        false,
        coins,
    )
    .await
    .expect("create user");
    sqlx::query("UPDATE users SET energy = ? WHERE id = ?")
        .bind(energy)
        .bind(user.id)
        .execute(pool)
        .await
        .expect("set energy");
    user.id
}

#[allow(clippy::too_many_arguments)]
pub async fn task_with(
    pool: &DbPool,
    title: &str,
    task_type: TaskType,
    difficulty: Difficulty,
    reward_coins: i64,
    energy_cost: i64,
    quiz_required: bool,
) -> i64 {
    let task = insert_task(
        pool,
        &NewTask {
            title: title.to_string(),
            description: format!("{title} description"),
            reward_coins,
            energy_cost,
            difficulty,
            quiz_required,
            daily_reset: task_type == TaskType::Daily,
            is_active: true,
            task_type,
            category: "eco".to_string(),
        },
    )
    .await
    .expect("insert task");
    task.id
}
