mod common;

use std::collections::HashSet;

use chrono::Utc;
use common::{task_with, test_pool, user_with};
use ecoverse_backend::database::models::{Difficulty, TaskType};
use ecoverse_backend::database::{daily, progress, users};
use ecoverse_backend::scheduler::run_daily_maintenance;

#[tokio::test]
async fn rotation_picks_three_daily_and_one_quiz() {
    let pool = test_pool().await;
    let mut daily_ids = HashSet::new();
    for i in 0..5 {
        let id = task_with(
            &pool,
            &format!("daily {i}"),
            TaskType::Daily,
            Difficulty::Easy,
            10,
            5,
            false,
        )
        .await;
        daily_ids.insert(id);
    }
    let mut quiz_ids = HashSet::new();
    for i in 0..2 {
        let id = task_with(
            &pool,
            &format!("quiz {i}"),
            TaskType::Quiz,
            Difficulty::Medium,
            30,
            20,
            true,
        )
        .await;
        quiz_ids.insert(id);
    }

    let today = Utc::now().date_naive();
    let set = daily::ensure_daily_set(&pool, today)
        .await
        .unwrap()
        .expect("a set");
    let picked: HashSet<i64> = set.daily_task_ids().into_iter().collect();
    assert_eq!(picked.len(), 3);
    assert!(picked.is_subset(&daily_ids));
    assert!(quiz_ids.contains(&set.quiz_task_id));
}

#[tokio::test]
async fn rotation_is_stable_within_a_day() {
    let pool = test_pool().await;
    for i in 0..5 {
        task_with(
            &pool,
            &format!("daily {i}"),
            TaskType::Daily,
            Difficulty::Easy,
            10,
            5,
            false,
        )
        .await;
    }
    task_with(&pool, "quiz", TaskType::Quiz, Difficulty::Hard, 50, 25, true).await;

    let today = Utc::now().date_naive();
    let first = daily::ensure_daily_set(&pool, today).await.unwrap().unwrap();
    let second = daily::ensure_daily_set(&pool, today).await.unwrap().unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(first.all_task_ids(), second.all_task_ids());
}

#[tokio::test]
async fn rotation_needs_a_big_enough_pool() {
    let pool = test_pool().await;
    // Only two daily tasks and no quiz task.
    for i in 0..2 {
        task_with(
            &pool,
            &format!("daily {i}"),
            TaskType::Daily,
            Difficulty::Easy,
            10,
            5,
            false,
        )
        .await;
    }
    let today = Utc::now().date_naive();
    assert!(daily::ensure_daily_set(&pool, today).await.unwrap().is_none());
    // Nothing was stored, so a later call with a full pool can still roll.
    assert!(daily::get_daily_set(&pool, today).await.unwrap().is_none());
}

#[tokio::test]
async fn inactive_tasks_are_never_rotated_in() {
    let pool = test_pool().await;
    for i in 0..3 {
        task_with(
            &pool,
            &format!("daily {i}"),
            TaskType::Daily,
            Difficulty::Easy,
            10,
            5,
            false,
        )
        .await;
    }
    let benched = task_with(
        &pool,
        "benched daily",
        TaskType::Daily,
        Difficulty::Easy,
        10,
        5,
        false,
    )
    .await;
    sqlx::query("UPDATE tasks SET is_active = 0 WHERE id = ?")
        .bind(benched)
        .execute(&pool)
        .await
        .unwrap();
    task_with(&pool, "quiz", TaskType::Quiz, Difficulty::Medium, 30, 20, true).await;

    let today = Utc::now().date_naive();
    let set = daily::ensure_daily_set(&pool, today).await.unwrap().unwrap();
    assert!(!set.daily_task_ids().contains(&benched));
}

#[tokio::test]
async fn maintenance_refills_energy_and_runs_once_per_day() {
    let pool = test_pool().await;
    let low = user_with(&pool, "low", 0, 30).await;
    let high = user_with(&pool, "high", 0, 80).await;
    for i in 0..3 {
        task_with(
            &pool,
            &format!("daily {i}"),
            TaskType::Daily,
            Difficulty::Easy,
            10,
            5,
            false,
        )
        .await;
    }
    task_with(&pool, "quiz", TaskType::Quiz, Difficulty::Medium, 30, 20, true).await;

    let today = Utc::now().date_naive();
    assert!(run_daily_maintenance(&pool, today).await.unwrap());

    // +50 bounded at 100.
    assert_eq!(users::get_user(&pool, low).await.unwrap().energy, 80);
    assert_eq!(users::get_user(&pool, high).await.unwrap().energy, 100);
    assert!(daily::get_daily_set(&pool, today).await.unwrap().is_some());
    assert!(progress::get(&pool, low, today).await.unwrap().is_some());
    assert!(progress::get(&pool, high, today).await.unwrap().is_some());

    // Second call the same day is a no-op.
    sqlx::query("UPDATE users SET energy = 10 WHERE id = ?")
        .bind(low)
        .execute(&pool)
        .await
        .unwrap();
    assert!(!run_daily_maintenance(&pool, today).await.unwrap());
    assert_eq!(users::get_user(&pool, low).await.unwrap().energy, 10);
}
