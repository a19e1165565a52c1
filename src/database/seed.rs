//! First-run demo reference data: the tasks, shop stock and sample content
//! an admin would otherwise have to load by hand. Skipped when the tasks
//! table is already populated, so restarts are safe.

use chrono::{Duration, Utc};
use tracing::info;

use super::init::DbPool;
use super::models::{Difficulty, TaskType};
use super::tasks::{insert_task, NewTask};
use crate::error::AppResult;

pub async fn seed_demo_data(pool: &DbPool) -> AppResult<()> {
    let existing = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM tasks")
        .fetch_one(pool)
        .await?;
    if existing > 0 {
        return Ok(());
    }

    let admin = super::users::create_user(pool, "admin", "admin@ecoverse.local", "admin", true, 1000)
        .await?;
    super::users::create_user(pool, "green_kid", "kid@ecoverse.local", "child", false, 150).await?;
    super::users::create_user(pool, "eco_parent", "parent@ecoverse.local", "adult", false, 80)
        .await?;

    let tasks: &[(&str, &str, i64, i64, Difficulty, bool, bool, TaskType, &str)] = &[
        // title, description, coins, energy, difficulty, quiz_required, daily_reset, type, category
        (
            "Save water",
            "Cut your shower time by five minutes today",
            15, 8, Difficulty::Easy, false, true, TaskType::Daily, "water",
        ),
        (
            "Save energy",
            "Unplug idle devices for one hour",
            20, 10, Difficulty::Easy, false, true, TaskType::Daily, "energy",
        ),
        (
            "Sort plastics",
            "Set aside three plastic containers for recycling",
            25, 12, Difficulty::Medium, false, true, TaskType::Daily, "recycling",
        ),
        (
            "Plant a tree",
            "Plant one tree in a green area",
            50, 25, Difficulty::Hard, true, false, TaskType::Regular, "planting",
        ),
        (
            "Start a compost",
            "Turn food scraps into compost",
            40, 20, Difficulty::Medium, true, false, TaskType::Regular, "composting",
        ),
        (
            "Ride a bike",
            "Swap the car for a bike for a whole day",
            35, 18, Difficulty::Medium, true, false, TaskType::Regular, "transport",
        ),
        (
            "Eco knowledge quiz",
            "Test what you know about ecology",
            30, 15, Difficulty::Easy, true, false, TaskType::Quiz, "knowledge",
        ),
        (
            "Recycling quiz",
            "Do you know the recycling rules?",
            45, 22, Difficulty::Medium, true, false, TaskType::Quiz, "recycling",
        ),
        (
            "Energy saving quiz",
            "Do you know how to save energy?",
            60, 30, Difficulty::Hard, true, false, TaskType::Quiz, "energy",
        ),
    ];
    for &(title, description, coins, energy, difficulty, quiz_required, daily_reset, task_type, category) in
        tasks
    {
        insert_task(
            pool,
            &NewTask {
                title: title.to_string(),
                description: description.to_string(),
                reward_coins: coins,
                energy_cost: energy,
                difficulty,
                quiz_required,
                daily_reset,
                is_active: true,
                task_type,
                category: category.to_string(),
            },
        )
        .await?;
    }

    let items: &[(&str, i64, &str, i64)] = &[
        ("Green Cap", 30, "hat", 0),
        ("Blue Cap", 35, "hat", 0),
        ("Green Shirt", 45, "clothes", 0),
        ("Blue Shirt", 50, "clothes", 0),
        ("Sneakers", 60, "shoes", 0),
        ("White Sneakers", 70, "shoes", 0),
        ("Backpack", 80, "accessory", 0),
        ("Sunglasses", 85, "accessory", 0),
    ];
    for &(name, price, category, energy_boost) in items {
        sqlx::query("INSERT INTO items (name, price, category, energy_boost) VALUES (?, ?, ?, ?)")
            .bind(name)
            .bind(price)
            .bind(category)
            .bind(energy_boost)
            .execute(pool)
            .await?;
    }

    let packs: &[(&str, i64, i64)] = &[
        ("Small Energy Pack", 20, 15),
        ("Medium Energy Pack", 50, 35),
        ("Large Energy Pack", 100, 60),
    ];
    for &(name, amount, price) in packs {
        sqlx::query(
            "INSERT INTO energy_packs (name, energy_amount, price, description) VALUES (?, ?, ?, ?)",
        )
        .bind(name)
        .bind(amount)
        .bind(price)
        .bind(format!("{amount} energy"))
        .execute(pool)
        .await?;
    }

    super::news::insert_news(
        pool,
        admin.id,
        "Daily tasks have arrived!",
        "Fresh eco tasks and quizzes rotate in every day.",
        "update",
    )
    .await?;
    let now = Utc::now();
    super::news::insert_announcement(
        pool,
        admin.id,
        "Welcome to EcoVerse",
        "Complete tasks, take quizzes and grow your hero.",
        "success",
        now,
        now + Duration::days(14),
    )
    .await?;

    info!("seeded demo reference data");
    Ok(())
}
