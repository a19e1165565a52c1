//! Contains all the data structures that map to database tables or query results.

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, NaiveDate, Utc};
use sqlx::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Type, Serialize, Deserialize)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Daily,
    Regular,
    Quiz,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_admin: bool,
    pub coins: i64,
    pub energy: i64,
    pub streak: i64,
    pub level: i64,
    pub experience: i64,
    pub last_login: Option<DateTime<Utc>>,
    pub last_daily_reset: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub reward_coins: i64,
    pub energy_cost: i64,
    pub difficulty: Difficulty,
    pub quiz_required: bool,
    pub is_active: bool,
    pub daily_reset: bool,
    pub task_type: TaskType,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row per calendar date: exactly three daily tasks plus one quiz task.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct DailyTaskSet {
    pub id: i64,
    pub date: NaiveDate,
    pub task_1_id: i64,
    pub task_2_id: i64,
    pub task_3_id: i64,
    pub quiz_task_id: i64,
    pub created_at: DateTime<Utc>,
}

impl DailyTaskSet {
    pub fn daily_task_ids(&self) -> [i64; 3] {
        [self.task_1_id, self.task_2_id, self.task_3_id]
    }

    /// All four referenced task ids, quiz last.
    pub fn all_task_ids(&self) -> [i64; 4] {
        [
            self.task_1_id,
            self.task_2_id,
            self.task_3_id,
            self.quiz_task_id,
        ]
    }
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct UserTaskProgress {
    pub id: i64,
    pub user_id: i64,
    pub task_id: i64,
    pub completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub price: i64,
    pub category: String,
    pub energy_boost: i64,
    pub is_active: bool,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct EnergyPack {
    pub id: i64,
    pub name: String,
    pub energy_amount: i64,
    pub price: i64,
    pub description: Option<String>,
    pub is_active: bool,
}

/// Inventory row joined with its item, for listings.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct InventoryItemView {
    pub id: i64,
    pub item_id: i64,
    pub name: String,
    pub category: String,
    pub energy_boost: i64,
    pub equipped: bool,
}

/// Per (user, date) reporting counters. Not authoritative for rewards.
#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct DailyProgress {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub tasks_completed: i64,
    pub quizzes_completed: i64,
    pub coins_earned: i64,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct News {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
    pub author_id: i64,
    pub status: String,
    pub views_count: i64,
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow, Debug, Clone, Serialize)]
pub struct Announcement {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub announcement_type: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub author_id: i64,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}
