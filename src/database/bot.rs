//! The companion bot's view of the data model: a telegram_id -> user_id
//! mapping that writes only at first contact (creating a zero-balance user)
//! and reads otherwise.

use chrono::Utc;

use super::init::DbPool;
use super::models::User;
use crate::error::{AppError, AppResult};

/// Idempotent first-contact registration. Returns the mapped user, creating
/// a zero-balance account when the telegram id is new.
pub async fn register(pool: &DbPool, telegram_id: i64, username: &str) -> AppResult<User> {
    if let Some(user_id) =
        sqlx::query_scalar::<_, i64>("SELECT user_id FROM telegram_links WHERE telegram_id = ?")
            .bind(telegram_id)
            .fetch_optional(pool)
            .await?
    {
        return super::users::get_user(pool, user_id).await;
    }

    // Telegram usernames may collide with web accounts; suffix with the id.
    let taken = super::users::get_user_by_username(pool, username)
        .await?
        .is_some();
    let username = if taken {
        format!("{username}_{telegram_id}")
    } else {
        username.to_string()
    };
    let email = format!("{telegram_id}@telegram");

    let mut tx = pool.begin().await?;
    let now = Utc::now();
    let result = sqlx::query(
        "INSERT INTO users (username, email, role, coins, created_at) VALUES (?, ?, 'child', 0, ?)",
    )
    .bind(&username)
    .bind(&email)
    .bind(now)
    .execute(&mut *tx)
    .await?;
    let user_id = result.last_insert_rowid();
    sqlx::query("INSERT INTO telegram_links (telegram_id, user_id, created_at) VALUES (?, ?, ?)")
        .bind(telegram_id)
        .bind(user_id)
        .bind(now)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    super::users::get_user(pool, user_id).await
}

/// Read-only stats lookup through the mapping table.
pub async fn stats_for(pool: &DbPool, telegram_id: i64) -> AppResult<User> {
    sqlx::query_as::<_, User>(
        "SELECT u.* FROM users u JOIN telegram_links tl ON tl.user_id = u.id \
         WHERE tl.telegram_id = ?",
    )
    .bind(telegram_id)
    .fetch_optional(pool)
    .await?
    .ok_or(AppError::NotFound("telegram user"))
}
