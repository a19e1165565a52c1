//! News posts and time-windowed announcements read by the dashboard.

use chrono::{DateTime, Utc};

use super::init::DbPool;
use super::models::{Announcement, News};
use crate::error::{AppError, AppResult};

pub async fn active_news(pool: &DbPool, limit: i64) -> AppResult<Vec<News>> {
    let news = sqlx::query_as::<_, News>(
        "SELECT * FROM news WHERE status = 'active' ORDER BY created_at DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;
    Ok(news)
}

/// Fetches one post and bumps its view counter.
pub async fn read_news(pool: &DbPool, news_id: i64) -> AppResult<News> {
    let result = sqlx::query("UPDATE news SET views_count = views_count + 1 WHERE id = ?")
        .bind(news_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("news post"));
    }
    let news = sqlx::query_as::<_, News>("SELECT * FROM news WHERE id = ?")
        .bind(news_id)
        .fetch_one(pool)
        .await?;
    Ok(news)
}

/// Announcements active right now: flagged active and inside their window.
pub async fn active_announcements(
    pool: &DbPool,
    now: DateTime<Utc>,
) -> AppResult<Vec<Announcement>> {
    let announcements = sqlx::query_as::<_, Announcement>(
        "SELECT * FROM announcements WHERE is_active = 1 AND start_date <= ? AND end_date >= ? \
         ORDER BY created_at DESC",
    )
    .bind(now)
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(announcements)
}

pub async fn insert_news(
    pool: &DbPool,
    author_id: i64,
    title: &str,
    content: &str,
    category: &str,
) -> AppResult<News> {
    let result = sqlx::query(
        "INSERT INTO news (title, content, category, author_id, created_at) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(title)
    .bind(content)
    .bind(category)
    .bind(author_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    let news = sqlx::query_as::<_, News>("SELECT * FROM news WHERE id = ?")
        .bind(result.last_insert_rowid())
        .fetch_one(pool)
        .await?;
    Ok(news)
}

#[allow(clippy::too_many_arguments)]
pub async fn insert_announcement(
    pool: &DbPool,
    author_id: i64,
    title: &str,
    content: &str,
    announcement_type: &str,
    start_date: DateTime<Utc>,
    end_date: DateTime<Utc>,
) -> AppResult<Announcement> {
    let result = sqlx::query(
        "INSERT INTO announcements (title, content, announcement_type, start_date, end_date, \
         author_id, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(title)
    .bind(content)
    .bind(announcement_type)
    .bind(start_date)
    .bind(end_date)
    .bind(author_id)
    .bind(Utc::now())
    .execute(pool)
    .await?;
    let announcement = sqlx::query_as::<_, Announcement>("SELECT * FROM announcements WHERE id = ?")
        .bind(result.last_insert_rowid())
        .fetch_one(pool)
        .await?;
    Ok(announcement)
}
