//! The background daily maintenance loop: one rotation roll and one global
//! reset per UTC calendar day, keyed off the stored last-run date rather
//! than a wall-clock "midnight" check, so coarse polling and missed ticks
//! are harmless.

use chrono::{NaiveDate, Utc};
use tokio::time::{interval, Duration};
use tracing::{error, info};

use crate::constants::SCHEDULER_POLL_SECS;
use crate::database::init::DbPool;
use crate::database::{daily, progress, users};
use crate::error::AppResult;
use crate::model::SharedState;

pub async fn run(state: SharedState) {
    let mut ticker = interval(Duration::from_secs(SCHEDULER_POLL_SECS));
    loop {
        ticker.tick().await;
        let today = Utc::now().date_naive();
        if let Err(err) = run_daily_maintenance(&state.db, today).await {
            // The last-run date was not advanced, so the next tick retries.
            error!(%err, "daily maintenance failed");
        }
    }
}

/// Performs the day's maintenance if it has not run yet. Returns whether it
/// did anything. Idempotent per calendar day: the stored last-run date only
/// advances after the whole reset commits.
pub async fn run_daily_maintenance(pool: &DbPool, today: NaiveDate) -> AppResult<bool> {
    if daily::last_reset_date(pool).await? == Some(today) {
        return Ok(false);
    }

    // Roll the rotation first so dashboards loaded right after midnight see it.
    daily::ensure_daily_set(pool, today).await?;

    let mut tx = pool.begin().await?;
    let user_ids = users::all_user_ids(&mut tx).await?;
    for &user_id in &user_ids {
        progress::ensure_row_tx(&mut tx, user_id, today).await?;
    }
    let refilled = users::refill_all_energy(&mut tx, Utc::now()).await?;
    daily::set_last_reset_date(&mut tx, today).await?;
    tx.commit().await?;

    info!(%today, users = user_ids.len(), refilled, "daily reset complete");
    Ok(true)
}
