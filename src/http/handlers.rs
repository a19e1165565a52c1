//! Request handlers. Each one validates, calls into the core and wraps the
//! result in a `{"success": true, ...}` JSON body; domain errors bubble up
//! through `AppError`'s `IntoResponse`.

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::database::models::{Difficulty, TaskType};
use crate::database::tasks::{NewTask, TaskPatch};
use crate::database::{bot, daily, news, progress, shop, tasks, users};
use crate::error::{AppError, AppResult};
use crate::model::SharedState;
use crate::quizbank::select;
use crate::rewards::engine::{self, QuizSubmission};
use crate::scheduler;

/// Serializes a receipt and stamps `success: true` into the object.
fn ok<T: Serialize>(value: T) -> Json<Value> {
    let mut body = serde_json::to_value(value).unwrap_or(Value::Null);
    if let Value::Object(ref mut map) = body {
        map.insert("success".to_string(), Value::Bool(true));
    }
    Json(body)
}

// --- Accounts ---

#[derive(Deserialize)]
pub struct RegisterPayload {
    pub username: String,
    pub email: String,
    #[serde(default = "default_role")]
    pub role: String,
}

fn default_role() -> String {
    "child".to_string()
}

pub async fn register(
    State(state): State<SharedState>,
    Json(payload): Json<RegisterPayload>,
) -> AppResult<Json<Value>> {
    if users::get_user_by_username(&state.db, &payload.username)
        .await?
        .is_some()
    {
        return Err(AppError::PrerequisiteNotMet(
            "this username is already taken".to_string(),
        ));
    }
    let starting_coins = if payload.role == "child" { 100 } else { 50 };
    let user = users::create_user(
        &state.db,
        &payload.username,
        &payload.email,
        &payload.role,
        false,
        starting_coins,
    )
    .await?;
    Ok(ok(json!({ "user": user })))
}

#[derive(Deserialize)]
pub struct LoginPayload {
    pub user_id: i64,
}

pub async fn login(
    State(state): State<SharedState>,
    Json(payload): Json<LoginPayload>,
) -> AppResult<Json<Value>> {
    let outcome = users::record_login(&state.db, payload.user_id, Utc::now()).await?;
    Ok(ok(outcome))
}

// --- Dashboard ---

pub async fn dashboard(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let pool = &state.db;
    let now = Utc::now();
    let today = now.date_naive();

    let user = users::get_user(pool, user_id).await?;
    let set = daily::ensure_daily_set(pool, today).await?;
    let todays_tasks = match set {
        Some(ref set) => {
            tasks::sync_daily_progress(pool, user_id, today, &set.all_task_ids()).await?;
            let (daily_tasks, daily_quiz) = daily::tasks_for_set(pool, set).await?;
            Some(json!({ "daily_tasks": daily_tasks, "daily_quiz": daily_quiz }))
        }
        None => None,
    };

    let all_tasks = tasks::list_active(pool).await?;
    let daily_tasks: Vec<_> = all_tasks.iter().filter(|t| t.daily_reset).collect();
    let regular_tasks: Vec<_> = all_tasks
        .iter()
        .filter(|t| t.task_type == TaskType::Regular)
        .collect();
    let quiz_tasks: Vec<_> = all_tasks
        .iter()
        .filter(|t| t.task_type == TaskType::Quiz)
        .collect();
    let completed_task_ids = tasks::completed_task_ids(pool, user_id).await?;
    let daily_progress = progress::get(pool, user_id, today).await?;
    let news_list = news::active_news(pool, 3).await?;
    let announcements = news::active_announcements(pool, now).await?;

    Ok(ok(json!({
        "user": user,
        "todays_tasks": todays_tasks,
        "daily_tasks": daily_tasks,
        "regular_tasks": regular_tasks,
        "quiz_tasks": quiz_tasks,
        "completed_task_ids": completed_task_ids,
        "daily_progress": daily_progress,
        "news": news_list,
        "announcements": announcements,
    })))
}

// --- Quizzes ---

#[derive(Deserialize)]
pub struct QuestionParams {
    pub user_id: i64,
    pub difficulty: Option<String>,
    pub task_id: Option<i64>,
}

pub async fn quiz_questions(
    State(state): State<SharedState>,
    Query(params): Query<QuestionParams>,
) -> AppResult<Json<Value>> {
    let user = users::get_user(&state.db, params.user_id).await?;
    let task_difficulty = match params.task_id {
        Some(task_id) => Some(tasks::get_task(&state.db, task_id).await?.difficulty),
        None => None,
    };
    let difficulty =
        select::resolve_difficulty(task_difficulty, params.difficulty.as_deref(), user.level);
    let questions = select::select_questions(state.questions.questions(), difficulty);
    let total = questions.len();
    Ok(ok(json!({
        "questions": questions,
        "total": total,
        "difficulty": difficulty,
        "user_level": user.level,
        "source": state.questions.source,
    })))
}

fn default_quiz_difficulty() -> Difficulty {
    Difficulty::Medium
}

#[derive(Deserialize)]
pub struct QuizSubmitPayload {
    pub user_id: i64,
    pub task_id: Option<i64>,
    #[serde(default = "default_quiz_difficulty")]
    pub difficulty: Difficulty,
    /// Per-question detail from the client; accepted but not persisted.
    #[serde(default)]
    pub results: Vec<Value>,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub correct_count: i64,
    #[serde(default)]
    pub total_questions: i64,
}

pub async fn quiz_submit(
    State(state): State<SharedState>,
    Json(payload): Json<QuizSubmitPayload>,
) -> AppResult<Json<Value>> {
    let submission = QuizSubmission {
        task_id: payload.task_id,
        difficulty: payload.difficulty,
        score: payload.score,
        correct_count: payload.correct_count,
        total_questions: payload.total_questions,
    };
    let receipt = engine::submit_quiz(&state.db, payload.user_id, &submission, Utc::now()).await?;
    Ok(ok(receipt))
}

// --- Tasks ---

#[derive(Deserialize)]
pub struct ActingUser {
    pub user_id: i64,
}

pub async fn complete_task(
    State(state): State<SharedState>,
    Path(task_id): Path<i64>,
    Json(payload): Json<ActingUser>,
) -> AppResult<Json<Value>> {
    let receipt = engine::complete_task(&state.db, payload.user_id, task_id, Utc::now()).await?;
    Ok(ok(receipt))
}

// --- Shop & inventory ---

pub async fn shop_catalog(State(state): State<SharedState>) -> AppResult<Json<Value>> {
    let items = shop::list_items(&state.db).await?;
    let energy_packs = shop::list_energy_packs(&state.db).await?;
    Ok(ok(json!({ "items": items, "energy_packs": energy_packs })))
}

pub async fn buy_item(
    State(state): State<SharedState>,
    Path(item_id): Path<i64>,
    Json(payload): Json<ActingUser>,
) -> AppResult<Json<Value>> {
    let receipt = shop::buy_item(&state.db, payload.user_id, item_id).await?;
    Ok(ok(receipt))
}

pub async fn buy_energy(
    State(state): State<SharedState>,
    Path(pack_id): Path<i64>,
    Json(payload): Json<ActingUser>,
) -> AppResult<Json<Value>> {
    let receipt = shop::buy_energy_pack(&state.db, payload.user_id, pack_id).await?;
    Ok(ok(receipt))
}

pub async fn inventory(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let items = shop::inventory(&state.db, user_id).await?;
    Ok(ok(json!({ "inventory": items })))
}

pub async fn equip_item(
    State(state): State<SharedState>,
    Path(inventory_id): Path<i64>,
    Json(payload): Json<ActingUser>,
) -> AppResult<Json<Value>> {
    let entry = shop::equip(&state.db, payload.user_id, inventory_id).await?;
    let message = format!("{} equipped!", entry.name);
    Ok(ok(json!({ "item": entry, "message": message })))
}

pub async fn unequip_item(
    State(state): State<SharedState>,
    Path(inventory_id): Path<i64>,
    Json(payload): Json<ActingUser>,
) -> AppResult<Json<Value>> {
    let entry = shop::unequip(&state.db, payload.user_id, inventory_id).await?;
    let message = format!("{} unequipped!", entry.name);
    Ok(ok(json!({ "item": entry, "message": message })))
}

// --- Stats & feeds ---

pub async fn user_stats(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let user = users::get_user(&state.db, user_id).await?;
    let totals = users::user_stats(&state.db, user_id).await?;
    Ok(ok(json!({
        "coins": user.coins,
        "energy": user.energy,
        "streak": user.streak,
        "level": user.level,
        "experience": user.experience,
        "totals": totals,
    })))
}

pub async fn daily_progress(
    State(state): State<SharedState>,
    Path(user_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let today = Utc::now().date_naive();
    let row = progress::get(&state.db, user_id, today).await?;
    let body = match row {
        Some(row) => json!({
            "tasks_completed": row.tasks_completed,
            "quizzes_completed": row.quizzes_completed,
            "coins_earned": row.coins_earned,
        }),
        None => json!({ "tasks_completed": 0, "quizzes_completed": 0, "coins_earned": 0 }),
    };
    Ok(ok(body))
}

pub async fn leaderboard(State(state): State<SharedState>) -> AppResult<Json<Value>> {
    let users = users::leaderboard(&state.db, 20).await?;
    Ok(ok(json!({ "users": users })))
}

pub async fn news_list(State(state): State<SharedState>) -> AppResult<Json<Value>> {
    let news_list = news::active_news(&state.db, 50).await?;
    Ok(ok(json!({ "news": news_list })))
}

pub async fn news_detail(
    State(state): State<SharedState>,
    Path(news_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let post = news::read_news(&state.db, news_id).await?;
    Ok(ok(json!({ "news": post })))
}

pub async fn announcements(State(state): State<SharedState>) -> AppResult<Json<Value>> {
    let list = news::active_announcements(&state.db, Utc::now()).await?;
    let count = list.len();
    Ok(ok(json!({ "announcements": list, "count": count })))
}

// --- Companion bot ---

#[derive(Deserialize)]
pub struct BotRegisterPayload {
    pub telegram_id: i64,
    pub username: String,
}

pub async fn bot_register(
    State(state): State<SharedState>,
    Json(payload): Json<BotRegisterPayload>,
) -> AppResult<Json<Value>> {
    let user = bot::register(&state.db, payload.telegram_id, &payload.username).await?;
    Ok(ok(json!({ "user": user })))
}

pub async fn bot_stats(
    State(state): State<SharedState>,
    Path(telegram_id): Path<i64>,
) -> AppResult<Json<Value>> {
    let user = bot::stats_for(&state.db, telegram_id).await?;
    Ok(ok(json!({
        "username": user.username,
        "coins": user.coins,
        "energy": user.energy,
        "streak": user.streak,
        "level": user.level,
    })))
}

// --- Admin ---

#[derive(Deserialize)]
pub struct AdminTaskPayload {
    pub admin_id: i64,
    pub task: NewTask,
}

pub async fn admin_add_task(
    State(state): State<SharedState>,
    Json(payload): Json<AdminTaskPayload>,
) -> AppResult<Json<Value>> {
    users::require_admin(&state.db, payload.admin_id).await?;
    let task = tasks::insert_task(&state.db, &payload.task).await?;
    Ok(ok(json!({ "task": task })))
}

#[derive(Deserialize)]
pub struct AdminPatchPayload {
    pub admin_id: i64,
    pub task: TaskPatch,
}

pub async fn admin_update_task(
    State(state): State<SharedState>,
    Path(task_id): Path<i64>,
    Json(payload): Json<AdminPatchPayload>,
) -> AppResult<Json<Value>> {
    users::require_admin(&state.db, payload.admin_id).await?;
    let task = tasks::update_task(&state.db, task_id, &payload.task).await?;
    Ok(ok(json!({ "task": task })))
}

#[derive(Deserialize)]
pub struct AdminAction {
    pub admin_id: i64,
}

pub async fn admin_toggle_task(
    State(state): State<SharedState>,
    Path(task_id): Path<i64>,
    Json(payload): Json<AdminAction>,
) -> AppResult<Json<Value>> {
    users::require_admin(&state.db, payload.admin_id).await?;
    let task = tasks::toggle_task(&state.db, task_id).await?;
    Ok(ok(json!({ "task": task, "is_active": task.is_active })))
}

pub async fn admin_generate_rotation(
    State(state): State<SharedState>,
    Json(payload): Json<AdminAction>,
) -> AppResult<Json<Value>> {
    users::require_admin(&state.db, payload.admin_id).await?;
    let set = daily::ensure_daily_set(&state.db, Utc::now().date_naive()).await?;
    match set {
        Some(set) => Ok(ok(json!({ "daily_set": set }))),
        None => Err(AppError::PrerequisiteNotMet(
            "not enough active tasks for a rotation".to_string(),
        )),
    }
}

pub async fn admin_daily_reset(
    State(state): State<SharedState>,
    Json(payload): Json<AdminAction>,
) -> AppResult<Json<Value>> {
    users::require_admin(&state.db, payload.admin_id).await?;
    let ran = scheduler::run_daily_maintenance(&state.db, Utc::now().date_naive()).await?;
    Ok(ok(json!({ "ran": ran })))
}

fn default_news_category() -> String {
    "general".to_string()
}

#[derive(Deserialize)]
pub struct AdminNewsPayload {
    pub admin_id: i64,
    pub title: String,
    pub content: String,
    #[serde(default = "default_news_category")]
    pub category: String,
}

pub async fn admin_add_news(
    State(state): State<SharedState>,
    Json(payload): Json<AdminNewsPayload>,
) -> AppResult<Json<Value>> {
    users::require_admin(&state.db, payload.admin_id).await?;
    let post = news::insert_news(
        &state.db,
        payload.admin_id,
        &payload.title,
        &payload.content,
        &payload.category,
    )
    .await?;
    Ok(ok(json!({ "news": post })))
}
