//! The JSON HTTP boundary: a thin axum layer over the core. Session/cookie
//! plumbing is externally supplied, so handlers identify the acting user by
//! id in the path or payload.

mod handlers;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::json;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::model::SharedState;

pub fn build_router(state: SharedState) -> Router {
    Router::new()
        .route("/api/register", post(handlers::register))
        .route("/api/login", post(handlers::login))
        .route("/api/dashboard/:user_id", get(handlers::dashboard))
        .route("/api/quiz/questions", get(handlers::quiz_questions))
        .route("/api/quiz/submit", post(handlers::quiz_submit))
        .route("/api/tasks/:task_id/complete", post(handlers::complete_task))
        .route("/api/shop", get(handlers::shop_catalog))
        .route("/api/shop/items/:item_id/buy", post(handlers::buy_item))
        .route("/api/shop/energy/:pack_id/buy", post(handlers::buy_energy))
        .route("/api/inventory/:user_id", get(handlers::inventory))
        .route("/api/inventory/:inventory_id/equip", post(handlers::equip_item))
        .route(
            "/api/inventory/:inventory_id/unequip",
            post(handlers::unequip_item),
        )
        .route("/api/stats/:user_id", get(handlers::user_stats))
        .route("/api/daily-progress/:user_id", get(handlers::daily_progress))
        .route("/api/leaderboard", get(handlers::leaderboard))
        .route("/api/news", get(handlers::news_list))
        .route("/api/news/:news_id", get(handlers::news_detail))
        .route("/api/announcements", get(handlers::announcements))
        .route("/api/bot/register", post(handlers::bot_register))
        .route("/api/bot/stats/:telegram_id", get(handlers::bot_stats))
        .route("/api/admin/tasks", post(handlers::admin_add_task))
        .route("/api/admin/tasks/:task_id", post(handlers::admin_update_task))
        .route(
            "/api/admin/tasks/:task_id/toggle",
            post(handlers::admin_toggle_task),
        )
        .route("/api/admin/rotation", post(handlers::admin_generate_rotation))
        .route("/api/admin/daily-reset", post(handlers::admin_daily_reset))
        .route("/api/admin/news", post(handlers::admin_add_news))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::FORBIDDEN,
            AppError::InsufficientResource(_)
            | AppError::AlreadyCompleted
            | AppError::PrerequisiteNotMet(_) => StatusCode::CONFLICT,
            AppError::DataUnavailable(_) | AppError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        let body = Json(json!({ "success": false, "error": self.to_string() }));
        (status, body).into_response()
    }
}
