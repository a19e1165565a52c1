//! The central, shared state of the application.
//! An `Arc<AppState>` is constructed once in `main` and handed to the HTTP
//! handlers and the daily scheduler, replacing any module-level singletons.

use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::init::DbPool;
use crate::quizbank::QuestionBank;

pub struct AppState {
    /// The connection pool for the SQLite database.
    pub db: DbPool,
    /// The static question bank, loaded once at startup (file or built-in fallback).
    pub questions: QuestionBank,
    pub config: AppConfig,
}

pub type SharedState = Arc<AppState>;
