//! Environment-driven configuration, read once at process start and carried
//! inside `AppState` instead of being re-read from globals.

use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub question_bank_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite://ecoverse.db?mode=rwc".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let question_bank_path =
            env::var("QUESTION_BANK_PATH").unwrap_or_else(|_| "ml_questions.json".to_string());
        Self {
            database_url,
            port,
            question_bank_path,
        }
    }
}
