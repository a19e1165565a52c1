// Library entry so integration tests and external tools can reference internal modules.
// Re-export the same modules used by the binary (`main.rs`).
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod http;
pub mod model;
pub mod quizbank;
pub mod rewards;
pub mod scheduler;
pub mod telemetry;

// Convenient re-exports for frequently used types.
pub use error::{AppError, AppResult};
pub use model::AppState;
