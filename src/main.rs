use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use ecoverse_backend::config::AppConfig;
use ecoverse_backend::quizbank::QuestionBank;
use ecoverse_backend::{database, http, scheduler, telemetry, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let config = AppConfig::from_env();
    let pool = database::init::connect(&config.database_url).await?;
    database::init::create_schema(&pool).await?;
    database::seed::seed_demo_data(&pool).await?;

    let questions = QuestionBank::load(Path::new(&config.question_bank_path));

    let port = config.port;
    let state = Arc::new(AppState {
        db: pool,
        questions,
        config,
    });

    // One rotation roll and one global reset per UTC day, retried on failure.
    tokio::spawn(scheduler::run(state.clone()));

    let app = http::build_router(state);
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "EcoVerse backend listening");
    axum::serve(listener, app).await?;
    Ok(())
}
