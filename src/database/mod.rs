//! The persistence layer. One module per table family, mirroring the schema:
//! all SQL lives here, business logic stays in `rewards` and `quizbank`.

pub mod bot;
pub mod daily;
pub mod init;
pub mod models;
pub mod news;
pub mod progress;
pub mod quiz;
pub mod seed;
pub mod shop;
pub mod tasks;
pub mod users;
