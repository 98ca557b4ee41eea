pub mod app;
pub mod config;
pub mod error;
pub mod game_view;
pub mod logging;
pub mod manager;
pub mod sinks;
pub mod storage;

pub use app::{App, RandomFactory};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use storage::SqliteStorage;
