pub mod app;
pub mod config;
pub mod day;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod scoring;
pub mod state;
pub mod storage;
pub mod store;

pub use app::router;
pub use config::Config;
pub use day::{Day, generate_day_window};
pub use errors::{AppError, HabitError};
pub use scoring::{overall_current_streak, score};
pub use state::AppState;
pub use storage::{load_data, persist_data};
pub use store::HabitStore;
