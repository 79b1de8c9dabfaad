use crate::handlers;
use crate::state::AppState;
use axum::{routing::{delete, get, post}, Router};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/habits", get(handlers::list_habits).post(handlers::create_habit))
        .route("/api/habits/:id", delete(handlers::delete_habit))
        .route("/api/habits/:id/toggle", post(handlers::toggle_completion))
        .route("/api/habits/:id/completions", post(handlers::add_completion))
        .route("/api/habits/:id/completions/:date", delete(handlers::remove_completion))
        .route("/api/streak", get(handlers::get_streak))
        .route("/api/calendar", get(handlers::get_calendar))
        .with_state(state)
}
