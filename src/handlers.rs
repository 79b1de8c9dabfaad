use crate::day::{Day, MAX_WINDOW_DAYS, generate_day_window};
use crate::errors::AppError;
use crate::models::{
    CalendarDay, CalendarQuery, CalendarResponse, CompletionRequest, CreateHabitRequest,
    HabitView, HabitsResponse, StreakResponse,
};
use crate::scoring::{PolicyKind, overall_current_streak, score_with};
use crate::state::AppState;
use crate::storage::persist_data;
use crate::store::HabitStore;
use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::{error, info};

pub async fn list_habits(State(state): State<AppState>) -> Json<HabitsResponse> {
    let store = state.store.lock().await;
    Json(habits_response(&store, state.policy, Day::today()))
}

pub async fn create_habit(
    State(state): State<AppState>,
    Json(payload): Json<CreateHabitRequest>,
) -> Result<(StatusCode, Json<HabitsResponse>), AppError> {
    let mut store = state.store.lock().await;
    let id = store.create_habit(&payload.name)?.id;
    info!(habit = id, "habit created");

    save(&state, &store).await;
    Ok((
        StatusCode::CREATED,
        Json(habits_response(&store, state.policy, Day::today())),
    ))
}

pub async fn delete_habit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<HabitsResponse>, AppError> {
    let mut store = state.store.lock().await;
    let removed = store.delete_habit(id)?;
    info!(habit = id, name = %removed.name, "habit deleted");

    save(&state, &store).await;
    Ok(Json(habits_response(&store, state.policy, Day::today())))
}

pub async fn toggle_completion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<HabitsResponse>, AppError> {
    let today = Day::today();
    let day = requested_day(&body, today)?;

    let mut store = state.store.lock().await;
    let completed = store.toggle_completion(id, day, today)?;
    info!(habit = id, %day, completed, "completion toggled");

    save(&state, &store).await;
    Ok(Json(habits_response(&store, state.policy, today)))
}

pub async fn add_completion(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    body: Bytes,
) -> Result<Json<HabitsResponse>, AppError> {
    let today = Day::today();
    let day = requested_day(&body, today)?;

    let mut store = state.store.lock().await;
    store.add_completion(id, day, today)?;
    info!(habit = id, %day, "completion added");

    save(&state, &store).await;
    Ok(Json(habits_response(&store, state.policy, today)))
}

pub async fn remove_completion(
    State(state): State<AppState>,
    Path((id, date)): Path<(i64, String)>,
) -> Result<Json<HabitsResponse>, AppError> {
    let day = Day::parse(&date)?;

    let mut store = state.store.lock().await;
    if store.remove_completion(id, day)? {
        info!(habit = id, %day, "completion removed");
        save(&state, &store).await;
    }
    Ok(Json(habits_response(&store, state.policy, Day::today())))
}

pub async fn get_streak(State(state): State<AppState>) -> Json<StreakResponse> {
    let today = Day::today();
    let store = state.store.lock().await;
    Json(StreakResponse {
        today,
        overall_current_streak: overall_current_streak(store.habits(), today),
    })
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarResponse>, AppError> {
    let n = query.days.unwrap_or(state.window_days);
    if n > MAX_WINDOW_DAYS {
        return Err(AppError::bad_request(format!(
            "days must be at most {MAX_WINDOW_DAYS}"
        )));
    }

    let store = state.store.lock().await;
    Ok(Json(calendar_response(&store, Day::today(), n)))
}

/// Display-ready scores for every habit, evaluated at `today`.
pub fn habits_response(store: &HabitStore, policy: PolicyKind, today: Day) -> HabitsResponse {
    let habits = store
        .habits()
        .iter()
        .map(|habit| HabitView {
            id: habit.id,
            name: habit.name.clone(),
            completions: habit.completions.iter().copied().collect(),
            completed_today: habit.completions.contains(&today),
            score: score_with(policy.policy(), &habit.completions, today),
        })
        .collect();

    HabitsResponse {
        today,
        overall_current_streak: overall_current_streak(store.habits(), today),
        policy: policy.policy().name(),
        habits,
    }
}

pub fn calendar_response(store: &HabitStore, as_of: Day, n: usize) -> CalendarResponse {
    let days = generate_day_window(as_of, n)
        .into_iter()
        .map(|date| CalendarDay {
            date,
            completed: store
                .habits()
                .iter()
                .filter(|habit| habit.completions.contains(&date))
                .map(|habit| habit.id)
                .collect(),
        })
        .collect();

    CalendarResponse { as_of, days }
}

/// An empty body means today; anything else must be a valid `CompletionRequest`.
fn requested_day(body: &[u8], today: Day) -> Result<Day, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(today);
    }

    let request: CompletionRequest = serde_json::from_slice(body)
        .map_err(|err| AppError::bad_request(format!("invalid completion request: {err}")))?;
    match request.date {
        Some(raw) => Ok(Day::parse(raw.trim())?),
        None => Ok(today),
    }
}

// Best effort: a failed write is logged and the in-memory state stays authoritative.
async fn save(state: &AppState, store: &HabitStore) {
    if let Err(err) = persist_data(&state.data_path, &store.snapshot()).await {
        error!("failed to persist habits: {}", err.message);
    }
}
