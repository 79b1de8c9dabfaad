use crate::day::Day;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "stored_days")]
    pub completions: BTreeSet<Day>,
}

// Older data only had its shape checked, so impossible days such as
// 2024-02-30 are dropped instead of failing the whole collection.
fn stored_days<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BTreeSet<Day>, D::Error> {
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|value| match Day::parse(&value) {
            Ok(day) => Some(day),
            Err(err) => {
                warn!("skipping stored completion: {err}");
                None
            }
        })
        .collect())
}

/// The persisted collection; `habits` is the fixed storage key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HabitData {
    #[serde(default)]
    pub habits: Vec<Habit>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub points: u64,
    pub golden: u64,
    pub current_streak: u32,
    pub longest_streak: u32,
}

#[derive(Debug, Deserialize)]
pub struct CreateHabitRequest {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct CompletionRequest {
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CalendarQuery {
    pub days: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct HabitView {
    pub id: i64,
    pub name: String,
    pub completions: Vec<Day>,
    pub completed_today: bool,
    pub score: ScoreResult,
}

#[derive(Debug, Serialize)]
pub struct HabitsResponse {
    pub today: Day,
    pub overall_current_streak: u32,
    pub policy: &'static str,
    pub habits: Vec<HabitView>,
}

#[derive(Debug, Serialize)]
pub struct StreakResponse {
    pub today: Day,
    pub overall_current_streak: u32,
}

#[derive(Debug, Serialize)]
pub struct CalendarDay {
    pub date: Day,
    pub completed: Vec<i64>,
}

#[derive(Debug, Serialize)]
pub struct CalendarResponse {
    pub as_of: Day,
    pub days: Vec<CalendarDay>,
}
