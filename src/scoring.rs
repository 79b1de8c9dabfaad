//! Scoring engine: points, golden points and streaks derived from a habit's
//! completion days.
//!
//! Everything here is a pure function of its inputs. The per-day point rule
//! lives behind [`ScoringPolicy`]; current streaks and cross-habit
//! aggregation do not depend on the policy.

use crate::day::Day;
use crate::errors::Result;
use crate::models::{Habit, ScoreResult};
use std::{collections::BTreeSet, fmt, str::FromStr};

/// Streak length that converts into a golden point.
pub const GOLDEN_STREAK: u32 = 7;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub points: u64,
    pub golden: u64,
    pub longest_streak: u32,
}

pub trait ScoringPolicy: Send + Sync {
    fn name(&self) -> &'static str;

    /// `days` is ascending with no duplicates.
    fn tally(&self, days: &[Day]) -> Tally;
}

/// One point per day, plus the running streak length as a bonus from the
/// second consecutive day on. Reaching [`GOLDEN_STREAK`] awards a golden
/// point instead of the bonus and restarts the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct StreakBonus;

impl ScoringPolicy for StreakBonus {
    fn name(&self) -> &'static str {
        PolicyKind::StreakBonus.as_str()
    }

    fn tally(&self, days: &[Day]) -> Tally {
        let mut tally = Tally::default();
        let mut streak = 0u32;
        let mut prev: Option<Day> = None;

        for &day in days {
            streak = match prev {
                Some(prev) if day.is_next_after(prev) => streak + 1,
                _ => 1,
            };
            prev = Some(day);

            tally.points += 1;
            tally.longest_streak = tally.longest_streak.max(streak);

            if streak == GOLDEN_STREAK {
                tally.golden += 1;
                streak = 0;
            } else if streak >= 2 {
                tally.points += u64::from(streak);
            }
        }

        tally
    }
}

/// One point per completed day; longest streak is the longest unbroken run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Flat;

impl ScoringPolicy for Flat {
    fn name(&self) -> &'static str {
        PolicyKind::Flat.as_str()
    }

    fn tally(&self, days: &[Day]) -> Tally {
        let mut longest = 0u32;
        let mut run = 0u32;
        for (idx, day) in days.iter().enumerate() {
            run = match idx.checked_sub(1).map(|prev| days[prev]) {
                Some(prev) if day.is_next_after(prev) => run + 1,
                _ => 1,
            };
            longest = longest.max(run);
        }

        Tally {
            points: days.len() as u64,
            golden: 0,
            longest_streak: longest,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyKind {
    #[default]
    StreakBonus,
    Flat,
}

impl PolicyKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StreakBonus => "streak-bonus",
            Self::Flat => "flat",
        }
    }

    pub fn policy(self) -> &'static dyn ScoringPolicy {
        match self {
            Self::StreakBonus => &StreakBonus,
            Self::Flat => &Flat,
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "streak-bonus" | "streak_bonus" => Ok(Self::StreakBonus),
            "flat" => Ok(Self::Flat),
            other => Err(format!("unknown scoring policy '{other}'")),
        }
    }
}

/// Scores a completion set with the default [`StreakBonus`] policy.
pub fn score(days: &BTreeSet<Day>, as_of: Day) -> ScoreResult {
    score_with(&StreakBonus, days, as_of)
}

pub fn score_with(policy: &dyn ScoringPolicy, days: &BTreeSet<Day>, as_of: Day) -> ScoreResult {
    let ordered: Vec<Day> = days.iter().copied().collect();
    let tally = policy.tally(&ordered);

    ScoreResult {
        points: tally.points,
        golden: tally.golden,
        current_streak: current_streak_at(days, as_of),
        longest_streak: tally.longest_streak,
    }
}

/// Parses raw `YYYY-MM-DD` strings (duplicates allowed, any order) and scores them.
pub fn score_strings<S: AsRef<str>>(days: &[S], as_of: Day) -> Result<ScoreResult> {
    let parsed = days
        .iter()
        .map(|raw| Day::parse(raw.as_ref()))
        .collect::<Result<BTreeSet<Day>>>()?;
    Ok(score(&parsed, as_of))
}

/// Consecutive days present in `days`, ending at and including `as_of`.
pub fn current_streak_at(days: &BTreeSet<Day>, as_of: Day) -> u32 {
    let mut streak = 0u32;
    let mut cursor = Some(as_of);
    while let Some(day) = cursor {
        if !days.contains(&day) {
            break;
        }
        streak += 1;
        cursor = day.pred();
    }
    streak
}

/// Current streak over the union of every habit's completions.
pub fn overall_current_streak(habits: &[Habit], as_of: Day) -> u32 {
    let union: BTreeSet<Day> = habits
        .iter()
        .flat_map(|habit| habit.completions.iter().copied())
        .collect();
    current_streak_at(&union, as_of)
}
