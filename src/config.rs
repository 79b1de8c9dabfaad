use crate::day::{DEFAULT_WINDOW_DAYS, MAX_WINDOW_DAYS};
use crate::scoring::PolicyKind;
use std::{env, path::PathBuf};
use tracing::warn;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATA_PATH: &str = "data/habits.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub window_days: usize,
    pub policy: PolicyKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            window_days: DEFAULT_WINDOW_DAYS,
            policy: PolicyKind::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = parse_or(&lookup, "PORT", defaults.port);
        let data_path = lookup("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.data_path);
        let mut window_days = parse_or(&lookup, "HABIT_WINDOW_DAYS", defaults.window_days);
        if window_days > MAX_WINDOW_DAYS {
            warn!("ignoring HABIT_WINDOW_DAYS={window_days}: must be at most {MAX_WINDOW_DAYS}");
            window_days = defaults.window_days;
        }
        let policy = parse_or(&lookup, "HABIT_SCORING_POLICY", defaults.policy);

        Self {
            port,
            data_path,
            window_days,
            policy,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let Some(value) = lookup(key) else {
        return default;
    };
    match value.trim().parse() {
        Ok(parsed) => parsed,
        Err(err) => {
            warn!("ignoring {key}={value:?}: {err}");
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        assert_eq!(config(&[]), Config::default());
        assert_eq!(Config::default().window_days, 35);
    }

    #[test]
    fn reads_every_variable() {
        let cfg = config(&[
            ("PORT", "9000"),
            ("APP_DATA_PATH", "/tmp/habits.json"),
            ("HABIT_WINDOW_DAYS", "14"),
            ("HABIT_SCORING_POLICY", "flat"),
        ]);
        assert_eq!(cfg.port, 9000);
        assert_eq!(cfg.data_path, PathBuf::from("/tmp/habits.json"));
        assert_eq!(cfg.window_days, 14);
        assert_eq!(cfg.policy, PolicyKind::Flat);
    }

    #[test]
    fn invalid_values_fall_back() {
        let cfg = config(&[("PORT", "http"), ("HABIT_SCORING_POLICY", "weekly")]);
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.policy, PolicyKind::StreakBonus);
    }

    #[test]
    fn oversized_window_falls_back() {
        assert_eq!(config(&[("HABIT_WINDOW_DAYS", "3660")]).window_days, 3_660);
        assert_eq!(config(&[("HABIT_WINDOW_DAYS", "3661")]).window_days, 35);
    }
}
