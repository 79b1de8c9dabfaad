use crate::day::Day;
use crate::errors::{HabitError, Result};
use crate::models::{Habit, HabitData};
use chrono::Utc;

/// In-memory owner of every habit and its completion days.
///
/// Every operation validates before mutating, so a returned error leaves the
/// store exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HabitStore {
    habits: Vec<Habit>,
}

impl HabitStore {
    pub fn new(data: HabitData) -> Self {
        Self { habits: data.habits }
    }

    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    pub fn get(&self, id: i64) -> Result<&Habit> {
        self.habits
            .iter()
            .find(|habit| habit.id == id)
            .ok_or(HabitError::NotFound(id))
    }

    pub fn snapshot(&self) -> HabitData {
        HabitData {
            habits: self.habits.clone(),
        }
    }

    pub fn create_habit(&mut self, name: &str) -> Result<&Habit> {
        let name = name.trim();
        if name.is_empty() {
            return Err(HabitError::EmptyName);
        }

        let id = self.next_id(Utc::now().timestamp_millis());
        self.habits.push(Habit {
            id,
            name: name.to_string(),
            completions: Default::default(),
        });
        Ok(&self.habits[self.habits.len() - 1])
    }

    pub fn delete_habit(&mut self, id: i64) -> Result<Habit> {
        let idx = self.position(id)?;
        Ok(self.habits.remove(idx))
    }

    /// Adds `day` when absent and removes it when present. Returns whether
    /// the day is completed afterwards.
    pub fn toggle_completion(&mut self, id: i64, day: Day, today: Day) -> Result<bool> {
        let habit = self.get_mut(id)?;
        if habit.completions.remove(&day) {
            return Ok(false);
        }
        if day > today {
            return Err(HabitError::FutureDate(day));
        }
        habit.completions.insert(day);
        Ok(true)
    }

    pub fn add_completion(&mut self, id: i64, day: Day, today: Day) -> Result<()> {
        let habit = self.get_mut(id)?;
        if day > today {
            return Err(HabitError::FutureDate(day));
        }
        if !habit.completions.insert(day) {
            return Err(HabitError::DuplicateDate(day));
        }
        Ok(())
    }

    /// Returns whether the day was logged before the call.
    pub fn remove_completion(&mut self, id: i64, day: Day) -> Result<bool> {
        Ok(self.get_mut(id)?.completions.remove(&day))
    }

    fn position(&self, id: i64) -> Result<usize> {
        self.habits
            .iter()
            .position(|habit| habit.id == id)
            .ok_or(HabitError::NotFound(id))
    }

    fn get_mut(&mut self, id: i64) -> Result<&mut Habit> {
        self.habits
            .iter_mut()
            .find(|habit| habit.id == id)
            .ok_or(HabitError::NotFound(id))
    }

    // Clock milliseconds, bumped past the largest id already handed out.
    fn next_id(&self, now_millis: i64) -> i64 {
        match self.habits.iter().map(|habit| habit.id).max() {
            Some(last) => now_millis.max(last.saturating_add(1)),
            None => now_millis,
        }
    }
}
