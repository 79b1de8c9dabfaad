use crate::day::Day;
use axum::http::StatusCode;
use thiserror::Error;

/// Errors raised by the habit store and the scoring engine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HabitError {
    #[error("invalid date '{0}', expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("date {0} is in the future")]
    FutureDate(Day),

    #[error("date {0} is already logged")]
    DuplicateDate(Day),

    #[error("habit {0} not found")]
    NotFound(i64),

    #[error("habit name must not be empty")]
    EmptyName,
}

pub type Result<T, E = HabitError> = std::result::Result<T, E>;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<HabitError> for AppError {
    fn from(err: HabitError) -> Self {
        let status = match err {
            HabitError::InvalidDate(_) | HabitError::FutureDate(_) | HabitError::EmptyName => {
                StatusCode::BAD_REQUEST
            }
            HabitError::DuplicateDate(_) => StatusCode::CONFLICT,
            HabitError::NotFound(_) => StatusCode::NOT_FOUND,
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn habit_errors_map_to_statuses() {
        let day = Day::from_ymd(2024, 6, 15).unwrap();
        assert_eq!(AppError::from(HabitError::EmptyName).status, StatusCode::BAD_REQUEST);
        assert_eq!(AppError::from(HabitError::FutureDate(day)).status, StatusCode::BAD_REQUEST);
        assert_eq!(AppError::from(HabitError::DuplicateDate(day)).status, StatusCode::CONFLICT);
        assert_eq!(AppError::from(HabitError::NotFound(7)).status, StatusCode::NOT_FOUND);

        let err = AppError::from(HabitError::DuplicateDate(day));
        assert_eq!(err.message, "date 2024-06-15 is already logged");
    }
}
