use axum::http::StatusCode;

/// Data-shape problems found while turning raw member records into score entries.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("unrecognized month label {label:?} in year {year}")]
    UnknownMonth { year: String, label: String },

    #[error("month {month} of {year} is recorded more than once")]
    DuplicateMonth { year: i32, month: u32 },

    #[error("year key {0:?} is not a number")]
    InvalidYear(String),

    #[error("invalid score date {0:?}")]
    InvalidDate(String),

    #[error("invalid period {0:?}, expected YYYY or YYYY-MM")]
    InvalidPeriod(String),
}

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

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn unprocessable(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

impl From<RecordError> for AppError {
    fn from(err: RecordError) -> Self {
        if matches!(err, RecordError::InvalidPeriod(_)) {
            Self::bad_request(err.to_string())
        } else {
            Self::unprocessable(err)
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
