use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use uuid::Uuid;

/// Why a single call to the recipe backend failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("backend unreachable: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("backend answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("malformed backend payload: {0}")]
    Parse(#[source] serde_json::Error),
}

#[derive(Debug, Error)]
#[error("failed to fetch recipes: {0}")]
pub struct RecipeFetchError(#[from] pub FetchError);

#[derive(Debug, Error)]
#[error("failed to fetch nutrition information: {0}")]
pub struct NutritionFetchError(#[from] pub FetchError);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("ingredient slot {index} out of range ({len} slots)")]
    SlotOutOfRange { index: usize, len: usize },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("session {0} not found")]
    SessionNotFound(Uuid),

    #[error(transparent)]
    Input(#[from] InputError),

    #[error(transparent)]
    RecipeFetch(#[from] RecipeFetchError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::Input(_) => StatusCode::BAD_REQUEST,
            AppError::RecipeFetch(_) => StatusCode::BAD_GATEWAY,
        };

        (status, self.to_string()).into_response()
    }
}
