// core/src/error/movie_error.rs
use thiserror::Error;

pub const MISSING_FIELDS_MESSAGE: &str =
    "you cannot create a movie without providing a title and a year";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MovieError {
    #[error("the movie {0} does not exist")]
    NotFound(u64),

    #[error("{}", MISSING_FIELDS_MESSAGE)]
    MissingFields,

    #[error("{0}")]
    Validation(String),
}

impl MovieError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// HTTP-style status carried by the error envelope.
    pub fn status_code(&self) -> u16 {
        match self {
            MovieError::NotFound(_) => 404,
            MovieError::MissingFields => 403,
            MovieError::Validation(_) => 400,
        }
    }
}
