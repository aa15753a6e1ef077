use serde::Serialize;
use thiserror::Error;

mod input;

pub use input::parse_age_threshold;

/// Shared boundary result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("bad request: {0}")]
    InvalidInput(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Payload shown to users.
    pub fn body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code(),
            message: self.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_body_carries_code_and_message() {
        let body = ApiError::invalid_input("nope").body();
        assert_eq!(
            body,
            ErrorBody {
                code: "INVALID_INPUT",
                message: "bad request: nope".into(),
            }
        );
    }
}
