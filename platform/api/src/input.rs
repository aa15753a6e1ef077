//! Parsing of raw, user-typed input before it reaches the roster queries.

use tracing::debug;

use crate::{ApiError, ApiResult};

/// Parse a user-entered age threshold.
///
/// Surrounding whitespace is ignored. Anything that is not a base-10 `i32`
/// is rejected with a message quoting the text that was entered.
pub fn parse_age_threshold(raw: &str) -> ApiResult<i32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ApiError::invalid_input("age threshold is required"));
    }
    trimmed.parse::<i32>().map_err(|err| {
        debug!(input = trimmed, error = %err, "rejected age threshold");
        ApiError::invalid_input(format!(
            "age threshold must be a whole number, got `{trimmed}`"
        ))
    })
}
