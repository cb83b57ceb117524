//! CLI output: error mapping from domain errors to stable CLI surface.

use crate::error::ApiError;
use crate::notice::Notice;

/// The user-facing notice for the error, followed by the underlying cause
/// when the notice does not already say it.
pub fn map_error(e: &ApiError) -> String {
    let notice = Notice::from_error(e);
    let detail = e.to_string();
    if notice.message == detail || matches!(e, ApiError::EmptyContext | ApiError::InvalidInput(_)) {
        notice.message
    } else {
        format!("{}\n  cause: {}", notice.message, detail)
    }
}
