//! Checkpointer trait — save and restore conversation state by thread id.
//!
//! Backends live in `stores/`. A thread id names one conversation; it is
//! also used as a directory name by the file backend, so ids are validated
//! with [`validate_thread_id`] before any backend touches them.

use crate::error::AppError;
use super::state::ConversationState;

/// Pluggable checkpoint backend.
pub trait Checkpointer: Send + Sync {
    /// Short backend name for logs (e.g. `"json"`).
    fn kind(&self) -> &str;

    /// Latest saved state for `thread_id`, or `None` if never saved.
    fn load(&self, thread_id: &str) -> Result<Option<ConversationState>, AppError>;

    /// Overwrite the saved state for `thread_id`.
    fn save(&self, thread_id: &str, state: &ConversationState) -> Result<(), AppError>;
}

/// Reject ids that are empty or could escape the threads directory.
pub fn validate_thread_id(thread_id: &str) -> Result<(), AppError> {
    if thread_id.trim().is_empty() {
        return Err(AppError::Memory("thread id must not be empty".into()));
    }
    if thread_id.contains(['/', '\\']) || thread_id == "." || thread_id == ".." {
        return Err(AppError::Memory(format!("invalid thread id: '{thread_id}'")));
    }
    Ok(())
}
