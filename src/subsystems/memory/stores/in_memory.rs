//! `memory` checkpointer — process-local, discarded on exit.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::AppError;
use super::super::state::ConversationState;
use super::super::store::{Checkpointer, validate_thread_id};

/// Holds one saved state per thread id.
#[derive(Default)]
pub struct InMemoryCheckpointer {
    threads: Mutex<HashMap<String, ConversationState>>,
}

impl InMemoryCheckpointer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Checkpointer for InMemoryCheckpointer {
    fn kind(&self) -> &str {
        "memory"
    }

    fn load(&self, thread_id: &str) -> Result<Option<ConversationState>, AppError> {
        validate_thread_id(thread_id)?;
        let threads = self
            .threads
            .lock()
            .map_err(|_| AppError::Memory("in-memory checkpointer lock poisoned".into()))?;
        Ok(threads.get(thread_id).cloned())
    }

    fn save(&self, thread_id: &str, state: &ConversationState) -> Result<(), AppError> {
        validate_thread_id(thread_id)?;
        let mut threads = self
            .threads
            .lock()
            .map_err(|_| AppError::Memory("in-memory checkpointer lock poisoned".into()))?;
        threads.insert(thread_id.to_string(), state.clone());
        Ok(())
    }
}
