//! Memory subsystem — conversation state, preferences, and checkpoints.
//!
//! [`ConversationState`] is the record every turn reads and appends to.
//! A [`Checkpointer`] persists it between process runs, keyed by thread id.
//!
//! ```text
//! {work_dir}/
//! └── threads/
//!     └── {thread_id}/
//!         └── state.json
//! ```

pub mod preferences;
pub mod state;
pub mod store;
pub mod stores;

pub use preferences::PreferenceStore;
pub use state::ConversationState;
pub use store::Checkpointer;

use tracing::info;

use crate::config::{CheckpointKind, Config};
use crate::error::AppError;
use stores::{InMemoryCheckpointer, JsonFileCheckpointer};

/// Build the checkpoint backend selected in `[memory]`.
pub fn open_checkpointer(config: &Config) -> Box<dyn Checkpointer> {
    match config.memory.checkpoint {
        CheckpointKind::Json => {
            let root = config.threads_dir();
            info!(root = %root.display(), "json checkpointer ready");
            Box::new(JsonFileCheckpointer::new(root))
        }
        CheckpointKind::Memory => {
            info!("in-memory checkpointer ready — state is lost on exit");
            Box::new(InMemoryCheckpointer::new())
        }
    }
}

/// Restore `thread_id` from `checkpointer`, or start a fresh conversation.
pub fn resume(checkpointer: &dyn Checkpointer, thread_id: &str) -> Result<ConversationState, AppError> {
    match checkpointer.load(thread_id)? {
        Some(state) => {
            info!(
                %thread_id,
                messages = state.messages().len(),
                preferences = state.preferences().len(),
                "resumed conversation"
            );
            Ok(state)
        }
        None => {
            info!(%thread_id, "starting new conversation");
            Ok(ConversationState::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Message;
    use tempfile::TempDir;

    #[test]
    fn json_backend_writes_under_work_dir() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = Config::test_default(tmp.path());
        cfg.memory.checkpoint = CheckpointKind::Json;

        let cp = open_checkpointer(&cfg);
        assert_eq!(cp.kind(), "json");
        cp.save("t1", &ConversationState::new()).unwrap();
        assert!(tmp.path().join("threads/t1/state.json").exists());
    }

    #[test]
    fn resume_falls_back_to_fresh_state() {
        let tmp = TempDir::new().unwrap();
        let cp = open_checkpointer(&Config::test_default(tmp.path()));
        assert_eq!(cp.kind(), "memory");
        assert_eq!(resume(cp.as_ref(), "new").unwrap(), ConversationState::new());
    }

    #[test]
    fn resume_restores_saved_state() {
        let tmp = TempDir::new().unwrap();
        let cp = open_checkpointer(&Config::test_default(tmp.path()));
        let mut s = ConversationState::new();
        s.push(Message::user("hello there"));
        cp.save("t", &s).unwrap();
        assert_eq!(resume(cp.as_ref(), "t").unwrap(), s);
    }
}
