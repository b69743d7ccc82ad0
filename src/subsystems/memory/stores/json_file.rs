//! `json` checkpointer — one pretty-printed JSON file per thread.
//!
//! Layout under the threads root:
//!
//! ```text
//! {work_dir}/threads/
//! └── {thread_id}/
//!     └── state.json   — { "thread_id", "saved_at", "state": { messages, preferences } }
//! ```
//!
//! Writes go to `state.json.tmp` first and are renamed into place, so a crash
//! mid-write leaves the previous checkpoint intact.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AppError;
use super::super::state::ConversationState;
use super::super::store::{Checkpointer, validate_thread_id};

const STATE_FILENAME: &str = "state.json";

/// On-disk shape of `state.json`.
#[derive(Serialize, Deserialize)]
struct CheckpointFile {
    thread_id: String,
    saved_at: DateTime<Utc>,
    state: ConversationState,
}

pub struct JsonFileCheckpointer {
    root: PathBuf,
}

impl JsonFileCheckpointer {
    /// `root` is created lazily on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn state_path(&self, thread_id: &str) -> PathBuf {
        self.root.join(thread_id).join(STATE_FILENAME)
    }
}

impl Checkpointer for JsonFileCheckpointer {
    fn kind(&self) -> &str {
        "json"
    }

    fn load(&self, thread_id: &str) -> Result<Option<ConversationState>, AppError> {
        validate_thread_id(thread_id)?;
        let path = self.state_path(thread_id);
        if !path.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&path)
            .map_err(|e| AppError::Memory(format!("cannot read {}: {e}", path.display())))?;
        let file: CheckpointFile = serde_json::from_str(&data)
            .map_err(|e| AppError::Memory(format!("malformed {}: {e}", path.display())))?;
        debug!(%thread_id, saved_at = %file.saved_at, "checkpoint loaded");
        Ok(Some(file.state))
    }

    fn save(&self, thread_id: &str, state: &ConversationState) -> Result<(), AppError> {
        validate_thread_id(thread_id)?;
        let path = self.state_path(thread_id);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| AppError::Memory(format!("cannot create {}: {e}", dir.display())))?;
        }

        let file = CheckpointFile {
            thread_id: thread_id.to_string(),
            saved_at: Utc::now(),
            state: state.clone(),
        };
        let data = serde_json::to_string_pretty(&file)
            .map_err(|e| AppError::Memory(format!("serialise checkpoint: {e}")))?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, data)
            .map_err(|e| AppError::Memory(format!("cannot write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &path)
            .map_err(|e| AppError::Memory(format!("cannot replace {}: {e}", path.display())))?;

        debug!(%thread_id, messages = state.messages().len(), "checkpoint saved");
        Ok(())
    }
}
