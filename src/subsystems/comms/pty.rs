//! PTY (console) channel — reads lines, runs one turn per line, prints the
//! reply, and checkpoints the conversation after every turn.
//!
//! Runs until the `shutdown` token is cancelled (Ctrl-C) or input is closed.
//! Input and output are generic so tests can drive the loop from byte
//! buffers instead of a terminal.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::llm::Responder;
use crate::subsystems::agents::TravelAgent;
use crate::subsystems::memory::{Checkpointer, ConversationState};

/// Printed when a message matches no route.
pub const TERMINATE_HINT: &str =
    "(no route: try \"weather in <city>\", \"recommend places in <country>\", or \"I like ...\")";

/// Everything a console run needs for one conversation thread.
pub struct ConsoleSession<'a, R> {
    agent: &'a TravelAgent<R>,
    checkpointer: &'a dyn Checkpointer,
    thread_id: String,
    state: ConversationState,
}

impl<'a, R: Responder> ConsoleSession<'a, R> {
    pub fn new(
        agent: &'a TravelAgent<R>,
        checkpointer: &'a dyn Checkpointer,
        thread_id: impl Into<String>,
        state: ConversationState,
    ) -> Self {
        Self { agent, checkpointer, thread_id: thread_id.into(), state }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    /// Handle one line of user input and return the text to print.
    ///
    /// Turn failures are reported in the returned text; checkpoint failures
    /// are returned as errors.
    pub async fn handle_line(&mut self, input: &str) -> Result<String, AppError> {
        let printed = match self.agent.run_turn(&mut self.state, input).await {
            Ok(outcome) => outcome.reply.unwrap_or_else(|| TERMINATE_HINT.to_string()),
            Err(e) => {
                warn!(thread_id = %self.thread_id, error = %e, "turn failed");
                format!("error: {e}")
            }
        };
        self.checkpointer.save(&self.thread_id, &self.state)?;
        Ok(printed)
    }

    /// Drive the console until input closes or `shutdown` fires.
    pub async fn run<In, Out>(
        &mut self,
        input: In,
        output: &mut Out,
        shutdown: CancellationToken,
    ) -> Result<(), AppError>
    where
        In: AsyncBufRead + Unpin,
        Out: AsyncWrite + Unpin,
    {
        info!(thread_id = %self.thread_id, "console started — type a message and press Enter. Ctrl-C to quit.");
        let mut lines = input.lines();

        loop {
            output.write_all(b"> ").await?;
            output.flush().await?;

            tokio::select! {
                biased;

                _ = shutdown.cancelled() => {
                    output.write_all(b"\n").await?;
                    info!("console shutting down");
                    break;
                }

                line = lines.next_line() => {
                    match line {
                        Err(e) => {
                            warn!("console read error: {e}");
                            break;
                        }
                        Ok(None) => {
                            info!("console input closed");
                            break;
                        }
                        Ok(Some(line)) => {
                            let line = line.trim();
                            if line.is_empty() {
                                continue;
                            }
                            debug!(input = %line, "console received line");
                            let reply = self.handle_line(line).await?;
                            output.write_all(reply.as_bytes()).await?;
                            output.write_all(b"\n").await?;
                        }
                    }
                }
            }
        }

        output.flush().await?;
        Ok(())
    }
}
