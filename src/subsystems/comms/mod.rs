//! Comms subsystem — external I/O channels.
//!
//! Only the console channel exists: it feeds one stdin line per turn into
//! the travel agent and prints the reply.

pub mod pty;

pub use pty::{ConsoleSession, TERMINATE_HINT};
