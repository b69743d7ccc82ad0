//! Subsystem modules for the travel router.

pub mod agents;
pub mod comms;
pub mod memory;
pub mod tools;
