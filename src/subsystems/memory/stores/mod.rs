//! Concrete checkpoint backends.

pub mod in_memory;
pub mod json_file;

pub use in_memory::InMemoryCheckpointer;
pub use json_file::JsonFileCheckpointer;
