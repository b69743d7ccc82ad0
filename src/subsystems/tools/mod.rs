//! Lookup tools consulted by the travel handlers.
//!
//! Both tools are pure and infallible: unknown inputs resolve to fallback
//! text rather than errors.

mod places;
mod weather;

pub use places::{KNOWN_COUNTRIES, retrieve_places};
pub use weather::weather_info;
