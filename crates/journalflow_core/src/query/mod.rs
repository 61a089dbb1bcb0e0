//! In-memory list shaping for display.
//!
//! # Responsibility
//! - Sort, filter and search a snapshot of the entry collection.
//! - Stay pure: re-fetching and re-applying is the only consistency model.

pub mod filter;
