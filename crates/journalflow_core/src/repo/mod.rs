//! Repository layer: persistence contracts and SQLite implementations.
//!
//! # Responsibility
//! - Define the data-access contract for the journal entry collection.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths run `JournalEntry::validate()` before any SQL mutation.
//! - Read paths reject malformed persisted state instead of masking it.

pub mod entry_repo;
