//! Scalar per-device settings, separate from the entry collection.
//!
//! # Responsibility
//! - Persist one serialized value per named key (weekly theme, practice
//!   vocabularies) in the `settings` table.
//! - Keep this simple key-value concern out of the indexed entry contract.

pub mod practice;
pub mod store;
pub mod theme;
