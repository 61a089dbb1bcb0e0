//! Domain model for journal entries.
//!
//! # Responsibility
//! - Define the entry envelope and the closed set of journal kinds.
//! - Own identity generation and the write-path validation rules.
//!
//! # Invariants
//! - Every entry is exactly one variant; the kind is derived from the body,
//!   never stored beside it.
//! - Envelope identity fields (`id`, `date`, `created_at`) are frozen after
//!   creation.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod entry;
pub mod id;
