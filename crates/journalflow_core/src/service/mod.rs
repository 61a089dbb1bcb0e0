//! Use-case services.
//!
//! # Responsibility
//! - Orchestrate model construction and repository calls into the entry
//!   points a journal UI consumes.
//! - Keep callers decoupled from storage details.

pub mod journal_service;
