//! Core domain logic for JournalFlow, a local-first mindfulness journal.
//! This crate is the single source of truth for entry shapes, persistence
//! and list-shaping rules; UI layers stay thin on top of it.

pub mod db;
pub mod logging;
pub mod model;
pub mod query;
pub mod repo;
pub mod service;
pub mod settings;

pub use logging::{active_log_level, init_logging, logging_directory};
pub use model::entry::{
    CommunicationDetail, EntryBody, EntryKind, EntryValidationError, EventDetail, JournalEntry,
    PracticeDetail,
};
pub use model::id::{EntryId, InvalidEntryIdError};
pub use query::filter::{
    filter_by_kind, filter_by_search, preview_of, sort_by_created_desc, KindFilter,
};
pub use repo::entry_repo::{EntryRepository, RepoError, RepoResult, SqliteEntryRepository};
pub use service::journal_service::JournalService;
pub use settings::practice::{
    add_practice_option, practice_options, remove_practice_option, PracticeKind,
};
pub use settings::store::{SettingsError, SettingsResult, SqliteSettingsStore};
pub use settings::theme::{load_weekly_theme, save_weekly_theme, WeeklyTheme, WeeklyThemeDraft};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
