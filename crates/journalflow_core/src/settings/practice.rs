//! Practice-type vocabularies for the two practice journal kinds.
//!
//! Each vocabulary is an ordered, deduplicated list of free-text labels,
//! seeded with a fixed default set and editable at runtime. Formal and
//! informal lists evolve independently.

use crate::settings::store::{SettingsError, SettingsResult, SqliteSettingsStore};

const DEFAULT_FORMAL_OPTIONS: [&str; 4] = ["ボディスキャン", "静坐瞑想", "ヨガ瞑想", "慈悲の瞑想"];

const DEFAULT_INFORMAL_OPTIONS: [&str; 4] =
    ["歩行瞑想", "食べる瞑想", "呼吸への気づき", "日常動作への気づき"];

/// Which of the two practice vocabularies to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PracticeKind {
    Formal,
    Informal,
}

impl PracticeKind {
    fn settings_key(self) -> &'static str {
        match self {
            PracticeKind::Formal => "practice-options/formal",
            PracticeKind::Informal => "practice-options/informal",
        }
    }

    /// Default vocabulary served before any user edit is stored.
    pub fn default_options(self) -> Vec<String> {
        let defaults: &[&str] = match self {
            PracticeKind::Formal => &DEFAULT_FORMAL_OPTIONS,
            PracticeKind::Informal => &DEFAULT_INFORMAL_OPTIONS,
        };
        defaults.iter().map(|label| label.to_string()).collect()
    }
}

/// Current vocabulary for one practice kind; defaults before any edit.
pub fn practice_options(
    store: &SqliteSettingsStore<'_>,
    kind: PracticeKind,
) -> SettingsResult<Vec<String>> {
    Ok(store
        .read_value(kind.settings_key())?
        .unwrap_or_else(|| kind.default_options()))
}

/// Adds a label, trimming whitespace. Case-insensitive duplicates are kept
/// out; adding an existing label returns the list unchanged.
pub fn add_practice_option(
    store: &SqliteSettingsStore<'_>,
    kind: PracticeKind,
    label: &str,
) -> SettingsResult<Vec<String>> {
    let label = label.trim();
    if label.is_empty() {
        return Err(SettingsError::BlankOption);
    }

    let mut options = practice_options(store, kind)?;
    let lowered = label.to_lowercase();
    if !options
        .iter()
        .any(|existing| existing.to_lowercase() == lowered)
    {
        options.push(label.to_string());
        store.write_value(kind.settings_key(), &options)?;
    }
    Ok(options)
}

/// Removes a label by exact match and persists the remaining list.
pub fn remove_practice_option(
    store: &SqliteSettingsStore<'_>,
    kind: PracticeKind,
    label: &str,
) -> SettingsResult<Vec<String>> {
    let mut options = practice_options(store, kind)?;
    options.retain(|existing| existing != label);
    store.write_value(kind.settings_key(), &options)?;
    Ok(options)
}
