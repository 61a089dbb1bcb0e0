//! Weekly theme: one mutable record per device.
//!
//! The eight-week-plus program runs over twelve numbered weeks; the current
//! theme is overwritten in place with no history kept.

use crate::settings::store::{SettingsError, SettingsResult, SqliteSettingsStore};
use serde::{Deserialize, Serialize};

const WEEKLY_THEME_KEY: &str = "weekly-theme";

/// Singleton weekly theme record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTheme {
    /// Program week, 1 through 12.
    pub week: u32,
    pub theme: String,
    pub description: String,
    /// Set the first time a theme is saved; survives later overwrites.
    pub created_at: i64,
    /// Advances on every save.
    pub updated_at: i64,
}

/// Caller-supplied fields for a theme save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyThemeDraft {
    pub week: u32,
    pub theme: String,
    pub description: String,
}

/// Loads the current theme; `Ok(None)` before the first save.
pub fn load_weekly_theme(store: &SqliteSettingsStore<'_>) -> SettingsResult<Option<WeeklyTheme>> {
    store.read_value(WEEKLY_THEME_KEY)
}

/// Validates and saves the theme, overwriting the previous one in place.
///
/// `created_at` is carried over from the existing record when there is one;
/// `updated_at` strictly advances.
pub fn save_weekly_theme(
    store: &SqliteSettingsStore<'_>,
    draft: &WeeklyThemeDraft,
) -> SettingsResult<WeeklyTheme> {
    if !(1..=12).contains(&draft.week) {
        return Err(SettingsError::InvalidWeek(draft.week));
    }
    if draft.theme.trim().is_empty() {
        return Err(SettingsError::BlankTheme);
    }

    let now = crate::model::entry::now_epoch_ms();
    let (created_at, updated_at) = match load_weekly_theme(store)? {
        Some(existing) => (existing.created_at, now.max(existing.updated_at + 1)),
        None => (now, now),
    };

    let theme = WeeklyTheme {
        week: draft.week,
        theme: draft.theme.clone(),
        description: draft.description.clone(),
        created_at,
        updated_at,
    };
    store.write_value(WEEKLY_THEME_KEY, &theme)?;
    Ok(theme)
}
