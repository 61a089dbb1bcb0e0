//! Keyed JSON value store over the `settings` table.
//!
//! # Invariants
//! - One row per key; writes overwrite in place.
//! - Values are self-contained JSON documents; no cross-key references.

use crate::db::{self, DbError};
use crate::model::entry::now_epoch_ms;
use rusqlite::{params, Connection};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SettingsResult<T> = Result<T, SettingsError>;

/// Settings-layer error for persistence and value validation.
#[derive(Debug)]
pub enum SettingsError {
    Db(DbError),
    /// A stored or outgoing value could not be (de)serialized.
    Serialization(serde_json::Error),
    /// Weekly theme week outside the 1..=12 program range.
    InvalidWeek(u32),
    /// Weekly theme text was empty or whitespace-only.
    BlankTheme,
    /// A practice option label was empty or whitespace-only.
    BlankOption,
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for SettingsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialization(err) => write!(f, "invalid settings value: {err}"),
            Self::InvalidWeek(week) => write!(f, "week {week} is outside the 1..=12 range"),
            Self::BlankTheme => f.write_str("weekly theme text cannot be blank"),
            Self::BlankOption => f.write_str("practice option label cannot be blank"),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for SettingsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for SettingsError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SettingsError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// SQLite-backed settings store over a borrowed connection.
pub struct SqliteSettingsStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSettingsStore<'conn> {
    /// Constructs a store after verifying the settings table is present.
    pub fn try_new(conn: &'conn Connection) -> SettingsResult<Self> {
        if !db::table_exists(conn, "settings")? {
            return Err(SettingsError::MissingRequiredTable("settings"));
        }
        for column in ["key", "value", "updated_at"] {
            if !db::table_has_column(conn, "settings", column)? {
                return Err(SettingsError::MissingRequiredColumn {
                    table: "settings",
                    column,
                });
            }
        }
        Ok(Self { conn })
    }

    /// Reads and deserializes the value stored under `key`, if any.
    pub fn read_value<T: DeserializeOwned>(&self, key: &str) -> SettingsResult<Option<T>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM settings WHERE key = ?1;")?;
        let mut rows = stmt.query([key])?;
        if let Some(row) = rows.next()? {
            let text: String = row.get(0)?;
            return Ok(Some(serde_json::from_str(&text)?));
        }
        Ok(None)
    }

    /// Serializes `value` and overwrites whatever is stored under `key`.
    pub fn write_value<T: Serialize>(&self, key: &str, value: &T) -> SettingsResult<()> {
        let text = serde_json::to_string(value)?;
        self.conn.execute(
            "INSERT INTO settings (key, value, updated_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, text, now_epoch_ms()],
        )?;
        Ok(())
    }
}
