//! Journal entry repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide keyed CRUD plus kind/date lookups over the `entries` table.
//! - Encode each entry into exactly its own variant columns and decode rows
//!   back exhaustively per kind.
//!
//! # Invariants
//! - A repository value only exists over a migrated, schema-complete
//!   connection (`try_new` refuses anything else).
//! - `upsert` replaces wholesale, creating when absent; `delete` of a missing
//!   id is a no-op.
//!
//! # See also
//! - docs/architecture/storage.md

use crate::db::{self, DbError};
use crate::model::entry::{
    CommunicationDetail, EntryBody, EntryKind, EntryValidationError, EventDetail, JournalEntry,
    PracticeDetail,
};
use crate::model::id::EntryId;
use chrono::NaiveDate;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const DATE_FORMAT: &str = "%Y-%m-%d";

const ENTRY_COLUMNS: [&str; 23] = [
    "id",
    "kind",
    "date",
    "created_at",
    "updated_at",
    "practice_type",
    "duration_minutes",
    "insights",
    "event",
    "awareness_at_time",
    "body_feelings",
    "mood_and_thoughts",
    "current_thoughts",
    "content",
    "person",
    "problem_origin",
    "my_desire",
    "what_i_got",
    "their_desire",
    "what_they_got",
    "feelings",
    "resolved",
    "resolution",
];

const ENTRY_SELECT_SQL: &str = "SELECT
    id,
    kind,
    date,
    created_at,
    updated_at,
    practice_type,
    duration_minutes,
    insights,
    event,
    awareness_at_time,
    body_feelings,
    mood_and_thoughts,
    current_thoughts,
    content,
    person,
    problem_origin,
    my_desire,
    what_i_got,
    their_desire,
    what_they_got,
    feelings,
    resolved,
    resolution
FROM entries";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for entry persistence and lookup operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(EntryValidationError),
    Db(DbError),
    /// `create` hit an id that is already stored.
    DuplicateId(EntryId),
    /// The addressed entry does not exist (edit paths only; `delete` and
    /// lookups treat absence as a normal outcome).
    NotFound(EntryId),
    InvalidData(String),
    /// The connection has not been migrated to the schema this binary needs.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::DuplicateId(id) => write!(f, "entry id already exists: {id}"),
            Self::NotFound(id) => write!(f, "entry not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted entry data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not initialized: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => write!(f, "required table `{table}` is missing"),
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<EntryValidationError> for RepoError {
    fn from(value: EntryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data-access contract for the journal entry collection.
pub trait EntryRepository {
    /// Inserts a new entry; fails with [`RepoError::DuplicateId`] when the id
    /// is already stored.
    fn create(&self, entry: &JournalEntry) -> RepoResult<()>;
    /// Fetches one entry by id; `Ok(None)` when absent.
    fn get(&self, id: &EntryId) -> RepoResult<Option<JournalEntry>>;
    /// Returns every stored entry. No ordering contract; callers sort.
    fn list_all(&self) -> RepoResult<Vec<JournalEntry>>;
    /// Returns entries of one kind, via the kind index.
    fn list_by_kind(&self, kind: EntryKind) -> RepoResult<Vec<JournalEntry>>;
    /// Returns entries whose journaling day falls within `[start, end]`
    /// inclusive, via the date index.
    fn list_by_date_range(&self, start: NaiveDate, end: NaiveDate)
        -> RepoResult<Vec<JournalEntry>>;
    /// Replaces the stored entry with the same id wholesale, creating it when
    /// absent. Last writer wins.
    fn upsert(&self, entry: &JournalEntry) -> RepoResult<()>;
    /// Removes the entry with the given id. No-op when absent.
    fn delete(&self, id: &EntryId) -> RepoResult<()>;
}

/// SQLite-backed entry repository over a borrowed connection.
#[derive(Debug)]
pub struct SqliteEntryRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteEntryRepository<'conn> {
    /// Constructs a repository after verifying the connection is migrated and
    /// the entry table carries every required column.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl EntryRepository for SqliteEntryRepository<'_> {
    fn create(&self, entry: &JournalEntry) -> RepoResult<()> {
        entry.validate()?;

        let result = self.conn.execute(
            "INSERT INTO entries (
                id, kind, date, created_at, updated_at,
                practice_type, duration_minutes, insights,
                event, awareness_at_time, body_feelings, mood_and_thoughts, current_thoughts,
                content, person, problem_origin, my_desire, what_i_got,
                their_desire, what_they_got, feelings, resolved, resolution
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23);",
            params_from_iter(entry_to_values(entry)),
        );

        match result {
            Ok(_) => Ok(()),
            Err(rusqlite::Error::SqliteFailure(err, _))
                if err.code == ErrorCode::ConstraintViolation =>
            {
                Err(RepoError::DuplicateId(entry.id.clone()))
            }
            Err(err) => Err(err.into()),
        }
    }

    fn get(&self, id: &EntryId) -> RepoResult<Option<JournalEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id.as_str()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_entry_row(row)?));
        }

        Ok(None)
    }

    fn list_all(&self) -> RepoResult<Vec<JournalEntry>> {
        let mut stmt = self.conn.prepare(&format!("{ENTRY_SELECT_SQL};"))?;
        let rows = stmt.query([])?;
        collect_entries(rows)
    }

    fn list_by_kind(&self, kind: EntryKind) -> RepoResult<Vec<JournalEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE kind = ?1;"))?;
        let rows = stmt.query([kind.slug()])?;
        collect_entries(rows)
    }

    fn list_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<JournalEntry>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ENTRY_SELECT_SQL} WHERE date BETWEEN ?1 AND ?2;"))?;
        let rows = stmt.query([
            start.format(DATE_FORMAT).to_string(),
            end.format(DATE_FORMAT).to_string(),
        ])?;
        collect_entries(rows)
    }

    fn upsert(&self, entry: &JournalEntry) -> RepoResult<()> {
        entry.validate()?;

        self.conn.execute(
            "INSERT INTO entries (
                id, kind, date, created_at, updated_at,
                practice_type, duration_minutes, insights,
                event, awareness_at_time, body_feelings, mood_and_thoughts, current_thoughts,
                content, person, problem_origin, my_desire, what_i_got,
                their_desire, what_they_got, feelings, resolved, resolution
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23)
            ON CONFLICT(id) DO UPDATE SET
                kind = excluded.kind,
                date = excluded.date,
                created_at = excluded.created_at,
                updated_at = excluded.updated_at,
                practice_type = excluded.practice_type,
                duration_minutes = excluded.duration_minutes,
                insights = excluded.insights,
                event = excluded.event,
                awareness_at_time = excluded.awareness_at_time,
                body_feelings = excluded.body_feelings,
                mood_and_thoughts = excluded.mood_and_thoughts,
                current_thoughts = excluded.current_thoughts,
                content = excluded.content,
                person = excluded.person,
                problem_origin = excluded.problem_origin,
                my_desire = excluded.my_desire,
                what_i_got = excluded.what_i_got,
                their_desire = excluded.their_desire,
                what_they_got = excluded.what_they_got,
                feelings = excluded.feelings,
                resolved = excluded.resolved,
                resolution = excluded.resolution;",
            params_from_iter(entry_to_values(entry)),
        )?;

        Ok(())
    }

    fn delete(&self, id: &EntryId) -> RepoResult<()> {
        // Absence is not an error here; deleting twice is as good as once.
        self.conn
            .execute("DELETE FROM entries WHERE id = ?1;", [id.as_str()])?;
        Ok(())
    }
}

fn collect_entries(mut rows: rusqlite::Rows<'_>) -> RepoResult<Vec<JournalEntry>> {
    let mut entries = Vec::new();
    while let Some(row) = rows.next()? {
        entries.push(parse_entry_row(row)?);
    }
    Ok(entries)
}

// Binds every column in `ENTRY_COLUMNS` order. Only the variant group owned
// by the entry's kind is populated; the rest bind NULL.
fn entry_to_values(entry: &JournalEntry) -> Vec<Value> {
    let (practice, event, communication) = match &entry.body {
        EntryBody::FormalPractice(detail) | EntryBody::InformalPractice(detail) => {
            (Some(detail), None, None)
        }
        EntryBody::PleasantEvent(detail) | EntryBody::UnpleasantEvent(detail) => {
            (None, Some(detail), None)
        }
        EntryBody::DifficultCommunication(detail) => (None, None, Some(detail)),
    };

    vec![
        Value::Text(entry.id.as_str().to_string()),
        Value::Text(entry.kind().slug().to_string()),
        Value::Text(entry.date.format(DATE_FORMAT).to_string()),
        Value::Integer(entry.created_at),
        Value::Integer(entry.updated_at),
        opt_text(practice.map(|d| d.practice_type.clone())),
        opt_int(practice.map(|d| i64::from(d.duration_minutes))),
        opt_text(practice.map(|d| d.insights.clone())),
        opt_text(event.map(|d| d.event.clone())),
        opt_int(event.map(|d| bool_to_int(d.awareness_at_time))),
        opt_text(event.map(|d| d.body_feelings.clone())),
        opt_text(event.map(|d| d.mood_and_thoughts.clone())),
        opt_text(event.map(|d| d.current_thoughts.clone())),
        opt_text(communication.map(|d| d.content.clone())),
        opt_text(communication.map(|d| d.person.clone())),
        opt_text(communication.map(|d| d.problem_origin.clone())),
        opt_text(communication.map(|d| d.my_desire.clone())),
        opt_text(communication.map(|d| d.what_i_got.clone())),
        opt_text(communication.map(|d| d.their_desire.clone())),
        opt_text(communication.map(|d| d.what_they_got.clone())),
        opt_text(communication.map(|d| d.feelings.clone())),
        opt_int(communication.map(|d| bool_to_int(d.resolved))),
        opt_text(communication.map(|d| d.resolution.clone())),
    ]
}

fn parse_entry_row(row: &Row<'_>) -> RepoResult<JournalEntry> {
    let id_text: String = row.get("id")?;
    let id = EntryId::parse(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid entry id `{id_text}` in entries.id"))
    })?;

    let kind_text: String = row.get("kind")?;
    let kind = EntryKind::from_slug(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid entry kind `{kind_text}` in entries.kind"))
    })?;

    let date_text: String = row.get("date")?;
    let date = NaiveDate::parse_from_str(&date_text, DATE_FORMAT).map_err(|_| {
        RepoError::InvalidData(format!("invalid date `{date_text}` in entries.date"))
    })?;

    let body = match kind {
        EntryKind::FormalPractice => EntryBody::FormalPractice(parse_practice_columns(row)?),
        EntryKind::InformalPractice => EntryBody::InformalPractice(parse_practice_columns(row)?),
        EntryKind::PleasantEvent => EntryBody::PleasantEvent(parse_event_columns(row)?),
        EntryKind::UnpleasantEvent => EntryBody::UnpleasantEvent(parse_event_columns(row)?),
        EntryKind::DifficultCommunication => {
            EntryBody::DifficultCommunication(parse_communication_columns(row)?)
        }
    };

    let entry = JournalEntry {
        id,
        date,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
        body,
    };
    entry.validate()?;
    Ok(entry)
}

fn parse_practice_columns(row: &Row<'_>) -> RepoResult<PracticeDetail> {
    let duration: i64 = require_column(row.get("duration_minutes")?, "duration_minutes")?;
    let duration_minutes = u32::try_from(duration).map_err(|_| {
        RepoError::InvalidData(format!(
            "invalid duration `{duration}` in entries.duration_minutes"
        ))
    })?;

    Ok(PracticeDetail {
        practice_type: require_column(row.get("practice_type")?, "practice_type")?,
        duration_minutes,
        insights: require_column(row.get("insights")?, "insights")?,
    })
}

fn parse_event_columns(row: &Row<'_>) -> RepoResult<EventDetail> {
    Ok(EventDetail {
        event: require_column(row.get("event")?, "event")?,
        awareness_at_time: parse_bool_column(row, "awareness_at_time")?,
        body_feelings: require_column(row.get("body_feelings")?, "body_feelings")?,
        mood_and_thoughts: require_column(row.get("mood_and_thoughts")?, "mood_and_thoughts")?,
        current_thoughts: require_column(row.get("current_thoughts")?, "current_thoughts")?,
    })
}

fn parse_communication_columns(row: &Row<'_>) -> RepoResult<CommunicationDetail> {
    Ok(CommunicationDetail {
        content: require_column(row.get("content")?, "content")?,
        person: require_column(row.get("person")?, "person")?,
        problem_origin: require_column(row.get("problem_origin")?, "problem_origin")?,
        my_desire: require_column(row.get("my_desire")?, "my_desire")?,
        what_i_got: require_column(row.get("what_i_got")?, "what_i_got")?,
        their_desire: require_column(row.get("their_desire")?, "their_desire")?,
        what_they_got: require_column(row.get("what_they_got")?, "what_they_got")?,
        feelings: require_column(row.get("feelings")?, "feelings")?,
        resolved: parse_bool_column(row, "resolved")?,
        resolution: require_column(row.get("resolution")?, "resolution")?,
    })
}

// A NULL in a column the row's kind owns means the record does not conform
// to any variant shape; refuse it instead of defaulting.
fn require_column<T>(value: Option<T>, column: &str) -> RepoResult<T> {
    value.ok_or_else(|| {
        RepoError::InvalidData(format!("entries.{column} is missing for this entry kind"))
    })
}

fn parse_bool_column(row: &Row<'_>, column: &str) -> RepoResult<bool> {
    match require_column::<i64>(row.get(column)?, column)? {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid boolean `{other}` in entries.{column}"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

fn opt_text(value: Option<String>) -> Value {
    value.map_or(Value::Null, Value::Text)
}

fn opt_int(value: Option<i64>) -> Value {
    value.map_or(Value::Null, Value::Integer)
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let actual_version = db::schema_version(conn)?;
    let expected_version = crate::db::migrations::latest_version();
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !db::table_exists(conn, "entries")? {
        return Err(RepoError::MissingRequiredTable("entries"));
    }

    for column in ENTRY_COLUMNS {
        if !db::table_has_column(conn, "entries", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "entries",
                column,
            });
        }
    }

    Ok(())
}
