//! Journal entry envelope and kind-specific payloads.
//!
//! # Responsibility
//! - Define the five journal kinds and their payload shapes.
//! - Stamp envelope fields at creation and guard them on edit.
//!
//! # Invariants
//! - `updated_at >= created_at` for every valid entry.
//! - The id's slug prefix always agrees with the body's kind.
//! - An edit never changes the kind; there is no variant migration.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::id::EntryId;
use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Discriminant for the five journal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EntryKind {
    FormalPractice,
    InformalPractice,
    PleasantEvent,
    UnpleasantEvent,
    DifficultCommunication,
}

impl EntryKind {
    /// Every kind, in the order the original journal presents them.
    pub const ALL: [EntryKind; 5] = [
        EntryKind::FormalPractice,
        EntryKind::InformalPractice,
        EntryKind::PleasantEvent,
        EntryKind::UnpleasantEvent,
        EntryKind::DifficultCommunication,
    ];

    /// Stable storage slug, also the id prefix.
    pub fn slug(self) -> &'static str {
        match self {
            EntryKind::FormalPractice => "formal-practice",
            EntryKind::InformalPractice => "informal-practice",
            EntryKind::PleasantEvent => "pleasant-event",
            EntryKind::UnpleasantEvent => "unpleasant-event",
            EntryKind::DifficultCommunication => "difficult-communication",
        }
    }

    /// Human-readable label shown in list and detail views.
    pub fn label(self) -> &'static str {
        match self {
            EntryKind::FormalPractice => "フォーマル実践",
            EntryKind::InformalPractice => "インフォーマル実践",
            EntryKind::PleasantEvent => "快な出来事",
            EntryKind::UnpleasantEvent => "不快な出来事",
            EntryKind::DifficultCommunication => "困難なコミュニケーション",
        }
    }

    /// Resolves a storage slug back to its kind.
    pub fn from_slug(value: &str) -> Option<Self> {
        match value {
            "formal-practice" => Some(EntryKind::FormalPractice),
            "informal-practice" => Some(EntryKind::InformalPractice),
            "pleasant-event" => Some(EntryKind::PleasantEvent),
            "unpleasant-event" => Some(EntryKind::UnpleasantEvent),
            "difficult-communication" => Some(EntryKind::DifficultCommunication),
            _ => None,
        }
    }
}

impl Display for EntryKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.slug())
    }
}

/// Payload for formal and informal practice sessions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeDetail {
    /// Free-text practice label (body scan, sitting meditation, ...).
    pub practice_type: String,
    /// Session length in whole minutes.
    pub duration_minutes: u32,
    /// What was noticed during or after the session.
    pub insights: String,
}

/// Payload for pleasant and unpleasant event logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDetail {
    pub event: String,
    /// Whether the feeling was noticed while the event happened.
    pub awareness_at_time: bool,
    pub body_feelings: String,
    pub mood_and_thoughts: String,
    pub current_thoughts: String,
}

/// Payload for difficult-communication logs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunicationDetail {
    pub content: String,
    pub person: String,
    pub problem_origin: String,
    pub my_desire: String,
    pub what_i_got: String,
    pub their_desire: String,
    pub what_they_got: String,
    pub feelings: String,
    pub resolved: bool,
    pub resolution: String,
}

/// Closed tagged union over the five journal kinds.
///
/// Consumers match exhaustively; there is no catch-all arm, so adding a kind
/// is a compile-time event everywhere the union is consumed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryBody {
    #[serde(rename = "formal-practice")]
    FormalPractice(PracticeDetail),
    #[serde(rename = "informal-practice")]
    InformalPractice(PracticeDetail),
    #[serde(rename = "pleasant-event")]
    PleasantEvent(EventDetail),
    #[serde(rename = "unpleasant-event")]
    UnpleasantEvent(EventDetail),
    #[serde(rename = "difficult-communication")]
    DifficultCommunication(CommunicationDetail),
}

impl EntryBody {
    /// Kind carried by this body.
    pub fn kind(&self) -> EntryKind {
        match self {
            EntryBody::FormalPractice(_) => EntryKind::FormalPractice,
            EntryBody::InformalPractice(_) => EntryKind::InformalPractice,
            EntryBody::PleasantEvent(_) => EntryKind::PleasantEvent,
            EntryBody::UnpleasantEvent(_) => EntryKind::UnpleasantEvent,
            EntryBody::DifficultCommunication(_) => EntryKind::DifficultCommunication,
        }
    }
}

/// One journal record: envelope fields plus the kind-specific body.
///
/// The kind is not a field; it is derived from `body`, so an envelope whose
/// discriminant disagrees with its payload cannot be represented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Primary key, `{kind-slug}-{epochMillis}`.
    pub id: EntryId,
    /// Logical journaling day (device-local calendar date at creation).
    pub date: NaiveDate,
    /// Creation instant, epoch milliseconds. Frozen.
    pub created_at: i64,
    /// Last edit instant, epoch milliseconds. Advances on every edit.
    pub updated_at: i64,
    #[serde(flatten)]
    pub body: EntryBody,
}

/// Validation failure raised by entry write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    /// The id's slug prefix disagrees with the body's kind.
    IdKindMismatch { id: EntryId, kind: EntryKind },
    /// `updated_at` lies before `created_at`.
    TimestampOrder { created_at: i64, updated_at: i64 },
    /// An edit tried to move the entry to another kind.
    KindChange {
        stored: EntryKind,
        requested: EntryKind,
    },
}

impl Display for EntryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IdKindMismatch { id, kind } => {
                write!(f, "entry id `{id}` does not carry the `{kind}` slug")
            }
            Self::TimestampOrder {
                created_at,
                updated_at,
            } => write!(
                f,
                "updated_at {updated_at} is earlier than created_at {created_at}"
            ),
            Self::KindChange { stored, requested } => {
                write!(f, "entry kind is fixed at `{stored}`, cannot become `{requested}`")
            }
        }
    }
}

impl Error for EntryValidationError {}

impl JournalEntry {
    /// Creates an entry from a body, stamping the full envelope.
    ///
    /// The journaling day is the device-local calendar date of the creation
    /// instant; `created_at` and `updated_at` start equal.
    pub fn new(body: EntryBody) -> Self {
        let now = now_epoch_ms();
        Self {
            id: EntryId::generate(body.kind()),
            date: Local::now().date_naive(),
            created_at: now,
            updated_at: now,
            body,
        }
    }

    /// Kind of this entry, derived from the body.
    pub fn kind(&self) -> EntryKind {
        self.body.kind()
    }

    /// Replaces the body and advances `updated_at`.
    ///
    /// # Invariants
    /// - The kind is frozen; a body of another kind is rejected.
    /// - `updated_at` strictly advances, even for two edits inside one clock
    ///   millisecond.
    pub fn edit(&mut self, body: EntryBody) -> Result<(), EntryValidationError> {
        if body.kind() != self.kind() {
            return Err(EntryValidationError::KindChange {
                stored: self.kind(),
                requested: body.kind(),
            });
        }

        self.body = body;
        self.updated_at = now_epoch_ms().max(self.updated_at + 1);
        Ok(())
    }

    /// Checks the envelope invariants enforced on every write path.
    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.id.kind_slug() != self.kind().slug() {
            return Err(EntryValidationError::IdKindMismatch {
                id: self.id.clone(),
                kind: self.kind(),
            });
        }
        if self.updated_at < self.created_at {
            return Err(EntryValidationError::TimestampOrder {
                created_at: self.created_at,
                updated_at: self.updated_at,
            });
        }
        Ok(())
    }
}

/// Current instant as epoch milliseconds.
pub(crate) fn now_epoch_ms() -> i64 {
    Utc::now().timestamp_millis()
}
