//! Entry identifier format and generation.
//!
//! # Responsibility
//! - Define the `{kind-slug}-{epochMillis}` identifier used as primary key.
//! - Generate identifiers that stay unique within a process.
//!
//! # Invariants
//! - The slug prefix is always one of the known kind slugs.
//! - The millisecond component strictly increases across calls to
//!   [`EntryId::generate`], closing the same-millisecond collision window
//!   while keeping ids human-readable and sortable.

use crate::model::entry::{now_epoch_ms, EntryKind};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::atomic::{AtomicI64, Ordering};

static ID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z]+(?:-[a-z]+)*)-([0-9]{1,16})$").expect("id pattern compiles")
});

static LAST_CLAIMED_MS: AtomicI64 = AtomicI64::new(0);

/// Stable text identifier for one journal entry.
///
/// Ids sort chronologically within a kind and never get reused, even after
/// the entry is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

/// Parse failure for persisted or externally supplied id text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidEntryIdError {
    pub text: String,
}

impl Display for InvalidEntryIdError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid entry id `{}`", self.text)
    }
}

impl Error for InvalidEntryIdError {}

impl EntryId {
    /// Generates a fresh identifier for the given kind.
    pub fn generate(kind: EntryKind) -> Self {
        Self(format!("{}-{}", kind.slug(), claim_millis(now_epoch_ms())))
    }

    /// Parses id text, requiring the format and a known kind slug.
    pub fn parse(text: &str) -> Result<Self, InvalidEntryIdError> {
        let captures = ID_PATTERN.captures(text).ok_or_else(|| InvalidEntryIdError {
            text: text.to_string(),
        })?;
        let slug = &captures[1];
        if EntryKind::from_slug(slug).is_none() {
            return Err(InvalidEntryIdError {
                text: text.to_string(),
            });
        }
        Ok(Self(text.to_string()))
    }

    /// Kind slug embedded in this id.
    pub fn kind_slug(&self) -> &str {
        // The format is checked at construction; the last `-` separates the
        // slug from the millisecond component.
        match self.0.rfind('-') {
            Some(split) => &self.0[..split],
            None => self.0.as_str(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// Claims a millisecond value strictly greater than any previously claimed
// one, so rapid generation inside one millisecond still yields distinct ids.
fn claim_millis(now: i64) -> i64 {
    let mut last = LAST_CLAIMED_MS.load(Ordering::Relaxed);
    loop {
        let claimed = now.max(last + 1);
        match LAST_CLAIMED_MS.compare_exchange(last, claimed, Ordering::SeqCst, Ordering::Relaxed) {
            Ok(_) => return claimed,
            Err(actual) => last = actual,
        }
    }
}
