//! Journal entry use-case service.
//!
//! # Invariants
//! - Creation stamps the full envelope; callers only supply a body.
//! - Editing never changes id, kind, journaling day or creation instant.

use crate::model::entry::{EntryBody, EntryKind, JournalEntry};
use crate::model::id::EntryId;
use crate::repo::entry_repo::{EntryRepository, RepoError, RepoResult};
use chrono::NaiveDate;

/// Use-case wrapper over an entry repository.
pub struct JournalService<R: EntryRepository> {
    repo: R,
}

impl<R: EntryRepository> JournalService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates and persists a new entry from its body, returning the stored
    /// record with its stamped envelope.
    pub fn log_entry(&self, body: EntryBody) -> RepoResult<JournalEntry> {
        let entry = JournalEntry::new(body);
        self.repo.create(&entry)?;
        Ok(entry)
    }

    /// Fetches one entry by id; `Ok(None)` when absent.
    pub fn entry(&self, id: &EntryId) -> RepoResult<Option<JournalEntry>> {
        self.repo.get(id)
    }

    /// Every stored entry, unordered. Callers shape the list with the query
    /// layer.
    pub fn entries(&self) -> RepoResult<Vec<JournalEntry>> {
        self.repo.list_all()
    }

    pub fn entries_by_kind(&self, kind: EntryKind) -> RepoResult<Vec<JournalEntry>> {
        self.repo.list_by_kind(kind)
    }

    /// Entries whose journaling day falls within `[start, end]` inclusive.
    pub fn entries_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> RepoResult<Vec<JournalEntry>> {
        self.repo.list_by_date_range(start, end)
    }

    /// Replaces the body of an existing entry and persists the result.
    ///
    /// Fails with [`RepoError::NotFound`] when the id is not stored: editing
    /// is not creation. The kind stays frozen and `updated_at` advances.
    pub fn edit_entry(&self, id: &EntryId, body: EntryBody) -> RepoResult<JournalEntry> {
        let mut entry = self
            .repo
            .get(id)?
            .ok_or_else(|| RepoError::NotFound(id.clone()))?;
        entry.edit(body)?;
        self.repo.upsert(&entry)?;
        Ok(entry)
    }

    /// Deletes by id; deleting an absent id is a no-op.
    pub fn remove_entry(&self, id: &EntryId) -> RepoResult<()> {
        self.repo.delete(id)
    }
}
