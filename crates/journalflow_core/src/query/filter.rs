//! Pure filter, sort and preview functions over an entry snapshot.
//!
//! # Invariants
//! - Functions never touch storage; callers pass the full in-memory snapshot.
//! - A blank search query keeps every entry.
//! - Sorting is stable: equal `created_at` keeps the incoming order.

use crate::model::entry::{EntryBody, EntryKind, JournalEntry};

/// Kind filter for list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KindFilter {
    /// Keep everything.
    All,
    /// Keep only one kind.
    Only(EntryKind),
}

/// Sorts newest-first by creation instant. Stable on ties.
pub fn sort_by_created_desc(mut entries: Vec<JournalEntry>) -> Vec<JournalEntry> {
    entries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    entries
}

/// Applies a kind filter; [`KindFilter::All`] is the identity.
pub fn filter_by_kind(entries: Vec<JournalEntry>, filter: KindFilter) -> Vec<JournalEntry> {
    match filter {
        KindFilter::All => entries,
        KindFilter::Only(kind) => entries
            .into_iter()
            .filter(|entry| entry.kind() == kind)
            .collect(),
    }
}

/// Case-insensitive substring search over each entry's preview text, kind
/// slug and display label. Blank or whitespace-only queries keep everything.
pub fn filter_by_search(entries: Vec<JournalEntry>, query: &str) -> Vec<JournalEntry> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return entries;
    }

    entries
        .into_iter()
        .filter(|entry| {
            let kind = entry.kind();
            preview_of(entry).to_lowercase().contains(&needle)
                || kind.slug().contains(&needle)
                || kind.label().to_lowercase().contains(&needle)
        })
        .collect()
}

/// Representative text for list views, one field per kind.
pub fn preview_of(entry: &JournalEntry) -> &str {
    match &entry.body {
        EntryBody::FormalPractice(detail) | EntryBody::InformalPractice(detail) => &detail.insights,
        EntryBody::PleasantEvent(detail) | EntryBody::UnpleasantEvent(detail) => &detail.event,
        EntryBody::DifficultCommunication(detail) => &detail.content,
    }
}
