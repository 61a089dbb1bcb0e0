use journalflow_core::db::migrations::latest_version;
use journalflow_core::db::open_db_in_memory;
use journalflow_core::{
    preview_of, CommunicationDetail, EntryBody, EntryKind, EntryRepository, JournalEntry,
    JournalService, PracticeDetail, RepoError, SqliteEntryRepository,
};
use rusqlite::Connection;

fn formal_practice(practice_type: &str, duration_minutes: u32, insights: &str) -> EntryBody {
    EntryBody::FormalPractice(PracticeDetail {
        practice_type: practice_type.to_string(),
        duration_minutes,
        insights: insights.to_string(),
    })
}

fn difficult_communication(content: &str) -> EntryBody {
    EntryBody::DifficultCommunication(CommunicationDetail {
        content: content.to_string(),
        person: "上司".to_string(),
        problem_origin: "締め切りの認識違い".to_string(),
        my_desire: "余裕のある計画".to_string(),
        what_i_got: "翌週への延期".to_string(),
        their_desire: "早い納品".to_string(),
        what_they_got: "進捗の見通し".to_string(),
        feelings: "緊張".to_string(),
        resolved: true,
        resolution: "週次で状況を共有することにした".to_string(),
    })
}

#[test]
fn create_and_list_roundtrip_is_deep_equal() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let entry = JournalEntry::new(formal_practice("ボディスキャン", 20, "呼吸が浅かった"));
    repo.create(&entry).unwrap();

    let all = repo.list_all().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0], entry);
}

#[test]
fn get_returns_none_for_unknown_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let never_stored = JournalEntry::new(difficult_communication("未保存"));
    assert!(repo.get(&never_stored.id).unwrap().is_none());
}

#[test]
fn create_rejects_a_duplicate_id() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let entry = JournalEntry::new(formal_practice("ヨガ瞑想", 30, "体が硬い"));
    repo.create(&entry).unwrap();

    let err = repo.create(&entry).unwrap_err();
    assert!(matches!(err, RepoError::DuplicateId(id) if id == entry.id));

    assert_eq!(repo.list_all().unwrap().len(), 1);
}

#[test]
fn upsert_replaces_wholesale_and_preserves_identity_fields() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let mut entry = JournalEntry::new(formal_practice("ボディスキャン", 20, "眠くなった"));
    repo.create(&entry).unwrap();
    let updated_before = entry.updated_at;

    entry
        .edit(formal_practice("ボディスキャン", 45, "後半は集中できた"))
        .unwrap();
    repo.upsert(&entry).unwrap();

    let stored = repo.get(&entry.id).unwrap().unwrap();
    assert_eq!(stored.id, entry.id);
    assert_eq!(stored.kind(), EntryKind::FormalPractice);
    assert_eq!(stored.created_at, entry.created_at);
    assert_eq!(stored.date, entry.date);
    assert!(stored.updated_at > updated_before);
    match &stored.body {
        EntryBody::FormalPractice(detail) => {
            assert_eq!(detail.duration_minutes, 45);
            assert_eq!(detail.insights, "後半は集中できた");
        }
        other => panic!("unexpected body: {other:?}"),
    }
}

#[test]
fn upsert_creates_when_the_id_is_absent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let entry = JournalEntry::new(difficult_communication("伝え方を間違えた"));
    repo.upsert(&entry).unwrap();

    assert_eq!(repo.list_all().unwrap(), vec![entry]);
}

#[test]
fn delete_removes_exactly_one_and_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteEntryRepository::try_new(&conn).unwrap();

    let keep_a = JournalEntry::new(formal_practice("静坐瞑想", 10, "a"));
    let target = JournalEntry::new(formal_practice("静坐瞑想", 10, "b"));
    let keep_b = JournalEntry::new(difficult_communication("c"));
    repo.create(&keep_a).unwrap();
    repo.create(&target).unwrap();
    repo.create(&keep_b).unwrap();

    repo.delete(&target.id).unwrap();
    let remaining = repo.list_all().unwrap();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|entry| entry.id != target.id));

    // Deleting an id that is already gone stays a no-op.
    repo.delete(&target.id).unwrap();
    assert_eq!(repo.list_all().unwrap().len(), 2);
}

#[test]
fn repository_rejects_an_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteEntryRepository::try_new(&conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        other => panic!("unexpected result: {other:?}"),
    }
}

#[test]
fn repository_rejects_a_connection_without_the_entries_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("entries"))
    ));
}

#[test]
fn repository_rejects_a_connection_missing_an_entry_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE entries (
            id TEXT PRIMARY KEY NOT NULL,
            kind TEXT NOT NULL,
            date TEXT NOT NULL,
            created_at INTEGER NOT NULL,
            updated_at INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteEntryRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "entries",
            column: "practice_type"
        })
    ));
}

#[test]
fn decode_rejects_a_row_missing_its_variant_columns() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO entries (id, kind, date, created_at, updated_at)
         VALUES ('formal-practice-1700000000000', 'formal-practice', '2026-08-06', 1, 1);",
    )
    .unwrap();

    let repo = SqliteEntryRepository::try_new(&conn).unwrap();
    let err = repo.list_all().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn service_edit_of_a_missing_id_is_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = JournalService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    let never_stored = JournalEntry::new(formal_practice("静坐瞑想", 15, "x"));
    let err = service
        .edit_entry(&never_stored.id, formal_practice("静坐瞑想", 20, "x"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == never_stored.id));
}

#[test]
fn practice_entry_lifecycle_from_log_to_delete() {
    let conn = open_db_in_memory().unwrap();
    let service = JournalService::new(SqliteEntryRepository::try_new(&conn).unwrap());

    let logged = service
        .log_entry(formal_practice("ボディスキャン", 20, "気づきがあった"))
        .unwrap();

    let all = service.entries().unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(preview_of(&all[0]), "気づきがあった");

    let edited = service
        .edit_entry(
            &logged.id,
            formal_practice("ボディスキャン", 25, "気づきがあった"),
        )
        .unwrap();
    assert_eq!(edited.created_at, logged.created_at);
    assert!(edited.updated_at > logged.updated_at);

    service.remove_entry(&logged.id).unwrap();
    assert!(service.entries().unwrap().is_empty());
}
