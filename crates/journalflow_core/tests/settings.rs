use journalflow_core::db::open_db_in_memory;
use journalflow_core::{
    add_practice_option, load_weekly_theme, practice_options, remove_practice_option,
    save_weekly_theme, PracticeKind, SettingsError, SqliteSettingsStore, WeeklyThemeDraft,
};
use rusqlite::Connection;

fn draft(week: u32, theme: &str) -> WeeklyThemeDraft {
    WeeklyThemeDraft {
        week,
        theme: theme.to_string(),
        description: "今週意識したいこと".to_string(),
    }
}

#[test]
fn weekly_theme_is_absent_before_the_first_save() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSettingsStore::try_new(&conn).unwrap();

    assert!(load_weekly_theme(&store).unwrap().is_none());
}

#[test]
fn weekly_theme_roundtrips_through_the_store() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSettingsStore::try_new(&conn).unwrap();

    let saved = save_weekly_theme(&store, &draft(3, "ボディスキャンでの気づき")).unwrap();
    let loaded = load_weekly_theme(&store).unwrap().unwrap();

    assert_eq!(loaded, saved);
    assert_eq!(loaded.week, 3);
    assert_eq!(loaded.created_at, loaded.updated_at);
}

#[test]
fn weekly_theme_overwrite_keeps_created_at_and_advances_updated_at() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSettingsStore::try_new(&conn).unwrap();

    let first = save_weekly_theme(&store, &draft(1, "呼吸への気づき")).unwrap();
    let second = save_weekly_theme(&store, &draft(2, "日常の中のマインドフルネス")).unwrap();

    assert_eq!(second.created_at, first.created_at);
    assert!(second.updated_at > first.updated_at);

    // Overwritten in place: a single record, no history.
    let loaded = load_weekly_theme(&store).unwrap().unwrap();
    assert_eq!(loaded.week, 2);
    assert_eq!(loaded.theme, "日常の中のマインドフルネス");
}

#[test]
fn weekly_theme_rejects_out_of_range_weeks_and_blank_themes() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSettingsStore::try_new(&conn).unwrap();

    assert!(matches!(
        save_weekly_theme(&store, &draft(0, "テーマ")),
        Err(SettingsError::InvalidWeek(0))
    ));
    assert!(matches!(
        save_weekly_theme(&store, &draft(13, "テーマ")),
        Err(SettingsError::InvalidWeek(13))
    ));
    assert!(matches!(
        save_weekly_theme(&store, &draft(1, "   ")),
        Err(SettingsError::BlankTheme)
    ));
    assert!(load_weekly_theme(&store).unwrap().is_none());
}

#[test]
fn practice_options_start_from_the_default_vocabulary() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSettingsStore::try_new(&conn).unwrap();

    let formal = practice_options(&store, PracticeKind::Formal).unwrap();
    let informal = practice_options(&store, PracticeKind::Informal).unwrap();

    assert!(formal.contains(&"ボディスキャン".to_string()));
    assert!(informal.contains(&"歩行瞑想".to_string()));
    assert_ne!(formal, informal);
}

#[test]
fn adding_an_option_trims_and_persists_it() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSettingsStore::try_new(&conn).unwrap();

    let updated = add_practice_option(&store, PracticeKind::Formal, "  マインドフルイーティング ").unwrap();
    assert_eq!(
        updated.last().map(String::as_str),
        Some("マインドフルイーティング")
    );

    let reloaded = practice_options(&store, PracticeKind::Formal).unwrap();
    assert_eq!(reloaded, updated);
}

#[test]
fn adding_a_duplicate_option_is_case_insensitive_and_keeps_the_list() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSettingsStore::try_new(&conn).unwrap();

    let first = add_practice_option(&store, PracticeKind::Informal, "Mindful Walking").unwrap();
    let second = add_practice_option(&store, PracticeKind::Informal, "mindful walking").unwrap();

    assert_eq!(first, second);
    assert_eq!(
        second
            .iter()
            .filter(|label| label.eq_ignore_ascii_case("mindful walking"))
            .count(),
        1
    );
}

#[test]
fn adding_a_blank_option_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSettingsStore::try_new(&conn).unwrap();

    assert!(matches!(
        add_practice_option(&store, PracticeKind::Formal, "   "),
        Err(SettingsError::BlankOption)
    ));
}

#[test]
fn removing_an_option_persists_the_remaining_list() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSettingsStore::try_new(&conn).unwrap();

    let removed = remove_practice_option(&store, PracticeKind::Formal, "ヨガ瞑想").unwrap();
    assert!(!removed.contains(&"ヨガ瞑想".to_string()));

    let reloaded = practice_options(&store, PracticeKind::Formal).unwrap();
    assert_eq!(reloaded, removed);
}

#[test]
fn the_two_vocabularies_evolve_independently() {
    let conn = open_db_in_memory().unwrap();
    let store = SqliteSettingsStore::try_new(&conn).unwrap();

    add_practice_option(&store, PracticeKind::Formal, "山の瞑想").unwrap();

    let informal = practice_options(&store, PracticeKind::Informal).unwrap();
    assert!(!informal.contains(&"山の瞑想".to_string()));
}

#[test]
fn store_rejects_a_connection_without_the_settings_table() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteSettingsStore::try_new(&conn);
    assert!(matches!(
        result,
        Err(SettingsError::MissingRequiredTable("settings"))
    ));
}
