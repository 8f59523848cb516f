use rusqlite::Connection;
use zhixia_core::db::migrations::latest_version;
use zhixia_core::db::{open_db, open_db_in_memory};
use zhixia_core::{
    ChapterPatch, EditorSession, KeyValueStore, ProjectRepository, ProjectStore,
    SqliteKeyValueStore, StorageError, StoreConfig,
};

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    assert_eq!(schema_version(&conn), latest_version());

    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv_store');",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        StorageError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn unmigrated_connection_is_rejected() {
    let conn = Connection::open_in_memory().unwrap();
    let err = SqliteKeyValueStore::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        StorageError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn load_and_save_upsert_by_key() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::try_new(&conn).unwrap();

    assert!(kv.load("k").unwrap().is_none());
    kv.save("k", "one").unwrap();
    kv.save("k", "two").unwrap();
    kv.save("other", "x").unwrap();
    assert_eq!(kv.load("k").unwrap().as_deref(), Some("two"));

    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_store;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 2);
}

#[test]
fn projects_survive_database_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("zhixia.db");

    let expected = {
        let conn = open_db(&path).unwrap();
        let store = ProjectStore::new(
            SqliteKeyValueStore::try_new(&conn).unwrap(),
            StoreConfig::default(),
        );
        let project = store.create_project("长篇").unwrap();
        let mut session = EditorSession::open(&store, &project.id).unwrap().unwrap();
        let id = session.add_chapter().unwrap();
        session
            .update_chapter(&id, &ChapterPatch::content("夜色"))
            .unwrap();
        session.add_chapter().unwrap();
        store.list_projects().unwrap()
    };

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let store = ProjectStore::new(
        SqliteKeyValueStore::try_new(&conn).unwrap(),
        StoreConfig::default(),
    );
    let reloaded = store.list_projects().unwrap();
    assert_eq!(reloaded, expected);
    assert_eq!(reloaded[0].word_count, 2);
    assert_eq!(reloaded[0].chapters.len(), 2);
}
