//! Integration-Tests fuer RoomKeyRepository (SQLite)

use roomlock_db::{DatabaseConfig, RoomKeyRepository, SqliteDb};

async fn db() -> SqliteDb {
    SqliteDb::in_memory()
        .await
        .expect("In-Memory DB konnte nicht erstellt werden")
}

#[tokio::test]
async fn put_und_get() {
    let db = db().await;

    assert_eq!(db.get("room_key_demo2").await.expect("get"), None);
    assert!(!db.exists("room_key_demo2").await.expect("exists"));

    db.put("room_key_demo2", "schluessel-a").await.expect("put");

    assert_eq!(
        db.get("room_key_demo2").await.expect("get").as_deref(),
        Some("schluessel-a")
    );
    assert!(db.exists("room_key_demo2").await.expect("exists"));
}

#[tokio::test]
async fn put_ueberschreibt_vorhandenen_wert() {
    let db = db().await;

    db.put("room_key_r1", "alt").await.expect("put");
    db.put("room_key_r1", "neu").await.expect("put");

    assert_eq!(db.get("room_key_r1").await.expect("get").as_deref(), Some("neu"));
    assert_eq!(db.list_keys().await.expect("list"), vec!["room_key_r1"]);
}

#[tokio::test]
async fn put_if_absent_liefert_gewinner() {
    let db = db().await;

    let erster = db.put_if_absent("room_key_r1", "eins").await.expect("erster");
    let zweiter = db.put_if_absent("room_key_r1", "zwei").await.expect("zweiter");

    assert_eq!(erster, "eins");
    assert_eq!(zweiter, "eins");
    assert_eq!(db.get("room_key_r1").await.expect("get").as_deref(), Some("eins"));
}

#[tokio::test]
async fn delete_entfernt_eintrag() {
    let db = db().await;

    db.put("room_key_r1", "eins").await.expect("put");
    assert!(db.delete("room_key_r1").await.expect("delete"));
    assert!(!db.delete("room_key_r1").await.expect("delete"));
    assert_eq!(db.get("room_key_r1").await.expect("get"), None);
}

#[tokio::test]
async fn list_keys_ist_sortiert() {
    let db = db().await;

    db.put("room_key_zulu", "z").await.expect("put");
    db.put("room_key_alpha", "a").await.expect("put");
    db.put("room_key_mike", "m").await.expect("put");

    assert_eq!(
        db.list_keys().await.expect("list"),
        vec!["room_key_alpha", "room_key_mike", "room_key_zulu"]
    );
}

#[tokio::test]
async fn schluessel_ueberlebt_neustart() {
    let dir = tempfile::tempdir().expect("tempdir");
    let pfad = dir.path().join("roomlock.db");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", pfad.display()),
        max_verbindungen: 2,
        sqlite_wal: true,
    };

    {
        let db = SqliteDb::oeffnen(&config).await.expect("oeffnen");
        db.put("room_key_demo2", "persistiert").await.expect("put");
        db.schliessen().await;
    }

    let db = SqliteDb::oeffnen(&config).await.expect("erneut oeffnen");
    assert_eq!(
        db.get("room_key_demo2").await.expect("get").as_deref(),
        Some("persistiert")
    );
}

#[tokio::test]
async fn ohne_wal_und_mit_null_verbindungen() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = DatabaseConfig {
        url: format!("sqlite://{}", dir.path().join("ohne-wal.db").display()),
        max_verbindungen: 0,
        sqlite_wal: false,
    };

    let db = SqliteDb::oeffnen(&config).await.expect("oeffnen");
    db.put("room_key_r1", "eins").await.expect("put");
    assert!(db.exists("room_key_r1").await.expect("exists"));
    db.schliessen().await;

    // Schema-Migration beim erneuten Oeffnen ist idempotent
    let db = SqliteDb::oeffnen(&config).await.expect("erneut oeffnen");
    assert_eq!(db.list_keys().await.expect("list"), vec!["room_key_r1"]);
}
