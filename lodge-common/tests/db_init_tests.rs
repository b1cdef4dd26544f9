//! Tests for file-backed database initialization

use lodge_common::db::{ensure_amenity, init_database, DEFAULT_AMENITIES, DEFAULT_TAGS};

#[tokio::test]
async fn test_init_creates_parent_directory_and_schema() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("nested").join("lodge.db");

    let pool = init_database(&db_path).await.unwrap();

    assert!(db_path.exists());

    let tables: Vec<String> =
        sqlx::query_scalar("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
            .fetch_all(&pool)
            .await
            .unwrap();
    for expected in ["properties", "rooms", "pricing", "booking_settings", "property_tags"] {
        assert!(tables.iter().any(|t| t == expected), "missing table {}", expected);
    }
}

#[tokio::test]
async fn test_reopen_keeps_catalog_and_data() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("lodge.db");

    {
        let pool = init_database(&db_path).await.unwrap();
        ensure_amenity(&pool, "Hammock", Some("outdoor")).await.unwrap();
        pool.close().await;
    }

    let pool = init_database(&db_path).await.unwrap();

    let amenities: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM standard_amenities")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(amenities, DEFAULT_AMENITIES.len() as i64 + 1);

    let tags: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM standard_tags")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(tags, DEFAULT_TAGS.len() as i64);
}

#[tokio::test]
async fn test_reopen_adds_missing_columns() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("lodge.db");

    {
        let pool = init_database(&db_path).await.unwrap();
        sqlx::query("ALTER TABLE hosts DROP COLUMN is_superhost")
            .execute(&pool)
            .await
            .unwrap();
        pool.close().await;
    }

    let pool = init_database(&db_path).await.unwrap();

    let columns: Vec<String> = sqlx::query_scalar("SELECT name FROM pragma_table_info('hosts')")
        .fetch_all(&pool)
        .await
        .unwrap();
    assert!(columns.iter().any(|c| c == "is_superhost"));
}
