//! Database initialization
//!
//! Opens (or creates) the SQLite file, creates the property schema and seeds
//! the standard amenity/tag catalog. Every step is idempotent, so calling it
//! on an existing database is safe.

use crate::db::table_schemas::ensure_all_tables;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

/// Busy timeout applied to every pooled connection
const BUSY_TIMEOUT: Duration = Duration::from_millis(5000);

/// Amenities present in every fresh catalog, as (name, category)
pub const DEFAULT_AMENITIES: &[(&str, &str)] = &[
    ("WiFi", "connectivity"),
    ("Air Conditioning", "comfort"),
    ("Heating", "comfort"),
    ("Parking", "facilities"),
    ("Swimming Pool", "facilities"),
    ("Restaurant", "dining"),
    ("Breakfast Included", "dining"),
    ("Room Service", "services"),
    ("Airport Shuttle", "services"),
    ("Fitness Center", "wellness"),
    ("Spa", "wellness"),
    ("Pet Friendly", "policies"),
    ("Television", "in-room"),
    ("Mini Bar", "in-room"),
    ("Balcony", "in-room"),
];

/// Tags present in every fresh catalog
pub const DEFAULT_TAGS: &[&str] = &[
    "Family Friendly",
    "Romantic",
    "Business",
    "Beachfront",
    "Mountain View",
    "Lake View",
    "Heritage",
    "Eco Friendly",
    "Luxury",
    "Budget",
];

/// Initialize database connection and create tables if needed
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let db_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);

    let pool = SqlitePoolOptions::new()
        .max_connections(10)
        .connect_with(options)
        .await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    init_schema(&pool).await?;

    Ok(pool)
}

/// Private in-memory database with the full schema
///
/// Limited to one connection: every SQLite `:memory:` connection is a
/// separate database.
pub async fn init_memory_database() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await?;

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create all tables and seed the catalog
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    ensure_all_tables(pool).await?;
    seed_catalog(pool).await?;
    Ok(())
}

/// Insert the default amenities and tags that are not present yet
async fn seed_catalog(pool: &SqlitePool) -> Result<()> {
    for (name, category) in DEFAULT_AMENITIES {
        ensure_amenity(pool, name, Some(category)).await?;
    }
    for name in DEFAULT_TAGS {
        ensure_tag(pool, name).await?;
    }

    debug!(
        amenities = DEFAULT_AMENITIES.len(),
        tags = DEFAULT_TAGS.len(),
        "Catalog seeded"
    );
    Ok(())
}

/// Add an amenity to the catalog unless the name already exists
pub async fn ensure_amenity(pool: &SqlitePool, name: &str, category: Option<&str>) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO standard_amenities (id, name, category) VALUES (?, ?, ?)")
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .bind(category)
        .execute(pool)
        .await?;

    Ok(())
}

/// Add a tag to the catalog unless the name already exists
pub async fn ensure_tag(pool: &SqlitePool, name: &str) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO standard_tags (id, name) VALUES (?, ?)")
        .bind(Uuid::new_v4().to_string())
        .bind(name)
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_database_has_seeded_catalog() {
        let pool = init_memory_database().await.unwrap();

        let amenities: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM standard_amenities")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(amenities, DEFAULT_AMENITIES.len() as i64);

        let tags: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM standard_tags")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(tags, DEFAULT_TAGS.len() as i64);
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let pool = init_memory_database().await.unwrap();
        init_schema(&pool).await.unwrap();

        let amenities: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM standard_amenities")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(amenities, DEFAULT_AMENITIES.len() as i64);
    }

    #[tokio::test]
    async fn test_foreign_keys_enforced() {
        let pool = init_memory_database().await.unwrap();

        let result = sqlx::query(
            "INSERT INTO hosts (id, property_id, tenant_id, name) VALUES ('h1', 'missing', 't1', 'Asha')",
        )
        .execute(&pool)
        .await;

        assert!(result.is_err(), "Orphan host row should be rejected");
    }
}
