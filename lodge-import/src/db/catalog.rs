//! Standard amenity/tag catalog lookups and property junctions

use lodge_common::{Error, Result};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::store::{Catalog, PropertyScope};

/// Exact, case-sensitive name lookup in a catalog table
pub async fn find_id_by_name(pool: &SqlitePool, catalog: Catalog, name: &str) -> Result<Option<Uuid>> {
    // `=` on TEXT uses BINARY collation: case-sensitive
    let query = format!("SELECT id FROM {} WHERE name = ?", catalog.table_name());
    let id: Option<String> = sqlx::query_scalar(&query)
        .bind(name)
        .fetch_optional(pool)
        .await?;

    id.map(|id| {
        Uuid::parse_str(&id)
            .map_err(|e| Error::Internal(format!("Invalid id '{}' in {}: {}", id, catalog.table_name(), e)))
    })
    .transpose()
}

pub async fn insert_property_amenity(pool: &SqlitePool, scope: &PropertyScope, amenity_id: Uuid) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO property_amenities (id, property_id, tenant_id, amenity_id) VALUES (?, ?, ?, ?)")
        .bind(id.to_string())
        .bind(scope.property_id.to_string())
        .bind(scope.tenant_id.to_string())
        .bind(amenity_id.to_string())
        .execute(pool)
        .await?;

    Ok(id)
}

pub async fn insert_property_tag(pool: &SqlitePool, scope: &PropertyScope, tag_id: Uuid) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO property_tags (id, property_id, tenant_id, tag_id) VALUES (?, ?, ?, ?)")
        .bind(id.to_string())
        .bind(scope.property_id.to_string())
        .bind(scope.tenant_id.to_string())
        .bind(tag_id.to_string())
        .execute(pool)
        .await?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodge_common::db::init_memory_database;

    #[tokio::test]
    async fn test_lookup_is_exact_and_case_sensitive() {
        let pool = init_memory_database().await.unwrap();

        assert!(find_id_by_name(&pool, Catalog::Amenity, "WiFi").await.unwrap().is_some());
        assert!(find_id_by_name(&pool, Catalog::Amenity, "wifi").await.unwrap().is_none());
        assert!(find_id_by_name(&pool, Catalog::Amenity, "WiFi ").await.unwrap().is_none());
        assert!(find_id_by_name(&pool, Catalog::Tag, "Lake View").await.unwrap().is_some());
        assert!(find_id_by_name(&pool, Catalog::Tag, "WiFi").await.unwrap().is_none());
    }
}
