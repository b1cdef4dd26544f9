//! Property (root) persistence

use lodge_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::PropertyInput;

/// Insert the root property row
///
/// `is_active` defaults to true and `is_published` to false unless the
/// document sets them. A duplicate slug fails on the UNIQUE constraint.
pub async fn insert_property(pool: &SqlitePool, tenant_id: Uuid, property: &PropertyInput) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO properties (
            id, tenant_id, name, slug, property_type, tagline, description, classification,
            address_line1, address_line2, city, state, country, postal_code, latitude, longitude,
            phone, email, website, is_active, is_published, meta_title, meta_description
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(tenant_id.to_string())
    .bind(&property.name)
    .bind(&property.slug)
    .bind(&property.property_type)
    .bind(&property.tagline)
    .bind(&property.description)
    .bind(&property.classification)
    .bind(&property.address_line1)
    .bind(&property.address_line2)
    .bind(&property.city)
    .bind(&property.state)
    .bind(&property.country)
    .bind(&property.postal_code)
    .bind(property.latitude)
    .bind(property.longitude)
    .bind(&property.phone)
    .bind(&property.email)
    .bind(&property.website)
    .bind(property.is_active.unwrap_or(true))
    .bind(property.is_published.unwrap_or(false))
    .bind(&property.meta_title)
    .bind(&property.meta_description)
    .execute(pool)
    .await?;

    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lodge_common::db::init_memory_database;

    fn property(slug: &str) -> PropertyInput {
        PropertyInput {
            name: "Lake View Inn".to_string(),
            country: "India".to_string(),
            slug: slug.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_insert_property_defaults_flags() {
        let pool = init_memory_database().await.unwrap();
        let tenant_id = Uuid::new_v4();

        let id = insert_property(&pool, tenant_id, &property("lake-view-inn")).await.unwrap();

        let (stored_tenant, is_active, is_published): (String, bool, bool) = sqlx::query_as(
            "SELECT tenant_id, is_active, is_published FROM properties WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_one(&pool)
        .await
        .unwrap();

        assert_eq!(stored_tenant, tenant_id.to_string());
        assert!(is_active);
        assert!(!is_published);
    }

    #[tokio::test]
    async fn test_duplicate_slug_rejected() {
        let pool = init_memory_database().await.unwrap();
        let tenant_id = Uuid::new_v4();

        insert_property(&pool, tenant_id, &property("lake-view-inn")).await.unwrap();
        let err = insert_property(&pool, tenant_id, &property("lake-view-inn"))
            .await
            .unwrap_err();

        assert!(err.store_message().contains("UNIQUE constraint failed"));
    }
}
