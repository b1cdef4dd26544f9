//! Listing detail persistence: hosts, review sources, proximity info,
//! nearby attractions and property features

use lodge_common::Result;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{
    HostInput, NearbyAttractionInput, PropertyFeatureInput, ProximityInfoInput, ReviewSourceInput,
};
use crate::store::PropertyScope;

pub async fn insert_host(pool: &SqlitePool, scope: &PropertyScope, host: &HostInput) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO hosts (
            id, property_id, tenant_id, name, title, bio, email, phone, languages, is_superhost
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&host.name)
    .bind(&host.title)
    .bind(&host.bio)
    .bind(&host.email)
    .bind(&host.phone)
    .bind(Json(&host.languages))
    .bind(host.is_superhost.unwrap_or(false))
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn insert_review_source(
    pool: &SqlitePool,
    scope: &PropertyScope,
    source: &ReviewSourceInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO review_sources (id, property_id, tenant_id, source_name, rating, review_count, url)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&source.source_name)
    .bind(source.rating)
    .bind(source.review_count)
    .bind(&source.url)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn insert_proximity_info(
    pool: &SqlitePool,
    scope: &PropertyScope,
    info: &ProximityInfoInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO proximity_info (
            id, property_id, tenant_id, place_name, category, distance_km, travel_time_minutes
        ) VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&info.place_name)
    .bind(&info.category)
    .bind(info.distance_km)
    .bind(info.travel_time_minutes)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn insert_nearby_attraction(
    pool: &SqlitePool,
    scope: &PropertyScope,
    attraction: &NearbyAttractionInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO nearby_attractions (id, property_id, tenant_id, name, description, category, distance_km)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&attraction.name)
    .bind(&attraction.description)
    .bind(&attraction.category)
    .bind(attraction.distance_km)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn insert_property_feature(
    pool: &SqlitePool,
    scope: &PropertyScope,
    feature: &PropertyFeatureInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO property_features (id, property_id, tenant_id, title, description, icon) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&feature.title)
    .bind(&feature.description)
    .bind(&feature.icon)
    .execute(pool)
    .await?;

    Ok(id)
}
