//! Contact channel persistence: social media links and booking CTAs

use lodge_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{BookingCtaInput, SocialMediaLinkInput};
use crate::store::PropertyScope;

pub async fn insert_social_media_link(
    pool: &SqlitePool,
    scope: &PropertyScope,
    link: &SocialMediaLinkInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO social_media_links (id, property_id, tenant_id, platform, url) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&link.platform)
    .bind(&link.url)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn insert_booking_cta(
    pool: &SqlitePool,
    scope: &PropertyScope,
    cta: &BookingCtaInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO booking_ctas (id, property_id, tenant_id, label, url, cta_type, is_primary)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&cta.label)
    .bind(&cta.url)
    .bind(&cta.cta_type)
    .bind(cta.is_primary.unwrap_or(false))
    .execute(pool)
    .await?;

    Ok(id)
}
