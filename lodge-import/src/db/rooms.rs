//! Room, bed configuration, room amenity and pricing persistence

use lodge_common::Result;
use sqlx::types::Json;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::{BedConfigurationInput, PricingRates, RoomInput};
use crate::store::PropertyScope;

/// Insert a room; the capacity CHECK rejects `max_adults + max_children > max_occupancy`
pub async fn insert_room(pool: &SqlitePool, scope: &PropertyScope, room: &RoomInput) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO rooms (
            id, property_id, tenant_id, name, description, room_type, max_occupancy,
            max_adults, max_children, size_sqm, view_type, features, base_rate, currency
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(&room.name)
    .bind(&room.description)
    .bind(&room.room_type)
    .bind(room.max_occupancy)
    .bind(room.max_adults)
    .bind(room.max_children)
    .bind(room.size_sqm)
    .bind(&room.view_type)
    .bind(Json(&room.features))
    .bind(room.base_rate)
    .bind(&room.currency)
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn insert_bed_configuration(
    pool: &SqlitePool,
    scope: &PropertyScope,
    room_id: Uuid,
    bed: &BedConfigurationInput,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO bed_configurations (
            id, property_id, tenant_id, room_id, bed_type, bed_count, is_sofa_bed, is_extra_bed
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(room_id.to_string())
    .bind(&bed.bed_type)
    .bind(bed.bed_count)
    .bind(bed.is_sofa_bed.unwrap_or(false))
    .bind(bed.is_extra_bed.unwrap_or(false))
    .execute(pool)
    .await?;

    Ok(id)
}

/// Link a room to a catalog amenity
pub async fn insert_room_amenity(
    pool: &SqlitePool,
    scope: &PropertyScope,
    room_id: Uuid,
    amenity_id: Uuid,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        "INSERT INTO room_amenities (id, property_id, tenant_id, room_id, amenity_id) VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(room_id.to_string())
    .bind(amenity_id.to_string())
    .execute(pool)
    .await?;

    Ok(id)
}

pub async fn insert_pricing(
    pool: &SqlitePool,
    scope: &PropertyScope,
    room_id: Uuid,
    rates: &PricingRates,
) -> Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query(
        r#"
        INSERT INTO pricing (
            id, property_id, tenant_id, room_id, season_name, base_rate, discounted_rate,
            original_price, currency, valid_from, valid_to
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(id.to_string())
    .bind(scope.property_id.to_string())
    .bind(scope.tenant_id.to_string())
    .bind(room_id.to_string())
    .bind(&rates.season_name)
    .bind(rates.base_rate)
    .bind(rates.discounted_rate)
    .bind(rates.original_price)
    .bind(&rates.currency)
    .bind(rates.valid_from)
    .bind(rates.valid_to)
    .execute(pool)
    .await?;

    Ok(id)
}
