//! Table Schema Definitions
//!
//! Single source of truth for the property record graph. Each struct
//! defines the expected schema for one table; `ensure_all_tables` creates
//! them in foreign-key order.
//!
//! Cross-field invariants that are not structural (room capacity, stay
//! bounds, validity windows) are enforced here as CHECK constraints so a
//! violating row fails at write time.

use crate::db::schema_sync::{ColumnDefinition, SchemaSync, TableSchema};
use crate::Result;
use sqlx::SqlitePool;
use tracing::info;

/// `id`, `property_id`, `tenant_id` leading columns of every sub-entity table
fn property_owned_columns() -> Vec<ColumnDefinition> {
    vec![
        ColumnDefinition::new("id", "TEXT").primary_key(),
        ColumnDefinition::new("property_id", "TEXT")
            .not_null()
            .references("properties", "id"),
        ColumnDefinition::new("tenant_id", "TEXT").not_null(),
    ]
}

/// Same as `property_owned_columns` plus the owning room
fn room_owned_columns() -> Vec<ColumnDefinition> {
    let mut columns = property_owned_columns();
    columns.push(
        ColumnDefinition::new("room_id", "TEXT")
            .not_null()
            .references("rooms", "id"),
    );
    columns
}

fn created_at() -> ColumnDefinition {
    ColumnDefinition::new("created_at", "TIMESTAMP")
        .not_null()
        .default("CURRENT_TIMESTAMP")
}

fn with_created_at(mut columns: Vec<ColumnDefinition>) -> Vec<ColumnDefinition> {
    columns.push(created_at());
    columns
}

// ============================================================================
// Root
// ============================================================================

/// Properties table (root of the record graph)
pub struct PropertiesTableSchema;

impl TableSchema for PropertiesTableSchema {
    fn table_name() -> &'static str {
        "properties"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "TEXT").primary_key(),
            ColumnDefinition::new("tenant_id", "TEXT").not_null(),
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("slug", "TEXT").not_null().unique(),
            ColumnDefinition::new("property_type", "TEXT"),
            ColumnDefinition::new("tagline", "TEXT"),
            ColumnDefinition::new("description", "TEXT"),
            ColumnDefinition::new("classification", "TEXT"),
            // Address
            ColumnDefinition::new("address_line1", "TEXT"),
            ColumnDefinition::new("address_line2", "TEXT"),
            ColumnDefinition::new("city", "TEXT"),
            ColumnDefinition::new("state", "TEXT"),
            ColumnDefinition::new("country", "TEXT").not_null(),
            ColumnDefinition::new("postal_code", "TEXT"),
            ColumnDefinition::new("latitude", "REAL"),
            ColumnDefinition::new("longitude", "REAL"),
            // Contact
            ColumnDefinition::new("phone", "TEXT"),
            ColumnDefinition::new("email", "TEXT"),
            ColumnDefinition::new("website", "TEXT"),
            // Publication
            ColumnDefinition::new("is_active", "INTEGER").not_null().default("1"),
            ColumnDefinition::new("is_published", "INTEGER").not_null().default("0"),
            // SEO
            ColumnDefinition::new("meta_title", "TEXT"),
            ColumnDefinition::new("meta_description", "TEXT"),
            created_at(),
        ]
    }
}

// ============================================================================
// Catalog (tenant-independent)
// ============================================================================

/// Standard amenity catalog
pub struct StandardAmenitiesTableSchema;

impl TableSchema for StandardAmenitiesTableSchema {
    fn table_name() -> &'static str {
        "standard_amenities"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "TEXT").primary_key(),
            ColumnDefinition::new("name", "TEXT").not_null().unique(),
            ColumnDefinition::new("category", "TEXT"),
            created_at(),
        ]
    }
}

/// Standard tag catalog
pub struct StandardTagsTableSchema;

impl TableSchema for StandardTagsTableSchema {
    fn table_name() -> &'static str {
        "standard_tags"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "TEXT").primary_key(),
            ColumnDefinition::new("name", "TEXT").not_null().unique(),
            created_at(),
        ]
    }
}

// ============================================================================
// Rooms and room-owned records
// ============================================================================

/// Rooms table
pub struct RoomsTableSchema;

impl TableSchema for RoomsTableSchema {
    fn table_name() -> &'static str {
        "rooms"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("description", "TEXT"),
            ColumnDefinition::new("room_type", "TEXT"),
            ColumnDefinition::new("max_occupancy", "INTEGER"),
            ColumnDefinition::new("max_adults", "INTEGER"),
            ColumnDefinition::new("max_children", "INTEGER"),
            ColumnDefinition::new("size_sqm", "REAL"),
            ColumnDefinition::new("view_type", "TEXT"),
            // JSON array of free-text features
            ColumnDefinition::new("features", "TEXT").not_null().default("'[]'"),
            ColumnDefinition::new("base_rate", "REAL"),
            ColumnDefinition::new("currency", "TEXT"),
        ]);
        with_created_at(columns)
    }

    fn table_constraints() -> Vec<String> {
        vec![
            "CHECK (max_occupancy IS NULL OR max_adults IS NULL OR max_children IS NULL \
             OR max_adults + max_children <= max_occupancy)"
                .to_string(),
        ]
    }
}

/// Bed configurations (owned by a room)
pub struct BedConfigurationsTableSchema;

impl TableSchema for BedConfigurationsTableSchema {
    fn table_name() -> &'static str {
        "bed_configurations"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = room_owned_columns();
        columns.extend([
            ColumnDefinition::new("bed_type", "TEXT").not_null(),
            ColumnDefinition::new("bed_count", "INTEGER").not_null(),
            ColumnDefinition::new("is_sofa_bed", "INTEGER").not_null().default("0"),
            ColumnDefinition::new("is_extra_bed", "INTEGER").not_null().default("0"),
        ]);
        with_created_at(columns)
    }

    fn table_constraints() -> Vec<String> {
        vec!["CHECK (bed_count >= 1)".to_string()]
    }
}

/// Room ↔ standard amenity junction
pub struct RoomAmenitiesTableSchema;

impl TableSchema for RoomAmenitiesTableSchema {
    fn table_name() -> &'static str {
        "room_amenities"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = room_owned_columns();
        columns.push(
            ColumnDefinition::new("amenity_id", "TEXT")
                .not_null()
                .references("standard_amenities", "id"),
        );
        with_created_at(columns)
    }

    fn table_constraints() -> Vec<String> {
        vec!["UNIQUE (room_id, amenity_id)".to_string()]
    }
}

/// Room pricing records
pub struct PricingTableSchema;

impl TableSchema for PricingTableSchema {
    fn table_name() -> &'static str {
        "pricing"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = room_owned_columns();
        columns.extend([
            ColumnDefinition::new("season_name", "TEXT"),
            ColumnDefinition::new("base_rate", "REAL").not_null(),
            ColumnDefinition::new("discounted_rate", "REAL"),
            ColumnDefinition::new("original_price", "REAL"),
            ColumnDefinition::new("currency", "TEXT"),
            ColumnDefinition::new("valid_from", "TEXT"),
            ColumnDefinition::new("valid_to", "TEXT"),
        ]);
        with_created_at(columns)
    }

    fn table_constraints() -> Vec<String> {
        vec!["CHECK (valid_from IS NULL OR valid_to IS NULL OR valid_from <= valid_to)".to_string()]
    }
}

// ============================================================================
// Flat property-owned collections
// ============================================================================

/// Hosts table
pub struct HostsTableSchema;

impl TableSchema for HostsTableSchema {
    fn table_name() -> &'static str {
        "hosts"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("title", "TEXT"),
            ColumnDefinition::new("bio", "TEXT"),
            ColumnDefinition::new("email", "TEXT"),
            ColumnDefinition::new("phone", "TEXT"),
            ColumnDefinition::new("languages", "TEXT").not_null().default("'[]'"),
            ColumnDefinition::new("is_superhost", "INTEGER").not_null().default("0"),
        ]);
        with_created_at(columns)
    }
}

/// External review sources (aggregated ratings)
pub struct ReviewSourcesTableSchema;

impl TableSchema for ReviewSourcesTableSchema {
    fn table_name() -> &'static str {
        "review_sources"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("source_name", "TEXT").not_null(),
            ColumnDefinition::new("rating", "REAL"),
            ColumnDefinition::new("review_count", "INTEGER"),
            ColumnDefinition::new("url", "TEXT"),
        ]);
        with_created_at(columns)
    }
}

/// Distances to points of interest
pub struct ProximityInfoTableSchema;

impl TableSchema for ProximityInfoTableSchema {
    fn table_name() -> &'static str {
        "proximity_info"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("place_name", "TEXT").not_null(),
            ColumnDefinition::new("category", "TEXT"),
            ColumnDefinition::new("distance_km", "REAL"),
            ColumnDefinition::new("travel_time_minutes", "INTEGER"),
        ]);
        with_created_at(columns)
    }
}

/// Nearby attractions
pub struct NearbyAttractionsTableSchema;

impl TableSchema for NearbyAttractionsTableSchema {
    fn table_name() -> &'static str {
        "nearby_attractions"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("name", "TEXT").not_null(),
            ColumnDefinition::new("description", "TEXT"),
            ColumnDefinition::new("category", "TEXT"),
            ColumnDefinition::new("distance_km", "REAL"),
        ]);
        with_created_at(columns)
    }
}

/// Highlighted property features
pub struct PropertyFeaturesTableSchema;

impl TableSchema for PropertyFeaturesTableSchema {
    fn table_name() -> &'static str {
        "property_features"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("title", "TEXT").not_null(),
            ColumnDefinition::new("description", "TEXT"),
            ColumnDefinition::new("icon", "TEXT"),
        ]);
        with_created_at(columns)
    }
}

/// Booking settings (at most one row per property)
pub struct BookingSettingsTableSchema;

impl TableSchema for BookingSettingsTableSchema {
    fn table_name() -> &'static str {
        "booking_settings"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        vec![
            ColumnDefinition::new("id", "TEXT").primary_key(),
            ColumnDefinition::new("property_id", "TEXT")
                .not_null()
                .unique()
                .references("properties", "id"),
            ColumnDefinition::new("tenant_id", "TEXT").not_null(),
            ColumnDefinition::new("check_in_time", "TEXT"),
            ColumnDefinition::new("check_out_time", "TEXT"),
            ColumnDefinition::new("min_stay_nights", "INTEGER"),
            ColumnDefinition::new("max_stay_nights", "INTEGER"),
            ColumnDefinition::new("advance_booking_days", "INTEGER"),
            // Cancellation tiers
            ColumnDefinition::new("free_cancellation_days", "INTEGER"),
            ColumnDefinition::new("partial_refund_days", "INTEGER"),
            ColumnDefinition::new("partial_refund_percent", "REAL"),
            // Deposit terms
            ColumnDefinition::new("deposit_required", "INTEGER").not_null().default("0"),
            ColumnDefinition::new("deposit_percent", "REAL"),
            ColumnDefinition::new("instant_booking", "INTEGER").not_null().default("0"),
            created_at(),
        ]
    }

    fn table_constraints() -> Vec<String> {
        vec![
            "CHECK (min_stay_nights IS NULL OR max_stay_nights IS NULL \
             OR min_stay_nights <= max_stay_nights)"
                .to_string(),
        ]
    }
}

/// Special offers
pub struct SpecialOffersTableSchema;

impl TableSchema for SpecialOffersTableSchema {
    fn table_name() -> &'static str {
        "special_offers"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("title", "TEXT").not_null(),
            ColumnDefinition::new("description", "TEXT"),
            ColumnDefinition::new("discount_percent", "REAL"),
            ColumnDefinition::new("promo_code", "TEXT"),
            ColumnDefinition::new("valid_from", "TEXT"),
            ColumnDefinition::new("valid_to", "TEXT"),
            ColumnDefinition::new("is_active", "INTEGER").not_null().default("1"),
        ]);
        with_created_at(columns)
    }

    fn table_constraints() -> Vec<String> {
        vec!["CHECK (valid_from IS NULL OR valid_to IS NULL OR valid_from <= valid_to)".to_string()]
    }
}

/// House rules and policies
pub struct RulesAndPoliciesTableSchema;

impl TableSchema for RulesAndPoliciesTableSchema {
    fn table_name() -> &'static str {
        "rules_and_policies"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("title", "TEXT").not_null(),
            ColumnDefinition::new("description", "TEXT"),
            ColumnDefinition::new("category", "TEXT"),
        ]);
        with_created_at(columns)
    }
}

/// Social media links
pub struct SocialMediaLinksTableSchema;

impl TableSchema for SocialMediaLinksTableSchema {
    fn table_name() -> &'static str {
        "social_media_links"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("platform", "TEXT").not_null(),
            ColumnDefinition::new("url", "TEXT").not_null(),
        ]);
        with_created_at(columns)
    }
}

/// Accepted payment methods
pub struct PaymentMethodsTableSchema;

impl TableSchema for PaymentMethodsTableSchema {
    fn table_name() -> &'static str {
        "payment_methods"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("method_name", "TEXT").not_null(),
            ColumnDefinition::new("description", "TEXT"),
        ]);
        with_created_at(columns)
    }
}

/// Booking calls-to-action
pub struct BookingCtasTableSchema;

impl TableSchema for BookingCtasTableSchema {
    fn table_name() -> &'static str {
        "booking_ctas"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.extend([
            ColumnDefinition::new("label", "TEXT").not_null(),
            ColumnDefinition::new("url", "TEXT"),
            ColumnDefinition::new("cta_type", "TEXT"),
            ColumnDefinition::new("is_primary", "INTEGER").not_null().default("0"),
        ]);
        with_created_at(columns)
    }
}

// ============================================================================
// Property ↔ catalog junctions
// ============================================================================

/// Property ↔ standard amenity junction
pub struct PropertyAmenitiesTableSchema;

impl TableSchema for PropertyAmenitiesTableSchema {
    fn table_name() -> &'static str {
        "property_amenities"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.push(
            ColumnDefinition::new("amenity_id", "TEXT")
                .not_null()
                .references("standard_amenities", "id"),
        );
        with_created_at(columns)
    }

    fn table_constraints() -> Vec<String> {
        vec!["UNIQUE (property_id, amenity_id)".to_string()]
    }
}

/// Property ↔ standard tag junction
pub struct PropertyTagsTableSchema;

impl TableSchema for PropertyTagsTableSchema {
    fn table_name() -> &'static str {
        "property_tags"
    }

    fn expected_columns() -> Vec<ColumnDefinition> {
        let mut columns = property_owned_columns();
        columns.push(
            ColumnDefinition::new("tag_id", "TEXT")
                .not_null()
                .references("standard_tags", "id"),
        );
        with_created_at(columns)
    }

    fn table_constraints() -> Vec<String> {
        vec!["UNIQUE (property_id, tag_id)".to_string()]
    }
}

/// Create every table (parents before children) and sync missing columns
pub async fn ensure_all_tables(pool: &SqlitePool) -> Result<()> {
    info!("Ensuring property schema");

    SchemaSync::ensure_table::<PropertiesTableSchema>(pool).await?;
    SchemaSync::ensure_table::<StandardAmenitiesTableSchema>(pool).await?;
    SchemaSync::ensure_table::<StandardTagsTableSchema>(pool).await?;

    SchemaSync::ensure_table::<RoomsTableSchema>(pool).await?;
    SchemaSync::ensure_table::<BedConfigurationsTableSchema>(pool).await?;
    SchemaSync::ensure_table::<RoomAmenitiesTableSchema>(pool).await?;
    SchemaSync::ensure_table::<PricingTableSchema>(pool).await?;

    SchemaSync::ensure_table::<HostsTableSchema>(pool).await?;
    SchemaSync::ensure_table::<ReviewSourcesTableSchema>(pool).await?;
    SchemaSync::ensure_table::<ProximityInfoTableSchema>(pool).await?;
    SchemaSync::ensure_table::<NearbyAttractionsTableSchema>(pool).await?;
    SchemaSync::ensure_table::<PropertyFeaturesTableSchema>(pool).await?;
    SchemaSync::ensure_table::<BookingSettingsTableSchema>(pool).await?;
    SchemaSync::ensure_table::<SpecialOffersTableSchema>(pool).await?;
    SchemaSync::ensure_table::<RulesAndPoliciesTableSchema>(pool).await?;
    SchemaSync::ensure_table::<SocialMediaLinksTableSchema>(pool).await?;
    SchemaSync::ensure_table::<PaymentMethodsTableSchema>(pool).await?;
    SchemaSync::ensure_table::<BookingCtasTableSchema>(pool).await?;

    SchemaSync::ensure_table::<PropertyAmenitiesTableSchema>(pool).await?;
    SchemaSync::ensure_table::<PropertyTagsTableSchema>(pool).await?;

    info!("Property schema ready");
    Ok(())
}
