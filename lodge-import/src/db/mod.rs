//! SQLite persistence for imported properties

pub mod catalog;
pub mod channels;
pub mod details;
pub mod policies;
pub mod properties;
pub mod rooms;

use async_trait::async_trait;
use lodge_common::Result;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::PropertyInput;
use crate::store::{Catalog, NewRecord, PropertyScope, PropertyStore};

/// Production `PropertyStore` backed by a SQLite pool
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl PropertyStore for SqliteStore {
    async fn insert_property(&self, tenant_id: Uuid, property: &PropertyInput) -> Result<Uuid> {
        properties::insert_property(&self.pool, tenant_id, property).await
    }

    async fn insert(&self, scope: &PropertyScope, record: NewRecord<'_>) -> Result<Uuid> {
        let pool = &self.pool;
        match record {
            NewRecord::Room(room) => rooms::insert_room(pool, scope, room).await,
            NewRecord::BedConfiguration { room_id, bed } => {
                rooms::insert_bed_configuration(pool, scope, room_id, bed).await
            }
            NewRecord::RoomAmenity { room_id, amenity_id } => {
                rooms::insert_room_amenity(pool, scope, room_id, amenity_id).await
            }
            NewRecord::Pricing { room_id, rates } => rooms::insert_pricing(pool, scope, room_id, rates).await,
            NewRecord::Host(host) => details::insert_host(pool, scope, host).await,
            NewRecord::ReviewSource(source) => details::insert_review_source(pool, scope, source).await,
            NewRecord::ProximityInfo(info) => details::insert_proximity_info(pool, scope, info).await,
            NewRecord::NearbyAttraction(attraction) => {
                details::insert_nearby_attraction(pool, scope, attraction).await
            }
            NewRecord::PropertyFeature(feature) => details::insert_property_feature(pool, scope, feature).await,
            NewRecord::BookingSettings(settings) => {
                policies::insert_booking_settings(pool, scope, settings).await
            }
            NewRecord::SpecialOffer(offer) => policies::insert_special_offer(pool, scope, offer).await,
            NewRecord::RulesAndPolicy(rule) => policies::insert_rules_and_policy(pool, scope, rule).await,
            NewRecord::PaymentMethod(method) => policies::insert_payment_method(pool, scope, method).await,
            NewRecord::SocialMediaLink(link) => channels::insert_social_media_link(pool, scope, link).await,
            NewRecord::BookingCta(cta) => channels::insert_booking_cta(pool, scope, cta).await,
            NewRecord::PropertyAmenity { amenity_id } => {
                catalog::insert_property_amenity(pool, scope, amenity_id).await
            }
            NewRecord::PropertyTag { tag_id } => catalog::insert_property_tag(pool, scope, tag_id).await,
        }
    }

    async fn lookup_by_name(&self, list: Catalog, name: &str) -> Result<Option<Uuid>> {
        catalog::find_id_by_name(&self.pool, list, name).await
    }
}
