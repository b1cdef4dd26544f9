//! Persistence seam used by the import pipeline
//!
//! The pipeline only creates rows and looks up catalog names. `SqliteStore`
//! (in `db`) is the production implementation; tests may supply their own.

use async_trait::async_trait;
use lodge_common::Result;
use uuid::Uuid;

use crate::models::{
    BedConfigurationInput, BookingCtaInput, BookingSettingsInput, EntityKind, HostInput,
    NearbyAttractionInput, PaymentMethodInput, PricingRates, PropertyFeatureInput, PropertyInput,
    ProximityInfoInput, ReviewSourceInput, RoomInput, RulesAndPolicyInput, SocialMediaLinkInput,
    SpecialOfferInput,
};

/// Owner of every sub-entity written during one import
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyScope {
    pub tenant_id: Uuid,
    pub property_id: Uuid,
}

/// Tenant-independent reference lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Catalog {
    Amenity,
    Tag,
}

impl Catalog {
    pub fn table_name(self) -> &'static str {
        match self {
            Catalog::Amenity => "standard_amenities",
            Catalog::Tag => "standard_tags",
        }
    }
}

/// A sub-entity row ready to be written
///
/// Every cross-record reference is an id; names have been resolved before
/// a record is built.
#[derive(Debug, Clone, Copy)]
pub enum NewRecord<'a> {
    Room(&'a RoomInput),
    BedConfiguration { room_id: Uuid, bed: &'a BedConfigurationInput },
    RoomAmenity { room_id: Uuid, amenity_id: Uuid },
    Host(&'a HostInput),
    ReviewSource(&'a ReviewSourceInput),
    ProximityInfo(&'a ProximityInfoInput),
    NearbyAttraction(&'a NearbyAttractionInput),
    PropertyFeature(&'a PropertyFeatureInput),
    BookingSettings(&'a BookingSettingsInput),
    SpecialOffer(&'a SpecialOfferInput),
    RulesAndPolicy(&'a RulesAndPolicyInput),
    SocialMediaLink(&'a SocialMediaLinkInput),
    PaymentMethod(&'a PaymentMethodInput),
    BookingCta(&'a BookingCtaInput),
    Pricing { room_id: Uuid, rates: &'a PricingRates },
    PropertyAmenity { amenity_id: Uuid },
    PropertyTag { tag_id: Uuid },
}

impl NewRecord<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            NewRecord::Room(_) => EntityKind::Room,
            NewRecord::BedConfiguration { .. } => EntityKind::BedConfiguration,
            NewRecord::RoomAmenity { .. } => EntityKind::RoomAmenity,
            NewRecord::Host(_) => EntityKind::Host,
            NewRecord::ReviewSource(_) => EntityKind::ReviewSource,
            NewRecord::ProximityInfo(_) => EntityKind::ProximityInfo,
            NewRecord::NearbyAttraction(_) => EntityKind::NearbyAttraction,
            NewRecord::PropertyFeature(_) => EntityKind::PropertyFeature,
            NewRecord::BookingSettings(_) => EntityKind::BookingSettings,
            NewRecord::SpecialOffer(_) => EntityKind::SpecialOffer,
            NewRecord::RulesAndPolicy(_) => EntityKind::RulesAndPolicy,
            NewRecord::SocialMediaLink(_) => EntityKind::SocialMediaLink,
            NewRecord::PaymentMethod(_) => EntityKind::PaymentMethod,
            NewRecord::BookingCta(_) => EntityKind::BookingCta,
            NewRecord::Pricing { .. } => EntityKind::Pricing,
            NewRecord::PropertyAmenity { .. } => EntityKind::PropertyAmenity,
            NewRecord::PropertyTag { .. } => EntityKind::PropertyTag,
        }
    }
}

/// Create/lookup operations the import pipeline needs from storage
#[async_trait]
pub trait PropertyStore: Send + Sync {
    /// Write the root property row and return its new id
    async fn insert_property(&self, tenant_id: Uuid, property: &PropertyInput) -> Result<Uuid>;

    /// Write one sub-entity row owned by `scope` and return its new id
    async fn insert(&self, scope: &PropertyScope, record: NewRecord<'_>) -> Result<Uuid>;

    /// Exact, case-sensitive catalog lookup; `Ok(None)` when the name is absent
    async fn lookup_by_name(&self, catalog: Catalog, name: &str) -> Result<Option<Uuid>>;
}
