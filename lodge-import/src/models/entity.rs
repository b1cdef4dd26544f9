//! Entity kinds of the property record graph

use serde::{Deserialize, Serialize};

/// Every record type written by an import
///
/// Ordering follows the write order of an import run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Property,
    Room,
    BedConfiguration,
    RoomAmenity,
    Host,
    ReviewSource,
    ProximityInfo,
    NearbyAttraction,
    PropertyFeature,
    BookingSettings,
    SpecialOffer,
    RulesAndPolicy,
    SocialMediaLink,
    PaymentMethod,
    BookingCta,
    Pricing,
    PropertyAmenity,
    PropertyTag,
}

impl EntityKind {
    /// Human-readable label used in warning messages
    pub fn label(self) -> &'static str {
        match self {
            EntityKind::Property => "Property",
            EntityKind::Room => "Room",
            EntityKind::BedConfiguration => "Bed configuration",
            EntityKind::RoomAmenity => "Room amenity",
            EntityKind::Host => "Host",
            EntityKind::ReviewSource => "Review source",
            EntityKind::ProximityInfo => "Proximity info",
            EntityKind::NearbyAttraction => "Nearby attraction",
            EntityKind::PropertyFeature => "Property feature",
            EntityKind::BookingSettings => "Booking settings",
            EntityKind::SpecialOffer => "Special offer",
            EntityKind::RulesAndPolicy => "Rules and policy",
            EntityKind::SocialMediaLink => "Social media link",
            EntityKind::PaymentMethod => "Payment method",
            EntityKind::BookingCta => "Booking CTA",
            EntityKind::Pricing => "Pricing",
            EntityKind::PropertyAmenity => "Property amenity",
            EntityKind::PropertyTag => "Property tag",
        }
    }

    /// Table the kind is persisted in
    pub fn table_name(self) -> &'static str {
        match self {
            EntityKind::Property => "properties",
            EntityKind::Room => "rooms",
            EntityKind::BedConfiguration => "bed_configurations",
            EntityKind::RoomAmenity => "room_amenities",
            EntityKind::Host => "hosts",
            EntityKind::ReviewSource => "review_sources",
            EntityKind::ProximityInfo => "proximity_info",
            EntityKind::NearbyAttraction => "nearby_attractions",
            EntityKind::PropertyFeature => "property_features",
            EntityKind::BookingSettings => "booking_settings",
            EntityKind::SpecialOffer => "special_offers",
            EntityKind::RulesAndPolicy => "rules_and_policies",
            EntityKind::SocialMediaLink => "social_media_links",
            EntityKind::PaymentMethod => "payment_methods",
            EntityKind::BookingCta => "booking_ctas",
            EntityKind::Pricing => "pricing",
            EntityKind::PropertyAmenity => "property_amenities",
            EntityKind::PropertyTag => "property_tags",
        }
    }
}
