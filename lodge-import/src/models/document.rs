//! Typed import document
//!
//! These types are only ever built from a `serde_json::Value` that already
//! passed `SchemaValidator`, so required fields are plain values and every
//! optional field is an `Option`. Unknown fields are ignored.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Complete import document: one property plus its sub-records
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportDocument {
    pub property: PropertyInput,
    #[serde(default)]
    pub rooms: Vec<RoomInput>,
    #[serde(default)]
    pub hosts: Vec<HostInput>,
    #[serde(default)]
    pub review_sources: Vec<ReviewSourceInput>,
    #[serde(default)]
    pub proximity_info: Vec<ProximityInfoInput>,
    #[serde(default)]
    pub nearby_attractions: Vec<NearbyAttractionInput>,
    #[serde(default)]
    pub property_features: Vec<PropertyFeatureInput>,
    #[serde(default)]
    pub booking_settings: Option<BookingSettingsInput>,
    #[serde(default)]
    pub special_offers: Vec<SpecialOfferInput>,
    #[serde(default)]
    pub rules_and_policies: Vec<RulesAndPolicyInput>,
    #[serde(default)]
    pub pricing: Vec<PricingInput>,
    #[serde(default)]
    pub social_media_links: Vec<SocialMediaLinkInput>,
    #[serde(default)]
    pub payment_methods: Vec<PaymentMethodInput>,
    #[serde(default)]
    pub booking_ctas: Vec<BookingCtaInput>,
    /// Amenity names, resolved against the standard catalog
    #[serde(default)]
    pub property_amenities: Vec<String>,
    /// Tag names, resolved against the standard catalog
    #[serde(default)]
    pub property_tags: Vec<String>,
}

/// Root property fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyInput {
    pub name: String,
    pub country: String,
    /// Supplied, or generated from `name` during validation
    pub slug: String,
    #[serde(rename = "type")]
    pub property_type: Option<String>,
    pub tagline: Option<String>,
    pub description: Option<String>,
    pub classification: Option<String>,
    pub address_line1: Option<String>,
    pub address_line2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub postal_code: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub website: Option<String>,
    pub is_active: Option<bool>,
    pub is_published: Option<bool>,
    pub meta_title: Option<String>,
    pub meta_description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomInput {
    pub name: String,
    pub description: Option<String>,
    pub room_type: Option<String>,
    pub max_occupancy: Option<i64>,
    pub max_adults: Option<i64>,
    pub max_children: Option<i64>,
    pub size_sqm: Option<f64>,
    pub view_type: Option<String>,
    #[serde(default)]
    pub features: Vec<String>,
    pub base_rate: Option<f64>,
    pub currency: Option<String>,
    #[serde(default)]
    pub bed_configurations: Vec<BedConfigurationInput>,
    /// Amenity names, resolved against the standard catalog
    #[serde(default)]
    pub room_amenities: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BedConfigurationInput {
    pub bed_type: String,
    pub bed_count: i64,
    pub is_sofa_bed: Option<bool>,
    pub is_extra_bed: Option<bool>,
}

/// Pricing entry as it appears in the document
///
/// The room is referenced by name; the importer resolves it and hands only
/// the `rates` part to the store.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingInput {
    pub room_name: String,
    #[serde(flatten)]
    pub rates: PricingRates,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PricingRates {
    pub season_name: Option<String>,
    pub base_rate: f64,
    pub discounted_rate: Option<f64>,
    pub original_price: Option<f64>,
    pub currency: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HostInput {
    pub name: String,
    pub title: Option<String>,
    pub bio: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    pub is_superhost: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewSourceInput {
    pub source_name: String,
    pub rating: Option<f64>,
    pub review_count: Option<i64>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProximityInfoInput {
    pub place_name: String,
    pub category: Option<String>,
    pub distance_km: Option<f64>,
    pub travel_time_minutes: Option<i64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NearbyAttractionInput {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    pub distance_km: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PropertyFeatureInput {
    pub title: String,
    pub description: Option<String>,
    pub icon: Option<String>,
}

/// Check-in/out, stay bounds, cancellation tiers and deposit terms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingSettingsInput {
    /// `HH:MM`
    pub check_in_time: Option<String>,
    /// `HH:MM`
    pub check_out_time: Option<String>,
    pub min_stay_nights: Option<i64>,
    pub max_stay_nights: Option<i64>,
    pub advance_booking_days: Option<i64>,
    pub free_cancellation_days: Option<i64>,
    pub partial_refund_days: Option<i64>,
    pub partial_refund_percent: Option<f64>,
    pub deposit_required: Option<bool>,
    pub deposit_percent: Option<f64>,
    pub instant_booking: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialOfferInput {
    pub title: String,
    pub description: Option<String>,
    pub discount_percent: Option<f64>,
    pub promo_code: Option<String>,
    pub valid_from: Option<NaiveDate>,
    pub valid_to: Option<NaiveDate>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulesAndPolicyInput {
    pub title: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SocialMediaLinkInput {
    pub platform: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentMethodInput {
    pub method_name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingCtaInput {
    pub label: String,
    pub url: Option<String>,
    pub cta_type: Option<String>,
    pub is_primary: Option<bool>,
}
