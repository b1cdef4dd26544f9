//! Dependency-ordered sub-entity import
//!
//! Writes everything owned by an already-created property, parents before
//! children:
//!
//! 1. Rooms, each followed by its bed configurations and room amenities
//! 2. Flat collections (hosts through booking CTAs)
//! 3. Pricing, resolved against the rooms created in step 1
//! 4. Property amenities, then property tags
//!
//! # Error Handling
//! - Every item is written independently; a failure is recorded and the run continues
//! - A failed room skips its nested records (there is no id to attach them to)
//! - Catalog names that do not resolve are skipped without a failure entry
//! - Nothing is rolled back: a run may leave a partially populated property

use tracing::{debug, info};
use uuid::Uuid;

use super::resolver::{CatalogResolver, NameLookup, RoomNameMap};
use super::statistics::ImportStatistics;
use crate::models::{EntityKind, ImportDocument, PricingInput, RoomInput};
use crate::store::{Catalog, NewRecord, PropertyScope, PropertyStore};

/// Identifier used in failure messages for the single booking settings record
const BOOKING_SETTINGS_IDENTIFIER: &str = "booking_settings";

/// Reason recorded for pricing rows whose room name did not resolve
const ROOM_NOT_FOUND: &str = "room not found in this import";

pub struct DependencyOrderedImporter<'a, S: PropertyStore + ?Sized> {
    store: &'a S,
    scope: PropertyScope,
}

impl<'a, S: PropertyStore + ?Sized> DependencyOrderedImporter<'a, S> {
    pub fn new(store: &'a S, scope: PropertyScope) -> Self {
        Self { store, scope }
    }

    /// Write every sub-entity of `document`; never fails as a whole
    pub async fn run(&self, document: &ImportDocument) -> ImportStatistics {
        info!(property_id = %self.scope.property_id, "Importing property sub-entities");

        let mut catalog = CatalogResolver::new(self.store);

        let (mut stats, rooms) = self.import_rooms(&document.rooms, &mut catalog).await;
        stats.merge(self.import_collections(document).await);
        stats.merge(self.import_pricing(&document.pricing, &rooms).await);
        stats.merge(self.import_catalog_links(document, &mut catalog).await);

        info!(
            property_id = %self.scope.property_id,
            failures = stats.failure_count(),
            "Sub-entity import finished"
        );
        stats
    }

    /// Step 1: rooms with their nested records
    async fn import_rooms(
        &self,
        rooms: &[RoomInput],
        catalog: &mut CatalogResolver<'a, S>,
    ) -> (ImportStatistics, RoomNameMap) {
        let mut stats = ImportStatistics::new();
        let mut room_names = RoomNameMap::new();

        for room in rooms {
            let Some(room_id) = self.write(NewRecord::Room(room), &room.name, &mut stats).await else {
                continue;
            };
            room_names.insert(&room.name, room_id);

            for bed in &room.bed_configurations {
                self.write(NewRecord::BedConfiguration { room_id, bed }, &bed.bed_type, &mut stats)
                    .await;
            }

            for (name, lookup) in catalog.resolve_all(Catalog::Amenity, &room.room_amenities).await {
                self.link(lookup, EntityKind::RoomAmenity, name, &mut stats, |amenity_id| {
                    NewRecord::RoomAmenity { room_id, amenity_id }
                })
                .await;
            }
        }

        (stats, room_names)
    }

    /// Step 2: property-owned collections without cross references
    async fn import_collections(&self, document: &ImportDocument) -> ImportStatistics {
        let mut stats = ImportStatistics::new();

        for host in &document.hosts {
            self.write(NewRecord::Host(host), &host.name, &mut stats).await;
        }
        for source in &document.review_sources {
            self.write(NewRecord::ReviewSource(source), &source.source_name, &mut stats)
                .await;
        }
        for info in &document.proximity_info {
            self.write(NewRecord::ProximityInfo(info), &info.place_name, &mut stats)
                .await;
        }
        for attraction in &document.nearby_attractions {
            self.write(NewRecord::NearbyAttraction(attraction), &attraction.name, &mut stats)
                .await;
        }
        for feature in &document.property_features {
            self.write(NewRecord::PropertyFeature(feature), &feature.title, &mut stats)
                .await;
        }
        if let Some(settings) = &document.booking_settings {
            self.write(
                NewRecord::BookingSettings(settings),
                BOOKING_SETTINGS_IDENTIFIER,
                &mut stats,
            )
            .await;
        }
        for offer in &document.special_offers {
            self.write(NewRecord::SpecialOffer(offer), &offer.title, &mut stats).await;
        }
        for rule in &document.rules_and_policies {
            self.write(NewRecord::RulesAndPolicy(rule), &rule.title, &mut stats).await;
        }
        for link in &document.social_media_links {
            self.write(NewRecord::SocialMediaLink(link), &link.platform, &mut stats)
                .await;
        }
        for method in &document.payment_methods {
            self.write(NewRecord::PaymentMethod(method), &method.method_name, &mut stats)
                .await;
        }
        for cta in &document.booking_ctas {
            self.write(NewRecord::BookingCta(cta), &cta.label, &mut stats).await;
        }

        stats
    }

    /// Step 3: pricing, room names resolved before the write
    async fn import_pricing(&self, pricing: &[PricingInput], rooms: &RoomNameMap) -> ImportStatistics {
        let mut stats = ImportStatistics::new();

        for entry in pricing {
            match rooms.resolve(&entry.room_name) {
                Some(room_id) => {
                    self.write(
                        NewRecord::Pricing {
                            room_id,
                            rates: &entry.rates,
                        },
                        &entry.room_name,
                        &mut stats,
                    )
                    .await;
                }
                None => stats.record_failure_message(EntityKind::Pricing, &entry.room_name, ROOM_NOT_FOUND),
            }
        }

        stats
    }

    /// Step 4: property ↔ catalog junctions
    async fn import_catalog_links(
        &self,
        document: &ImportDocument,
        catalog: &mut CatalogResolver<'a, S>,
    ) -> ImportStatistics {
        let mut stats = ImportStatistics::new();

        for (name, lookup) in catalog.resolve_all(Catalog::Amenity, &document.property_amenities).await {
            self.link(lookup, EntityKind::PropertyAmenity, name, &mut stats, |amenity_id| {
                NewRecord::PropertyAmenity { amenity_id }
            })
            .await;
        }

        for (name, lookup) in catalog.resolve_all(Catalog::Tag, &document.property_tags).await {
            self.link(lookup, EntityKind::PropertyTag, name, &mut stats, |tag_id| {
                NewRecord::PropertyTag { tag_id }
            })
            .await;
        }

        stats
    }

    /// Write one record; on failure record it under `identifier`
    async fn write(
        &self,
        record: NewRecord<'_>,
        identifier: &str,
        stats: &mut ImportStatistics,
    ) -> Option<Uuid> {
        let kind = record.kind();
        match self.store.insert(&self.scope, record).await {
            Ok(id) => {
                debug!(entity = kind.table_name(), id = %id, "Created {} \"{}\"", kind.label(), identifier);
                stats.record_created(kind);
                Some(id)
            }
            Err(e) => {
                stats.record_failure(kind, identifier, &e);
                None
            }
        }
    }

    /// Write a catalog junction for a resolved name
    async fn link<F>(
        &self,
        lookup: NameLookup,
        kind: EntityKind,
        name: &str,
        stats: &mut ImportStatistics,
        record: F,
    ) where
        F: FnOnce(Uuid) -> NewRecord<'static> + Send,
    {
        match lookup {
            NameLookup::Found(id) => {
                self.write(record(id), name, stats).await;
            }
            NameLookup::Missing => stats.record_skipped(kind),
            NameLookup::Failed(e) => stats.record_failure(kind, name, &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lodge_common::{Error, Result};
    use std::sync::Mutex;

    use crate::models::{BedConfigurationInput, HostInput, PricingRates, PropertyInput};

    /// Records writes in order; rejects rooms named "broken"
    #[derive(Default)]
    struct RecordingStore {
        writes: Mutex<Vec<(EntityKind, Uuid)>>,
        pricing_rooms: Mutex<Vec<Uuid>>,
    }

    #[async_trait]
    impl PropertyStore for RecordingStore {
        async fn insert_property(&self, _tenant_id: Uuid, _property: &PropertyInput) -> Result<Uuid> {
            Ok(Uuid::new_v4())
        }

        async fn insert(&self, _scope: &PropertyScope, record: NewRecord<'_>) -> Result<Uuid> {
            match record {
                NewRecord::Room(room) if room.name == "broken" => {
                    return Err(Error::Internal("room rejected".to_string()))
                }
                NewRecord::Pricing { room_id, .. } => self.pricing_rooms.lock().unwrap().push(room_id),
                _ => {}
            }
            let id = Uuid::new_v4();
            self.writes.lock().unwrap().push((record.kind(), id));
            Ok(id)
        }

        async fn lookup_by_name(&self, catalog: Catalog, name: &str) -> Result<Option<Uuid>> {
            Ok(match (catalog, name) {
                (Catalog::Amenity, "WiFi") | (Catalog::Tag, "Luxury") => Some(Uuid::new_v4()),
                _ => None,
            })
        }
    }

    fn scope() -> PropertyScope {
        PropertyScope {
            tenant_id: Uuid::new_v4(),
            property_id: Uuid::new_v4(),
        }
    }

    fn room(name: &str) -> RoomInput {
        RoomInput {
            name: name.to_string(),
            bed_configurations: vec![BedConfigurationInput {
                bed_type: "King".to_string(),
                bed_count: 1,
                ..Default::default()
            }],
            room_amenities: vec!["WiFi".to_string(), "Hot Tub".to_string()],
            ..Default::default()
        }
    }

    fn pricing(room_name: &str) -> PricingInput {
        PricingInput {
            room_name: room_name.to_string(),
            rates: PricingRates {
                base_rate: 100.0,
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_write_order_follows_dependencies() {
        let store = RecordingStore::default();
        let document = ImportDocument {
            rooms: vec![room("Deluxe")],
            hosts: vec![HostInput {
                name: "Asha".to_string(),
                ..Default::default()
            }],
            pricing: vec![pricing("Deluxe")],
            property_amenities: vec!["WiFi".to_string()],
            property_tags: vec!["Luxury".to_string()],
            ..Default::default()
        };

        let stats = DependencyOrderedImporter::new(&store, scope()).run(&document).await;

        let kinds: Vec<EntityKind> = store.writes.lock().unwrap().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            kinds,
            vec![
                EntityKind::Room,
                EntityKind::BedConfiguration,
                EntityKind::RoomAmenity,
                EntityKind::Host,
                EntityKind::Pricing,
                EntityKind::PropertyAmenity,
                EntityKind::PropertyTag,
            ]
        );
        assert_eq!(stats.skipped(EntityKind::RoomAmenity), 1);
        assert_eq!(stats.failure_count(), 0);
    }

    #[tokio::test]
    async fn test_failed_room_skips_nested_and_pricing() {
        let store = RecordingStore::default();
        let document = ImportDocument {
            rooms: vec![room("broken"), room("Deluxe")],
            pricing: vec![pricing("broken")],
            ..Default::default()
        };

        let stats = DependencyOrderedImporter::new(&store, scope()).run(&document).await;

        assert_eq!(stats.created(EntityKind::Room), 1);
        assert_eq!(stats.created(EntityKind::BedConfiguration), 1);
        let messages: Vec<&str> = stats.failures().iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec![
                "Room \"broken\": Invalid input: room rejected",
                "Pricing \"broken\": room not found in this import",
            ]
        );
    }

    #[tokio::test]
    async fn test_pricing_uses_last_room_with_name() {
        let store = RecordingStore::default();
        let document = ImportDocument {
            rooms: vec![room("Twin"), room("Twin")],
            pricing: vec![pricing("Twin")],
            ..Default::default()
        };

        DependencyOrderedImporter::new(&store, scope()).run(&document).await;

        let room_ids: Vec<Uuid> = store
            .writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(k, _)| *k == EntityKind::Room)
            .map(|(_, id)| *id)
            .collect();
        assert_eq!(room_ids.len(), 2);
        assert_eq!(*store.pricing_rooms.lock().unwrap(), vec![room_ids[1]]);
    }
}
