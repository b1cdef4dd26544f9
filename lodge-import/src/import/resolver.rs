//! Name-to-id resolution
//!
//! Documents reference rooms and catalog entries by name. All of those joins
//! happen here so the importer hands only ids to the store.
//!
//! Matching is exact and case-sensitive in both resolvers.

use lodge_common::Error;
use std::collections::HashMap;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::store::{Catalog, PropertyStore};

/// Room names created during the current run
///
/// Duplicate names: the later room replaces the earlier one.
#[derive(Debug, Default)]
pub struct RoomNameMap {
    rooms: HashMap<String, Uuid>,
}

impl RoomNameMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a created room; returns the id it replaced, if any
    pub fn insert(&mut self, name: &str, room_id: Uuid) -> Option<Uuid> {
        let previous = self.rooms.insert(name.to_string(), room_id);
        if let Some(previous_id) = previous {
            warn!(
                room = %name,
                previous_id = %previous_id,
                room_id = %room_id,
                "Duplicate room name in import, later room wins"
            );
        }
        previous
    }

    pub fn resolve(&self, name: &str) -> Option<Uuid> {
        self.rooms.get(name).copied()
    }
}

/// Outcome of one catalog lookup
#[derive(Debug)]
pub enum NameLookup {
    Found(Uuid),
    /// Not in the catalog (silently skipped by callers)
    Missing,
    /// The store could not answer
    Failed(Error),
}

/// Memoized catalog lookups for one import run
pub struct CatalogResolver<'a, S: PropertyStore + ?Sized> {
    store: &'a S,
    cache: HashMap<(Catalog, String), Option<Uuid>>,
}

impl<'a, S: PropertyStore + ?Sized> CatalogResolver<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self {
            store,
            cache: HashMap::new(),
        }
    }

    /// Resolve one name; store errors are not cached
    pub async fn resolve(&mut self, catalog: Catalog, name: &str) -> NameLookup {
        let key = (catalog, name.to_string());
        if let Some(cached) = self.cache.get(&key) {
            return match cached {
                Some(id) => NameLookup::Found(*id),
                None => NameLookup::Missing,
            };
        }

        match self.store.lookup_by_name(catalog, name).await {
            Ok(found) => {
                self.cache.insert(key, found);
                match found {
                    Some(id) => NameLookup::Found(id),
                    None => {
                        debug!(catalog = catalog.table_name(), name = %name, "Catalog name not found");
                        NameLookup::Missing
                    }
                }
            }
            Err(e) => NameLookup::Failed(e),
        }
    }

    /// Resolve every name in order
    pub async fn resolve_all<'n>(&mut self, catalog: Catalog, names: &'n [String]) -> Vec<(&'n str, NameLookup)> {
        let mut resolved = Vec::with_capacity(names.len());
        for name in names {
            let lookup = self.resolve(catalog, name).await;
            resolved.push((name.as_str(), lookup));
        }
        resolved
    }

    /// Number of distinct names looked up so far
    pub fn cached(&self) -> usize {
        self.cache.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteStore;
    use lodge_common::db::init_memory_database;

    #[test]
    fn test_room_name_map_last_write_wins() {
        let mut rooms = RoomNameMap::new();
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        assert_eq!(rooms.insert("Deluxe", first), None);
        assert_eq!(rooms.insert("Deluxe", second), Some(first));

        assert_eq!(rooms.resolve("Deluxe"), Some(second));
        assert_eq!(rooms.resolve("deluxe"), None);
    }

    #[tokio::test]
    async fn test_catalog_resolver_memoizes() {
        let store = SqliteStore::new(init_memory_database().await.unwrap());
        let mut resolver = CatalogResolver::new(&store);

        let names = vec!["WiFi".to_string(), "Jacuzzi".to_string(), "WiFi".to_string()];
        let resolved = resolver.resolve_all(Catalog::Amenity, &names).await;

        assert!(matches!(resolved[0], ("WiFi", NameLookup::Found(_))));
        assert!(matches!(resolved[1], ("Jacuzzi", NameLookup::Missing)));
        match (&resolved[0].1, &resolved[2].1) {
            (NameLookup::Found(a), NameLookup::Found(b)) => assert_eq!(a, b),
            other => panic!("Expected both lookups found, got {:?}", other),
        }
        assert_eq!(resolver.cached(), 2);
    }

    #[tokio::test]
    async fn test_catalogs_are_separate() {
        let store = SqliteStore::new(init_memory_database().await.unwrap());
        let mut resolver = CatalogResolver::new(&store);

        assert!(matches!(resolver.resolve(Catalog::Tag, "Luxury").await, NameLookup::Found(_)));
        assert!(matches!(resolver.resolve(Catalog::Amenity, "Luxury").await, NameLookup::Missing));
    }
}
