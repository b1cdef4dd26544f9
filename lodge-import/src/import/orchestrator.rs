//! Property import orchestration
//!
//! Validate → insert the property → import sub-entities → summarize → notify.
//! Only the first two stages can fail the import; nothing is written when
//! they do.

use chrono::Utc;
use lodge_common::events::{EventBus, LodgeEvent};
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use super::importer::DependencyOrderedImporter;
use super::schema::{SchemaValidator, ValidationIssue};
use super::statistics::ImportStatistics;
use crate::models::{EntityKind, ImportResult};
use crate::store::{PropertyScope, PropertyStore};

/// Warning lines listed in a summary unless configured otherwise
pub const DEFAULT_MAX_LISTED_WARNINGS: usize = 5;

/// Failures that abort an import before any sub-entity is written
#[derive(Debug, Error)]
pub enum ImportError {
    /// The document did not match the import schema
    #[error("Validation failed")]
    Validation(Vec<ValidationIssue>),

    /// The property row itself could not be written (e.g. duplicate slug)
    #[error("{}", .0.store_message())]
    RootInsert(lodge_common::Error),
}

impl ImportError {
    /// Detail line reported alongside the error, if any
    pub fn message(&self) -> Option<String> {
        match self {
            ImportError::Validation(issues) => Some(
                issues
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("; "),
            ),
            ImportError::RootInsert(_) => None,
        }
    }

    pub fn to_result(&self) -> ImportResult {
        ImportResult::failed(self.to_string(), self.message())
    }
}

/// A completed import
#[derive(Debug, Clone)]
pub struct ImportOutcome {
    pub property_id: Uuid,
    pub property_name: String,
    pub statistics: ImportStatistics,
    /// Summary text returned to the caller
    pub message: String,
}

/// Entry point of the import pipeline
pub struct PropertyImporter<S: PropertyStore> {
    store: S,
    validator: SchemaValidator,
    event_bus: Option<EventBus>,
    max_listed_warnings: usize,
}

impl<S: PropertyStore> PropertyImporter<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            validator: SchemaValidator::new(),
            event_bus: None,
            max_listed_warnings: DEFAULT_MAX_LISTED_WARNINGS,
        }
    }

    /// Publish import events on `event_bus`
    pub fn with_event_bus(mut self, event_bus: EventBus) -> Self {
        self.event_bus = Some(event_bus);
        self
    }

    pub fn with_max_listed_warnings(mut self, max_listed_warnings: usize) -> Self {
        self.max_listed_warnings = max_listed_warnings;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Import one raw document for `tenant_id`
    ///
    /// `raw` is taken as bytes so that input which is not UTF-8 still ends
    /// in a validation failure. Always returns a definite outcome; see
    /// `ImportResult`.
    pub async fn import(&self, tenant_id: Uuid, raw: impl AsRef<[u8]>) -> ImportResult {
        match self.try_import(tenant_id, raw).await {
            Ok(outcome) => ImportResult::imported(outcome.property_id, outcome.message),
            Err(e) => e.to_result(),
        }
    }

    /// Same as `import`, keeping the typed outcome
    pub async fn try_import(&self, tenant_id: Uuid, raw: impl AsRef<[u8]>) -> Result<ImportOutcome, ImportError> {
        let result = self.run(tenant_id, raw.as_ref()).await;

        match &result {
            Ok(outcome) => {
                info!(
                    tenant_id = %tenant_id,
                    property_id = %outcome.property_id,
                    warnings = outcome.statistics.failure_count(),
                    "Imported property \"{}\"",
                    outcome.property_name
                );
                self.emit(LodgeEvent::PropertyImported {
                    tenant_id,
                    property_id: outcome.property_id,
                    property_name: outcome.property_name.clone(),
                    created: outcome.statistics.created_by_table(),
                    warning_count: outcome.statistics.failure_count(),
                    timestamp: Utc::now(),
                });
                self.emit(LodgeEvent::PropertyListingInvalidated {
                    tenant_id,
                    property_id: outcome.property_id,
                    timestamp: Utc::now(),
                });
            }
            Err(e) => {
                match e {
                    ImportError::Validation(issues) => {
                        warn!(tenant_id = %tenant_id, issues = issues.len(), "Import rejected: validation failed")
                    }
                    ImportError::RootInsert(_) => {
                        error!(tenant_id = %tenant_id, "Import failed: property insert: {}", e)
                    }
                }
                self.emit(LodgeEvent::PropertyImportFailed {
                    tenant_id,
                    error: e.to_string(),
                    timestamp: Utc::now(),
                });
            }
        }

        result
    }

    async fn run(&self, tenant_id: Uuid, raw: &[u8]) -> Result<ImportOutcome, ImportError> {
        let document = self
            .validator
            .validate_document(raw)
            .map_err(ImportError::Validation)?;

        let property_id = self
            .store
            .insert_property(tenant_id, &document.property)
            .await
            .map_err(ImportError::RootInsert)?;

        let scope = PropertyScope {
            tenant_id,
            property_id,
        };

        let mut statistics = ImportStatistics::new();
        statistics.record_created(EntityKind::Property);
        statistics.merge(DependencyOrderedImporter::new(&self.store, scope).run(&document).await);

        let message = statistics.summary(&document.property.name, self.max_listed_warnings);

        Ok(ImportOutcome {
            property_id,
            property_name: document.property.name,
            statistics,
            message,
        })
    }

    fn emit(&self, event: LodgeEvent) {
        if let Some(bus) = &self.event_bus {
            bus.emit_lossy(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::SqliteStore;
    use lodge_common::db::init_memory_database;

    async fn importer() -> PropertyImporter<SqliteStore> {
        PropertyImporter::new(SqliteStore::new(init_memory_database().await.unwrap()))
    }

    #[tokio::test]
    async fn test_validation_error_result() {
        let result = importer()
            .await
            .import(Uuid::new_v4(), r#"{"property":{"name":"Lake View Inn"}}"#)
            .await;

        assert!(!result.success);
        assert_eq!(result.error.as_deref(), Some("Validation failed"));
        assert_eq!(result.message.as_deref(), Some("property.country: is required"));
        assert!(result.property_id.is_none());
    }

    #[tokio::test]
    async fn test_root_insert_error_has_store_message() {
        let importer = importer().await;
        let raw = r#"{"property":{"name":"Lake View Inn","country":"India"}}"#;

        assert!(importer.import(Uuid::new_v4(), raw).await.success);
        let result = importer.import(Uuid::new_v4(), raw).await;

        assert!(!result.success);
        assert!(result
            .error
            .as_deref()
            .unwrap()
            .starts_with("UNIQUE constraint failed"));
        assert!(result.message.is_none());
    }

    #[tokio::test]
    async fn test_max_listed_warnings_configurable() {
        let importer = importer().await.with_max_listed_warnings(1);
        let raw = r#"{
            "property": {"name": "Lake", "country": "India"},
            "pricing": [{"room_name": "A", "base_rate": 1}, {"room_name": "B", "base_rate": 1}]
        }"#;

        let message = importer.import(Uuid::new_v4(), raw).await.message.unwrap();
        assert!(message.ends_with("Warnings:\n- Pricing \"A\": room not found in this import\n... and 1 more"));
    }
}
