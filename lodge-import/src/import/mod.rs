//! Property import pipeline
//!
//! # Stages
//! 1. **schema** - Structural validation of the raw document
//! 2. **orchestrator** - Root insert, sub-entity import, summary and events
//! 3. **importer** - Dependency-ordered sub-entity writes
//! 4. **resolver** - Room and catalog name resolution
//! 5. **statistics** - Per-run counters and failure list

pub mod importer;
pub mod orchestrator;
pub mod resolver;
pub mod schema;
pub mod statistics;

pub use importer::DependencyOrderedImporter;
pub use orchestrator::{ImportError, ImportOutcome, PropertyImporter, DEFAULT_MAX_LISTED_WARNINGS};
pub use resolver::{CatalogResolver, NameLookup, RoomNameMap};
pub use schema::{slugify, DocumentSchema, SchemaValidator, ValidationIssue};
pub use statistics::{EntityTally, ImportFailure, ImportStatistics};
