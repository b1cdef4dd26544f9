//! Per-run import statistics
//!
//! Each importer step returns its own `ImportStatistics`; the steps are
//! combined with `merge`. Failures keep the order they occurred in.

use lodge_common::Error;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::warn;

use crate::models::EntityKind;

/// Counters for one entity kind
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct EntityTally {
    pub created: usize,
    /// Catalog names that did not resolve
    pub skipped: usize,
    pub failed: usize,
}

/// One non-fatal sub-entity failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportFailure {
    pub kind: EntityKind,
    /// `<Label> "<identifier>": <reason>`
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct ImportStatistics {
    tallies: BTreeMap<EntityKind, EntityTally>,
    failures: Vec<ImportFailure>,
}

impl ImportStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_created(&mut self, kind: EntityKind) {
        self.tallies.entry(kind).or_default().created += 1;
    }

    pub fn record_skipped(&mut self, kind: EntityKind) {
        self.tallies.entry(kind).or_default().skipped += 1;
    }

    /// Record a failed write; the store's own message is kept verbatim
    pub fn record_failure(&mut self, kind: EntityKind, identifier: &str, error: &Error) {
        self.record_failure_message(kind, identifier, &error.store_message());
    }

    pub fn record_failure_message(&mut self, kind: EntityKind, identifier: &str, reason: &str) {
        let message = format!("{} \"{}\": {}", kind.label(), identifier, reason);
        warn!(entity = kind.table_name(), "Import item failed: {}", message);

        self.tallies.entry(kind).or_default().failed += 1;
        self.failures.push(ImportFailure { kind, message });
    }

    pub fn tally(&self, kind: EntityKind) -> EntityTally {
        self.tallies.get(&kind).copied().unwrap_or_default()
    }

    pub fn created(&self, kind: EntityKind) -> usize {
        self.tally(kind).created
    }

    pub fn skipped(&self, kind: EntityKind) -> usize {
        self.tally(kind).skipped
    }

    pub fn failures(&self) -> &[ImportFailure] {
        &self.failures
    }

    pub fn failures_for(&self, kind: EntityKind) -> impl Iterator<Item = &ImportFailure> {
        self.failures.iter().filter(move |f| f.kind == kind)
    }

    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Add `other`'s counters and append its failures after ours
    pub fn merge(&mut self, other: ImportStatistics) {
        for (kind, tally) in other.tallies {
            let entry = self.tallies.entry(kind).or_default();
            entry.created += tally.created;
            entry.skipped += tally.skipped;
            entry.failed += tally.failed;
        }
        self.failures.extend(other.failures);
    }

    /// Created rows keyed by table name (kinds with no rows are omitted)
    pub fn created_by_table(&self) -> BTreeMap<String, usize> {
        self.tallies
            .iter()
            .filter(|(_, tally)| tally.created > 0)
            .map(|(kind, tally)| (kind.table_name().to_string(), tally.created))
            .collect()
    }

    /// Caller-facing summary
    ///
    /// Lists at most `max_listed` failures, then `... and K more`.
    pub fn summary(&self, property_name: &str, max_listed: usize) -> String {
        let mut summary = format!(
            "Property \"{}\" imported successfully: {} rooms, {} bed configurations, {} pricing records, {} hosts, {} amenities, {} tags.",
            property_name,
            self.created(EntityKind::Room),
            self.created(EntityKind::BedConfiguration),
            self.created(EntityKind::Pricing),
            self.created(EntityKind::Host),
            self.created(EntityKind::PropertyAmenity),
            self.created(EntityKind::PropertyTag),
        );

        if self.failures.is_empty() {
            return summary;
        }

        summary.push_str("\n\nWarnings:\n");
        let listed: Vec<String> = self
            .failures
            .iter()
            .take(max_listed)
            .map(|f| format!("- {}", f.message))
            .collect();
        summary.push_str(&listed.join("\n"));

        let remaining = self.failures.len().saturating_sub(max_listed);
        if remaining > 0 {
            summary.push_str(&format!("\n... and {} more", remaining));
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_failures(count: usize) -> ImportStatistics {
        let mut stats = ImportStatistics::new();
        for i in 0..count {
            stats.record_failure_message(EntityKind::Room, &format!("Room {}", i), "CHECK constraint failed");
        }
        stats
    }

    #[test]
    fn test_summary_without_failures() {
        let mut stats = ImportStatistics::new();
        stats.record_created(EntityKind::Room);
        stats.record_created(EntityKind::Pricing);

        assert_eq!(
            stats.summary("Lake View Inn", 5),
            "Property \"Lake View Inn\" imported successfully: 1 rooms, 0 bed configurations, 1 pricing records, 0 hosts, 0 amenities, 0 tags."
        );
    }

    #[test]
    fn test_summary_lists_all_when_within_limit() {
        let summary = with_failures(5).summary("Lake", 5);

        let warnings = summary.split("\n\nWarnings:\n").nth(1).unwrap();
        assert_eq!(warnings.lines().count(), 5);
        assert!(warnings.starts_with("- Room \"Room 0\": CHECK constraint failed"));
        assert!(!summary.contains("more"));
    }

    #[test]
    fn test_summary_caps_listed_failures() {
        let summary = with_failures(7).summary("Lake", 5);

        let warnings = summary.split("\n\nWarnings:\n").nth(1).unwrap();
        let lines: Vec<&str> = warnings.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[4], "- Room \"Room 4\": CHECK constraint failed");
        assert_eq!(lines[5], "... and 2 more");
    }

    #[test]
    fn test_merge_keeps_order_and_adds_counts() {
        let mut first = ImportStatistics::new();
        first.record_created(EntityKind::Room);
        first.record_failure_message(EntityKind::Room, "A", "boom");

        let mut second = ImportStatistics::new();
        second.record_created(EntityKind::Room);
        second.record_skipped(EntityKind::PropertyTag);
        second.record_failure_message(EntityKind::Pricing, "B", "room not found in this import");

        first.merge(second);

        assert_eq!(first.created(EntityKind::Room), 2);
        assert_eq!(first.skipped(EntityKind::PropertyTag), 1);
        assert_eq!(first.tally(EntityKind::Room).failed, 1);
        let messages: Vec<&str> = first.failures().iter().map(|f| f.message.as_str()).collect();
        assert_eq!(
            messages,
            vec!["Room \"A\": boom", "Pricing \"B\": room not found in this import"]
        );
        assert_eq!(first.failures_for(EntityKind::Pricing).count(), 1);
    }

    #[test]
    fn test_created_by_table_omits_empty_kinds() {
        let mut stats = ImportStatistics::new();
        stats.record_created(EntityKind::Host);
        stats.record_skipped(EntityKind::PropertyAmenity);

        let created = stats.created_by_table();
        assert_eq!(created.len(), 1);
        assert_eq!(created.get("hosts"), Some(&1));
    }
}
