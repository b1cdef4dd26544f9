//! Import document schema validation
//!
//! The accepted document shape is declared once (`DocumentSchema`) with
//! `FieldRule` builders, one `ObjectSchema` per record type. Validation walks
//! the raw JSON value, collects every violation with its path
//! (`rooms[0].bed_configurations[1].bed_count`) and only then deserializes the
//! value into the typed `ImportDocument`.
//!
//! `null` on an optional field is treated as absent and removed before
//! deserialization. Unknown fields are ignored.

use chrono::{NaiveDate, NaiveTime};
use serde_json::{Map, Value};
use std::fmt;

use crate::models::ImportDocument;

/// One violated constraint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    /// Dotted path with `[i]` indices, e.g. `property.country`
    pub path: String,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Expected JSON type of a field
#[derive(Debug, Clone)]
pub enum FieldKind {
    String,
    Integer,
    Number,
    Boolean,
    /// `YYYY-MM-DD`
    Date,
    /// `HH:MM`
    Time,
    /// Lowercase alphanumerics separated by single hyphens
    Slug,
    /// Array of non-empty strings
    StringList,
    Object(ObjectSchema),
    ObjectList(ObjectSchema),
}

/// Constraint on one named field of an object
#[derive(Debug, Clone)]
pub struct FieldRule {
    name: &'static str,
    kind: FieldKind,
    required: bool,
    min: Option<f64>,
    max: Option<f64>,
}

impl FieldRule {
    fn new(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            min: None,
            max: None,
        }
    }

    pub fn string(name: &'static str) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn integer(name: &'static str) -> Self {
        Self::new(name, FieldKind::Integer)
    }

    pub fn number(name: &'static str) -> Self {
        Self::new(name, FieldKind::Number)
    }

    pub fn boolean(name: &'static str) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn date(name: &'static str) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn time(name: &'static str) -> Self {
        Self::new(name, FieldKind::Time)
    }

    pub fn slug(name: &'static str) -> Self {
        Self::new(name, FieldKind::Slug)
    }

    pub fn string_list(name: &'static str) -> Self {
        Self::new(name, FieldKind::StringList)
    }

    pub fn object(name: &'static str, schema: ObjectSchema) -> Self {
        Self::new(name, FieldKind::Object(schema))
    }

    pub fn object_list(name: &'static str, schema: ObjectSchema) -> Self {
        Self::new(name, FieldKind::ObjectList(schema))
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Inclusive lower bound (numeric kinds only)
    pub fn min(mut self, min: f64) -> Self {
        self.min = Some(min);
        self
    }

    /// Inclusive upper bound (numeric kinds only)
    pub fn max(mut self, max: f64) -> Self {
        self.max = Some(max);
        self
    }

    pub fn range(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    fn check(&self, value: &mut Value, path: &str, issues: &mut Vec<ValidationIssue>) {
        match &self.kind {
            FieldKind::String => {
                let Some(s) = expect_str(value, path, "must be a string", issues) else {
                    return;
                };
                if self.required && s.trim().is_empty() {
                    issues.push(ValidationIssue::new(path, "must not be empty"));
                }
            }
            FieldKind::Slug => {
                let Some(s) = expect_str(value, path, "must be a string", issues) else {
                    return;
                };
                if s.is_empty() {
                    issues.push(ValidationIssue::new(path, "must not be empty"));
                } else if !is_valid_slug(s) {
                    issues.push(ValidationIssue::new(
                        path,
                        "must contain only lowercase letters, digits and single hyphens",
                    ));
                }
            }
            FieldKind::Integer => match value.as_i64() {
                Some(n) => self.check_bounds(n as f64, path, issues),
                None => issues.push(ValidationIssue::new(path, "must be an integer")),
            },
            FieldKind::Number => match value.as_f64() {
                Some(n) => self.check_bounds(n, path, issues),
                None => issues.push(ValidationIssue::new(path, "must be a number")),
            },
            FieldKind::Boolean => {
                if !value.is_boolean() {
                    issues.push(ValidationIssue::new(path, "must be a boolean"));
                }
            }
            FieldKind::Date => {
                let Some(s) = expect_str(value, path, "must be a date (YYYY-MM-DD)", issues) else {
                    return;
                };
                if !is_date(s) {
                    issues.push(ValidationIssue::new(path, "must be a date (YYYY-MM-DD)"));
                }
            }
            FieldKind::Time => {
                let Some(s) = expect_str(value, path, "must be a time (HH:MM)", issues) else {
                    return;
                };
                if !is_time(s) {
                    issues.push(ValidationIssue::new(path, "must be a time (HH:MM)"));
                }
            }
            FieldKind::StringList => {
                let Some(items) = value.as_array() else {
                    issues.push(ValidationIssue::new(path, "must be an array"));
                    return;
                };
                for (i, item) in items.iter().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    match item.as_str() {
                        Some(s) if s.trim().is_empty() => {
                            issues.push(ValidationIssue::new(item_path, "must not be empty"))
                        }
                        Some(_) => {}
                        None => issues.push(ValidationIssue::new(item_path, "must be a string")),
                    }
                }
            }
            FieldKind::Object(schema) => match value.as_object_mut() {
                Some(object) => schema.check(object, path, issues),
                None => issues.push(ValidationIssue::new(path, "must be an object")),
            },
            FieldKind::ObjectList(schema) => {
                let Some(items) = value.as_array_mut() else {
                    issues.push(ValidationIssue::new(path, "must be an array"));
                    return;
                };
                for (i, item) in items.iter_mut().enumerate() {
                    let item_path = format!("{}[{}]", path, i);
                    match item.as_object_mut() {
                        Some(object) => schema.check(object, &item_path, issues),
                        None => issues.push(ValidationIssue::new(item_path, "must be an object")),
                    }
                }
            }
        }
    }

    fn check_bounds(&self, n: f64, path: &str, issues: &mut Vec<ValidationIssue>) {
        if let Some(min) = self.min {
            if n < min {
                issues.push(ValidationIssue::new(path, format!("must be at least {}", min)));
                return;
            }
        }
        if let Some(max) = self.max {
            if n > max {
                issues.push(ValidationIssue::new(path, format!("must be at most {}", max)));
            }
        }
    }
}

fn expect_str<'v>(
    value: &'v Value,
    path: &str,
    message: &str,
    issues: &mut Vec<ValidationIssue>,
) -> Option<&'v str> {
    let s = value.as_str();
    if s.is_none() {
        issues.push(ValidationIssue::new(path, message));
    }
    s
}

/// Field rules of one JSON object
#[derive(Debug, Clone, Default)]
pub struct ObjectSchema {
    fields: Vec<FieldRule>,
}

impl ObjectSchema {
    pub fn new(fields: Vec<FieldRule>) -> Self {
        Self { fields }
    }

    /// Check `object` against every rule, in declaration order
    ///
    /// `prefix` is the path of the object itself (empty for the root).
    /// Optional fields holding `null` are removed from `object`.
    pub fn check(&self, object: &mut Map<String, Value>, prefix: &str, issues: &mut Vec<ValidationIssue>) {
        for rule in &self.fields {
            let path = if prefix.is_empty() {
                rule.name.to_string()
            } else {
                format!("{}.{}", prefix, rule.name)
            };

            let present = object.get(rule.name).is_some_and(|value| !value.is_null());
            if !present {
                if rule.required {
                    issues.push(ValidationIssue::new(path, "is required"));
                } else {
                    object.remove(rule.name);
                }
                continue;
            }

            if let Some(value) = object.get_mut(rule.name) {
                rule.check(value, &path, issues);
            }
        }
    }
}

/// Declared shape of a property import document
pub struct DocumentSchema;

impl DocumentSchema {
    /// Root schema of the import document
    pub fn property_import() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::object("property", Self::property()).required(),
            FieldRule::object_list("rooms", Self::room()),
            FieldRule::object_list("hosts", Self::host()),
            FieldRule::object_list("review_sources", Self::review_source()),
            FieldRule::object_list("proximity_info", Self::proximity_info()),
            FieldRule::object_list("nearby_attractions", Self::nearby_attraction()),
            FieldRule::object_list("property_features", Self::property_feature()),
            FieldRule::object("booking_settings", Self::booking_settings()),
            FieldRule::object_list("special_offers", Self::special_offer()),
            FieldRule::object_list("rules_and_policies", Self::rules_and_policy()),
            FieldRule::object_list("pricing", Self::pricing()),
            FieldRule::object_list("social_media_links", Self::social_media_link()),
            FieldRule::object_list("payment_methods", Self::payment_method()),
            FieldRule::object_list("booking_ctas", Self::booking_cta()),
            FieldRule::string_list("property_amenities"),
            FieldRule::string_list("property_tags"),
        ])
    }

    fn property() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("name").required(),
            FieldRule::string("country").required(),
            FieldRule::slug("slug").required(),
            FieldRule::string("type"),
            FieldRule::string("tagline"),
            FieldRule::string("description"),
            FieldRule::string("classification"),
            FieldRule::string("address_line1"),
            FieldRule::string("address_line2"),
            FieldRule::string("city"),
            FieldRule::string("state"),
            FieldRule::string("postal_code"),
            FieldRule::number("latitude").range(-90.0, 90.0),
            FieldRule::number("longitude").range(-180.0, 180.0),
            FieldRule::string("phone"),
            FieldRule::string("email"),
            FieldRule::string("website"),
            FieldRule::boolean("is_active"),
            FieldRule::boolean("is_published"),
            FieldRule::string("meta_title"),
            FieldRule::string("meta_description"),
        ])
    }

    fn room() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("name").required(),
            FieldRule::string("description"),
            FieldRule::string("room_type"),
            FieldRule::integer("max_occupancy").min(1.0),
            FieldRule::integer("max_adults").min(0.0),
            FieldRule::integer("max_children").min(0.0),
            FieldRule::number("size_sqm").min(0.0),
            FieldRule::string("view_type"),
            FieldRule::string_list("features"),
            FieldRule::number("base_rate").min(0.0),
            FieldRule::string("currency"),
            FieldRule::object_list("bed_configurations", Self::bed_configuration()),
            FieldRule::string_list("room_amenities"),
        ])
    }

    fn bed_configuration() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("bed_type").required(),
            FieldRule::integer("bed_count").required().min(1.0),
            FieldRule::boolean("is_sofa_bed"),
            FieldRule::boolean("is_extra_bed"),
        ])
    }

    fn pricing() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("room_name").required(),
            FieldRule::string("season_name"),
            FieldRule::number("base_rate").required().min(0.0),
            FieldRule::number("discounted_rate").min(0.0),
            FieldRule::number("original_price").min(0.0),
            FieldRule::string("currency"),
            FieldRule::date("valid_from"),
            FieldRule::date("valid_to"),
        ])
    }

    fn host() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("name").required(),
            FieldRule::string("title"),
            FieldRule::string("bio"),
            FieldRule::string("email"),
            FieldRule::string("phone"),
            FieldRule::string_list("languages"),
            FieldRule::boolean("is_superhost"),
        ])
    }

    fn review_source() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("source_name").required(),
            FieldRule::number("rating").range(0.0, 10.0),
            FieldRule::integer("review_count").min(0.0),
            FieldRule::string("url"),
        ])
    }

    fn proximity_info() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("place_name").required(),
            FieldRule::string("category"),
            FieldRule::number("distance_km").min(0.0),
            FieldRule::integer("travel_time_minutes").min(0.0),
        ])
    }

    fn nearby_attraction() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("name").required(),
            FieldRule::string("description"),
            FieldRule::string("category"),
            FieldRule::number("distance_km").min(0.0),
        ])
    }

    fn property_feature() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("title").required(),
            FieldRule::string("description"),
            FieldRule::string("icon"),
        ])
    }

    fn booking_settings() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::time("check_in_time"),
            FieldRule::time("check_out_time"),
            FieldRule::integer("min_stay_nights").min(1.0),
            FieldRule::integer("max_stay_nights").min(1.0),
            FieldRule::integer("advance_booking_days").min(0.0),
            FieldRule::integer("free_cancellation_days").min(0.0),
            FieldRule::integer("partial_refund_days").min(0.0),
            FieldRule::number("partial_refund_percent").range(0.0, 100.0),
            FieldRule::boolean("deposit_required"),
            FieldRule::number("deposit_percent").range(0.0, 100.0),
            FieldRule::boolean("instant_booking"),
        ])
    }

    fn special_offer() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("title").required(),
            FieldRule::string("description"),
            FieldRule::number("discount_percent").range(0.0, 100.0),
            FieldRule::string("promo_code"),
            FieldRule::date("valid_from"),
            FieldRule::date("valid_to"),
            FieldRule::boolean("is_active"),
        ])
    }

    fn rules_and_policy() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("title").required(),
            FieldRule::string("description"),
            FieldRule::string("category"),
        ])
    }

    fn social_media_link() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("platform").required(),
            FieldRule::string("url").required(),
        ])
    }

    fn payment_method() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("method_name").required(),
            FieldRule::string("description"),
        ])
    }

    fn booking_cta() -> ObjectSchema {
        ObjectSchema::new(vec![
            FieldRule::string("label").required(),
            FieldRule::string("url"),
            FieldRule::string("cta_type"),
            FieldRule::boolean("is_primary"),
        ])
    }
}

/// Validates raw import documents against `DocumentSchema::property_import`
pub struct SchemaValidator {
    schema: ObjectSchema,
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidator {
    pub fn new() -> Self {
        Self {
            schema: DocumentSchema::property_import(),
        }
    }

    /// Parse, validate and type a raw document
    ///
    /// Returns every violation found; an empty `Err` is never produced.
    /// Bytes that are not UTF-8 are reported as invalid JSON.
    pub fn validate_document(&self, raw: impl AsRef<[u8]>) -> Result<ImportDocument, Vec<ValidationIssue>> {
        let mut value: Value = serde_json::from_slice(raw.as_ref())
            .map_err(|e| vec![ValidationIssue::new("document", format!("invalid JSON: {}", e))])?;

        let Some(root) = value.as_object_mut() else {
            return Err(vec![ValidationIssue::new("document", "must be an object")]);
        };

        let slug_fill = fill_generated_slug(root);

        let mut issues = Vec::new();
        self.schema.check(root, "", &mut issues);
        if slug_fill == SlugFill::Unavailable {
            if let Some(issue) = issues.iter_mut().find(|i| i.path == "property.slug") {
                issue.message = "could not be generated from property.name; supply a slug".to_string();
            }
        }
        if !issues.is_empty() {
            return Err(issues);
        }

        serde_json::from_value(value).map_err(|e| vec![ValidationIssue::new("document", e.to_string())])
    }
}

#[derive(Debug, PartialEq, Eq)]
enum SlugFill {
    /// A slug was supplied, or there is no usable name to derive one from
    NotNeeded,
    Generated,
    /// The name has no ASCII letters or digits
    Unavailable,
}

/// Derive `property.slug` from `property.name` when no slug was supplied
fn fill_generated_slug(root: &mut Map<String, Value>) -> SlugFill {
    let Some(Value::Object(property)) = root.get_mut("property") else {
        return SlugFill::NotNeeded;
    };

    if !matches!(property.get("slug"), None | Some(Value::Null)) {
        return SlugFill::NotNeeded;
    }

    let name = match property.get("name").and_then(Value::as_str) {
        Some(name) if !name.trim().is_empty() => name,
        _ => return SlugFill::NotNeeded,
    };

    let slug = slugify(name);
    if slug.is_empty() {
        return SlugFill::Unavailable;
    }
    property.insert("slug".to_string(), Value::String(slug));
    SlugFill::Generated
}

/// URL slug for a display name: `"Lake View Inn"` → `"lake-view-inn"`
///
/// ASCII letters and digits are kept (lowercased); every other run of
/// characters becomes a single `-`. Leading and trailing hyphens are dropped.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

/// `^[a-z0-9]+(-[a-z0-9]+)*$`
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.split('-').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        })
}

fn is_date(s: &str) -> bool {
    s.len() == 10 && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
}

fn is_time(s: &str) -> bool {
    s.len() == 5 && NaiveTime::parse_from_str(s, "%H:%M").is_ok()
}
