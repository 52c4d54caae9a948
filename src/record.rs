//! Core record and category types for entity export files.
//!
//! An export file is newline-delimited JSON: each line is one entity record
//! tagged with a category (`entityType`) and carrying an arbitrary payload
//! (`data`). This module defines the parsed representation of one line and
//! the closed set of categories the selection UI knows about.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};

/// The closed set of entity categories a selection tab exists for.
///
/// Raw `entityType` tags outside this set are preserved opaquely on the
/// record (see [`Record::entity_type`]) but never match a category, so they
/// are neither selectable nor exported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Applications,
    Profiles,
    ActionMeta,
    Objects,
    Flows,
    Layouts,
    PickLists,
    // Reserved categories: valid tags, no UI tab yet.
    Webhooks,
    Roles,
}

impl Category {
    /// All known categories in display order.
    pub const ALL: [Category; 9] = [
        Category::Applications,
        Category::Profiles,
        Category::ActionMeta,
        Category::Objects,
        Category::Flows,
        Category::Layouts,
        Category::PickLists,
        Category::Webhooks,
        Category::Roles,
    ];

    /// Canonical `entityType` tag for this category.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Category::Applications => "applications",
            Category::Profiles => "profiles",
            Category::ActionMeta => "actionMeta",
            Category::Objects => "objects",
            Category::Flows => "flows",
            Category::Layouts => "layouts",
            Category::PickLists => "pickLists",
            Category::Webhooks => "webhooks",
            Category::Roles => "roles",
        }
    }

    /// Resolve a raw `entityType` tag to a category.
    ///
    /// Legacy detail tags are folded into their parent category here, at the
    /// data-model boundary, so every category lookup in the crate goes
    /// through one canonicalization point.
    ///
    /// # Returns
    /// `None` for tags outside the known set.
    pub fn from_tag(tag: &str) -> Option<Category> {
        match tag {
            "applications" => Some(Category::Applications),
            "profiles" => Some(Category::Profiles),
            "actionMeta" => Some(Category::ActionMeta),
            "objects" | "objectDetail" => Some(Category::Objects),
            "flows" | "flowDetail" => Some(Category::Flows),
            "layouts" => Some(Category::Layouts),
            "pickLists" => Some(Category::PickLists),
            "webhooks" => Some(Category::Webhooks),
            "roles" => Some(Category::Roles),
            _ => None,
        }
    }

    /// Human-readable label for a category tab.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Applications => "Applications",
            Category::Profiles => "Profiles",
            Category::ActionMeta => "Action Meta",
            Category::Objects => "Objects",
            Category::Flows => "Flows",
            Category::Layouts => "Layouts",
            Category::PickLists => "Pick Lists",
            Category::Webhooks => "Webhooks",
            Category::Roles => "Roles",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_tag())
    }
}

/// One parsed line of an export file.
///
/// The raw `entityType` tag is kept verbatim so that re-serializing an
/// unfiltered record reproduces the original line content; category lookups
/// go through [`Record::category`], which canonicalizes legacy alias tags.
///
/// Extra top-level fields beyond `entityType` and `data` are preserved
/// through `extra` and round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Raw category tag, exactly as it appeared on the input line.
    #[serde(rename = "entityType")]
    pub entity_type: String,

    /// Entity payload. Always a JSON object with at least a `name` string.
    pub data: JsonValue,

    /// Any additional top-level fields from the input line.
    #[serde(flatten)]
    pub extra: JsonMap<String, JsonValue>,
}

impl Record {
    /// Create a record from a tag and payload, with no extra fields.
    pub fn new(entity_type: impl Into<String>, data: JsonValue) -> Self {
        Self {
            entity_type: entity_type.into(),
            data,
            extra: JsonMap::new(),
        }
    }

    /// Category this record belongs to, or `None` for unknown tags.
    pub fn category(&self) -> Option<Category> {
        Category::from_tag(&self.entity_type)
    }

    /// The payload `name` field, the unique selector key within a category.
    pub fn name(&self) -> Option<&str> {
        self.data.get("name").and_then(JsonValue::as_str)
    }

    /// The payload `displayName` field, falling back to `name`.
    ///
    /// Used only for display; selection always keys on `name`.
    pub fn display_name(&self) -> Option<&str> {
        self.data
            .get("displayName")
            .and_then(JsonValue::as_str)
            .or_else(|| self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_category_from_canonical_tag() {
        assert_eq!(Category::from_tag("applications"), Some(Category::Applications));
        assert_eq!(Category::from_tag("pickLists"), Some(Category::PickLists));
        assert_eq!(Category::from_tag("actionMeta"), Some(Category::ActionMeta));
    }

    #[test]
    fn test_category_alias_tags_fold_into_parent() {
        assert_eq!(Category::from_tag("objectDetail"), Some(Category::Objects));
        assert_eq!(Category::from_tag("flowDetail"), Some(Category::Flows));
    }

    #[test]
    fn test_category_unknown_tag() {
        assert_eq!(Category::from_tag("widgets"), None);
        assert_eq!(Category::from_tag(""), None);
        // Tags are case-sensitive
        assert_eq!(Category::from_tag("Objects"), None);
    }

    #[test]
    fn test_tag_round_trip() {
        for category in Category::ALL {
            assert_eq!(Category::from_tag(category.as_tag()), Some(category));
        }
    }

    #[test]
    fn test_record_accessors() {
        let record = Record::new(
            "objects",
            json!({"name": "Account", "displayName": "Account Object"}),
        );

        assert_eq!(record.category(), Some(Category::Objects));
        assert_eq!(record.name(), Some("Account"));
        assert_eq!(record.display_name(), Some("Account Object"));
    }

    #[test]
    fn test_record_display_name_falls_back_to_name() {
        let record = Record::new("flows", json!({"name": "MyFlow"}));
        assert_eq!(record.display_name(), Some("MyFlow"));
    }

    #[test]
    fn test_record_unknown_category_is_opaque() {
        let record = Record::new("widgets", json!({"name": "Gadget"}));
        assert_eq!(record.category(), None);
        assert_eq!(record.entity_type, "widgets");
    }

    #[test]
    fn test_record_serialization_round_trip() {
        let line = r#"{"entityType":"objects","data":{"name":"Account","fields":[1,2]},"version":3}"#;
        let record: Record = serde_json::from_str(line).unwrap();

        assert_eq!(record.entity_type, "objects");
        assert_eq!(record.extra.get("version"), Some(&json!(3)));

        let out = serde_json::to_string(&record).unwrap();
        let reparsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        let original: serde_json::Value = serde_json::from_str(line).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn test_alias_tag_preserved_on_record() {
        let record = Record::new("objectDetail", json!({"name": "Account"}));
        // Category is canonical, raw tag is untouched
        assert_eq!(record.category(), Some(Category::Objects));
        assert_eq!(record.entity_type, "objectDetail");
    }
}
