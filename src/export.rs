//! Filtering and export of selected records.
//!
//! Re-walks the parsed records against the selection state and serializes
//! the survivors back to newline-delimited JSON, in original line order.

use crate::record::Record;
use crate::selection::SelectionState;
use crate::serialization::{to_ndjson_string, SerializationError};

/// Prefix prepended to the original filename for the converted download.
pub const EXPORT_FILENAME_PREFIX: &str = "Convert_";

/// A finished export: output filename plus NDJSON contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOutput {
    /// `Convert_<original-filename>`
    pub filename: String,
    /// Newline-delimited JSON, one kept record per line. Empty when nothing
    /// was selected.
    pub contents: String,
}

/// Walk records in parse order and keep the selected ones.
///
/// A record survives iff its raw tag resolves to a known category and that
/// category's selection set contains the record's payload `name`. Records
/// with an unknown tag or no name never match.
pub fn filter_for_export<'a>(
    records: &'a [Record],
    state: &SelectionState,
) -> Vec<&'a Record> {
    records
        .iter()
        .filter(|record| match (record.category(), record.name()) {
            (Some(category), Some(name)) => state.is_selected(category, name),
            _ => false,
        })
        .collect()
}

/// Serialize the selected records to NDJSON text.
///
/// An empty selection (or an empty file) yields an empty string, never an
/// error. `SerializationError` can only arise from a payload that serde_json
/// cannot re-encode, which parsed input never produces.
pub fn export_text(
    records: &[Record],
    state: &SelectionState,
) -> Result<String, SerializationError> {
    let kept = filter_for_export(records, state);
    tracing::debug!(kept = kept.len(), total = records.len(), "filtered records for export");
    to_ndjson_string(kept)
}

/// Output filename for a converted file: `Convert_<original-filename>`.
pub fn export_filename(original: &str) -> String {
    format!("{}{}", EXPORT_FILENAME_PREFIX, original)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;
    use crate::record::Category;

    fn sample_records() -> Vec<Record> {
        parse(concat!(
            r#"{"entityType":"objects","data":{"name":"Account"}}"#,
            "\n",
            r#"{"entityType":"flows","data":{"name":"MyFlow"}}"#,
            "\n",
            r#"{"entityType":"objects","data":{"name":"Contact"}}"#,
        ))
        .unwrap()
    }

    #[test]
    fn test_empty_selection_exports_nothing() {
        let records = sample_records();
        let state = SelectionState::new();

        assert!(filter_for_export(&records, &state).is_empty());
        assert_eq!(export_text(&records, &state).unwrap(), "");
    }

    #[test]
    fn test_full_selection_preserves_order() {
        let records = sample_records();
        let mut state = SelectionState::new();
        state.select_all(&records);

        let kept = filter_for_export(&records, &state);
        let names: Vec<_> = kept.iter().filter_map(|r| r.name()).collect();
        assert_eq!(names, vec!["Account", "MyFlow", "Contact"]);
    }

    #[test]
    fn test_single_selection_scenario() {
        let records = parse(concat!(
            r#"{"entityType":"objects","data":{"name":"Account"}}"#,
            "\n",
            r#"{"entityType":"flows","data":{"name":"MyFlow"}}"#,
        ))
        .unwrap();

        let mut state = SelectionState::new();
        state.toggle(Category::Objects, "Account", true);

        let output = export_text(&records, &state).unwrap();
        assert_eq!(
            output,
            "{\"entityType\":\"objects\",\"data\":{\"name\":\"Account\"}}\n"
        );
    }

    #[test]
    fn test_alias_tagged_record_matches_parent_category() {
        let records = parse(r#"{"entityType":"objectDetail","data":{"name":"Account"}}"#).unwrap();

        let mut state = SelectionState::new();
        state.toggle(Category::Objects, "Account", true);

        let kept = filter_for_export(&records, &state);
        assert_eq!(kept.len(), 1);
        // The raw tag survives into the output
        let output = export_text(&records, &state).unwrap();
        assert!(output.contains("objectDetail"));
    }

    #[test]
    fn test_unknown_category_never_exported() {
        let records = parse(r#"{"entityType":"widgets","data":{"name":"Gadget"}}"#).unwrap();

        let mut state = SelectionState::new();
        state.select_all(&records);

        assert_eq!(export_text(&records, &state).unwrap(), "");
    }

    #[test]
    fn test_selection_is_per_category() {
        let records = sample_records();
        let mut state = SelectionState::new();
        // "MyFlow" selected under the wrong category must not match
        state.toggle(Category::Objects, "MyFlow", true);

        assert!(filter_for_export(&records, &state).is_empty());
    }

    #[test]
    fn test_export_filename_prefix() {
        assert_eq!(export_filename("assets.txt"), "Convert_assets.txt");
    }
}
