//! Per-category selection state.
//!
//! Tracks which record names the user has chosen to keep, one set per
//! category. Toggling is the only mutation; membership is all that matters.

use std::collections::BTreeSet;

use indexmap::IndexMap;

use crate::record::{Category, Record};

/// Selected record names, keyed by category.
///
/// Every known category has an entry at all times, so an empty selection and
/// a never-touched selection are indistinguishable. Names are held in a set:
/// repeated selects cannot introduce duplicates, and deselecting an absent
/// name is a no-op.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionState {
    selected: IndexMap<Category, BTreeSet<String>>,
}

impl SelectionState {
    /// Create an all-empty selection covering every known category.
    pub fn new() -> Self {
        let selected = Category::ALL
            .into_iter()
            .map(|category| (category, BTreeSet::new()))
            .collect();
        Self { selected }
    }

    /// Toggle one name in one category.
    ///
    /// # Arguments
    /// * `category` - Category the checkbox belongs to
    /// * `name` - Record name being toggled
    /// * `selected` - Checkbox state: `true` inserts, `false` removes
    pub fn toggle(&mut self, category: Category, name: &str, selected: bool) {
        let names = self.selected.entry(category).or_default();
        if selected {
            names.insert(name.to_string());
        } else {
            names.remove(name);
        }
    }

    /// Check whether a name is selected under a category.
    pub fn is_selected(&self, category: Category, name: &str) -> bool {
        self.selected
            .get(&category)
            .map_or(false, |names| names.contains(name))
    }

    /// Selected names for a category, in sorted order.
    pub fn selected_names(&self, category: Category) -> Vec<&str> {
        self.selected
            .get(&category)
            .into_iter()
            .flatten()
            .map(String::as_str)
            .collect()
    }

    /// Number of selected names in one category.
    pub fn selected_count(&self, category: Category) -> usize {
        self.selected.get(&category).map_or(0, BTreeSet::len)
    }

    /// Number of selected names across all categories.
    pub fn total_selected(&self) -> usize {
        self.selected.values().map(BTreeSet::len).sum()
    }

    /// Select every named record in a known category.
    ///
    /// Records with an unknown category or no usable name are skipped; they
    /// have no checkbox to begin with.
    pub fn select_all(&mut self, records: &[Record]) {
        for record in records {
            if let (Some(category), Some(name)) = (record.category(), record.name()) {
                self.toggle(category, name, true);
            }
        }
    }

    /// Drop every selection, keeping the per-category entries.
    pub fn clear(&mut self) {
        for names in self.selected.values_mut() {
            names.clear();
        }
    }
}

impl Default for SelectionState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_state_covers_all_categories() {
        let state = SelectionState::new();

        for category in Category::ALL {
            assert_eq!(state.selected_count(category), 0);
        }
        assert_eq!(state.total_selected(), 0);
    }

    #[test]
    fn test_toggle_insert_and_remove() {
        let mut state = SelectionState::new();

        state.toggle(Category::Objects, "Account", true);
        assert!(state.is_selected(Category::Objects, "Account"));
        assert!(!state.is_selected(Category::Flows, "Account"));

        state.toggle(Category::Objects, "Account", false);
        assert!(!state.is_selected(Category::Objects, "Account"));
    }

    #[test]
    fn test_repeated_select_does_not_duplicate() {
        let mut state = SelectionState::new();

        state.toggle(Category::Flows, "MyFlow", true);
        state.toggle(Category::Flows, "MyFlow", true);
        state.toggle(Category::Flows, "MyFlow", true);

        assert_eq!(state.selected_count(Category::Flows), 1);

        // One deselect fully removes it
        state.toggle(Category::Flows, "MyFlow", false);
        assert_eq!(state.selected_count(Category::Flows), 0);
    }

    #[test]
    fn test_deselect_absent_name_is_noop() {
        let mut state = SelectionState::new();

        state.toggle(Category::Profiles, "Admin", false);
        state.toggle(Category::Profiles, "Admin", false);

        assert_eq!(state.total_selected(), 0);
    }

    #[test]
    fn test_select_all_skips_unknown_and_nameless() {
        let records = vec![
            Record::new("objects", json!({"name": "Account"})),
            Record::new("widgets", json!({"name": "Gadget"})),
            Record::new("flows", json!({"name": "MyFlow"})),
        ];

        let mut state = SelectionState::new();
        state.select_all(&records);

        assert!(state.is_selected(Category::Objects, "Account"));
        assert!(state.is_selected(Category::Flows, "MyFlow"));
        assert_eq!(state.total_selected(), 2);
    }

    #[test]
    fn test_clear_keeps_category_entries() {
        let mut state = SelectionState::new();
        state.toggle(Category::Layouts, "Main", true);

        state.clear();

        assert_eq!(state.total_selected(), 0);
        assert_eq!(state.selected_count(Category::Layouts), 0);
    }

    #[test]
    fn test_selected_names_sorted() {
        let mut state = SelectionState::new();
        state.toggle(Category::Objects, "Contact", true);
        state.toggle(Category::Objects, "Account", true);

        assert_eq!(state.selected_names(Category::Objects), vec!["Account", "Contact"]);
    }
}
