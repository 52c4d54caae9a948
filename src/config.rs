//! Wizard configuration and selection plan loading.
//!
//! Both are YAML files: the wizard config tunes session limits and labels,
//! the selection plan is the CLI's non-interactive replacement for checkbox
//! toggles.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::record::Category;
use crate::selection::SelectionState;

/// Default input size cap: 30 MB.
pub const DEFAULT_MAX_FILE_BYTES: usize = 30 * 1024 * 1024;

fn default_max_file_bytes() -> usize {
    DEFAULT_MAX_FILE_BYTES
}

fn default_output_prefix() -> String {
    crate::export::EXPORT_FILENAME_PREFIX.to_string()
}

/// Wizard session configuration.
///
/// All fields have defaults, so a session works with no config file at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Maximum accepted input file size in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: usize,

    /// Prefix for converted output filenames.
    #[serde(default = "default_output_prefix")]
    pub output_prefix: String,

    /// Optional display-label overrides: category tag -> label.
    #[serde(default)]
    pub labels: IndexMap<String, String>,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            max_file_bytes: default_max_file_bytes(),
            output_prefix: default_output_prefix(),
            labels: IndexMap::new(),
        }
    }
}

impl WizardConfig {
    /// Load wizard configuration from a YAML file.
    ///
    /// # Arguments
    /// * `path` - Path to winnower.yaml
    ///
    /// # Errors
    /// Returns error if the file can't be read or has invalid format
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file {}: {}", path.display(), e))?;

        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse config {}: {}", path.display(), e))
    }

    /// Display label for a category, honoring config overrides.
    pub fn label(&self, category: Category) -> &str {
        self.labels
            .get(category.as_tag())
            .map(String::as_str)
            .unwrap_or_else(|| category.label())
    }
}

/// A selection plan: category tag -> record names to keep.
///
/// The YAML shape mirrors the wizard's Select step:
///
/// ```yaml
/// objects:
///   - Account
///   - Contact
/// flows:
///   - MyFlow
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionPlan {
    pub categories: IndexMap<String, Vec<String>>,
}

impl SelectionPlan {
    /// Load a selection plan from a YAML file.
    ///
    /// # Errors
    /// Returns error if the file can't be read or has invalid format
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();

        let contents = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read selection plan {}: {}", path.display(), e))?;

        serde_yaml::from_str(&contents)
            .map_err(|e| format!("Failed to parse selection plan {}: {}", path.display(), e))
    }

    /// Apply the plan to a selection state through the normal toggle path.
    ///
    /// Category tags go through the same canonicalization as record tags, so
    /// legacy alias tags work here too. An unknown tag is an error: a typo in
    /// a plan should not silently select nothing.
    pub fn apply(&self, state: &mut SelectionState) -> Result<(), String> {
        // Resolve every tag before touching the state, so a bad plan leaves
        // the selection unchanged.
        let mut resolved = Vec::with_capacity(self.categories.len());
        for (tag, names) in &self.categories {
            let category = Category::from_tag(tag)
                .ok_or_else(|| format!("Unknown category '{}' in selection plan", tag))?;
            resolved.push((category, names));
        }

        for (category, names) in resolved {
            for name in names {
                state.toggle(category, name, true);
            }
        }
        Ok(())
    }
}
