//! Wizard step machine and session state.
//!
//! One [`WizardSession`] owns everything a run of the wizard touches: the
//! active step, the loaded file and its parsed records, and the selection
//! state. Construction and [`WizardSession::reset`] are its only lifecycle
//! events; all mutations happen synchronously in response to one user
//! action at a time.

use std::fmt;

use crate::config::WizardConfig;
use crate::export::{export_text, ExportOutput};
use crate::parser::{parse, ParseError};
use crate::record::{Category, Record};
use crate::selection::SelectionState;
use crate::serialization::SerializationError;

/// The four wizard steps, strictly linear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Upload,
    Select,
    Convert,
    Completed,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Upload => "Upload",
            WizardStep::Select => "Select",
            WizardStep::Convert => "Convert",
            WizardStep::Completed => "Completed",
        };
        write!(f, "{}", name)
    }
}

/// Error type for wizard session operations.
///
/// Parsing failures aside, these are all step-gating violations: the session
/// refuses actions that don't belong to the active step.
#[derive(Debug)]
pub enum WizardError {
    /// Action attempted in a step that doesn't allow it.
    StepNotAllowed {
        action: &'static str,
        step: WizardStep,
    },
    /// Advancing past Upload requires a successfully parsed file.
    NoFileLoaded,
    /// Input file exceeds the configured size cap.
    FileTooLarge { size: usize, max: usize },
    /// The loaded file failed to parse.
    Parse(ParseError),
    /// A selected record could not be re-encoded.
    Export(SerializationError),
}

impl fmt::Display for WizardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardError::StepNotAllowed { action, step } => {
                write!(f, "Action '{}' is not allowed in the {} step", action, step)
            }
            WizardError::NoFileLoaded => {
                write!(f, "No file has been loaded yet")
            }
            WizardError::FileTooLarge { size, max } => {
                write!(f, "File is {} bytes, exceeding the {} byte limit", size, max)
            }
            WizardError::Parse(e) => write!(f, "{}", e),
            WizardError::Export(e) => write!(f, "Export failed: {}", e),
        }
    }
}

impl std::error::Error for WizardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WizardError::Parse(e) => Some(e),
            WizardError::Export(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ParseError> for WizardError {
    fn from(err: ParseError) -> Self {
        WizardError::Parse(err)
    }
}

/// A successfully loaded input file.
#[derive(Debug, Clone)]
struct LoadedFile {
    name: String,
    records: Vec<Record>,
}

/// The single owned state of one wizard run.
#[derive(Debug)]
pub struct WizardSession {
    config: WizardConfig,
    step: WizardStep,
    file: Option<LoadedFile>,
    selection: SelectionState,
    last_error: Option<ParseError>,
}

impl WizardSession {
    /// Create a fresh session at the Upload step.
    pub fn new(config: WizardConfig) -> Self {
        Self {
            config,
            step: WizardStep::Upload,
            file: None,
            selection: SelectionState::new(),
            last_error: None,
        }
    }

    /// Active wizard step.
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Session configuration.
    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    /// Records of the loaded file, empty if none is loaded.
    pub fn records(&self) -> &[Record] {
        match &self.file {
            Some(file) => &file.records,
            None => &[],
        }
    }

    /// Name of the loaded file, if any.
    pub fn filename(&self) -> Option<&str> {
        self.file.as_ref().map(|f| f.name.as_str())
    }

    /// Current selection state.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// The parse error from the last failed load, if any.
    ///
    /// Surfaced inline at the Upload step; cleared by a successful load or
    /// a reset.
    pub fn last_error(&self) -> Option<&ParseError> {
        self.last_error.as_ref()
    }

    /// Load and parse an input file, replacing any previously loaded one.
    ///
    /// Only legal at the Upload step. On parse failure the error is recorded
    /// for display and the session keeps no records; the user must pick
    /// another file. A fresh selection state is installed on success.
    ///
    /// # Arguments
    /// * `filename` - Original filename, used for the converted output name
    /// * `text` - Full file contents
    pub fn load_file(&mut self, filename: &str, text: &str) -> Result<(), WizardError> {
        if self.step != WizardStep::Upload {
            return Err(WizardError::StepNotAllowed {
                action: "load_file",
                step: self.step,
            });
        }

        if text.len() > self.config.max_file_bytes {
            return Err(WizardError::FileTooLarge {
                size: text.len(),
                max: self.config.max_file_bytes,
            });
        }

        match parse(text) {
            Ok(records) => {
                tracing::info!(file = filename, records = records.len(), "file loaded");
                self.file = Some(LoadedFile {
                    name: filename.to_string(),
                    records,
                });
                self.selection = SelectionState::new();
                self.last_error = None;
                Ok(())
            }
            Err(err) => {
                tracing::info!(file = filename, error = %err, "file rejected");
                self.file = None;
                self.selection = SelectionState::new();
                self.last_error = Some(err.clone());
                Err(WizardError::Parse(err))
            }
        }
    }

    /// Advance one step forward.
    ///
    /// Upload→Select requires a successfully parsed file; Select→Convert is
    /// always allowed (an empty selection legally exports nothing). The
    /// Convert→Completed transition only happens through [`export`], and
    /// Completed has no forward transition.
    ///
    /// [`export`]: WizardSession::export
    pub fn advance(&mut self) -> Result<WizardStep, WizardError> {
        self.step = match self.step {
            WizardStep::Upload => {
                if self.file.is_none() {
                    return Err(WizardError::NoFileLoaded);
                }
                WizardStep::Select
            }
            WizardStep::Select => WizardStep::Convert,
            // Convert only completes through export(); Completed is terminal
            WizardStep::Convert | WizardStep::Completed => {
                return Err(WizardError::StepNotAllowed {
                    action: "advance",
                    step: self.step,
                })
            }
        };
        Ok(self.step)
    }

    /// Step backward.
    ///
    /// Select→Upload and Convert→Select step back one; Completed performs a
    /// full reset back to Upload. Backing out of Upload is a no-op.
    pub fn back(&mut self) -> WizardStep {
        match self.step {
            WizardStep::Upload => {}
            WizardStep::Select => self.step = WizardStep::Upload,
            WizardStep::Convert => self.step = WizardStep::Select,
            WizardStep::Completed => self.reset(),
        }
        self.step
    }

    /// Toggle a record name's selection. Only legal at the Select step.
    pub fn toggle(
        &mut self,
        category: Category,
        name: &str,
        selected: bool,
    ) -> Result<(), WizardError> {
        if self.step != WizardStep::Select {
            return Err(WizardError::StepNotAllowed {
                action: "toggle",
                step: self.step,
            });
        }
        self.selection.toggle(category, name, selected);
        Ok(())
    }

    /// Select every named record of the loaded file. Only legal at Select.
    pub fn select_all(&mut self) -> Result<(), WizardError> {
        if self.step != WizardStep::Select {
            return Err(WizardError::StepNotAllowed {
                action: "select_all",
                step: self.step,
            });
        }
        if let Some(file) = &self.file {
            self.selection.select_all(&file.records);
        }
        Ok(())
    }

    /// Export the selected records and complete the wizard.
    ///
    /// Only legal at the Convert step. Always produces output, possibly
    /// empty, and moves the session to Completed.
    pub fn export(&mut self) -> Result<ExportOutput, WizardError> {
        if self.step != WizardStep::Convert {
            return Err(WizardError::StepNotAllowed {
                action: "export",
                step: self.step,
            });
        }

        let file = self.file.as_ref().ok_or(WizardError::NoFileLoaded)?;
        let contents =
            export_text(&file.records, &self.selection).map_err(WizardError::Export)?;

        let output = ExportOutput {
            filename: format!("{}{}", self.config.output_prefix, file.name),
            contents,
        };

        tracing::info!(file = %output.filename, bytes = output.contents.len(), "export completed");
        self.step = WizardStep::Completed;
        Ok(output)
    }

    /// Full reset: clear file, records, selection, and error; back to Upload.
    pub fn reset(&mut self) {
        self.step = WizardStep::Upload;
        self.file = None;
        self.selection = SelectionState::new();
        self.last_error = None;
    }
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(WizardConfig::default())
    }
}
