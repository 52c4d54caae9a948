//! # Winnower: Export-Convert Tool Core
//!
//! Winnower takes a newline-delimited JSON entity export, lets a caller pick
//! which named entities to keep per category, and produces a filtered copy
//! of the original file.
//!
//! ## Features
//!
//! - **Line parser**: raw export text to ordered, typed records; tolerant of
//!   blank lines and CRLF, atomic failure on the first malformed line
//! - **Selection engine**: per-category sets of selected record names,
//!   mutated one checkbox toggle at a time
//! - **Filtered export**: re-serializes only the selected records, in
//!   original line order, as `Convert_<original-filename>`
//! - **Wizard session**: one owned object holding the Upload → Select →
//!   Convert → Completed step machine and everything a run touches
//!
//! ## Example
//!
//! ```
//! use winnower::{Category, WizardSession};
//!
//! let input = r#"{"entityType":"objects","data":{"name":"Account"}}
//! {"entityType":"flows","data":{"name":"MyFlow"}}"#;
//!
//! let mut session = WizardSession::default();
//! session.load_file("assets.txt", input).unwrap();
//! session.advance().unwrap();
//! session.toggle(Category::Objects, "Account", true).unwrap();
//! session.advance().unwrap();
//!
//! let output = session.export().unwrap();
//! assert_eq!(output.filename, "Convert_assets.txt");
//! assert!(output.contents.contains("Account"));
//! ```

// Core modules
pub mod record;
pub mod parser;
pub mod selection;
pub mod serialization;
pub mod export;

// Wizard session and configuration
pub mod config;
pub mod wizard;

// Re-export key types
pub use record::{Category, Record};
pub use parser::{parse, ParseError};
pub use selection::SelectionState;
pub use serialization::{NdjsonWriter, SerializationError};
pub use export::{export_filename, export_text, filter_for_export, ExportOutput};
pub use config::{SelectionPlan, WizardConfig};
pub use wizard::{WizardError, WizardSession, WizardStep};
