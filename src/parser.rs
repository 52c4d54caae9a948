//! Line parser for newline-delimited JSON export files.
//!
//! Converts raw file text into an ordered sequence of [`Record`]s. Blank
//! lines and trailing carriage returns are tolerated; the first malformed
//! line fails the whole batch.

use std::fmt;

use serde_json::Value as JsonValue;

use crate::record::Record;

/// Error type for export file parsing.
///
/// Carries the 1-based line number of the offending line. Any variant means
/// the file as a whole is not supported; the parser never returns a partial
/// record list.
#[derive(Debug, Clone)]
pub enum ParseError {
    /// Line failed to decode as JSON.
    InvalidJson { line: usize, detail: String },
    /// Line decoded to something other than a JSON object.
    NotAnObject { line: usize },
    /// Line object is missing a required field, or the field has the wrong
    /// type (`entityType` string, `data` object, `data.name` string).
    InvalidField {
        line: usize,
        field: &'static str,
        expected: &'static str,
    },
}

impl ParseError {
    /// 1-based input line the error was raised on.
    pub fn line(&self) -> usize {
        match self {
            ParseError::InvalidJson { line, .. } => *line,
            ParseError::NotAnObject { line } => *line,
            ParseError::InvalidField { line, .. } => *line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::InvalidJson { line, detail } => {
                write!(f, "file not supported: line {}: invalid JSON: {}", line, detail)
            }
            ParseError::NotAnObject { line } => {
                write!(f, "file not supported: line {}: expected a JSON object", line)
            }
            ParseError::InvalidField { line, field, expected } => {
                write!(
                    f,
                    "file not supported: line {}: field '{}' missing or not {}",
                    line, field, expected
                )
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse raw export file text into records.
///
/// Splits on newlines, strips one trailing carriage return per line, trims
/// surrounding whitespace, and decodes each remaining line as one record.
/// Lines that are empty after trimming are skipped. Parsing is atomic: the
/// first bad line aborts with a [`ParseError`] and no records are returned.
///
/// Unknown `entityType` tags are accepted and preserved as opaque strings;
/// they simply never match a category.
///
/// # Arguments
/// * `text` - Full file contents
///
/// # Returns
/// Records in original line order; an empty input yields an empty vec.
///
/// # Example
/// ```
/// use winnower::parser::parse;
///
/// let records = parse(r#"{"entityType":"objects","data":{"name":"Account"}}"#).unwrap();
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].name(), Some("Account"));
/// ```
pub fn parse(text: &str) -> Result<Vec<Record>, ParseError> {
    let mut records = Vec::new();

    for (index, raw_line) in text.split('\n').enumerate() {
        let line_number = index + 1;
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line).trim();
        if line.is_empty() {
            continue;
        }

        records.push(parse_line(line, line_number)?);
    }

    tracing::debug!(records = records.len(), "parsed export file");
    Ok(records)
}

/// Decode a single trimmed, non-empty line into a record.
fn parse_line(line: &str, line_number: usize) -> Result<Record, ParseError> {
    let value: JsonValue = serde_json::from_str(line).map_err(|e| ParseError::InvalidJson {
        line: line_number,
        detail: e.to_string(),
    })?;

    let mut object = match value {
        JsonValue::Object(object) => object,
        _ => return Err(ParseError::NotAnObject { line: line_number }),
    };

    let entity_type = match object.remove("entityType") {
        Some(JsonValue::String(tag)) => tag,
        _ => {
            return Err(ParseError::InvalidField {
                line: line_number,
                field: "entityType",
                expected: "a string",
            })
        }
    };

    let data = match object.remove("data") {
        Some(data @ JsonValue::Object(_)) => data,
        _ => {
            return Err(ParseError::InvalidField {
                line: line_number,
                field: "data",
                expected: "an object",
            })
        }
    };

    if !data.get("name").map_or(false, JsonValue::is_string) {
        return Err(ParseError::InvalidField {
            line: line_number,
            field: "data.name",
            expected: "a string",
        });
    }

    Ok(Record {
        entity_type,
        data,
        extra: object,
    })
}
