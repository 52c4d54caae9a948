//! NDJSON serialization for export records.
//!
//! Writes records back out as newline-delimited JSON, one record per line,
//! using the same encoding the parser reads.

use std::io::Write;

use crate::record::Record;

/// Error type for serialization operations
#[derive(Debug)]
pub enum SerializationError {
    JsonError(serde_json::Error),
    IoError(std::io::Error),
}

impl From<serde_json::Error> for SerializationError {
    fn from(err: serde_json::Error) -> Self {
        SerializationError::JsonError(err)
    }
}

impl From<std::io::Error> for SerializationError {
    fn from(err: std::io::Error) -> Self {
        SerializationError::IoError(err)
    }
}

impl std::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SerializationError::JsonError(e) => write!(f, "JSON error: {}", e),
            SerializationError::IoError(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for SerializationError {}

/// NDJSON (Newline Delimited JSON) record writer
///
/// Writes records one JSON object per line, preserving each record's
/// original field structure.
pub struct NdjsonWriter<W: Write> {
    writer: W,
}

impl<W: Write> NdjsonWriter<W> {
    /// Create a new NDJSON writer
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write a single record as an NDJSON line
    pub fn write(&mut self, record: &Record) -> Result<(), SerializationError> {
        let json = serde_json::to_string(record)?;
        writeln!(self.writer, "{}", json)?;
        Ok(())
    }

    /// Write multiple records in order
    pub fn write_all<'a, I>(&mut self, records: I) -> Result<(), SerializationError>
    where
        I: IntoIterator<Item = &'a Record>,
    {
        for record in records {
            self.write(record)?;
        }
        Ok(())
    }

    /// Flush the underlying writer
    pub fn flush(&mut self) -> Result<(), SerializationError> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Serialize records to an NDJSON string.
///
/// Empty input yields an empty string.
pub fn to_ndjson_string<'a, I>(records: I) -> Result<String, SerializationError>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut buf = Vec::new();
    let mut writer = NdjsonWriter::new(&mut buf);
    writer.write_all(records)?;
    writer.flush()?;

    // serde_json output is always valid UTF-8
    String::from_utf8(buf).map_err(|e| {
        SerializationError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
