//! Tokenizer for NAV seed files.
//!
//! One record per line, fields separated by `:`. Blank lines and lines
//! starting with `#` are skipped. Field values are kept as raw bytes;
//! decoding to text is left to the importer.

mod layouts;

use std::collections::BTreeMap;
use std::io::BufRead;

use thiserror::Error;

use crate::utils;

pub use layouts::{ImportKind, Layout};

/// A field value as it came out of the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Empty,
    Bytes(Vec<u8>),
    Text(String),
    List(Vec<RawValue>),
}

impl RawValue {
    pub fn is_blank(&self) -> bool {
        match self {
            RawValue::Empty => true,
            RawValue::Bytes(b) => b.iter().all(u8::is_ascii_whitespace),
            RawValue::Text(s) => s.trim().is_empty(),
            RawValue::List(items) => items.iter().all(RawValue::is_blank),
        }
    }

    /// Text view of a scalar value; `None` for blank values and lists
    pub fn as_text(&self) -> Option<&str> {
        let text = match self {
            RawValue::Text(s) => s.as_str(),
            RawValue::Bytes(b) => std::str::from_utf8(b).ok()?,
            RawValue::Empty | RawValue::List(_) => return None,
        };
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        RawValue::Text(value.to_string())
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(value: Vec<u8>) -> Self {
        RawValue::Bytes(value)
    }
}

impl From<Vec<&str>> for RawValue {
    fn from(values: Vec<&str>) -> Self {
        RawValue::List(values.into_iter().map(RawValue::from).collect())
    }
}

/// One tokenized record, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: BTreeMap<String, RawValue>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with(mut self, column: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(column, value.into());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: RawValue) {
        self.fields.insert(column.into(), value);
    }

    pub fn get(&self, column: &str) -> Option<&RawValue> {
        self.fields.get(column)
    }

    /// Non-blank text value of a column
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(RawValue::as_text)
    }

    /// Non-blank entries of a multi-valued column. A scalar counts as one entry.
    pub fn list(&self, column: &str) -> Vec<&str> {
        match self.get(column) {
            Some(RawValue::List(items)) => items.iter().filter_map(RawValue::as_text).collect(),
            Some(other) => other.as_text().into_iter().collect(),
            None => vec![],
        }
    }

    pub fn into_fields(self) -> BTreeMap<String, RawValue> {
        self.fields
    }
}

impl FromIterator<(String, RawValue)> for Row {
    fn from_iter<I: IntoIterator<Item = (String, RawValue)>>(iter: I) -> Self {
        Row {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A line that could not be turned into a row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("required field {field} is missing")]
    RequiredFieldMissing { field: String },
    #[error("too many fields for {kind}: expected at most {max}, got {got}")]
    TooManyFields { kind: ImportKind, max: usize, got: usize },
    #[error("invalid value for {field}: {value:?}")]
    InvalidValue { field: String, value: String },
    #[error("could not read line: {0}")]
    Read(String),
}

/// Reads rows of one seed kind from a buffered reader.
///
/// Yields `(line_number, row)` pairs; line numbers are 1-based physical
/// lines, so skipped comments and blanks still count.
pub struct BulkParser<R> {
    reader: R,
    kind: ImportKind,
    line_num: usize,
    done: bool,
}

impl<R: BufRead> BulkParser<R> {
    pub fn new(reader: R, kind: ImportKind) -> Self {
        Self {
            reader,
            kind,
            line_num: 0,
            done: false,
        }
    }

    fn parse_line(&self, line: &[u8]) -> Result<Row, ParseError> {
        let layout = self.kind.layout();
        let fields: Vec<&[u8]> = line.split(|b| *b == b':').map(trim_bytes).collect();

        if layout.rest.is_none() && fields.len() > layout.columns.len() {
            return Err(ParseError::TooManyFields {
                kind: self.kind,
                max: layout.columns.len(),
                got: fields.len(),
            });
        }

        let mut row = Row::new();
        for (i, column) in layout.columns.iter().enumerate() {
            let value = fields.get(i).map(|f| raw_field(f)).unwrap_or(RawValue::Empty);
            if i < layout.required && value.is_blank() {
                return Err(ParseError::RequiredFieldMissing {
                    field: column.to_string(),
                });
            }
            validate_field(column, &value)?;
            row.insert(*column, value);
        }

        if let Some(rest) = layout.rest {
            let extra = fields
                .iter()
                .skip(layout.columns.len())
                .map(|f| raw_field(f))
                .collect();
            row.insert(rest, RawValue::List(extra));
        }

        Ok(row)
    }
}

impl<R: BufRead> Iterator for BulkParser<R> {
    type Item = (usize, Result<Row, ParseError>);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            let mut buf = Vec::new();
            match self.reader.read_until(b'\n', &mut buf) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line_num += 1;
                    let line = trim_bytes(&buf);
                    if line.is_empty() || line.starts_with(b"#") {
                        continue;
                    }
                    return Some((self.line_num, self.parse_line(line)));
                }
                Err(e) => {
                    self.done = true;
                    self.line_num += 1;
                    return Some((self.line_num, Err(ParseError::Read(e.to_string()))));
                }
            }
        }
        None
    }
}

fn raw_field(field: &[u8]) -> RawValue {
    if field.is_empty() {
        RawValue::Empty
    } else {
        RawValue::Bytes(field.to_vec())
    }
}

fn trim_bytes(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| !b.is_ascii_whitespace()).unwrap_or(bytes.len());
    let end = bytes.iter().rposition(|b| !b.is_ascii_whitespace()).map_or(start, |i| i + 1);
    &bytes[start..end]
}

/// Syntax checks for columns with a fixed format. Undecodable bytes are
/// left for the importer to reject.
fn validate_field(column: &str, value: &RawValue) -> Result<(), ParseError> {
    let Some(text) = value.as_text() else {
        return Ok(());
    };
    let valid = match column {
        "ip" => utils::is_valid_ip(text),
        "netaddr" => utils::is_valid_cidr(text),
        "vlan" => text.parse::<i32>().is_ok(),
        "cdp" | "tftp" => utils::parse_bool_word(text).is_some(),
        _ => true,
    };
    if valid {
        Ok(())
    } else {
        Err(ParseError::InvalidValue {
            field: column.to_string(),
            value: text.to_string(),
        })
    }
}
