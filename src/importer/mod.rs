//! Turns tokenized seed rows into inventory objects.
//!
//! Every row yields exactly one `(line_number, outcome)` pair. Row-level
//! failures are captured in the outcome rather than ending the run, so a
//! caller can report all bad lines of a file in one pass.

mod entities;
mod error;

use crate::bulkparse::{ImportKind, ParseError, RawValue, Row};
use crate::inventory::Inventory;
use crate::models::Record;

pub use error::ImportError;

/// Objects built from one row, or the reason there are none
pub type RowOutcome = Result<Vec<Record>, ImportError>;

/// Upstream source of tokenized rows, tagged with their line numbers
pub trait RowSource {
    fn next_row(&mut self) -> Option<(usize, Result<Row, ParseError>)>;
}

impl<I> RowSource for I
where
    I: Iterator<Item = (usize, Result<Row, ParseError>)>,
{
    fn next_row(&mut self) -> Option<(usize, Result<Row, ParseError>)> {
        self.next()
    }
}

/// Pulls rows from a `RowSource` and builds them against an inventory.
///
/// The importer never writes to the inventory. To make objects from one row
/// visible to the next, the caller persists them through `store_mut()`
/// between calls to `advance()`.
pub struct SeedImporter<P, S> {
    kind: ImportKind,
    rows: P,
    store: S,
}

impl<P: RowSource, S: Inventory> SeedImporter<P, S> {
    pub fn new(kind: ImportKind, rows: P, store: S) -> Self {
        Self { kind, rows, store }
    }

    /// Process the next row. `None` once the source is exhausted.
    pub fn advance(&mut self) -> Option<(usize, RowOutcome)> {
        let (line, parsed) = self.rows.next_row()?;
        let outcome = parsed
            .map_err(ImportError::from)
            .and_then(decode)
            .and_then(|row| build(self.kind, &row, &self.store));

        match &outcome {
            Ok(objects) => tracing::debug!(line, kind = %self.kind, "Built {} objects", objects.len()),
            Err(e) => tracing::debug!(line, kind = %self.kind, "Row rejected: {}", e),
        }
        Some((line, outcome))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }
}

impl<P: RowSource, S: Inventory> Iterator for SeedImporter<P, S> {
    type Item = (usize, RowOutcome);

    fn next(&mut self) -> Option<Self::Item> {
        self.advance()
    }
}

/// Decode every raw byte value in the row as UTF-8 text
pub fn decode(row: Row) -> Result<Row, ImportError> {
    row.into_fields()
        .into_iter()
        .map(|(column, value)| {
            let decoded = decode_value(value).map_err(|_| ImportError::Decode {
                column: column.clone(),
            })?;
            Ok((column, decoded))
        })
        .collect()
}

fn decode_value(value: RawValue) -> Result<RawValue, std::string::FromUtf8Error> {
    Ok(match value {
        RawValue::Bytes(bytes) => RawValue::Text(String::from_utf8(bytes)?),
        RawValue::List(items) => RawValue::List(
            items
                .into_iter()
                .map(decode_value)
                .collect::<Result<Vec<_>, _>>()?,
        ),
        other => other,
    })
}

/// Build the objects for one row of the given kind
pub fn build<S: Inventory + ?Sized>(kind: ImportKind, row: &Row, store: &S) -> RowOutcome {
    match kind {
        ImportKind::Netbox => entities::netbox(row, store),
        ImportKind::Location => entities::location(row, store),
        ImportKind::Room => entities::room(row, store),
        ImportKind::Org => entities::organization(row, store),
        ImportKind::Prefix => entities::prefix(row, store),
        ImportKind::Usage => entities::usage(row, store),
        ImportKind::NetboxType => entities::netbox_type(row, store),
        ImportKind::Vendor => entities::vendor(row, store),
        ImportKind::Subcat => entities::subcategory(row, store),
        ImportKind::Cabling => entities::cabling(row, store),
        ImportKind::Patch => entities::patch(row, store),
    }
}

#[cfg(test)]
mod tests;
