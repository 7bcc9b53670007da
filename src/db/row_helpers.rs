use anyhow::{Context, Result};
use sqlx::{Row, sqlite::SqliteRow};

use crate::models::*;

/// Filter empty strings to None — used when DB stores '' instead of NULL
pub fn none_if_empty(opt: Option<String>) -> Option<String> {
    opt.filter(|s| !s.is_empty())
}

/// Map an inventory_records row to a Record
pub fn map_record_row(row: &SqliteRow) -> Result<Record> {
    let kind: String = row.get("kind");
    let pk: String = row.get("pk");
    let data: String = row.get("data");
    let record: Record = serde_json::from_str(&data)
        .with_context(|| format!("Corrupt {} record {}", kind, pk))?;

    let stored_kind: EntityKind = kind.parse().map_err(|e: String| anyhow::anyhow!(e))?;
    if record.kind() != stored_kind {
        anyhow::bail!("Record {} is stored as {} but contains {}", pk, stored_kind, record.kind());
    }
    Ok(record)
}

/// Primary key to store a record under
pub fn record_pk(record: &Record) -> Result<String> {
    none_if_empty(record.pk())
        .with_context(|| format!("{} record has no primary key", record.kind()))
}
