//! Lookup capability the importer runs against, and the in-memory
//! implementation used both as the working set of an import run and in tests.

mod rebind;

use std::collections::{BTreeMap, HashMap};

use serde_json::Value;
use thiserror::Error;

use crate::importer::ImportError;
use crate::models::{EntityKind, LookupKeys, Record};

pub use rebind::rebind_foreign_keys;

/// Read access to the current inventory
pub trait Inventory {
    /// Rows of `kind` whose fields equal every key. No keys matches all rows.
    fn filter(&self, kind: EntityKind, keys: &LookupKeys) -> Vec<&Record>;

    fn exists(&self, kind: EntityKind, keys: &LookupKeys) -> bool {
        !self.filter(kind, keys).is_empty()
    }

    /// The single row matching `keys`; zero or several matches are errors
    fn get_exactly_one(&self, kind: EntityKind, keys: &LookupKeys) -> Result<&Record, ImportError> {
        let mut matches = self.filter(kind, keys).into_iter();
        match (matches.next(), matches.next()) {
            (Some(record), None) => Ok(record),
            (None, _) => Err(ImportError::DoesNotExist {
                kind,
                keys: keys.clone(),
            }),
            (Some(_), Some(_)) => Err(ImportError::MultipleObjectsReturned {
                kind,
                keys: keys.clone(),
            }),
        }
    }

    fn count(&self, kind: EntityKind) -> usize {
        self.filter(kind, &LookupKeys::new()).len()
    }
}

impl<T: Inventory + ?Sized> Inventory for &T {
    fn filter(&self, kind: EntityKind, keys: &LookupKeys) -> Vec<&Record> {
        (**self).filter(kind, keys)
    }
}

impl<T: Inventory + ?Sized> Inventory for &mut T {
    fn filter(&self, kind: EntityKind, keys: &LookupKeys) -> Vec<&Record> {
        (**self).filter(kind, keys)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PersistError {
    #[error("{kind} references object #{index} of its row, which was not saved before it")]
    DanglingReference { kind: EntityKind, index: usize },
    #[error("{kind} has no primary key")]
    MissingKey { kind: EntityKind },
    #[error("{kind} could not be indexed: {reason}")]
    Unindexable { kind: EntityKind, reason: String },
}

/// Rows of one kind, indexed by the JSON text of every field value.
///
/// Row positions in each posting list are ascending, as rows are only
/// ever appended.
#[derive(Debug, Clone, Default)]
struct Table {
    rows: Vec<Record>,
    index: HashMap<String, HashMap<String, Vec<usize>>>,
}

impl Table {
    fn push(&mut self, record: Record) -> Result<&Record, PersistError> {
        let kind = record.kind();
        let fields = match serde_json::to_value(&record) {
            Ok(Value::Object(fields)) => fields,
            Ok(other) => {
                return Err(PersistError::Unindexable {
                    kind,
                    reason: format!("expected an object, got {}", other),
                })
            }
            Err(e) => {
                return Err(PersistError::Unindexable {
                    kind,
                    reason: e.to_string(),
                })
            }
        };

        let position = self.rows.len();
        for (field, value) in fields {
            self.index
                .entry(field)
                .or_default()
                .entry(value.to_string())
                .or_default()
                .push(position);
        }
        self.rows.push(record);
        Ok(&self.rows[position])
    }

    fn postings(&self, field: &str, value: &Value) -> &[usize] {
        self.index
            .get(field)
            .and_then(|values| values.get(&value.to_string()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    fn lookup(&self, keys: &LookupKeys) -> Vec<&Record> {
        let postings: Vec<&[usize]> = keys.iter().map(|(field, value)| self.postings(field, value)).collect();
        let Some(shortest) = postings.iter().min_by_key(|p| p.len()) else {
            return self.rows.iter().collect();
        };

        shortest
            .iter()
            .copied()
            .filter(|position| postings.iter().all(|p| p.binary_search(position).is_ok()))
            .map(|position| &self.rows[position])
            .collect()
    }
}

/// Inventory held in memory, one table per entity kind
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: BTreeMap<EntityKind, Table>,
    last_id: BTreeMap<EntityKind, i64>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a row as-is, keeping any id it already has. Surrogate-keyed rows
    /// without an id get the next free one.
    pub fn insert(&mut self, mut record: Record) -> Result<&Record, PersistError> {
        let kind = record.kind();
        if kind.has_surrogate_key() {
            match record.id() {
                Some(id) => {
                    let last = self.last_id.entry(kind).or_insert(0);
                    *last = (*last).max(id);
                }
                None => {
                    let id = self.next_id(kind);
                    record.set_id(id);
                }
            }
        }
        if record.pk().is_none() {
            return Err(PersistError::MissingKey { kind });
        }

        self.tables.entry(kind).or_default().push(record)
    }

    /// Save the objects of one successful row, in order.
    ///
    /// Objects that already carry an id present in the store are reused and
    /// not inserted again. Pending references are rebound to the ids of the
    /// objects they point at before each object is saved. Returns the newly
    /// inserted rows.
    pub fn persist(&mut self, objects: Vec<Record>) -> Result<Vec<Record>, PersistError> {
        let mut saved_ids: Vec<Option<i64>> = Vec::with_capacity(objects.len());
        let mut created = Vec::new();

        for mut record in objects {
            if let Some(id) = record.id() {
                if self.contains_id(record.kind(), id) {
                    saved_ids.push(Some(id));
                    continue;
                }
            }
            rebind_foreign_keys(&mut record, &saved_ids)?;
            let stored = self.insert(record)?;
            saved_ids.push(stored.id());
            created.push(stored.clone());
        }

        tracing::debug!("Persisted {} new records", created.len());
        Ok(created)
    }

    fn contains_id(&self, kind: EntityKind, id: i64) -> bool {
        self.exists(kind, &LookupKeys::new().with("id", id))
    }

    fn next_id(&mut self, kind: EntityKind) -> i64 {
        let last = self.last_id.entry(kind).or_insert(0);
        *last += 1;
        *last
    }

    pub fn len(&self) -> usize {
        self.tables.values().map(|table| table.rows.len()).sum()
    }
}

impl Inventory for MemoryStore {
    fn filter(&self, kind: EntityKind, keys: &LookupKeys) -> Vec<&Record> {
        match self.tables.get(&kind) {
            Some(table) => table.lookup(keys),
            None => vec![],
        }
    }
}

impl FromIterator<Record> for MemoryStore {
    /// Build a store from fixture rows. Rows without a primary key are skipped.
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        let mut store = MemoryStore::new();
        for record in iter {
            if let Err(e) = store.insert(record) {
                tracing::warn!("Skipping fixture record: {}", e);
            }
        }
        store
    }
}
