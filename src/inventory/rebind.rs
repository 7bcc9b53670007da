use crate::models::{ObjectRef, Record};

use super::PersistError;

/// Re-set the pending references on `record` to the ids their targets got
/// when they were saved. `saved_ids[i]` is the id of the i-th object of the
/// row outcome, `None` if it has none (yet).
///
/// Must run right before `record` itself is saved.
pub fn rebind_foreign_keys(record: &mut Record, saved_ids: &[Option<i64>]) -> Result<(), PersistError> {
    let kind = record.kind();
    for reference in record.refs_mut() {
        if let ObjectRef::Pending { pending } = *reference {
            let id = saved_ids
                .get(pending)
                .copied()
                .flatten()
                .ok_or(PersistError::DanglingReference { kind, index: pending })?;
            *reference = ObjectRef::Saved(id);
        }
    }
    Ok(())
}
