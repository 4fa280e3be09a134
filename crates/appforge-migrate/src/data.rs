//! Applying data migrations to stored records
//!
//! The engines only *describe* the reshape; this module executes it against
//! a record set the host hands over. A full pass is fine for sample-sized
//! data. For large stored datasets use [`DataBatchApplier`], which processes
//! bounded batches behind a cursor the host can persist, so an interrupted
//! migration resumes where it stopped instead of restarting.

use crate::migration::DataMigration;
use appforge_schema::Record;

/// Reshape every record in one pass
pub fn apply_to_records(migration: &DataMigration, records: &mut [Record]) {
    for record in records.iter_mut() {
        apply_to_record(migration, record);
    }
}

/// Reshape a single record
pub fn apply_to_record(migration: &DataMigration, record: &mut Record) {
    match migration {
        DataMigration::AddFieldToRecords { field, default, .. } => {
            // Backfill only; a record that somehow already carries the field
            // keeps its value.
            if !record.contains_key(field) {
                record.insert(field.clone(), default.clone());
            }
        }
        DataMigration::RemoveFieldFromRecords { field, .. } => {
            record.shift_remove(field);
        }
        DataMigration::TransformFieldData {
            field, transform, ..
        } => {
            if let Some(value) = record.get_mut(field) {
                *value = transform(value);
            }
        }
    }
}

/// Cursor-driven batch applier for large record sets
#[derive(Debug, Clone, Copy)]
pub struct DataBatchApplier {
    batch_size: usize,
}

impl DataBatchApplier {
    /// Create an applier; a zero batch size is clamped to one
    #[inline]
    #[must_use]
    pub fn new(batch_size: usize) -> Self {
        Self {
            batch_size: batch_size.max(1),
        }
    }

    /// Apply one batch starting at `cursor`
    ///
    /// Returns the cursor for the next batch, or `None` once every record is
    /// processed. Safe to interrupt between calls; the caller persists the
    /// cursor alongside the records.
    #[must_use]
    pub fn apply_next(
        &self,
        migration: &DataMigration,
        records: &mut [Record],
        cursor: usize,
    ) -> Option<usize> {
        if cursor >= records.len() {
            return None;
        }
        let end = (cursor + self.batch_size).min(records.len());
        for record in &mut records[cursor..end] {
            apply_to_record(migration, record);
        }
        tracing::debug!(from = cursor, to = end, total = records.len(), "data migration batch applied");
        if end < records.len() {
            Some(end)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms;
    use appforge_schema::FieldType;
    use serde_json::json;

    fn records(n: usize) -> Vec<Record> {
        (0..n)
            .map(|i| {
                let mut record = Record::new();
                record.insert("id".to_string(), json!(format!("r{i}")));
                record.insert("total".to_string(), json!(i * 10));
                record
            })
            .collect()
    }

    #[test]
    fn backfill_adds_only_missing_fields() {
        let mut rows = records(2);
        rows[0].insert("notes".to_string(), json!("keep me"));

        let migration = DataMigration::AddFieldToRecords {
            entity: "order".to_string(),
            field: "notes".to_string(),
            default: json!(""),
        };
        apply_to_records(&migration, &mut rows);

        assert_eq!(rows[0]["notes"], json!("keep me"));
        assert_eq!(rows[1]["notes"], json!(""));
    }

    #[test]
    fn removal_drops_the_field_everywhere() {
        let mut rows = records(3);
        let migration = DataMigration::RemoveFieldFromRecords {
            entity: "order".to_string(),
            field: "total".to_string(),
        };
        apply_to_records(&migration, &mut rows);
        assert!(rows.iter().all(|r| !r.contains_key("total")));
    }

    #[test]
    fn transform_rewrites_stored_values() {
        let mut rows = vec![{
            let mut record = Record::new();
            record.insert("total".to_string(), json!(42));
            record
        }];
        let migration = DataMigration::TransformFieldData {
            entity: "order".to_string(),
            field: "total".to_string(),
            transform: transforms::transform_for(FieldType::Number, FieldType::String).unwrap(),
        };
        apply_to_records(&migration, &mut rows);
        assert_eq!(rows[0]["total"], json!("42"));
    }

    #[test]
    fn batch_applier_walks_the_cursor_to_completion() {
        let mut rows = records(10);
        let migration = DataMigration::RemoveFieldFromRecords {
            entity: "order".to_string(),
            field: "total".to_string(),
        };
        let applier = DataBatchApplier::new(4);

        let mut cursor = 0;
        let mut batches = 0;
        loop {
            batches += 1;
            match applier.apply_next(&migration, &mut rows, cursor) {
                Some(next) => cursor = next,
                None => break,
            }
        }

        assert_eq!(batches, 3);
        assert!(rows.iter().all(|r| !r.contains_key("total")));
    }

    #[test]
    fn batch_applier_resumes_mid_stream() {
        let mut rows = records(6);
        let migration = DataMigration::AddFieldToRecords {
            entity: "order".to_string(),
            field: "flag".to_string(),
            default: json!(true),
        };
        let applier = DataBatchApplier::new(2);

        // Two batches, then "interrupt" and resume from the saved cursor.
        let cursor = applier.apply_next(&migration, &mut rows, 0).unwrap();
        let cursor = applier.apply_next(&migration, &mut rows, cursor).unwrap();
        assert_eq!(cursor, 4);
        assert!(rows[3].contains_key("flag"));
        assert!(!rows[4].contains_key("flag"));

        assert_eq!(applier.apply_next(&migration, &mut rows, cursor), None);
        assert!(rows[5].contains_key("flag"));
    }

    #[test]
    fn empty_record_set_is_done_immediately() {
        let migration = DataMigration::RemoveFieldFromRecords {
            entity: "order".to_string(),
            field: "total".to_string(),
        };
        assert_eq!(
            DataBatchApplier::new(8).apply_next(&migration, &mut [], 0),
            None
        );
    }
}
