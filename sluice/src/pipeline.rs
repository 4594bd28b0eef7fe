//! Import and export flows tying the streaming layers together.

use crate::query::Criterion;
use crate::reader::RecordReader;
use crate::schema::UserRecord;
use crate::store::RecordStore;
use crate::stream::{ChunkSink, ChunkSource};
use crate::writer::RecordWriter;
use crate::Result;

pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Stream records from `reader` into `store` in batches of `batch_size`.
///
/// Fragments that do not decode as records are skipped. Returns the number
/// of records imported; a failed batch insert aborts the import with that
/// batch uncommitted.
pub fn import<S, R>(reader: &mut RecordReader<S>, store: &R, batch_size: usize) -> Result<u64>
where
    S: ChunkSource,
    R: RecordStore,
{
    let batch_size = batch_size.max(1);
    let mut batch = Vec::with_capacity(batch_size);
    let mut imported = 0u64;

    while let Some(node) = reader.next_record()? {
        if let Some(user) = UserRecord::from_xml(&node) {
            batch.push(user);
            imported += 1;
            if batch.len() == batch_size {
                store.insert_batch(&batch)?;
                batch.clear();
            }
        }
    }

    if !batch.is_empty() {
        store.insert_batch(&batch)?;
    }
    Ok(imported)
}

/// Stream records matching `criterion` out of `store` into `sink` as a
/// complete XML document. Returns the number of records written.
pub fn export<R, K>(store: &R, criterion: &Criterion, sink: &mut K, indent: &str) -> Result<u64>
where
    R: RecordStore,
    K: ChunkSink,
{
    let mut writer = RecordWriter::new(sink);
    writer.begin_document()?;
    let written = store.for_each_matching(criterion, |user| writer.write_record(&user, indent))?;
    writer.end_document()?;
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::compile;
    use crate::store::{MemoryStore, UserStore};
    use crate::stream::{MemorySink, MemorySource};
    use crate::Error;

    fn document(count: usize) -> String {
        let mut doc = String::from("<users>");
        for i in 1..=count {
            doc.push_str(&format!(
                "<user><id>{0}</id><name>User {0}</name>\
                 <email>user{0}@mail.com</email><age>{1}</age></user>",
                i,
                20 + (i - 1) * 10
            ));
        }
        doc.push_str("</users>");
        doc
    }

    fn reader_for(doc: &str) -> RecordReader<MemorySource> {
        RecordReader::new(MemorySource::new(doc), 2)
    }

    #[test]
    fn test_import_batches_and_remainder() {
        let store = MemoryStore::new();
        let mut reader = reader_for(&document(5));

        let imported = import(&mut reader, &store, 2).unwrap();
        assert_eq!(imported, 5);
        assert_eq!(store.batch_sizes(), vec![2, 2, 1]);
        assert_eq!(store.records()[0].id, "1");
        assert_eq!(store.records()[4].id, "5");
    }

    #[test]
    fn test_import_exact_multiple_has_no_remainder_batch() {
        let store = MemoryStore::new();
        let mut reader = reader_for(&document(4));

        assert_eq!(import(&mut reader, &store, 2).unwrap(), 4);
        assert_eq!(store.batch_sizes(), vec![2, 2]);
    }

    #[test]
    fn test_import_skips_undecodable_fragments() {
        let doc = "<users><user><id>1</id></user><item><id>9</id></item>\
                   <user><id>2</id></user></users>";
        let store = MemoryStore::new();
        let mut reader = reader_for(doc);

        assert_eq!(import(&mut reader, &store, 10).unwrap(), 2);
        let ids: Vec<_> = store.records().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["1", "2"]);
    }

    #[test]
    fn test_export_counts_and_shapes_document() {
        let store = MemoryStore::new();
        store
            .insert_batch(&[
                UserRecord::new("1", "A", "user1@mail.com", "20"),
                UserRecord::new("2", "B", "user2@mail.com", "30"),
                UserRecord::new("3", "C", "user3@mail.com", "40"),
            ])
            .unwrap();

        let criterion = compile("age >= 30").unwrap();
        let mut sink = MemorySink::new();
        let written = export(&store, &criterion, &mut sink, "").unwrap();

        assert_eq!(written, 2);
        let output = sink.into_string();
        assert!(output.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<users>\n"));
        assert!(output.ends_with("</users>"));
        assert!(output.contains("<id>2</id>"));
        assert!(output.contains("<id>3</id>"));
        assert!(!output.contains("<id>1</id>"));
    }

    #[test]
    fn test_duckdb_import_reimport_export_cycle() {
        let store = UserStore::open_in_memory().unwrap();
        store.init_schema().unwrap();

        let doc = document(3);
        assert_eq!(import(&mut reader_for(&doc), &store, 100).unwrap(), 3);
        assert_eq!(store.count().unwrap(), 3);

        let result = import(&mut reader_for(&doc), &store, 100);
        assert!(matches!(result, Err(Error::ConstraintViolation(_))));

        let criterion = compile("age btw 20 30").unwrap();
        let mut sink = MemorySink::new();
        let written = export(&store, &criterion, &mut sink, "    ").unwrap();
        assert_eq!(written, 2);
        assert!(sink.as_str().contains("    <user>\n"));
    }
}
