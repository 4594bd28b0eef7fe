//! Pull-based record reading over a chunk source.

use crate::stream::ChunkSource;
use crate::tokenizer::ChunkTokenizer;
use crate::Result;

/// Streams whole record elements out of a chunk source.
///
/// Owns the source and the tokenizer state for one pass over one document.
pub struct RecordReader<S> {
    source: S,
    tokenizer: ChunkTokenizer,
}

impl<S: ChunkSource> RecordReader<S> {
    pub fn new(source: S, capture_depth: i32) -> Self {
        Self {
            source,
            tokenizer: ChunkTokenizer::new(capture_depth),
        }
    }

    /// Next complete record element, or `None` once the source is exhausted.
    pub fn next_record(&mut self) -> Result<Option<String>> {
        self.tokenizer.next_record(&mut self.source)
    }

    /// Bytes left untokenized after exhaustion.
    pub fn residue(&self) -> &[u8] {
        self.tokenizer.residue()
    }

    /// Consume the reader, releasing the source.
    pub fn close(self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::MemorySource;

    #[test]
    fn test_reader_streams_records() {
        let doc = "<users><user><id>1</id></user><user><id>2</id></user></users>";
        let mut reader = RecordReader::new(MemorySource::new(doc), 2);

        assert_eq!(
            reader.next_record().unwrap(),
            Some("<user><id>1</id></user>".to_string())
        );
        assert_eq!(
            reader.next_record().unwrap(),
            Some("<user><id>2</id></user>".to_string())
        );
        assert_eq!(reader.next_record().unwrap(), None);
        assert!(reader.residue().is_empty());
    }

    #[test]
    fn test_reader_exhaustion_is_sticky() {
        let mut reader = RecordReader::new(MemorySource::new("<users></users>"), 2);
        assert_eq!(reader.next_record().unwrap(), None);
        assert_eq!(reader.next_record().unwrap(), None);
    }
}
