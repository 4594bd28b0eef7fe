//! Byte sources and sinks for the streaming pipeline.
//!
//! A [`ChunkSource`] hands out sequential byte chunks with no alignment to
//! XML token boundaries; a [`ChunkSink`] accepts sequential appends. The file
//! implementations release their handles on drop.

use std::collections::VecDeque;
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use crate::{Error, Result};

/// Produces sequential byte chunks until exhausted.
pub trait ChunkSource {
    /// Next chunk, or `None` once the source is exhausted.
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>>;
}

/// Accepts sequential appends to a destination.
pub trait ChunkSink {
    fn append(&mut self, data: &str) -> Result<()>;

    /// Flush and release the destination.
    fn close(&mut self) -> Result<()>;
}

impl<T: ChunkSink + ?Sized> ChunkSink for &mut T {
    fn append(&mut self, data: &str) -> Result<()> {
        (**self).append(data)
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}

/// Reads a file in fixed-size chunks.
pub struct FileSource {
    file: File,
    chunk_size: usize,
}

impl FileSource {
    /// Open a file for chunked reading.
    pub fn open(path: impl AsRef<Path>, chunk_size: usize) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::SourceUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self { file, chunk_size })
    }
}

impl ChunkSource for FileSource {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        let mut chunk = vec![0u8; self.chunk_size];
        let n = self.file.read(&mut chunk)?;
        if n == 0 {
            return Ok(None);
        }
        chunk.truncate(n);
        Ok(Some(chunk))
    }
}

/// Buffered writes to a created (or truncated) file.
pub struct FileSink {
    writer: BufWriter<File>,
}

impl FileSink {
    /// Create the target file, truncating any previous contents.
    pub fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::SinkUnavailable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self {
            writer: BufWriter::new(file),
        })
    }
}

impl ChunkSink for FileSink {
    fn append(&mut self, data: &str) -> Result<()> {
        self.writer.write_all(data.as_bytes())?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// In-memory source replaying a caller-chosen chunking of a document.
pub struct MemorySource {
    chunks: VecDeque<Vec<u8>>,
}

impl MemorySource {
    /// Deliver the whole document as one chunk.
    pub fn new(document: impl Into<Vec<u8>>) -> Self {
        Self {
            chunks: VecDeque::from([document.into()]),
        }
    }

    /// Deliver pre-cut chunks in order.
    pub fn with_chunks(chunks: Vec<Vec<u8>>) -> Self {
        Self {
            chunks: chunks.into(),
        }
    }

    /// Cut a document into chunks of at most `chunk_size` bytes.
    pub fn split(document: &[u8], chunk_size: usize) -> Self {
        Self {
            chunks: document.chunks(chunk_size.max(1)).map(<[u8]>::to_vec).collect(),
        }
    }
}

impl ChunkSource for MemorySource {
    fn next_chunk(&mut self) -> Result<Option<Vec<u8>>> {
        Ok(self.chunks.pop_front())
    }
}

/// In-memory sink collecting everything appended to it.
#[derive(Debug, Default)]
pub struct MemorySink {
    data: String,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.data
    }

    pub fn into_string(self) -> String {
        self.data
    }
}

impl ChunkSink for MemorySink {
    fn append(&mut self, data: &str) -> Result<()> {
        self.data.push_str(data);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
