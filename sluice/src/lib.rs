//! sluice: streaming XML record extraction and batched import/export.
//!
//! Reads an XML document as a sequence of byte chunks (never the whole file),
//! emits complete record elements at a fixed capture depth, and drives them
//! through a batched DuckDB store. Filtered records stream back out as XML.

pub mod config;
pub mod error;
pub mod generate;
pub mod pipeline;
pub mod query;
pub mod reader;
pub mod schema;
pub mod store;
pub mod stream;
pub mod tokenizer;
pub mod writer;

pub use config::Config;
pub use error::{Error, Result};
pub use query::{compile, Criterion, Operator};
pub use reader::RecordReader;
pub use schema::UserRecord;
pub use store::{RecordStore, UserStore};
pub use stream::{ChunkSink, ChunkSource, FileSink, FileSource, MemorySink, MemorySource};
pub use tokenizer::{ChunkTokenizer, TokenKind};
pub use writer::RecordWriter;
