//! Streaming XML document assembly.

use crate::schema::{UserRecord, ROOT_ELEMENT};
use crate::stream::ChunkSink;
use crate::Result;

/// Declaration written at the top of every exported document.
pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

/// Writes a well-formed document one record at a time.
///
/// Call order is `begin_document`, any number of `write_record`, then
/// `end_document`, which consumes the writer and closes the sink.
pub struct RecordWriter<S> {
    sink: S,
}

impl<S: ChunkSink> RecordWriter<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Write the declaration and open the root element.
    pub fn begin_document(&mut self) -> Result<()> {
        self.sink.append(XML_DECLARATION)?;
        self.sink.append("\n")?;
        self.sink.append(&format!("<{}>\n", ROOT_ELEMENT))
    }

    pub fn write_record(&mut self, record: &UserRecord, indent: &str) -> Result<()> {
        self.sink.append(&record.to_xml(indent))
    }

    /// Close the root element, then flush and release the sink.
    pub fn end_document(mut self) -> Result<()> {
        self.sink.append(&format!("</{}>", ROOT_ELEMENT))?;
        self.sink.close()
    }
}
