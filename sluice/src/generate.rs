//! Sample source document generation.

use std::path::Path;

use rand::Rng;

use crate::schema::UserRecord;
use crate::stream::{ChunkSink, FileSink};
use crate::writer::RecordWriter;
use crate::Result;

const NAMES: [&str; 8] = [
    "Christopher",
    "Ryan",
    "Ethan",
    "John",
    "Zoey",
    "Sarah",
    "Michelle",
    "Samantha",
];

const SURNAMES: [&str; 10] = [
    "Walker",
    "Thompson",
    "Anderson",
    "Johnson",
    "Tremblay",
    "Peltier",
    "Cunningham",
    "Simpson",
    "Mercado",
    "Sellers",
];

/// Write a generated source document with `count` users to `path`.
pub fn generate_source_file(path: impl AsRef<Path>, count: u64, pretty: bool) -> Result<()> {
    let mut sink = FileSink::create(path)?;
    generate_into(&mut sink, count, pretty)
}

/// Generate `count` users into any sink. Ids are sequential from 1; names
/// and ages are random.
pub fn generate_into<S: ChunkSink>(sink: &mut S, count: u64, pretty: bool) -> Result<()> {
    let indent = if pretty { "    " } else { "" };
    let mut rng = rand::thread_rng();

    let mut writer = RecordWriter::new(sink);
    writer.begin_document()?;
    for i in 0..count {
        let id = i + 1;
        let name = format!(
            "{} {}",
            NAMES[rng.gen_range(0..NAMES.len())],
            SURNAMES[rng.gen_range(0..SURNAMES.len())]
        );
        let user = UserRecord::new(
            id.to_string(),
            name,
            format!("user{}@mail.com", id),
            rng.gen_range(18..=50).to_string(),
        );
        writer.write_record(&user, indent)?;
    }
    writer.end_document()
}
