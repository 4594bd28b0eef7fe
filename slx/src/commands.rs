//! CLI command implementations.

use sluice::{
    pipeline, query, Config, FileSink, FileSource, RecordReader, RecordStore, Result, UserStore,
};

/// Initialize the root directory, database schema, and config file.
pub fn init() -> Result<()> {
    let config = Config::load()?;
    std::fs::create_dir_all(&config.root)?;

    let store = UserStore::open(config.db_path())?;
    store.init_schema()?;
    config.save()?;

    println!("Initialized sluice store at {}", config.root.display());
    Ok(())
}

/// Import records from `source` into the store in batches.
pub fn import(source: &str) -> Result<()> {
    let config = Config::load()?;
    let store = UserStore::open(config.db_path())?;
    store.init_schema()?;

    let file = FileSource::open(source, config.chunk_size)?;
    let mut reader = RecordReader::new(file, config.capture_depth);
    let imported = pipeline::import(&mut reader, &store, config.batch_size)?;

    if !reader.residue().is_empty() {
        eprintln!(
            "Warning: {} bytes of unparsed input left at end of {}",
            reader.residue().len(),
            source
        );
    }
    reader.close();

    println!("Imported {} users from {}", imported, source);
    Ok(())
}

/// Export records matching `expression` to `target` as an XML document.
pub fn filter(expression: &str, target: &str) -> Result<()> {
    // Compile before touching the target so a bad expression writes nothing.
    let criterion = query::compile(expression)?;

    let config = Config::load()?;
    let store = UserStore::open(config.db_path())?;
    store.init_schema()?;

    let mut sink = FileSink::create(target)?;
    let written = pipeline::export(&store, &criterion, &mut sink, &config.indent)?;

    println!("Wrote {} users matching '{}' to {}", written, expression, target);
    Ok(())
}

/// Generate a sample source document at `target`.
pub fn generate(target: &str, count: u64, pretty: bool) -> Result<()> {
    sluice::generate::generate_source_file(target, count, pretty)?;
    println!("Generated {} users at {}", count, target);
    Ok(())
}

/// Delete all imported records.
pub fn clean() -> Result<()> {
    let config = Config::load()?;
    let store = UserStore::open(config.db_path())?;
    store.init_schema()?;
    store.truncate()?;

    println!("Removed all imported users");
    Ok(())
}
