//! Loading part batches from JSON

use anyhow::Context;
use partsort_core::PartRecord;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Read a JSON array of part records
pub fn read_records<R: Read>(reader: R) -> anyhow::Result<Vec<PartRecord>> {
    let records: Vec<PartRecord> =
        serde_json::from_reader(reader).context("expected a JSON array of part records")?;
    Ok(records)
}

/// Read a JSON array of part records from a file
pub fn load_records(path: impl AsRef<Path>) -> anyhow::Result<Vec<PartRecord>> {
    let path = path.as_ref();
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    read_records(BufReader::new(file)).with_context(|| format!("failed to parse {}", path.display()))
}
