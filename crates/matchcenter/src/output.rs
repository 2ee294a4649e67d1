//! CSV persistence for scraped match records.
//!
//! Files carry a header row with the Arabic field names followed by one row
//! per match, UTF-8 encoded.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::types::MatchRecord;

/// Default file name the CLI writes to.
pub const DEFAULT_CSV_PATH: &str = "matches-details.csv";

#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("No matches to write")]
    Empty,
}

pub fn write_csv<W: Write>(writer: W, records: &[MatchRecord]) -> Result<(), OutputError> {
    let mut writer = csv::Writer::from_writer(writer);
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes `records` to `path`, replacing whatever was there.
///
/// An empty slice is refused before the file is touched.
pub fn save_csv(path: impl AsRef<Path>, records: &[MatchRecord]) -> Result<(), OutputError> {
    if records.is_empty() {
        return Err(OutputError::Empty);
    }
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(file, records)?;
    log::info!("Wrote {} matches to {}", records.len(), path.display());
    Ok(())
}

pub fn read_csv<R: Read>(reader: R) -> Result<Vec<MatchRecord>, OutputError> {
    let mut reader = csv::Reader::from_reader(reader);
    let records = reader
        .deserialize()
        .collect::<Result<Vec<MatchRecord>, csv::Error>>()?;
    Ok(records)
}

pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<MatchRecord>, OutputError> {
    let path = path.as_ref();
    log::info!("Loading matches from {}", path.display());
    read_csv(File::open(path)?)
}
