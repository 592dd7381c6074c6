//! CSV import of state-change events.

use std::io::Read;
use std::path::Path;

use crate::profile::RawEvent;

/// Reads events from a CSV file with a `state,timestamp` header.
///
/// # Errors
///
/// Returns a `csv::Error` if the file cannot be opened or a row cannot be
/// deserialized.
pub fn read_events_csv(path: &Path) -> Result<Vec<RawEvent>, csv::Error> {
    let rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    collect_events(rdr)
}

/// Reads events from any CSV source with a `state,timestamp` header.
///
/// Values are kept untyped; state and timestamp validation happens when the
/// events become part of a [`RawProfile`](crate::profile::RawProfile).
///
/// # Errors
///
/// Returns a `csv::Error` if a row cannot be deserialized.
pub fn read_events(reader: impl Read) -> Result<Vec<RawEvent>, csv::Error> {
    let rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    collect_events(rdr)
}

fn collect_events<R: Read>(mut rdr: csv::Reader<R>) -> Result<Vec<RawEvent>, csv::Error> {
    rdr.deserialize().collect()
}
