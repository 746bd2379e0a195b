use crate::file::csv::{error::FileError, settings::CsvSettings};
use model::records::RecordSet;
use std::path::Path;

/// Writer for a headered CSV artifact.
pub struct CsvSink;

impl CsvSink {
    /// Writes the header row followed by every record, overwriting any
    /// existing file. Absent cells are written as empty fields.
    pub fn write(path: &Path, set: &RecordSet, settings: CsvSettings) -> Result<(), FileError> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(settings.delimiter as u8)
            .from_path(path)?;
        writer.write_record(set.header().columns())?;
        for record in set.records() {
            writer.write_record(record.cells().iter().map(|c| c.as_deref().unwrap_or("")))?;
        }
        writer.flush()?;
        Ok(())
    }
}
